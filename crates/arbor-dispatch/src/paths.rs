//! View path resolution.
//!
//! An explicit action-to-view mapping from configuration always wins.
//! Unmapped actions fall back to the namespace convention, which recognizes
//! exactly two shapes:
//!
//! ```text
//! app/controllers/<rest>              -> <rest>/<Action>
//! app/modules/<m>/controllers/<rest>  -> <rest>/<Action>   (module <m>)
//! ```

use std::collections::HashMap;

use crate::error::DispatchError;

/// A resolved view identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPath {
    /// View identifier for the engine.
    pub view: String,
    /// Owning module, for the modular shape.
    pub module: Option<String>,
}

/// Resolve the default view for an action.
///
/// Fails with `InvalidNamespace` when the action is unmapped and the
/// namespace matches neither recognized shape.
pub fn resolve_view_path(
    namespace: &str,
    views: &HashMap<String, String>,
    action: &str,
) -> Result<ViewPath, DispatchError> {
    if let Some(view) = views.get(action) {
        return Ok(ViewPath {
            view: view.clone(),
            module: None,
        });
    }

    let base = capitalize(action);

    if let Some(rest) = namespace.strip_prefix("app/controllers/") {
        return Ok(ViewPath {
            view: join(rest, &base),
            module: None,
        });
    }

    if let Some(rest) = namespace.strip_prefix("app/modules/") {
        if let Some((module, tail)) = rest.split_once("/controllers/") {
            if !module.is_empty() {
                return Ok(ViewPath {
                    view: join(tail, &base),
                    module: Some(module.to_string()),
                });
            }
        }
    }

    Err(DispatchError::InvalidNamespace(namespace.to_string()))
}

fn join(rest: &str, base: &str) -> String {
    if rest.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", rest, base)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
