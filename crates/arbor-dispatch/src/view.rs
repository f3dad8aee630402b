//! View contracts: renderables, the engine seam, and legacy fragments.

use std::collections::HashMap;

/// A renderable view handed to the view engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct View {
    /// View identifier resolved by the engine.
    pub name: String,
    /// Bindings available to the template.
    pub data: HashMap<String, serde_json::Value>,
    /// Headers contributed by this view.
    pub headers: HashMap<String, String>,
}

impl View {
    /// Create a view with the given identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Bind a value under the given key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Contribute a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Template engine seam.
///
/// Implementations live outside this crate; the dispatcher only needs
/// rendering and layout wrapping.
pub trait ViewEngine: Send + Sync {
    /// Render a view to its content.
    fn render(&self, view: &View) -> anyhow::Result<String>;

    /// Wrap already-rendered content in the named layout. The content is
    /// bound under the key `"content"`.
    fn wrap_in_layout(
        &self,
        layout: &str,
        template: &str,
        content: &str,
    ) -> anyhow::Result<String>;
}

/// Accumulator for legacy render fragments.
///
/// Older rendering code queues fragments across a request; when an action
/// produces nothing, the dispatcher concatenates them in accumulation
/// order.
pub trait FragmentAccumulator: Send + Sync {
    /// Pending fragments, in accumulation order.
    fn pending(&self) -> Vec<View>;

    /// Headers accumulated alongside the fragments.
    fn pending_headers(&self) -> HashMap<String, String>;
}

/// Accumulator with no legacy support: never has pending fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFragments;

impl FragmentAccumulator for NoFragments {
    fn pending(&self) -> Vec<View> {
        Vec::new()
    }

    fn pending_headers(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}
