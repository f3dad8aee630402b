//! Framework configuration.
//!
//! Loading these structures from disk is the surrounding application's
//! concern; this crate only defines their shape and defaults.

use std::collections::HashMap;

use serde::Deserialize;

use crate::context::Layout;
use crate::error::InvalidLottery;

/// Configuration for a dispatcher instance.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Template used when wrapping views in a layout.
    pub template: String,
    /// Layout selection.
    pub layout: Layout,
    /// Namespace of the dispatcher, used for conventional view-path
    /// resolution (e.g. "app/controllers/account").
    pub namespace: String,
    /// Explicit action-to-view mapping, consulted before the namespace
    /// convention.
    pub views: HashMap<String, String>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            template: "default".to_string(),
            layout: Layout::default(),
            namespace: "app/controllers/home".to_string(),
            views: HashMap::new(),
        }
    }
}

impl DispatchConfig {
    /// Create a configuration for the given namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    /// Set the template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Set the layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Map an action to an explicit view identifier.
    pub fn with_view(mut self, action: impl Into<String>, view: impl Into<String>) -> Self {
        self.views.insert(action.into(), view.into());
        self
    }
}

/// Odds for the garbage-collection lottery.
///
/// A draw fires with probability `numerator / denominator`. A numerator of
/// zero never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "(u32, u32)")]
pub struct Lottery {
    numerator: u32,
    denominator: u32,
}

impl Lottery {
    /// Create lottery odds.
    ///
    /// The denominator must be at least one and the numerator must not
    /// exceed it.
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, InvalidLottery> {
        if denominator == 0 || numerator > denominator {
            return Err(InvalidLottery {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// The numerator.
    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    /// The denominator.
    pub fn denominator(&self) -> u32 {
        self.denominator
    }
}

impl Default for Lottery {
    fn default() -> Self {
        // 2-in-100 chance per request.
        Self {
            numerator: 2,
            denominator: 100,
        }
    }
}

impl TryFrom<(u32, u32)> for Lottery {
    type Error = InvalidLottery;

    fn try_from((numerator, denominator): (u32, u32)) -> Result<Self, Self::Error> {
        Self::new(numerator, denominator)
    }
}

/// Configuration for session finalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the session identity cookie.
    pub cookie: String,
    /// Session lifetime in minutes.
    pub lifetime: u64,
    /// Cookie path.
    pub path: String,
    /// Cookie domain.
    pub domain: Option<String>,
    /// Whether the cookie is HTTPS-only.
    pub secure: bool,
    /// Garbage-collection lottery odds.
    pub lottery: Lottery,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie: "arbor_session".to_string(),
            lifetime: 180,
            path: "/".to_string(),
            domain: None,
            secure: false,
            lottery: Lottery::default(),
        }
    }
}
