//! Actions and the action registry.

use std::collections::HashMap;

use arbor_core::{ActionContext, Response};

use crate::view::View;

/// The raw result produced by an action, consumed by normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The action produced nothing; legacy fragments may fill in.
    Empty,
    /// A renderable view.
    View(View),
    /// An already-canonical response, passed through unchanged.
    Response(Response),
    /// Any other value, coerced generically.
    Value(serde_json::Value),
}

/// A handler executed for a resolved action name.
pub trait Action: Send + Sync {
    /// Run the action with the request context.
    fn call(&self, ctx: &ActionContext) -> anyhow::Result<ActionOutcome>;
}

impl<F> Action for F
where
    F: Fn(&ActionContext) -> anyhow::Result<ActionOutcome> + Send + Sync,
{
    fn call(&self, ctx: &ActionContext) -> anyhow::Result<ActionOutcome> {
        self(ctx)
    }
}

/// Explicit mapping from action names to handlers.
///
/// Resolution returns `None` for unregistered names; the dispatcher turns
/// that into an `UnknownAction` error.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Box<dyn Action>>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action under the given name.
    pub fn register(&mut self, name: impl Into<String>, action: impl Action + 'static) {
        self.actions.insert(name.into(), Box::new(action));
    }

    /// Register an action, builder style.
    pub fn with(mut self, name: impl Into<String>, action: impl Action + 'static) -> Self {
        self.register(name, action);
        self
    }

    /// Resolve an action by name.
    pub fn resolve(&self, name: &str) -> Option<&dyn Action> {
        self.actions.get(name).map(|a| a.as_ref())
    }

    /// Registered action names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }
}
