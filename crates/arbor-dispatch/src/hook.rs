//! Lifecycle hooks around action execution.

use arbor_core::{ActionContext, Response};

use crate::action::ActionOutcome;

/// Result of the before-hook.
#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    /// Proceed with action execution.
    Continue,
    /// Short-circuit: skip the action and use this response.
    Respond(Response),
}

/// Strategy invoked around the action.
///
/// The dispatcher holds an injected instance; implement `before` for
/// auth/validation that may abort the request early, and `after` for
/// side effects on the pre-normalization result.
pub trait RequestHook: Send + Sync {
    /// Runs before the action. Returning `Respond` skips the action
    /// entirely. The context may be mutated (e.g. switching the layout).
    fn before(&self, _ctx: &mut ActionContext) -> HookOutcome {
        HookOutcome::Continue
    }

    /// Runs after the action (or after a short-circuit) with the raw
    /// outcome. Side effects only; the return value is ignored.
    fn after(&self, _ctx: &ActionContext, _outcome: &ActionOutcome) {}
}

/// Hook that always continues and does nothing afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl RequestHook for NoopHook {}
