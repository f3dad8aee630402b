//! Request dispatch lifecycle for the Arbor web framework.
//!
//! A [`Dispatcher`] takes an action name resolved by the router, runs the
//! three-phase lifecycle (before-hook, action, after-hook), and normalizes
//! whatever the action returned into a canonical
//! [`Response`](arbor_core::Response):
//!
//! - an explicit response passes through unchanged;
//! - a view renders through the configured layout and template;
//! - an empty result drains any queued legacy fragments;
//! - anything else coerces generically.
//!
//! # Example
//!
//! ```rust,ignore
//! use arbor_dispatch::prelude::*;
//!
//! let dispatcher = Dispatcher::new(DispatchConfig::default(), engine)
//!     .with_hook(AuthHook::new(users))
//!     .with_action("index", |_ctx: &ActionContext| {
//!         Ok(ActionOutcome::View(View::new("home/Index").with("title", "Home")))
//!     });
//!
//! let response = dispatcher.execute("index", Vec::new())?;
//! ```

mod action;
mod dispatcher;
mod error;
mod hook;
mod observe;
mod paths;
mod view;

pub use action::{Action, ActionOutcome, ActionRegistry};
pub use dispatcher::{Dispatcher, EVENT_EXECUTING};
pub use error::DispatchError;
pub use hook::{HookOutcome, NoopHook, RequestHook};
pub use observe::{Observer, ObserverError};
pub use paths::{resolve_view_path, ViewPath};
pub use view::{FragmentAccumulator, NoFragments, View, ViewEngine};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Action, ActionOutcome, ActionRegistry, DispatchError, Dispatcher, FragmentAccumulator,
        HookOutcome, NoopHook, Observer, RequestHook, View, ViewEngine,
    };
    pub use arbor_core::prelude::*;
}
