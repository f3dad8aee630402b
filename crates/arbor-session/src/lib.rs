//! Session finalization middleware for the Arbor web framework.
//!
//! Runs once per request after the response is computed, as the terminal
//! middleware step:
//!
//! 1. persist the session store;
//! 2. queue the session-identity cookie for outbound delivery;
//! 3. with the configured odds, collect expired sessions.
//!
//! # Example
//!
//! ```rust,ignore
//! use arbor_session::prelude::*;
//!
//! let backend = MemoryBackend::new();
//! let mut store = MemoryStore::new(backend);
//! let jar = MemoryCookieJar::new();
//!
//! SessionFinalizer::handle(&mut store, &jar, &config, rand::thread_rng())?;
//! ```

mod cookie;
mod error;
mod finalizer;
mod memory;
mod store;

pub mod lottery;

pub use cookie::{Cookie, CookieJar, MemoryCookieJar};
pub use error::SessionError;
pub use finalizer::SessionFinalizer;
pub use memory::{MemoryBackend, MemoryStore};
pub use store::{SessionHandler, SessionId, SessionRecord, SessionStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Cookie, CookieJar, MemoryBackend, MemoryCookieJar, MemoryStore, SessionError,
        SessionFinalizer, SessionHandler, SessionId, SessionRecord, SessionStore,
    };
    pub use arbor_core::SessionConfig;
}
