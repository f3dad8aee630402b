//! Session identity and the store contract.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// A unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 16] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Session state owned by a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The session ID.
    pub id: SessionId,
    /// Session data.
    pub data: HashMap<String, serde_json::Value>,
    /// Whether the data has unsaved changes.
    pub dirty: bool,
}

impl SessionRecord {
    /// Create an empty record with a fresh ID.
    pub fn new() -> Self {
        Self::with_id(SessionId::generate())
    }

    /// Create an empty record with the given ID.
    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            data: HashMap::new(),
            dirty: false,
        }
    }
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Collector for expired sessions.
pub trait SessionHandler: Send + Sync {
    /// Delete sessions idle for longer than `lifetime_secs`. Returns the
    /// number of sessions removed.
    fn gc(&self, lifetime_secs: u64) -> Result<usize, SessionError>;
}

/// The session store the finalizer drives.
///
/// The store owns the record; the finalizer only reads the ID and
/// triggers save/gc.
pub trait SessionStore: Send + Sync {
    /// Flush dirty state to backing storage.
    fn save(&mut self) -> Result<(), SessionError>;

    /// The ID of the session this store serves.
    fn id(&self) -> &SessionId;

    /// The handler responsible for expired-session collection.
    fn handler(&self) -> &dyn SessionHandler;
}
