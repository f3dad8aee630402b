//! In-memory session backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use crate::error::SessionError;
use crate::store::{SessionHandler, SessionId, SessionRecord, SessionStore};

struct StoredSession {
    payload: Vec<u8>,
    saved_at: SystemTime,
}

/// Shared backing storage for [`MemoryStore`] instances.
///
/// Also acts as the expired-session collector: `gc` sweeps entries whose
/// last save is older than the lifetime.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, StoredSession>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of persisted sessions.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("backend lock poisoned").len()
    }

    /// Whether no sessions are persisted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a session is persisted under the given ID.
    pub fn contains(&self, id: &SessionId) -> bool {
        self.entries
            .lock()
            .expect("backend lock poisoned")
            .contains_key(id.as_str())
    }

    fn persist(&self, id: &SessionId, payload: Vec<u8>) {
        self.entries.lock().expect("backend lock poisoned").insert(
            id.as_str().to_string(),
            StoredSession {
                payload,
                saved_at: SystemTime::now(),
            },
        );
    }
}

impl SessionHandler for MemoryBackend {
    fn gc(&self, lifetime_secs: u64) -> Result<usize, SessionError> {
        let now = SystemTime::now();
        let mut entries = self.entries.lock().expect("backend lock poisoned");

        let before = entries.len();
        entries.retain(|_, stored| match now.duration_since(stored.saved_at) {
            Ok(idle) => idle.as_secs() < lifetime_secs,
            // Clock went backwards; keep the entry.
            Err(_) => true,
        });

        Ok(before - entries.len())
    }
}

/// HashMap-backed session store for one session.
pub struct MemoryStore {
    record: SessionRecord,
    backend: Arc<MemoryBackend>,
}

impl MemoryStore {
    /// Create a store with a fresh session on the given backend.
    pub fn new(backend: Arc<MemoryBackend>) -> Self {
        Self {
            record: SessionRecord::new(),
            backend,
        }
    }

    /// Create a store for an existing session, loading persisted data if
    /// present.
    pub fn open(backend: Arc<MemoryBackend>, id: SessionId) -> Result<Self, SessionError> {
        let record = {
            let entries = backend.entries.lock().expect("backend lock poisoned");
            match entries.get(id.as_str()) {
                Some(stored) => SessionRecord {
                    id: id.clone(),
                    data: serde_json::from_slice(&stored.payload)?,
                    dirty: false,
                },
                None => SessionRecord::with_id(id),
            }
        };

        Ok(Self { record, backend })
    }

    /// Set a session value, marking the record dirty.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.record.data.insert(key.into(), value.into());
        self.record.dirty = true;
    }

    /// Get a session value.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.record.data.get(key)
    }

    /// Whether the record has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.record.dirty
    }
}

impl SessionStore for MemoryStore {
    fn save(&mut self) -> Result<(), SessionError> {
        let payload = serde_json::to_vec(&self.record.data)?;
        self.backend.persist(&self.record.id, payload);
        self.record.dirty = false;
        Ok(())
    }

    fn id(&self) -> &SessionId {
        &self.record.id
    }

    fn handler(&self) -> &dyn SessionHandler {
        self.backend.as_ref()
    }
}
