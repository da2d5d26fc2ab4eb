mod filesystem;
mod memory;
mod storage;

pub use filesystem::FileStorage;
pub use memory::MemoryStorage;
pub use storage::KeyValueStorage;

use crate::error::Result;
use crate::models::SessionSummary;
use std::sync::Arc;

/// Key holding the active session id as a plain string
pub const ACTIVE_SESSION_KEY: &str = "sessionId";
/// Key holding the JSON array of session summaries
pub const SUMMARIES_KEY: &str = "chatHistories";

/// Everything the store knows at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredState {
    pub summaries: Vec<SessionSummary>,
    pub active_session: Option<String>,
}

/// Persists the sidebar list and the active session id.
///
/// Reads never fail: an absent or unreadable value degrades to empty state.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn load(&self) -> StoredState {
        StoredState {
            summaries: self.load_summaries(),
            active_session: self.load_active(),
        }
    }

    fn load_summaries(&self) -> Vec<SessionSummary> {
        let raw = match self.storage.get(SUMMARIES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored sessions");
                return Vec::new();
            }
        };

        // `null` was written by older clients for an empty list
        match serde_json::from_str::<Option<Vec<SessionSummary>>>(&raw) {
            Ok(list) => list.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "stored sessions are corrupt, starting empty");
                Vec::new()
            }
        }
    }

    fn load_active(&self) -> Option<String> {
        match self.storage.get(ACTIVE_SESSION_KEY) {
            Ok(value) => value.filter(|id| !id.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read active session");
                None
            }
        }
    }

    pub fn save(&self, summaries: &[SessionSummary]) -> Result<()> {
        let content = serde_json::to_string(summaries)?;
        self.storage.set(SUMMARIES_KEY, &content)
    }

    pub fn set_active(&self, session_id: &str) -> Result<()> {
        self.storage.set(ACTIVE_SESSION_KEY, session_id)
    }

    /// Forget every session this client has seen
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(SUMMARIES_KEY)?;
        self.storage.remove(ACTIVE_SESSION_KEY)
    }
}
