use serde::{Deserialize, Serialize};

/// Sidebar entry for one backend session.
///
/// Stored under camelCase keys so the persisted list reads
/// `[{"sessionId": "...", "title": "..."}]`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(default)]
    pub title: String,
}

impl SessionSummary {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            title: String::new(),
        }
    }

    pub fn is_untitled(&self) -> bool {
        self.title.is_empty()
    }

    /// Label shown in the sidebar; `position` is zero-based.
    pub fn display_title(&self, position: usize) -> String {
        if self.is_untitled() {
            format!("Chat {}", position + 1)
        } else {
            self.title.clone()
        }
    }
}
