use serde::{Deserialize, Serialize};

/// Response text shown while the backend has not answered yet.
pub const PENDING_PLACEHOLDER: &str = "...";

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum TurnStatus {
    Pending,
    #[default]
    Committed,
    Failed(String),
}

/// One query/response exchange.
///
/// Only `query` and `response` travel over the wire; `status` is local.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub response: String,
    #[serde(skip)]
    pub status: TurnStatus,
}

impl Turn {
    pub fn committed(query: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            status: TurnStatus::Committed,
        }
    }

    pub fn pending(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            response: PENDING_PLACEHOLDER.to_string(),
            status: TurnStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TurnStatus::Pending
    }

    pub fn commit(&mut self, response: String) {
        self.response = response;
        self.status = TurnStatus::Committed;
    }

    /// The placeholder text is kept so the turn still reads as unanswered.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.status = TurnStatus::Failed(reason.into());
    }
}
