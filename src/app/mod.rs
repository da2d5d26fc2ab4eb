mod input;
pub mod repl;

pub use input::{InputState, PendingSend, SendOutcome};

use crate::api::ChatGateway;
use crate::error::Result;
use crate::models::{SessionSummary, Turn};
use crate::session::SessionStore;
use std::sync::Arc;

/// Keeps the session list, the active session id and the visible transcript
/// consistent with each other, with local storage and with the backend.
pub struct ChatApp {
    store: SessionStore,
    gateway: Arc<dyn ChatGateway>,
    summaries: Vec<SessionSummary>,
    active_session: Option<String>,
    transcript: Vec<Turn>,
    input: InputState,
}

impl ChatApp {
    /// Build from whatever the store holds; no network traffic yet.
    pub fn new(store: SessionStore, gateway: Arc<dyn ChatGateway>) -> Self {
        let stored = store.load();
        Self {
            store,
            gateway,
            summaries: stored.summaries,
            active_session: stored.active_session,
            transcript: Vec::new(),
            input: InputState::Idle,
        }
    }

    /// Resume the stored session, or start one if none was active.
    pub async fn init(&mut self) {
        match self.active_session.clone() {
            Some(id) => self.load_transcript(&id).await,
            None => {
                self.start_new_session().await;
            }
        }
    }

    pub fn summaries(&self) -> &[SessionSummary] {
        &self.summaries
    }

    pub fn active_session(&self) -> Option<&str> {
        self.active_session.as_deref()
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn input_state(&self) -> InputState {
        self.input
    }

    /// Create a backend session and make it active.
    ///
    /// Returns the new id, or `None` if the backend call failed, in which
    /// case nothing changes.
    pub async fn start_new_session(&mut self) -> Option<String> {
        let session_id = match self.gateway.create_session().await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(error = %e, "error starting new session");
                return None;
            }
        };

        tracing::info!(session_id = %session_id, "started session");
        self.set_active(&session_id);
        self.summaries.push(SessionSummary::new(session_id.clone()));
        self.persist_summaries();
        self.transcript.clear();
        Some(session_id)
    }

    /// Make `session_id` active and show its transcript.
    ///
    /// The id does not need to appear in the session list.
    pub async fn switch_session(&mut self, session_id: &str) {
        self.set_active(session_id);
        self.load_transcript(session_id).await;
    }

    /// Map a sidebar position (1-based) or a raw id to a session id.
    pub fn resolve_session(&self, selector: &str) -> Option<String> {
        let selector = selector.trim();
        if selector.is_empty() {
            return None;
        }
        if let Ok(position) = selector.parse::<usize>() {
            if let Some(summary) = position
                .checked_sub(1)
                .and_then(|index| self.summaries.get(index))
            {
                return Some(summary.session_id.clone());
            }
        }
        Some(selector.to_string())
    }

    /// First half of a send: validate, then append the placeholder turn.
    ///
    /// Blank text, no active session, or a send already in flight leave the
    /// state untouched and return `None`.
    pub fn submit(&mut self, text: &str) -> Option<PendingSend> {
        if self.input == InputState::Sending {
            tracing::debug!("ignoring submit while a message is in flight");
            return None;
        }
        if text.trim().is_empty() {
            return None;
        }
        let session_id = self.active_session.clone()?;

        self.transcript.push(Turn::pending(text));
        self.input = InputState::Sending;
        Some(PendingSend {
            session_id,
            text: text.to_string(),
            turn_index: self.transcript.len() - 1,
        })
    }

    /// Second half of a send: settle the placeholder and go back to Idle.
    pub fn complete(&mut self, pending: PendingSend, result: Result<String>) -> SendOutcome {
        self.input = InputState::Idle;

        match result {
            Ok(reply) => {
                self.title_if_untitled(&pending.session_id, &pending.text);
                match self.pending_turn(&pending) {
                    Some(turn) => {
                        turn.commit(reply);
                        SendOutcome::Replied
                    }
                    None => SendOutcome::Detached,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, session_id = %pending.session_id, "error fetching response");
                let reason = e.to_string();
                match self.pending_turn(&pending) {
                    Some(turn) => {
                        turn.fail(reason.clone());
                        SendOutcome::Failed(reason)
                    }
                    None => SendOutcome::Detached,
                }
            }
        }
    }

    /// The network half of a send; does not touch local state.
    pub async fn dispatch(&self, pending: &PendingSend) -> Result<String> {
        self.gateway
            .send_message(&pending.session_id, &pending.text)
            .await
    }

    /// Submit, call the backend, and settle. `None` when nothing was sent.
    pub async fn send(&mut self, text: &str) -> Option<SendOutcome> {
        let pending = self.submit(text)?;
        let result = self.dispatch(&pending).await;
        Some(self.complete(pending, result))
    }

    fn pending_turn(&mut self, pending: &PendingSend) -> Option<&mut Turn> {
        if self.active_session.as_deref() != Some(pending.session_id.as_str()) {
            return None;
        }
        self.transcript
            .get_mut(pending.turn_index)
            .filter(|turn| turn.is_pending() && turn.query == pending.text)
    }

    fn title_if_untitled(&mut self, session_id: &str, title: &str) {
        let mut changed = false;
        for summary in self
            .summaries
            .iter_mut()
            .filter(|s| s.session_id == session_id && s.is_untitled())
        {
            summary.title = title.to_string();
            changed = true;
        }
        if changed {
            self.persist_summaries();
        }
    }

    async fn load_transcript(&mut self, session_id: &str) {
        match self.gateway.fetch_transcript(session_id).await {
            Ok(turns) => {
                tracing::debug!(session_id, turns = turns.len(), "loaded transcript");
                self.transcript = turns;
            }
            Err(e) => {
                tracing::error!(error = %e, session_id, "error fetching chat history");
                self.transcript.clear();
            }
        }
    }

    fn set_active(&mut self, session_id: &str) {
        self.active_session = Some(session_id.to_string());
        if let Err(e) = self.store.set_active(session_id) {
            tracing::warn!(error = %e, "could not persist active session");
        }
    }

    fn persist_summaries(&self) {
        if let Err(e) = self.store.save(&self.summaries) {
            tracing::warn!(error = %e, "could not persist sessions");
        }
    }

    /// Drop all local state, both in memory and in storage.
    pub fn forget_all(&mut self) -> Result<()> {
        self.store.clear()?;
        self.summaries.clear();
        self.active_session = None;
        self.transcript.clear();
        self.input = InputState::Idle;
        Ok(())
    }
}
