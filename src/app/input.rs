/// Whether the input line is free or a message is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    #[default]
    Idle,
    Sending,
}

/// A submitted message waiting for the backend.
///
/// Carries the session it was sent to and the slot of its placeholder turn
/// so the reply lands on that turn and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub session_id: String,
    pub text: String,
    pub turn_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Replied,
    Failed(String),
    /// The user moved to another session before the reply arrived
    Detached,
}
