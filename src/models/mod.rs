mod summary;
mod turn;

pub use summary::SessionSummary;
pub use turn::{Turn, TurnStatus, PENDING_PLACEHOLDER};
