use crate::models::Turn;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub query: &'a str,
    pub session_id: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct StartResponse {
    pub session_id: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct HistoryResponse {
    #[serde(default)]
    pub chat_history: Option<Vec<Turn>>,
}

#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    pub response: String,
}
