use crate::api::models::{ChatResponse, HistoryResponse, StartResponse};
use crate::error::{Result, SaarthiError};
use crate::models::Turn;

/// Turn a non-success status into an `ApiError` carrying the body text
pub async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(SaarthiError::ApiError {
        status: status.as_u16(),
        message,
    })
}

/// Extract the new session id from a `/chat/start` body
pub fn parse_session_id(body: &str) -> Result<String> {
    let parsed: StartResponse = serde_json::from_str(body)?;
    if parsed.session_id.is_empty() {
        return Err(SaarthiError::Other("Backend returned an empty session id".to_string()));
    }
    Ok(parsed.session_id)
}

/// Extract the transcript from a `/chat/history/{id}` body.
///
/// A missing or null `chat_history` is an empty transcript.
pub fn parse_transcript(body: &str) -> Result<Vec<Turn>> {
    let parsed: HistoryResponse = serde_json::from_str(body)?;
    Ok(parsed.chat_history.unwrap_or_default())
}

/// Extract the bot reply from a `/chat` body
pub fn parse_reply(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    Ok(parsed.response)
}
