use crate::api::models::ChatRequest;
use crate::api::response::{check_status, parse_reply, parse_session_id, parse_transcript};
use crate::error::{Result, SaarthiError};
use crate::models::Turn;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Url;
use std::time::Duration;

/// The three calls the client makes against the chat backend
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Ask the backend for a fresh session and return its id
    async fn create_session(&self) -> Result<String>;

    /// Fetch every turn the backend has recorded for a session
    async fn fetch_transcript(&self, session_id: &str) -> Result<Vec<Turn>>;

    /// Send one user message and return the bot's reply text
    async fn send_message(&self, session_id: &str, text: &str) -> Result<String>;
}

pub struct HttpGateway {
    client: reqwest::Client,
    base: Url,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            SaarthiError::ConfigError(format!("Invalid base URL {:?}: {}", base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(SaarthiError::ConfigError(format!(
                "Base URL cannot carry a path: {:?}",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(SaarthiError::NetworkError)?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Append `segments` to the base path, each escaped as a single segment
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`: the base can always take path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl ChatGateway for HttpGateway {
    async fn create_session(&self) -> Result<String> {
        let url = self.url(&["chat", "start"]);
        tracing::debug!(%url, "creating session");
        let response = self.client.post(url).send().await?;
        let body = check_status(response).await?.text().await?;
        parse_session_id(&body)
    }

    async fn fetch_transcript(&self, session_id: &str) -> Result<Vec<Turn>> {
        let url = self.url(&["chat", "history", session_id]);
        tracing::debug!(%url, "fetching transcript");
        let response = self.client.get(url).send().await?;
        let body = check_status(response).await?.text().await?;
        parse_transcript(&body)
    }

    async fn send_message(&self, session_id: &str, text: &str) -> Result<String> {
        let url = self.url(&["chat"]);
        tracing::debug!(%url, session_id, "sending message");
        let request = ChatRequest {
            query: text,
            session_id,
        };
        let response = self.client.post(url).json(&request).send().await?;
        let body = check_status(response).await?.text().await?;
        parse_reply(&body)
    }
}
