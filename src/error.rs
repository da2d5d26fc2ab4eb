use std::fmt;

#[derive(Debug)]
pub enum SaarthiError {
    ApiError {
        status: u16,
        message: String,
    },
    ConfigError(String),
    StorageError(String),
    NetworkError(reqwest::Error),
    Timeout,
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    Other(String),
}

impl fmt::Display for SaarthiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaarthiError::ApiError { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            SaarthiError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SaarthiError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            SaarthiError::NetworkError(e) => write!(f, "Network error: {}", e),
            SaarthiError::Timeout => write!(f, "Request timeout"),
            SaarthiError::IoError(e) => write!(f, "IO error: {}", e),
            SaarthiError::JsonError(e) => write!(f, "JSON error: {}", e),
            SaarthiError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SaarthiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaarthiError::NetworkError(e) => Some(e),
            SaarthiError::IoError(e) => Some(e),
            SaarthiError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SaarthiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SaarthiError::Timeout
        } else if err.is_decode() {
            // Body arrived but was not the JSON shape we asked for
            SaarthiError::Other(format!("Malformed response body: {}", err))
        } else {
            SaarthiError::NetworkError(err)
        }
    }
}

impl From<std::io::Error> for SaarthiError {
    fn from(err: std::io::Error) -> Self {
        SaarthiError::IoError(err)
    }
}

impl From<serde_json::Error> for SaarthiError {
    fn from(err: serde_json::Error) -> Self {
        SaarthiError::JsonError(err)
    }
}

pub type Result<T> = std::result::Result<T, SaarthiError>;
