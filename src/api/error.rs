use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid server URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Runtime(#[from] tokio::task::JoinError),
}
