use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("tablebase request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("tablebase answered with HTTP {0}")]
    Status(u16),

    #[error("malformed tablebase response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid tablebase URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("tablebase URL cannot take a path: {0}")]
    UnsupportedUrl(String),

    #[error("tablebase did not answer within {0:?}")]
    Timeout(Duration),
}
