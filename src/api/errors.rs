//! Policy API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Policy API error (status {status_code}): {message}")]
    Status { status_code: u16, message: String },

    #[error("Failed to parse policy response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}
