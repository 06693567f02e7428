//! Remote error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },

    #[error("unexpected status {status} fetching {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed building HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Core(#[from] charter_core::CoreError),
}

pub type Result<T> = std::result::Result<T, RemoteError>;
