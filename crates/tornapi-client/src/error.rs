use std::time::Duration;

use thiserror::Error;

/// A failed HTTP exchange. The client never returns these to callers; they
/// are folded into an error payload with code `-1`.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("invalid request URL: {0}")]
    Url(String),

    #[error("{0}")]
    Other(String),
}

/// A failing cache backend. Logged and otherwise ignored by the client.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend failed: {0}")]
    Backend(String),
}
