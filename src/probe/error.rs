//! Transport error types.

use thiserror::Error;

/// Errors raised by a [`Transport`](super::Transport).
///
/// The prober folds all of these into `false`; only manifest fetching and the
/// curriculum generator surface them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP {status} for URL: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("timed out requesting {0}")]
    Timeout(String),

    #[error("cannot resolve `{location}` against `{base}`")]
    InvalidLocation { location: String, base: String },
}

impl NetError {
    /// Creates an HTTP status error
    pub fn http_status(status: u16, url: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
        }
    }
}

impl From<reqwest::Error> for NetError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            let url = error.url().map(|u| u.to_string()).unwrap_or_default();
            return Self::Timeout(url);
        }
        Self::Http(error.to_string())
    }
}

pub type NetResult<T> = Result<T, NetError>;
