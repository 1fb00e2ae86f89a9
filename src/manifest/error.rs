//! Manifest error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::asset::FormatKey;
use crate::probe::NetError;

/// Errors from loading or addressing the course manifest.
///
/// `Io`, `Fetch`, `Parse` and `Invalid` are load failures, which `load`
/// recovers from by substituting the fallback manifest. `NotFound` and
/// `InvalidLocation` are surfaced to callers of the store.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to fetch manifest: {0}")]
    Fetch(NetError),

    #[error("manifest is not valid JSON: {0}")]
    Parse(serde_json::Error),

    #[error("invalid manifest: {0}")]
    Invalid(String),

    #[error("week {week} has no {format} asset")]
    NotFound { week: u32, format: FormatKey },

    #[error("`{0}` is neither a path nor an http(s) URL")]
    InvalidLocation(String),
}

impl From<NetError> for ManifestError {
    fn from(err: NetError) -> Self {
        Self::Fetch(err)
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

pub type ManifestResult<T> = Result<T, ManifestError>;
