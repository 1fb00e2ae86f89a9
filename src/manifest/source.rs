//! Manifest sources and fault-tolerant loading.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use super::error::{ManifestError, ManifestResult};
use super::state::write_atomic;
use super::types::CourseManifest;
use crate::log;
use crate::probe::Transport;

/// Default curriculum compiled into the binary.
const BUILTIN_MANIFEST: &str = include_str!("builtin.json");

/// Where the course manifest document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// The embedded default curriculum.
    Builtin,
    /// A JSON file on disk.
    File(PathBuf),
    /// A JSON document served over HTTP(S).
    Remote(Url),
}

impl ManifestSource {
    /// Interpret a config value: `builtin`, an `http(s)` URL, or a file path
    /// (relative paths are joined onto `root`).
    pub fn parse(value: &str, root: &Path) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("builtin") {
            return Self::Builtin;
        }
        if let Ok(url) = Url::parse(value)
            && matches!(url.scheme(), "http" | "https")
        {
            return Self::Remote(url);
        }
        Self::File(root.join(value))
    }

    /// Read and parse the document. Any failure is reported as an error.
    pub async fn read(&self, transport: &dyn Transport) -> ManifestResult<CourseManifest> {
        let text = match self {
            Self::Builtin => BUILTIN_MANIFEST.to_string(),
            Self::File(path) => {
                fs::read_to_string(path).map_err(|err| ManifestError::Io(path.clone(), err))?
            }
            Self::Remote(url) => transport.get_text(url).await?,
        };
        parse_document(&text)
    }
}

impl fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("builtin"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// Parse and validate a manifest document.
pub fn parse_document(text: &str) -> ManifestResult<CourseManifest> {
    let manifest: CourseManifest = serde_json::from_str(text)?;
    manifest.validate().map_err(ManifestError::Invalid)?;
    Ok(manifest)
}

/// Render a manifest as a source document.
///
/// Quiz locations are written under `url`, everything else under `path`.
pub fn to_document(manifest: &CourseManifest) -> ManifestResult<String> {
    Ok(serde_json::to_string_pretty(manifest)?)
}

/// Write a manifest to `path` as a document a [`ManifestSource::File`] can read.
pub fn export(manifest: &CourseManifest, path: &Path) -> ManifestResult<()> {
    write_atomic(path, &to_document(manifest)?)
}

/// Load the manifest, substituting the fallback manifest on any failure.
pub async fn load(source: &ManifestSource, transport: &dyn Transport) -> CourseManifest {
    match source.read(transport).await {
        Ok(manifest) => manifest,
        Err(e) => {
            log!("manifest"; "failed to load course data from {}: {}", source, e);
            CourseManifest::fallback()
        }
    }
}
