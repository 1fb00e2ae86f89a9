//! `[manifest]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [manifest]
//! source = "builtin"                  # "builtin", a JSON file, or an http(s) URL
//! state = ".coursedeck/state.json"    # Session state file (optional)
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::manifest::{ManifestSource, StateFile};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Where the course manifest is read from.
    pub source: String,

    /// Key/value JSON file the session manifest is saved to after each update.
    pub state: Option<PathBuf>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            source: "builtin".to_string(),
            state: None,
        }
    }
}

impl ManifestConfig {
    /// Resolve the source, relative file paths against `root`.
    pub fn source(&self, root: &Path) -> ManifestSource {
        ManifestSource::parse(&self.source, root)
    }

    /// Resolve the state file, if configured, against `root`.
    pub fn state_file(&self, root: &Path) -> Option<StateFile> {
        self.state.as_ref().map(|path| StateFile::new(root.join(path)))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::config::test_parse_config;
    use crate::manifest::ManifestSource;

    #[test]
    fn test_manifest_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.manifest.source, "builtin");
        assert!(config.manifest.state.is_none());
        assert_eq!(
            config.manifest.source(Path::new("/site")),
            ManifestSource::Builtin
        );
    }

    #[test]
    fn test_manifest_paths_resolve_against_root() {
        let config = test_parse_config(
            "[manifest]\nsource = \"data/course.json\"\nstate = \".coursedeck/state.json\"",
        );
        let root = Path::new("/site");

        assert_eq!(
            config.manifest.source(root),
            ManifestSource::File(root.join("data/course.json"))
        );
        let state = config.manifest.state_file(root).unwrap();
        assert_eq!(state.path(), root.join(".coursedeck/state.json").as_path());
    }

    #[test]
    fn test_manifest_remote_source() {
        let config = test_parse_config("[manifest]\nsource = \"https://cdn.example/course.json\"");
        assert!(matches!(
            config.manifest.source(Path::new("/site")),
            ManifestSource::Remote(url) if url.host_str() == Some("cdn.example")
        ));
    }
}
