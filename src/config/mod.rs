//! Course configuration management for `coursedeck.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── generator  # [generator]
//! │   ├── manifest   # [manifest]
//! │   └── probe      # [probe]
//! ├── error          # ConfigError
//! ├── util           # Config file lookup
//! └── mod.rs         # CourseConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section        | Purpose                                          |
//! |----------------|--------------------------------------------------|
//! | `[manifest]`   | Manifest source and optional session state file  |
//! | `[probe]`      | Base URL for relative locations, request timeout |
//! | `[generator]`  | Curriculum generation endpoint, model, API key   |

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{GeneratorConfig, ManifestConfig, ProbeConfig};

use util::find_config_file;

use crate::{cli::Cli, debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing coursedeck.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory relative paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Manifest source and session state
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// Existence probe settings
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Curriculum generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl CourseConfig {
    /// Load configuration for the CLI invocation.
    ///
    /// Searches upward from cwd for the config file. Without one, every
    /// section takes its defaults and the root is cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = Some(path);
                config
            }
            None => {
                debug!("config"; "no {} found, using defaults", cli.config.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.validate()?;
        if let Ok(root) = std::path::absolute(&config.root) {
            config.root = root;
        }
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Validate values that serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.probe.base()?;
        if self.generator.model.trim().is_empty() {
            return Err(ConfigError::Validation("generator.model is empty".into()));
        }
        Ok(())
    }

    /// Get the root directory path
    pub fn root(&self) -> &Path {
        &self.root
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config text. Panics if there are unknown fields (to catch config
/// typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> CourseConfig {
    let (parsed, ignored) = CourseConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        assert!(CourseConfig::parse_with_ignored("[manifest\nsource = \"builtin\"").is_err());
    }

    #[test]
    fn test_course_config_default() {
        let config = CourseConfig::default();

        assert!(config.config_path.is_none());
        assert_eq!(config.root(), Path::new(""));
        assert_eq!(config.manifest.source, "builtin");
        assert_eq!(config.probe.timeout, 10);
        assert_eq!(config.generator.model, "gemini-3-pro-preview");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[probe]\ntimeout = 3\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = CourseConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.probe.timeout, 3);
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let (_, ignored) =
            CourseConfig::parse_with_ignored("[manifest]\nsource = \"course.json\"").unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_wrong_type_is_error() {
        assert!(CourseConfig::parse_with_ignored("[probe]\ntimeout = \"ten\"").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = test_parse_config("[probe]\nbase_url = \"not a url\"");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let config = test_parse_config("[generator]\nmodel = \" \"");
        assert!(config.validate().is_err());
    }
}
