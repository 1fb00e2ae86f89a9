//! Session state file: a small key/value JSON document holding the whole
//! manifest under a fixed key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::error::{ManifestError, ManifestResult};
use super::types::CourseManifest;

/// Key the manifest is stored under.
pub const STATE_KEY: &str = "courseData";

/// Key/value JSON file the manifest is saved into after every change.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved manifest, if any.
    ///
    /// A missing file or key is `Ok(None)`; an unreadable or malformed entry is
    /// an error.
    pub fn load(&self) -> ManifestResult<Option<CourseManifest>> {
        let Some(mut entries) = self.read_entries()? else {
            return Ok(None);
        };
        let Some(value) = entries.remove(STATE_KEY) else {
            return Ok(None);
        };
        let manifest: CourseManifest = serde_json::from_value(value)?;
        manifest.validate().map_err(ManifestError::Invalid)?;
        Ok(Some(manifest))
    }

    /// Overwrite the saved manifest, keeping any other keys in the file.
    ///
    /// The file is replaced atomically (write to a sibling, then rename).
    pub fn save(&self, manifest: &CourseManifest) -> ManifestResult<()> {
        // A corrupt file is replaced rather than blocking the save.
        let mut entries = self.read_entries().ok().flatten().unwrap_or_default();
        entries.insert(STATE_KEY.to_string(), serde_json::to_value(manifest)?);

        let text = serde_json::to_string_pretty(&Value::Object(entries))?;
        write_atomic(&self.path, &text)
    }

    fn read_entries(&self) -> ManifestResult<Option<Map<String, Value>>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ManifestError::Io(self.path.clone(), e)),
        };
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(ManifestError::Invalid(format!(
                "`{}` is not a JSON object",
                self.path.display()
            ))),
        }
    }
}

/// Replace `path` with `text`: write a sibling file, then rename it over.
/// Missing parent directories are created.
pub(super) fn write_atomic(path: &Path, text: &str) -> ManifestResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ManifestError::Io(parent.to_path_buf(), e))?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, text).map_err(|e| ManifestError::Io(tmp.clone(), e))?;
    fs::rename(&tmp, path).map_err(|e| ManifestError::Io(path.to_path_buf(), e))?;
    Ok(())
}
