//! Standardized asset path derivation.
//!
//! Every registered file lands at `/public/{folder}/week{N}-{label}.{ext}`,
//! where folder and label come from the format key.

use std::sync::LazyLock;

use regex::Regex;

use super::FormatKey;

/// Folder used when the format name is not one of the known keys.
const FALLBACK_FOLDER: &str = "assets";
/// Label used when the format name is not one of the known keys.
const FALLBACK_LABEL: &str = "asset";

/// Grammar every standardized path for weeks 1-4 satisfies.
static STANDARDIZED_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^/public/(videos|decks|images|assets)/week[1-4]-(video|deck|schema|artifact)\.(mp4|pdf|png|jpg|jpeg|gif|webp)$",
    )
    .expect("standardized path pattern is valid")
});

/// Derive the standardized path from a raw format name.
///
/// Only the four lowercase keys map to their folders; any other name,
/// including `"Video"` or `" slides "`, falls back to `assets`/`asset`.
pub fn standardize(week: u32, format: &str, extension: &str) -> String {
    let (folder, label) = match FormatKey::from_key(format) {
        Some(key) => (key.folder(), key.label()),
        None => (FALLBACK_FOLDER, FALLBACK_LABEL),
    };
    format!("/public/{folder}/week{week}-{label}.{extension}")
}

impl FormatKey {
    /// Standardized path for this key.
    pub fn standard_path(self, week: u32, extension: &str) -> String {
        format!(
            "/public/{}/week{week}-{}.{extension}",
            self.folder(),
            self.label()
        )
    }
}

/// Check that a path follows the standardized naming convention.
pub fn is_standardized(path: &str) -> bool {
    STANDARDIZED_PATH.is_match(path)
}

/// Lowercase extension of a file name, if it has one.
///
/// `"Briefing.Final.MP4"` -> `Some("mp4")`, `"README"` -> `None`.
pub fn extension_of(file_name: &str) -> Option<String> {
    let name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTENSIONS: [&str; 7] = ["mp4", "pdf", "png", "jpg", "jpeg", "gif", "webp"];

    #[test]
    fn test_standardize_examples() {
        assert_eq!(standardize(1, "video", "mp4"), "/public/videos/week1-video.mp4");
        assert_eq!(
            standardize(3, "infographic", "png"),
            "/public/images/week3-schema.png"
        );
        assert_eq!(standardize(2, "slides", "pdf"), "/public/decks/week2-deck.pdf");
        assert_eq!(standardize(4, "quiz", "png"), "/public/assets/week4-artifact.png");
    }

    #[test]
    fn test_standardize_unknown_format_falls_back() {
        assert_eq!(standardize(2, "podcast", "mp3"), "/public/assets/week2-asset.mp3");
    }

    #[test]
    fn test_standardize_matches_keys_exactly() {
        assert_eq!(standardize(1, "Video", "mp4"), "/public/assets/week1-asset.mp4");
        assert_eq!(standardize(2, " slides ", "pdf"), "/public/assets/week2-asset.pdf");
        assert_eq!(standardize(3, "QUIZ", "png"), "/public/assets/week3-asset.png");
        assert_eq!(standardize(1, "", "mp4"), "/public/assets/week1-asset.mp4");
    }

    #[test]
    fn test_standardized_output_is_recognized() {
        for week in 1..=4 {
            for key in FormatKey::ALL {
                for ext in EXTENSIONS {
                    let path = standardize(week, key.as_str(), ext);
                    assert!(is_standardized(&path), "{path} should be standardized");
                    assert_eq!(path, key.standard_path(week, ext));
                }
            }
        }
    }

    #[test]
    fn test_is_standardized_rejects() {
        assert!(!is_standardized("/public/videos/week5-video.mp4"));
        assert!(!is_standardized("/public/videos/week1-video.mov"));
        assert!(!is_standardized("/public/videos/week1-deck.MP4"));
        assert!(!is_standardized("public/videos/week1-video.mp4"));
        assert!(!is_standardized("/public/assets/week1-asset.png"));
        assert!(!is_standardized("/public/videos/week1-video.mp4?v=2"));
        assert!(!is_standardized(""));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Briefing.Final.MP4"), Some("mp4".to_string()));
        assert_eq!(extension_of("dir.v2/deck.pdf"), Some("pdf".to_string()));
        assert_eq!(extension_of("README"), None);
        assert_eq!(extension_of(".hidden"), None);
        assert_eq!(extension_of("trailing."), None);
    }
}
