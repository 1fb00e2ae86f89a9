//! Asset format key definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four fixed asset categories every week carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKey {
    /// Briefing video.
    Video,
    /// Slide deck.
    Slides,
    /// Infographic / schema image.
    Infographic,
    /// Quiz or lab link.
    Quiz,
}

impl FormatKey {
    /// All keys in dashboard display order.
    pub const ALL: [FormatKey; 4] = [Self::Video, Self::Slides, Self::Infographic, Self::Quiz];

    /// Lowercase key name as it appears in the manifest document.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Slides => "slides",
            Self::Infographic => "infographic",
            Self::Quiz => "quiz",
        }
    }

    /// Key whose document name is exactly `name`.
    ///
    /// Unlike [`FromStr`], which accepts `" Slides "` from the command line,
    /// this does no trimming or case folding.
    pub fn from_key(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Public folder the standardized path lives in.
    pub const fn folder(self) -> &'static str {
        match self {
            Self::Video => "videos",
            Self::Slides => "decks",
            Self::Infographic => "images",
            Self::Quiz => "assets",
        }
    }

    /// Short label used in the standardized file name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Slides => "deck",
            Self::Infographic => "schema",
            Self::Quiz => "artifact",
        }
    }

    /// Extension suggested to operators when registering this kind of asset.
    ///
    /// Quizzes are registered as links, so they have none.
    pub const fn default_extension(self) -> Option<&'static str> {
        match self {
            Self::Video => Some("mp4"),
            Self::Slides => Some("pdf"),
            Self::Infographic => Some("png"),
            Self::Quiz => None,
        }
    }
}

impl fmt::Display for FormatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a format name outside the four known keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown asset format `{0}` (expected video, slides, infographic or quiz)")]
pub struct UnknownFormat(pub String);

impl FromStr for FormatKey {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "slides" => Ok(Self::Slides),
            "infographic" => Ok(Self::Infographic),
            "quiz" => Ok(Self::Quiz),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}
