//! Resolution status of a single asset.

use std::fmt;

use serde::Serialize;

/// Why an asset cannot be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnavailableReason {
    /// No location registered yet.
    Unset,
    /// A location is registered but does not answer with success.
    NotFound,
    /// The manifest has no such week/format.
    UnknownAsset,
}

impl UnavailableReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::NotFound => "not-found",
            Self::UnknownAsset => "unknown-asset",
        }
    }
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one resolution request.
///
/// `Verifying` is always first; `Available` and `Unavailable` are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "lowercase")]
pub enum ResolutionStatus {
    Verifying,
    Unavailable(UnavailableReason),
    Available(String),
}

impl ResolutionStatus {
    /// Whether no further status follows this one.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Verifying)
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Location to render, for available assets.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Available(location) => Some(location),
            _ => None,
        }
    }
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verifying => f.write_str("verifying"),
            Self::Unavailable(reason) => write!(f, "unavailable ({reason})"),
            Self::Available(location) => write!(f, "available at {location}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!ResolutionStatus::Verifying.is_terminal());
        assert!(ResolutionStatus::Unavailable(UnavailableReason::Unset).is_terminal());
        assert!(ResolutionStatus::Available("/a.mp4".into()).is_terminal());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(ResolutionStatus::Unavailable(UnavailableReason::NotFound))
            .unwrap();
        assert_eq!(json, serde_json::json!({"state": "unavailable", "detail": "not-found"}));

        let json = serde_json::to_value(ResolutionStatus::Verifying).unwrap();
        assert_eq!(json, serde_json::json!({"state": "verifying"}));
    }
}
