//! Path command: derive or check standardized asset paths.

use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use super::args::PathArgs;
use crate::asset::{FormatKey, is_standardized, standardize};
use crate::debug;

/// Outcome of a path invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    Derived(String),
    Checked { path: String, standardized: bool },
}

impl PathOutcome {
    /// Whether the command should exit successfully.
    pub fn is_success(&self) -> bool {
        match self {
            Self::Derived(_) => true,
            Self::Checked { standardized, .. } => *standardized,
        }
    }
}

fn evaluate(args: &PathArgs) -> Result<PathOutcome> {
    if let Some(path) = &args.check {
        return Ok(PathOutcome::Checked {
            path: path.clone(),
            standardized: is_standardized(path),
        });
    }

    let (Some(week), Some(format), Some(ext)) = (args.week, &args.format, &args.ext) else {
        bail!("--week, --format and --ext are required to derive a path");
    };
    if FormatKey::from_key(format).is_none() {
        debug!("path"; "unknown format `{}`, using the generic assets folder", format);
    }
    let ext = ext.trim_start_matches('.');
    Ok(PathOutcome::Derived(standardize(week, format, ext)))
}

/// Execute path command
pub fn run_path(args: &PathArgs) -> Result<PathOutcome> {
    let outcome = evaluate(args)?;
    match &outcome {
        PathOutcome::Derived(path) => println!("{path}"),
        PathOutcome::Checked {
            path,
            standardized: true,
        } => println!("{} {}", "✓".green(), path),
        PathOutcome::Checked {
            path,
            standardized: false,
        } => println!("{} {} {}", "→".red(), path, "is not a standardized asset path".dimmed()),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(week: u32, format: &str, ext: &str) -> PathArgs {
        PathArgs {
            week: Some(week),
            format: Some(format.to_string()),
            ext: Some(ext.to_string()),
            check: None,
        }
    }

    fn check(path: &str) -> PathArgs {
        PathArgs {
            week: None,
            format: None,
            ext: None,
            check: Some(path.to_string()),
        }
    }

    #[test]
    fn test_derive() {
        assert_eq!(
            evaluate(&derive(1, "video", "mp4")).unwrap(),
            PathOutcome::Derived("/public/videos/week1-video.mp4".to_string())
        );
        assert_eq!(
            evaluate(&derive(3, "slides", ".pdf")).unwrap(),
            PathOutcome::Derived("/public/decks/week3-deck.pdf".to_string())
        );
    }

    #[test]
    fn test_derive_unknown_format_falls_back() {
        assert_eq!(
            evaluate(&derive(2, "podcast", "mp3")).unwrap(),
            PathOutcome::Derived("/public/assets/week2-asset.mp3".to_string())
        );
    }

    #[test]
    fn test_check() {
        let outcome = evaluate(&check("/public/images/week4-schema.webp")).unwrap();
        assert!(outcome.is_success());

        let outcome = evaluate(&check("/public/images/week5-schema.png")).unwrap();
        assert!(!outcome.is_success());
    }
}
