//! Export command: write the session manifest as a course document.
//!
//! The output is what a `[manifest] source` file or the dashboard's
//! `course.json` expects, so registrations can be published.

use anyhow::{Context, Result};

use super::args::ExportArgs;
use super::common::Session;
use crate::log;
use crate::manifest::{export, to_document};
use crate::utils::plural_count;

/// Execute export command
pub fn run_export(args: &ExportArgs, session: &Session) -> Result<()> {
    let manifest = session.store().snapshot();

    let Some(output) = &args.output else {
        println!("{}", to_document(&manifest)?);
        return Ok(());
    };

    export(&manifest, output)
        .with_context(|| format!("cannot export course data to `{}`", output.display()))?;
    log!(
        "export";
        "wrote {} ({} registered) to {}",
        plural_count(manifest.weeks.len(), "week"),
        manifest.registered_count(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::asset::FormatKey;
    use crate::config::CourseConfig;
    use crate::manifest::ManifestSource;
    use crate::probe::testing::MockTransport;

    #[tokio::test]
    async fn test_export_carries_registrations_to_file_source() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("public/data/course.json");
        let transport = Arc::new(MockTransport::new());
        let session = Session::with_transport(&CourseConfig::default(), transport.clone())
            .await
            .unwrap();
        session
            .store()
            .update(3, FormatKey::Quiz, "https://quiz.example/3")
            .unwrap();

        let args = ExportArgs {
            output: Some(output.clone()),
        };
        run_export(&args, &session).unwrap();

        // A later session reading the exported file sees the registration.
        let mut config = CourseConfig::default();
        config.root = dir.path().to_path_buf();
        config.manifest.source = "public/data/course.json".to_string();
        assert_eq!(
            config.manifest.source(&config.root),
            ManifestSource::File(output.clone())
        );
        let next = Session::with_transport(&config, transport).await.unwrap();
        assert_eq!(next.store().snapshot(), session.store().snapshot());
        assert_eq!(
            next.store().get(3, FormatKey::Quiz).unwrap().location,
            "https://quiz.example/3"
        );

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(raw["weeks"][2]["assets"]["quiz"]["url"], "https://quiz.example/3");
    }

    #[tokio::test]
    async fn test_export_to_unwritable_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let session = Session::with_transport(&CourseConfig::default(), Arc::new(MockTransport::new()))
            .await
            .unwrap();

        let args = ExportArgs {
            output: Some(blocker.join("course.json")),
        };
        let err = run_export(&args, &session).unwrap_err();
        assert!(err.to_string().contains("cannot export course data"));
    }
}
