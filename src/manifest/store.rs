//! Session-scoped manifest store.

use parking_lot::RwLock;

use super::error::{ManifestError, ManifestResult};
use super::source::{ManifestSource, load};
use super::state::StateFile;
use super::types::{AssetRecord, CourseManifest, is_valid_location};
use crate::asset::FormatKey;
use crate::probe::Transport;
use crate::{debug, log};

/// Command replacing the location of one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAsset {
    pub week: u32,
    pub format: FormatKey,
    pub location: String,
}

/// Owns the session's course manifest.
///
/// Shared by reference (`Arc`) between readers; all mutation goes through
/// [`update`](Self::update) / [`dispatch`](Self::dispatch). Writers are
/// serialized, so updates to different assets never interfere; updates to the
/// same asset are last-writer-wins.
#[derive(Debug)]
pub struct ManifestStore {
    manifest: RwLock<CourseManifest>,
    /// Optional whole-manifest save after every change.
    state: Option<StateFile>,
}

impl ManifestStore {
    pub fn new(manifest: CourseManifest) -> Self {
        Self {
            manifest: RwLock::new(manifest),
            state: None,
        }
    }

    /// Save the manifest to `state` after every update.
    pub fn with_state(mut self, state: StateFile) -> Self {
        self.state = Some(state);
        self
    }

    /// Start a session: a manifest saved in `state` wins over `source`.
    pub async fn open(
        source: &ManifestSource,
        transport: &dyn Transport,
        state: Option<StateFile>,
    ) -> Self {
        let saved = state.as_ref().and_then(|state| match state.load() {
            Ok(saved) => saved,
            Err(e) => {
                log!("manifest"; "ignoring saved state {}: {}", state.path().display(), e);
                None
            }
        });

        let manifest = match saved {
            Some(manifest) => {
                debug!("manifest"; "restored session state");
                manifest
            }
            None => load(source, transport).await,
        };

        let store = Self::new(manifest);
        match state {
            Some(state) => store.with_state(state),
            None => store,
        }
    }

    pub fn state(&self) -> Option<&StateFile> {
        self.state.as_ref()
    }

    /// Copy of the current manifest.
    pub fn snapshot(&self) -> CourseManifest {
        self.manifest.read().clone()
    }

    /// Look up one asset record.
    pub fn get(&self, week: u32, format: FormatKey) -> ManifestResult<AssetRecord> {
        self.manifest
            .read()
            .asset(week, format)
            .cloned()
            .ok_or(ManifestError::NotFound { week, format })
    }

    /// Replace the location of one asset, leaving every other field untouched,
    /// and return the updated record.
    ///
    /// A location that is neither unset, a path nor an `http(s)` URL is
    /// rejected and leaves the manifest untouched.
    pub fn update(
        &self,
        week: u32,
        format: FormatKey,
        location: impl Into<String>,
    ) -> ManifestResult<AssetRecord> {
        let location = location.into();
        if !is_valid_location(&location) {
            return Err(ManifestError::InvalidLocation(location));
        }

        let mut manifest = self.manifest.write();
        let record = manifest
            .week_mut(week)
            .map(|w| w.assets.get_mut(format))
            .ok_or(ManifestError::NotFound { week, format })?;
        record.location = location;
        let updated = record.clone();

        // Saved under the write lock so the file sees updates in memory order.
        if let Some(state) = &self.state
            && let Err(e) = state.save(&manifest)
        {
            log!("manifest"; "failed to save session state: {}", e);
        }

        Ok(updated)
    }

    /// Apply an [`UpdateAsset`] command.
    pub fn dispatch(&self, command: UpdateAsset) -> ManifestResult<AssetRecord> {
        self.update(command.week, command.format, command.location)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use tempfile::TempDir;

    use super::*;
    use crate::manifest::WeekManifest;
    use crate::probe::testing::MockTransport;

    async fn builtin_store() -> ManifestStore {
        ManifestStore::open(&ManifestSource::Builtin, &MockTransport::new(), None).await
    }

    #[tokio::test]
    async fn test_update_then_get() {
        let store = builtin_store().await;
        let before = store.snapshot();

        store
            .update(2, FormatKey::Video, "/public/videos/week2-video.mp4")
            .unwrap();

        let record = store.get(2, FormatKey::Video).unwrap();
        assert_eq!(record.location, "/public/videos/week2-video.mp4");
        assert_eq!(record.title, "Hijacking the Agent Planner");

        // Nothing else changed.
        let mut expected = before.clone();
        expected.week_mut(2).unwrap().assets.video.location =
            "/public/videos/week2-video.mp4".to_string();
        assert_eq!(store.snapshot(), expected);
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let store = builtin_store().await;
        store.update(3, FormatKey::Slides, "/public/decks/week3-deck.pdf").unwrap();
        let once = store.snapshot();
        store.update(3, FormatKey::Slides, "/public/decks/week3-deck.pdf").unwrap();
        assert_eq!(store.snapshot(), once);
    }

    #[tokio::test]
    async fn test_missing_week_is_not_found() {
        let store = builtin_store().await;
        let before = store.snapshot();

        let err = store.get(99, FormatKey::Video).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { week: 99, .. }));
        let err = store.update(99, FormatKey::Video, "/x.mp4").unwrap_err();
        assert!(matches!(
            err,
            ManifestError::NotFound {
                week: 99,
                format: FormatKey::Video
            }
        ));
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_dispatch_returns_updated_record() {
        let store = builtin_store().await;
        let record = store
            .dispatch(UpdateAsset {
                week: 4,
                format: FormatKey::Quiz,
                location: "https://quiz.example/final".to_string(),
            })
            .unwrap();
        assert_eq!(record.location, "https://quiz.example/final");
        assert_eq!(record.title, "Final Certification Exam");
    }

    #[tokio::test]
    async fn test_malformed_location_is_rejected() {
        let store = builtin_store().await;
        let before = store.snapshot();

        let err = store
            .update(1, FormatKey::Quiz, "see the lab handout")
            .unwrap_err();
        assert!(matches!(err, ManifestError::InvalidLocation(ref l) if l == "see the lab handout"));
        let err = store
            .update(1, FormatKey::Quiz, "ftp://files.example/quiz")
            .unwrap_err();
        assert!(matches!(err, ManifestError::InvalidLocation(_)));
        assert_eq!(store.snapshot(), before);

        // Clearing an asset is still allowed.
        store.update(1, FormatKey::Quiz, "").unwrap();
        assert!(store.get(1, FormatKey::Quiz).unwrap().is_unset());
    }

    #[test]
    fn test_concurrent_updates_on_different_keys() {
        let mut manifest = CourseManifest::fallback();
        manifest.weeks = (1..=4)
            .map(|n| WeekManifest {
                week_number: n,
                title: format!("Week {n}"),
                description: String::new(),
                assets: Default::default(),
            })
            .collect();
        let store = Arc::new(ManifestStore::new(manifest));

        let handles: Vec<_> = (1..=4)
            .flat_map(|week| FormatKey::ALL.into_iter().map(move |key| (week, key)))
            .map(|(week, key)| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .update(week, key, key.standard_path(week, "png"))
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for week in 1..=4 {
            for key in FormatKey::ALL {
                assert_eq!(
                    store.get(week, key).unwrap().location,
                    key.standard_path(week, "png")
                );
            }
        }
    }

    #[tokio::test]
    async fn test_state_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let store = ManifestStore::open(
            &ManifestSource::Builtin,
            &MockTransport::new(),
            Some(StateFile::new(&path)),
        )
        .await;
        store
            .update(2, FormatKey::Slides, "/public/decks/week2-deck.pdf")
            .unwrap();
        assert!(path.exists());

        // A new session restores the saved manifest instead of the source.
        let restored = ManifestStore::open(
            &ManifestSource::Builtin,
            &MockTransport::new(),
            Some(StateFile::new(&path)),
        )
        .await;
        assert_eq!(
            restored.get(2, FormatKey::Slides).unwrap().location,
            "/public/decks/week2-deck.pdf"
        );
    }

    #[tokio::test]
    async fn test_corrupt_state_falls_back_to_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let store = ManifestStore::open(
            &ManifestSource::Builtin,
            &MockTransport::new(),
            Some(StateFile::new(&path)),
        )
        .await;
        let weeks: Vec<u32> = store.snapshot().weeks.iter().map(|w| w.week_number).collect();
        assert_eq!(weeks, vec![1, 2, 3, 4]);
    }
}
