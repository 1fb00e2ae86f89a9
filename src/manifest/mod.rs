//! Course manifest: data model, loading, session state and the store.

mod error;
mod source;
mod state;
mod store;
mod types;

pub use source::{ManifestSource, export, to_document};
pub use state::StateFile;
pub use store::{ManifestStore, UpdateAsset};
pub use types::{AssetRecord, CourseManifest, is_unset_location};

#[cfg(test)]
pub use error::ManifestError;
#[cfg(test)]
pub use state::STATE_KEY;
#[cfg(test)]
pub use types::{DEFAULT_COURSE_TITLE, UNSET_SENTINEL, WeekManifest};
