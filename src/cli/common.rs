//! Common setup shared across CLI commands.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::CourseConfig;
use crate::manifest::ManifestStore;
use crate::probe::{HttpTransport, Prober, Transport};
use crate::resolve::Resolver;

/// Everything a dashboard command works against for one session.
pub struct Session {
    pub resolver: Resolver,
}

impl Session {
    /// Build the HTTP transport, load the manifest and wire the resolver.
    pub async fn open(config: &CourseConfig) -> Result<Self> {
        let transport: Arc<dyn Transport> = Arc::new(
            HttpTransport::new(config.probe.timeout()).context("Failed to build HTTP client")?,
        );
        Self::with_transport(config, transport).await
    }

    /// Same as [`open`](Self::open) over a given transport.
    pub async fn with_transport(config: &CourseConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let root = config.root();
        let source = config.manifest.source(root);
        let state = config.manifest.state_file(root);
        let store = ManifestStore::open(&source, transport.as_ref(), state).await;

        let prober = Prober::new(transport, config.probe.base()?);
        let resolver = Resolver::new(Arc::new(store), Arc::new(prober));
        Ok(Self { resolver })
    }

    pub fn store(&self) -> &ManifestStore {
        self.resolver.store()
    }
}
