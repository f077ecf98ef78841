//! Upstream version sources
//!
//! This module provides:
//! - The `UpstreamSource` trait the retrieval entry point consumes
//! - An in-memory source for fixed version lists
//! - GitHub release naming rules for sources backed by release pages

mod github;

pub use github::{
    release_version, versions_from_release_page, versions_from_releases, GithubRelease,
};

use crate::domain::UpstreamCandidate;
use crate::error::{UpstreamError, VersionError};
use async_trait::async_trait;

/// Trait for sources of upstream versions
#[async_trait]
pub trait UpstreamSource: Send + Sync {
    /// Get a human-readable name for this source
    fn name(&self) -> &str;

    /// Fetch every version known upstream
    async fn fetch_versions(&self) -> Result<Vec<UpstreamCandidate>, UpstreamError>;
}

/// A source serving a fixed list of versions
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    name: String,
    versions: Vec<UpstreamCandidate>,
}

impl StaticSource {
    /// Create a source from already-parsed candidates
    pub fn new(name: impl Into<String>, versions: Vec<UpstreamCandidate>) -> Self {
        Self {
            name: name.into(),
            versions,
        }
    }

    /// Create a source from version strings
    pub fn from_strings<S: AsRef<str>>(
        name: impl Into<String>,
        versions: impl IntoIterator<Item = S>,
    ) -> Result<Self, VersionError> {
        Ok(Self::new(name, UpstreamCandidate::parse_all(versions)?))
    }
}

#[async_trait]
impl UpstreamSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_versions(&self) -> Result<Vec<UpstreamCandidate>, UpstreamError> {
        Ok(self.versions.clone())
    }
}
