//! Retrieval entry point
//!
//! Ties the pieces together for one dependency id:
//! fetch upstream → select declared dependencies and constraints → filter →
//! generate metadata for each new version.
//!
//! Collaborators are awaited one at a time. The first error aborts the run
//! and no partial output is returned.

use crate::buildpack::{BuildpackMetadata, ConfigDependency};
use crate::domain::{HasVersion, UpstreamCandidate};
use crate::error::{RetrievalError, UpstreamError};
use crate::upstream::UpstreamSource;
use crate::versionology::{filter_new_versions, log_all_versions};
use crate::workflow::to_workflow_json;
use async_trait::async_trait;
use serde::Serialize;

/// Settings for a single retrieval run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievalConfig {
    /// Dependency id to retrieve
    pub id: String,
    /// Targets the new versions will be built for
    pub targets: Vec<String>,
}

impl RetrievalConfig {
    /// Create a config for the given dependency id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            targets: Vec::new(),
        }
    }

    /// Add a build target
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    /// Replace the build targets
    pub fn with_targets<S: Into<String>>(mut self, targets: impl IntoIterator<Item = S>) -> Self {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }
}

/// Trait for producing metadata for a new upstream version
#[async_trait]
pub trait MetadataGenerator: Send + Sync {
    /// Build one dependency entry per target the version is available for
    async fn generate(
        &self,
        version: &UpstreamCandidate,
    ) -> Result<Vec<ConfigDependency>, UpstreamError>;
}

/// Metadata produced by a retrieval run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RetrievalOutput {
    /// Generated entries for every new version
    pub dependencies: Vec<ConfigDependency>,
    /// Configured targets, sorted
    pub targets: Vec<String>,
}

impl RetrievalOutput {
    /// Generated dependencies as workflow JSON
    pub fn metadata_json(&self) -> Result<String, RetrievalError> {
        Ok(to_workflow_json(&self.dependencies)?)
    }

    /// Targets as workflow JSON, e.g. `["bionic","jammy"]`
    pub fn targets_json(&self) -> Result<String, RetrievalError> {
        Ok(to_workflow_json(&self.targets)?)
    }
}

/// Returns the upstream versions of `id` that should be built
///
/// Only versions that satisfy the declared constraints for `id` and are newer
/// than the declared dependencies they share a constraint with are returned.
pub async fn new_versions_for_id(
    id: &str,
    metadata: &BuildpackMetadata,
    source: &dyn UpstreamSource,
) -> Result<Vec<UpstreamCandidate>, RetrievalError> {
    tracing::debug!("Fetching versions of {} from {}", id, source.name());
    let all_versions = source.fetch_versions().await?;
    log_all_versions(id, "from upstream", &all_versions);

    let existing = metadata.dependencies_by_id(id)?;
    let constraints = metadata.constraints_by_id(id)?;

    Ok(filter_new_versions(
        id,
        &all_versions,
        &constraints,
        &existing,
    ))
}

/// Generates metadata for every version, in order
pub async fn generate_all_metadata(
    versions: &[UpstreamCandidate],
    generator: &dyn MetadataGenerator,
) -> Result<Vec<ConfigDependency>, RetrievalError> {
    let mut dependencies = Vec::new();
    for version in versions {
        let metadata = generator.generate(version).await?;

        let targets: Vec<&str> = metadata
            .iter()
            .map(|d| d.target.as_deref().unwrap_or_default())
            .collect();
        tracing::info!(
            "Generating metadata for {}, with targets [{}]",
            version.version(),
            targets.join(", ")
        );

        dependencies.extend(metadata);
    }
    Ok(dependencies)
}

/// Runs a full retrieval for the configured dependency id
pub async fn retrieve(
    config: &RetrievalConfig,
    metadata: &BuildpackMetadata,
    source: &dyn UpstreamSource,
    generator: &dyn MetadataGenerator,
) -> Result<RetrievalOutput, RetrievalError> {
    let new_versions = new_versions_for_id(&config.id, metadata, source).await?;
    let dependencies = generate_all_metadata(&new_versions, generator).await?;

    let mut targets = config.targets.clone();
    targets.sort();

    tracing::info!(
        "Retrieved {} new dependency entries for {}",
        dependencies.len(),
        config.id
    );

    Ok(RetrievalOutput {
        dependencies,
        targets,
    })
}
