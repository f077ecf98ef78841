//! Buildpack dependency metadata
//!
//! `BuildpackMetadata` mirrors the `[metadata]` table of a buildpack.toml.
//! It is deserialized by the caller; this module only selects and prunes.

mod config;

pub use config::{ConfigConstraint, ConfigDependency, License};

use crate::domain::{Constraint, ExistingDependency};
use crate::error::VersionError;
use crate::versionology::prune_indices;
use serde::{Deserialize, Serialize};

/// Declared dependencies and their retention constraints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildpackMetadata {
    #[serde(default)]
    pub dependencies: Vec<ConfigDependency>,
    #[serde(default)]
    pub dependency_constraints: Vec<ConfigConstraint>,
}

impl BuildpackMetadata {
    /// Create metadata from dependency and constraint entries
    pub fn new(
        dependencies: Vec<ConfigDependency>,
        dependency_constraints: Vec<ConfigConstraint>,
    ) -> Self {
        Self {
            dependencies,
            dependency_constraints,
        }
    }

    /// Dependencies with the given id
    pub fn dependencies_by_id(&self, id: &str) -> Result<Vec<ExistingDependency>, VersionError> {
        self.dependencies
            .iter()
            .filter(|d| d.id == id)
            .map(ConfigDependency::to_existing)
            .collect()
    }

    /// Dependencies with the given id that list the given target
    pub fn dependencies_by_id_and_target(
        &self,
        id: &str,
        target: &str,
    ) -> Result<Vec<ExistingDependency>, VersionError> {
        self.dependencies
            .iter()
            .filter(|d| d.id == id && d.has_target(target))
            .map(ConfigDependency::to_existing)
            .collect()
    }

    /// Constraints with the given id
    ///
    /// A single invalid range fails the whole set.
    pub fn constraints_by_id(&self, id: &str) -> Result<Vec<Constraint>, VersionError> {
        self.dependency_constraints
            .iter()
            .filter(|c| c.id == id)
            .map(ConfigConstraint::to_constraint)
            .collect()
    }

    /// Returns a copy holding only the dependencies the constraints retain
    ///
    /// Every constraint and every dependency version is parsed before any
    /// pruning happens. Kept entries are sorted by id, version and number of
    /// targets, with their targets sorted. Constraints are carried unchanged.
    pub fn prune(&self) -> Result<Self, VersionError> {
        let constraints = self
            .dependency_constraints
            .iter()
            .map(ConfigConstraint::to_constraint)
            .collect::<Result<Vec<_>, _>>()?;
        let existing = self
            .dependencies
            .iter()
            .map(ConfigDependency::to_existing)
            .collect::<Result<Vec<_>, _>>()?;

        let dependencies: Vec<ConfigDependency> = prune_indices(&existing, &constraints)
            .into_iter()
            .map(|i| {
                let mut dependency = self.dependencies[i].clone();
                dependency.targets.sort();
                dependency
            })
            .collect();

        tracing::info!(
            "Pruned dependencies from {} to {} entries",
            self.dependencies.len(),
            dependencies.len()
        );

        Ok(Self {
            dependencies,
            dependency_constraints: self.dependency_constraints.clone(),
        })
    }

    /// Appends newly built artifacts, then prunes
    ///
    /// An artifact carrying a `target` label is recorded against that target
    /// alone. Artifacts are subject to the same constraints as every other
    /// entry, so one no constraint retains is dropped.
    pub fn assemble(mut self, artifacts: Vec<ConfigDependency>) -> Result<Self, VersionError> {
        tracing::info!("Assembling {} new artifacts", artifacts.len());
        self.dependencies.extend(artifacts.into_iter().map(|mut artifact| {
            if let Some(target) = artifact.target.take() {
                artifact.targets = vec![target];
            }
            artifact
        }));
        self.prune()
    }
}
