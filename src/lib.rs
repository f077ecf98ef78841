//! libdependency - dependency retrieval helpers for buildpack release pipelines
//!
//! This library provides:
//! - Upstream filtering: which published versions are new enough to build
//! - Retention pruning: which declared dependency versions to keep
//! - Retrieval glue: upstream sources, metadata generation and workflow JSON

pub mod buildpack;
pub mod domain;
pub mod error;
pub mod logging;
pub mod purl;
pub mod retrieval;
pub mod upstream;
pub mod versionology;
pub mod workflow;

pub use buildpack::{BuildpackMetadata, ConfigConstraint, ConfigDependency, License};
pub use domain::{Constraint, ExistingDependency, HasVersion, SemanticVersion, UpstreamCandidate};
pub use error::{RetrievalError, UpstreamError, VersionError};
pub use purl::generate_purl;
pub use retrieval::{retrieve, MetadataGenerator, RetrievalConfig, RetrievalOutput};
pub use upstream::{StaticSource, UpstreamSource};
pub use versionology::{filter_by_constraints, filter_new_versions, prune_dependencies};
