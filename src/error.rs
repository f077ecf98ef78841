//! Library error types using thiserror
//!
//! Error hierarchy:
//! - VersionError: a version or constraint string could not be parsed
//! - UpstreamError: an upstream collaborator failed to list versions or build metadata
//! - RetrievalError: top-level error returned by the retrieval entry point

use thiserror::Error;

/// Top-level error for a retrieval run
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Version or constraint parsing errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Upstream collaborator errors
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Workflow JSON could not be produced
    #[error("unable to marshal workflow JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors related to parsing versions and constraints
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Not a valid semantic version
    #[error("invalid version '{input}': {message}")]
    InvalidVersion { input: String, message: String },

    /// Not a valid range expression
    #[error("invalid constraint '{input}': {message}")]
    InvalidConstraint { input: String, message: String },
}

/// Errors raised by upstream collaborators
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The upstream source could not list its versions
    #[error("failed to fetch versions from {upstream}: {message}")]
    FetchFailed { upstream: String, message: String },

    /// Metadata for a new version could not be generated
    #[error("failed to generate metadata for {version}: {message}")]
    MetadataFailed { version: String, message: String },

    /// Any other failure reported by a collaborator implementation
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VersionError {
    /// Creates a new InvalidVersion error
    pub fn invalid_version(input: impl Into<String>, message: impl Into<String>) -> Self {
        VersionError::InvalidVersion {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidConstraint error
    pub fn invalid_constraint(input: impl Into<String>, message: impl Into<String>) -> Self {
        VersionError::InvalidConstraint {
            input: input.into(),
            message: message.into(),
        }
    }
}

impl UpstreamError {
    /// Creates a new FetchFailed error
    pub fn fetch_failed(upstream: impl Into<String>, message: impl Into<String>) -> Self {
        UpstreamError::FetchFailed {
            upstream: upstream.into(),
            message: message.into(),
        }
    }

    /// Creates a new MetadataFailed error
    pub fn metadata_failed(version: impl Into<String>, message: impl Into<String>) -> Self {
        UpstreamError::MetadataFailed {
            version: version.into(),
            message: message.into(),
        }
    }
}
