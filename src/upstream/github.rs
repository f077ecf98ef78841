//! GitHub release naming
//!
//! Releases list their version either in the release name or in the tag.
//! The name wins when it parses; otherwise the tag is used.
//! Page format: https://docs.github.com/en/rest/releases/releases#list-releases

use crate::domain::{SemanticVersion, UpstreamCandidate};
use crate::error::{UpstreamError, VersionError};
use serde::{Deserialize, Deserializer};

/// The naming fields of a GitHub release
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GithubRelease {
    /// Release title
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Git tag the release points at
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tag_name: String,
}

/// Untitled releases carry `"name": null`
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl GithubRelease {
    /// Create a release from its name and tag
    pub fn new(name: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag_name: tag_name.into(),
        }
    }
}

/// Determines the version a release describes
pub fn release_version(release: &GithubRelease) -> Result<SemanticVersion, VersionError> {
    SemanticVersion::parse(release.name.trim())
        .or_else(|_| SemanticVersion::parse(release.tag_name.trim()))
}

/// Converts releases into candidates, newest first
pub fn versions_from_releases(
    releases: &[GithubRelease],
) -> Result<Vec<UpstreamCandidate>, VersionError> {
    let mut versions = releases
        .iter()
        .map(|release| release_version(release).map(UpstreamCandidate::new))
        .collect::<Result<Vec<_>, _>>()?;
    versions.sort_by(|a, b| b.version.cmp(&a.version));
    Ok(versions)
}

/// Decodes a JSON page of releases into candidates, newest first
pub fn versions_from_release_page(body: &str) -> Result<Vec<UpstreamCandidate>, UpstreamError> {
    let releases: Vec<GithubRelease> = serde_json::from_str(body)
        .map_err(|e| UpstreamError::fetch_failed("github", e.to_string()))?;
    versions_from_releases(&releases)
        .map_err(|e| UpstreamError::fetch_failed("github", e.to_string()))
}
