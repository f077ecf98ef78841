//! Dependency records consumed by the filter and the pruner

use super::{HasVersion, SemanticVersion};
use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dependency version already declared in configuration
///
/// The same `(id, version)` pair may appear several times with different
/// targets; each is a separate build of that version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingDependency {
    /// Dependency id
    pub id: String,
    /// Parsed version
    pub version: SemanticVersion,
    /// Platforms or stacks this build applies to
    #[serde(default)]
    pub targets: Vec<String>,
}

impl ExistingDependency {
    /// Creates a new existing dependency
    pub fn new(id: impl Into<String>, version: SemanticVersion, targets: Vec<String>) -> Self {
        Self {
            id: id.into(),
            version,
            targets,
        }
    }

    /// Creates an existing dependency from a version string
    pub fn parse<S: Into<String>>(
        id: impl Into<String>,
        version: &str,
        targets: impl IntoIterator<Item = S>,
    ) -> Result<Self, VersionError> {
        Ok(Self::new(
            id,
            SemanticVersion::parse(version)?,
            targets.into_iter().map(Into::into).collect(),
        ))
    }

    /// Returns true if this build applies to the given target
    pub fn has_target(&self, target: &str) -> bool {
        self.targets.iter().any(|t| t == target)
    }
}

impl HasVersion for ExistingDependency {
    fn version(&self) -> &SemanticVersion {
        &self.version
    }
}

impl fmt::Display for ExistingDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} [{}]", self.id, self.version, self.targets.join(", "))
    }
}

/// A version published upstream that may not be packaged yet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpstreamCandidate {
    /// Upstream version
    pub version: SemanticVersion,
}

impl UpstreamCandidate {
    /// Creates a new candidate
    pub fn new(version: SemanticVersion) -> Self {
        Self { version }
    }

    /// Creates a candidate from a version string
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        SemanticVersion::parse(version).map(Self::new)
    }

    /// Creates candidates from version strings, failing on the first bad one
    pub fn parse_all<S: AsRef<str>>(
        versions: impl IntoIterator<Item = S>,
    ) -> Result<Vec<Self>, VersionError> {
        versions
            .into_iter()
            .map(|v| Self::parse(v.as_ref()))
            .collect()
    }
}

impl HasVersion for UpstreamCandidate {
    fn version(&self) -> &SemanticVersion {
        &self.version
    }
}

impl From<SemanticVersion> for UpstreamCandidate {
    fn from(version: SemanticVersion) -> Self {
        Self::new(version)
    }
}

impl fmt::Display for UpstreamCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_dependency_parse() {
        let dep = ExistingDependency::parse("dep1", "v1.2.0", ["stack1", "stack2"]).unwrap();
        assert_eq!(dep.id, "dep1");
        assert_eq!(dep.version, SemanticVersion::new(1, 2, 0));
        assert_eq!(dep.targets, vec!["stack1", "stack2"]);
        assert!(dep.has_target("stack2"));
        assert!(!dep.has_target("stack3"));
    }

    #[test]
    fn test_existing_dependency_parse_invalid() {
        let err = ExistingDependency::parse("dep1", "not valid", ["stack"]).unwrap_err();
        assert!(matches!(err, VersionError::InvalidVersion { .. }));
    }

    #[test]
    fn test_existing_dependency_display() {
        let dep = ExistingDependency::parse("dep1", "1.2.0", ["a", "b"]).unwrap();
        assert_eq!(dep.to_string(), "dep1@1.2.0 [a, b]");
    }

    #[test]
    fn test_upstream_candidate_parse_all() {
        let candidates = UpstreamCandidate::parse_all(["1.2.3", "4.5.6", "7.8.9"]).unwrap();
        let strings: Vec<String> = candidates.iter().map(ToString::to_string).collect();
        assert_eq!(strings, vec!["1.2.3", "4.5.6", "7.8.9"]);
    }

    #[test]
    fn test_upstream_candidate_parse_all_invalid() {
        assert!(UpstreamCandidate::parse_all(["1.2.3", "hi"]).is_err());
    }

    #[test]
    fn test_serde_existing_dependency() {
        let dep = ExistingDependency::parse("dep1", "1.0.0", ["stack1"]).unwrap();
        let json = serde_json::to_string(&dep).unwrap();
        assert_eq!(
            json,
            r#"{"id":"dep1","version":"1.0.0","targets":["stack1"]}"#
        );
        let parsed: ExistingDependency = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, dep);
    }
}
