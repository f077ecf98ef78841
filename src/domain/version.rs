//! Semantic version primitives
//!
//! Versions are parsed strictly as `MAJOR.MINOR.PATCH[-PRE][+BUILD]` after
//! trimming whitespace and a single leading `v`. Ordering and equality follow
//! semver precedence, so build metadata never distinguishes two versions.

use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A parsed semantic version
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemanticVersion(semver::Version);

impl SemanticVersion {
    /// Creates a release version from its numeric components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parses a version string, accepting an optional leading `v`
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        let unprefixed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        semver::Version::parse(unprefixed)
            .map(Self)
            .map_err(|e| VersionError::invalid_version(input, e.to_string()))
    }

    /// Returns the underlying `semver::Version`
    pub fn as_semver(&self) -> &semver::Version {
        &self.0
    }

    /// Returns true if this version carries a pre-release tag
    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty()
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.0, &other.0);
        a.major
            .cmp(&b.major)
            .then(a.minor.cmp(&b.minor))
            .then(a.patch.cmp(&b.patch))
            .then_with(|| a.pre.cmp(&b.pre))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.major.hash(state);
        self.0.minor.hash(state);
        self.0.patch.hash(state);
        self.0.pre.hash(state);
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SemanticVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SemanticVersion> for String {
    fn from(version: SemanticVersion) -> Self {
        version.to_string()
    }
}

/// Anything that exposes a semantic version
///
/// Lets callers hand their own record types to the filtering functions as
/// long as they can say which version they describe.
pub trait HasVersion {
    /// The version of this record
    fn version(&self) -> &SemanticVersion;
}

impl HasVersion for SemanticVersion {
    fn version(&self) -> &SemanticVersion {
        self
    }
}

impl<T: HasVersion + ?Sized> HasVersion for &T {
    fn version(&self) -> &SemanticVersion {
        (**self).version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SemanticVersion {
        SemanticVersion::parse(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let version = v("1.2.3");
        assert_eq!(version.as_semver().major, 1);
        assert_eq!(version.as_semver().minor, 2);
        assert_eq!(version.as_semver().patch, 3);
    }

    #[test]
    fn test_parse_strips_v_and_whitespace() {
        assert_eq!(v("  v1.2.3 \n"), SemanticVersion::new(1, 2, 3));
        assert_eq!(v("v1.2.3").to_string(), "1.2.3");
    }

    #[test]
    fn test_parse_strips_only_one_v() {
        assert!(SemanticVersion::parse("vv1.2.3").is_err());
    }

    #[test]
    fn test_parse_prerelease_and_build() {
        let version = v("1.2.3-rc.1+build.5");
        assert!(version.is_prerelease());
        assert_eq!(version.to_string(), "1.2.3-rc.1+build.5");
    }

    #[test]
    fn test_parse_invalid() {
        let err = SemanticVersion::parse("not a semver").unwrap_err();
        assert!(matches!(err, VersionError::InvalidVersion { .. }));
        assert!(SemanticVersion::parse("").is_err());
        assert!(SemanticVersion::parse("1.2").is_err());
        assert!(SemanticVersion::parse("hi").is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(v("1.0.0") < v("1.0.1"));
        assert!(v("1.9.0") < v("1.10.0"));
        assert!(v("2.0.0") > v("1.99.99"));
        assert!(v("1.0.0-alpha") < v("1.0.0"));
        assert!(v("1.0.0-alpha") < v("1.0.0-beta"));
        assert!(v("1.0.0-alpha.2") < v("1.0.0-alpha.10"));
    }

    #[test]
    fn test_equal_is_neither_less_nor_greater() {
        let a = v("1.2.3");
        let b = v("v1.2.3");
        assert!(!(a < b));
        assert!(!(a > b));
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_build_metadata_ignored() {
        assert_eq!(v("1.2.3+abc"), v("1.2.3+def"));
        assert_eq!(v("1.2.3+abc").cmp(&v("1.2.3")), Ordering::Equal);
    }

    #[test]
    fn test_from_str() {
        let version: SemanticVersion = "4.5.6".parse().unwrap();
        assert_eq!(version, SemanticVersion::new(4, 5, 6));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&v("1.2.3")).unwrap();
        assert_eq!(json, "\"1.2.3\"");

        let parsed: SemanticVersion = serde_json::from_str("\"v2.0.0\"").unwrap();
        assert_eq!(parsed, SemanticVersion::new(2, 0, 0));

        assert!(serde_json::from_str::<SemanticVersion>("\"nope\"").is_err());
    }

    #[test]
    fn test_has_version_through_reference() {
        let version = v("3.1.4");
        let by_ref = &version;
        assert_eq!(HasVersion::version(&by_ref), &version);
    }

    #[test]
    fn test_sorting() {
        let mut versions = vec![v("2.0.0"), v("1.0.0"), v("1.5.0"), v("1.0.1")];
        versions.sort();
        let strings: Vec<String> = versions.iter().map(ToString::to_string).collect();
        assert_eq!(strings, vec!["1.0.0", "1.0.1", "1.5.0", "2.0.0"]);
    }
}
