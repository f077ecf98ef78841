//! Dependency constraints and their range expressions
//!
//! Handles range formats:
//! - Exact: `1.2.3`, `=1.2.3`
//! - Wildcard: `*`, `2.*`, `1.*.*`, `1.2.x`
//! - Comparison: `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`
//! - Tilde / caret: `~1.2.3`, `^1.2.3`
//! - Intersections: `>=1.0.0 <2.0.0`, `>=1.0.0, <2.0.0`
//! - Hyphen ranges: `1.2.3 - 1.4.0`
//! - Alternatives: `1.x || >=3.0.0`

use crate::domain::{HasVersion, SemanticVersion};
use crate::error::VersionError;
use regex::Regex;
use semver::VersionReq;
use std::fmt;
use std::sync::LazyLock;

static HYPHEN_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+-\s+(\S+)$").unwrap());
static BARE_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(\d+(?:\.\d+){0,2}(?:-[0-9A-Za-z.-]+)?)(?:\+[0-9A-Za-z.-]+)?$").unwrap()
});
static OPERATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:=|>=|>|<=|<|~|\^)$").unwrap());
static PREFIXED_V_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(=|>=|>|<=|<|~|\^)v(\d.*)$").unwrap());

/// A parsed semantic version range
///
/// Keeps the text it was parsed from so logs show the range exactly as it
/// was configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeExpr {
    raw: String,
    alternatives: Vec<VersionReq>,
}

impl RangeExpr {
    /// Parses a range expression
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(VersionError::invalid_constraint(input, "empty range"));
        }

        let alternatives = trimmed
            .split("||")
            .map(|alternative| parse_alternative(input, alternative))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: input.to_string(),
            alternatives,
        })
    }

    /// Returns true if the version falls inside this range
    pub fn matches(&self, version: &SemanticVersion) -> bool {
        self.alternatives
            .iter()
            .any(|req| req.matches(version.as_semver()))
    }

    /// The range exactly as configured
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for RangeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Translates one `||`-separated alternative into a `semver::VersionReq`
fn parse_alternative(input: &str, alternative: &str) -> Result<VersionReq, VersionError> {
    let alternative = alternative.trim();
    if alternative.is_empty() {
        return Err(VersionError::invalid_constraint(
            input,
            "empty alternative in range",
        ));
    }

    let comparators: Vec<String> = if let Some(caps) = HYPHEN_RANGE_RE.captures(alternative) {
        vec![
            format!(">={}", strip_v(&caps[1])),
            format!("<={}", strip_v(&caps[2])),
        ]
    } else {
        let mut comparators = Vec::new();
        let mut pending_operator: Option<&str> = None;
        for token in alternative.split([',', ' ', '\t']).filter(|t| !t.is_empty()) {
            if OPERATOR_RE.is_match(token) {
                pending_operator = Some(token);
                continue;
            }
            let token = match pending_operator.take() {
                Some(op) => format!("{}{}", op, token),
                None => token.to_string(),
            };
            comparators.push(normalize_comparator(&token));
        }
        if let Some(op) = pending_operator {
            return Err(VersionError::invalid_constraint(
                input,
                format!("operator '{}' is missing a version", op),
            ));
        }
        comparators
    };

    VersionReq::parse(&comparators.join(", "))
        .map_err(|e| VersionError::invalid_constraint(input, e.to_string()))
}

/// Bare versions mean an exact match, build metadata ignored; a `v` after an
/// operator is dropped
fn normalize_comparator(token: &str) -> String {
    if let Some(caps) = BARE_VERSION_RE.captures(token) {
        return format!("={}", &caps[1]);
    }
    if let Some(caps) = PREFIXED_V_RE.captures(token) {
        return format!("{}{}", &caps[1], &caps[2]);
    }
    token.to_string()
}

fn strip_v(s: &str) -> &str {
    s.strip_prefix('v').unwrap_or(s)
}

/// A retention policy for one dependency id and version range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    id: String,
    range: RangeExpr,
    patches: usize,
}

impl Constraint {
    /// Creates a constraint, validating the range expression
    pub fn new(id: impl Into<String>, range: &str, patches: usize) -> Result<Self, VersionError> {
        Ok(Self {
            id: id.into(),
            range: RangeExpr::parse(range)?,
            patches,
        })
    }

    /// Dependency id this constraint applies to
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The version range
    pub fn range(&self) -> &RangeExpr {
        &self.range
    }

    /// Maximum number of distinct versions to retain
    pub fn patches(&self) -> usize {
        self.patches
    }

    /// Tests if a versioned item satisfies the range
    pub fn check<T: HasVersion + ?Sized>(&self, item: &T) -> bool {
        self.range.matches(item.version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SemanticVersion {
        SemanticVersion::parse(s).unwrap()
    }

    fn range(s: &str) -> RangeExpr {
        RangeExpr::parse(s).unwrap()
    }

    #[test]
    fn test_wildcard_major() {
        let r = range("1.*.*");
        assert!(r.matches(&v("1.0.0")));
        assert!(r.matches(&v("1.99.3")));
        assert!(!r.matches(&v("2.0.0")));
        assert!(!r.matches(&v("0.9.9")));
    }

    #[test]
    fn test_wildcard_short_forms() {
        assert!(range("2.*").matches(&v("2.4.1")));
        assert!(!range("2.*").matches(&v("3.0.0")));
        assert!(range("6.1.*").matches(&v("6.1.6")));
        assert!(!range("6.1.*").matches(&v("6.0.6")));
        assert!(range("1.2.x").matches(&v("1.2.9")));
    }

    #[test]
    fn test_star_matches_all_releases() {
        let r = range("*");
        assert!(r.matches(&v("0.0.1")));
        assert!(r.matches(&v("999.0.0")));
    }

    #[test]
    fn test_wildcard_skips_prereleases() {
        assert!(!range("1.*.*").matches(&v("1.0.0-rc.1")));
    }

    #[test]
    fn test_bare_version_is_exact() {
        let r = range("1.2.3");
        assert!(r.matches(&v("1.2.3")));
        assert!(!r.matches(&v("1.2.4")));
        assert!(!r.matches(&v("1.3.0")));
    }

    #[test]
    fn test_bare_version_with_build_metadata_is_exact() {
        let r = range("1.2.3+build");
        assert!(r.matches(&v("1.2.3")));
        assert!(r.matches(&v("1.2.3+other")));
        assert!(!r.matches(&v("1.9.0")));
        assert!(!range("v1.2.3-rc.1+b.7").matches(&v("1.2.3")));
        assert!(range("v1.2.3-rc.1+b.7").matches(&v("1.2.3-rc.1")));
    }

    #[test]
    fn test_comparison_operators() {
        assert!(range(">=3.4.5").matches(&v("3.4.5")));
        assert!(range(">=3.4.5").matches(&v("4.0.0")));
        assert!(!range(">=3.4.5").matches(&v("3.4.4")));
        assert!(range(">3.4.5").matches(&v("3.4.6")));
        assert!(!range(">3.4.5").matches(&v("3.4.5")));
        assert!(range("<=1.0.0").matches(&v("1.0.0")));
        assert!(!range("<1.0.0").matches(&v("1.0.0")));
        assert!(range("=1.0.0").matches(&v("1.0.0")));
    }

    #[test]
    fn test_operator_separated_by_whitespace() {
        assert!(range(">= 1.2.3").matches(&v("1.2.3")));
        assert!(!range(">= 1.2.3").matches(&v("1.2.2")));
    }

    #[test]
    fn test_intersection_with_spaces_and_commas() {
        for expr in [">=1.0.0 <2.0.0", ">=1.0.0, <2.0.0"] {
            let r = range(expr);
            assert!(r.matches(&v("1.5.0")), "{}", expr);
            assert!(!r.matches(&v("2.0.0")), "{}", expr);
        }
    }

    #[test]
    fn test_alternatives() {
        let r = range("1.x || >=3.0.0");
        assert!(r.matches(&v("1.4.0")));
        assert!(!r.matches(&v("2.0.0")));
        assert!(r.matches(&v("3.1.0")));
    }

    #[test]
    fn test_hyphen_range() {
        let r = range("1.2.3 - 1.4.0");
        assert!(r.matches(&v("1.2.3")));
        assert!(r.matches(&v("1.4.0")));
        assert!(!r.matches(&v("1.4.1")));
    }

    #[test]
    fn test_tilde_and_caret() {
        assert!(range("~1.2.3").matches(&v("1.2.9")));
        assert!(!range("~1.2.3").matches(&v("1.3.0")));
        assert!(range("^1.2.3").matches(&v("1.9.0")));
        assert!(!range("^1.2.3").matches(&v("2.0.0")));
    }

    #[test]
    fn test_v_prefix_in_range() {
        assert!(range("v1.2.3").matches(&v("1.2.3")));
        assert!(range(">=v1.2.3").matches(&v("1.3.0")));
    }

    #[test]
    fn test_invalid_ranges() {
        for expr in ["foo", "", "   ", "||", "1.*.3", ">="] {
            let err = RangeExpr::parse(expr).unwrap_err();
            assert!(
                matches!(err, VersionError::InvalidConstraint { .. }),
                "{}",
                expr
            );
        }
    }

    #[test]
    fn test_display_keeps_raw_text() {
        assert_eq!(range("4.*.*").to_string(), "4.*.*");
        assert_eq!(range(">=1.2.3").as_str(), ">=1.2.3");
    }

    #[test]
    fn test_constraint_new() {
        let c = Constraint::new("dep", "1.*.*", 2).unwrap();
        assert_eq!(c.id(), "dep");
        assert_eq!(c.range().as_str(), "1.*.*");
        assert_eq!(c.patches(), 2);
        assert!(c.check(&v("1.0.0")));
        assert!(!c.check(&v("2.0.0")));
    }

    #[test]
    fn test_constraint_new_invalid() {
        assert!(Constraint::new("dep", "foo", 1).is_err());
    }
}
