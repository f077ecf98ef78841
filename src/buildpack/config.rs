//! String-level records as declared under `[metadata]` in buildpack.toml

use crate::domain::{Constraint, ExistingDependency};
use crate::error::VersionError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A dependency entry as written in configuration
///
/// Versions stay as text here; they are parsed when the entry is converted
/// into an `ExistingDependency`. Keys without a dedicated field are kept in
/// `extra` so that re-encoding an entry never drops them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigDependency {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub version: String,
    /// Stacks or platforms this build applies to
    #[serde(default, rename = "stacks", alias = "targets")]
    pub targets: Vec<String>,
    /// Single target label set by metadata generators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_checksum: Option<String>,
    #[serde(
        default,
        rename = "source_sha256",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_components: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<License>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpe: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cpes: Vec<String>,
    #[serde(
        default,
        rename = "deprecation_date",
        deserialize_with = "date_as_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub deprecation_date: Option<String>,
    /// Any other keys, carried through unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A license as written in configuration: a bare SPDX id or a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum License {
    Id(String),
    Detailed {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        uri: Option<String>,
    },
}

impl License {
    /// The license type, if one is named
    pub fn kind(&self) -> Option<&str> {
        match self {
            License::Id(id) => Some(id.as_str()),
            License::Detailed { kind, .. } => kind.as_deref(),
        }
    }
}

impl From<&str> for License {
    fn from(id: &str) -> Self {
        License::Id(id.to_string())
    }
}

/// Quoted dates stay as they are; TOML datetimes arrive as a one-entry table
fn date_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Date {
        Text(String),
        Native(BTreeMap<String, String>),
    }

    Ok(match Option::<Date>::deserialize(deserializer)? {
        Some(Date::Text(text)) => Some(text),
        Some(Date::Native(table)) => table.into_values().next(),
        None => None,
    })
}

impl ConfigDependency {
    /// Create an entry with only id, version and targets set
    pub fn new<S: Into<String>>(
        id: impl Into<String>,
        version: impl Into<String>,
        targets: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            targets: targets.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Returns true if this entry lists the given target
    pub fn has_target(&self, target: &str) -> bool {
        self.targets.iter().any(|t| t == target)
    }

    /// Parse into an `ExistingDependency`
    pub fn to_existing(&self) -> Result<ExistingDependency, VersionError> {
        ExistingDependency::parse(&self.id, &self.version, self.targets.iter().cloned())
    }
}

/// A retention constraint as written in configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigConstraint {
    pub id: String,
    pub constraint: String,
    #[serde(default)]
    pub patches: usize,
}

impl ConfigConstraint {
    /// Create a constraint entry
    pub fn new(id: impl Into<String>, constraint: impl Into<String>, patches: usize) -> Self {
        Self {
            id: id.into(),
            constraint: constraint.into(),
            patches,
        }
    }

    /// Parse into a `Constraint`
    pub fn to_constraint(&self) -> Result<Constraint, VersionError> {
        Constraint::new(&self.id, &self.constraint, self.patches)
    }
}
