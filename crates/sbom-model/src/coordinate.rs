use std::fmt;

use serde::{Deserialize, Serialize};

/// Package ecosystem a [`Coordinate`] belongs to.
///
/// Constructed case-insensitively (`"Maven"` and `"maven"` are the same
/// ecosystem); `Display` always lower-cases, matching the identity string
/// rule in the data model ("system ... lower-cased on construction").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Maven,
    Npm,
    Pypi,
    /// Any ecosystem deps.dev recognizes that isn't worth a dedicated
    /// variant yet (cargo, go, nuget, ...).
    Other(String),
}

impl Ecosystem {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "maven" => Self::Maven,
            "npm" => Self::Npm,
            "pypi" => Self::Pypi,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maven => write!(f, "maven"),
            Self::Npm => write!(f, "npm"),
            Self::Pypi => write!(f, "pypi"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// An immutable `(system, name, version)` triple identifying one package
/// release.
///
/// `name` follows ecosystem convention — for Maven this is `group:artifact`.
/// Equality and hashing are delegated to [`Coordinate::identity`], matching
/// the data model's "equality and hashing are based on this string" rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinate {
    pub system: Ecosystem,
    pub name: String,
    pub version: String,
}

impl Coordinate {
    pub fn new(system: impl AsRef<str>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            system: Ecosystem::parse(system.as_ref()),
            name: name.into(),
            version: version.into(),
        }
    }

    /// `"{system}:{name}:{version}"` — the dedup key for one release.
    pub fn identity(&self) -> String {
        format!("{}:{}:{}", self.system, self.name, self.version)
    }

    /// `"{system}:{name}"` — the dedup key for version resolution.
    pub fn base_key(&self) -> String {
        format!("{}:{}", self.system, self.name)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Coordinate {}

impl std::hash::Hash for Coordinate {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity())
    }
}
