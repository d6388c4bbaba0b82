use std::fmt;

use serde::{Deserialize, Serialize};

/// The Maven-style scope as first observed on a package, preserved
/// verbatim for round-trip fidelity (spec: "never mutated").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MavenScope {
    Compile,
    Runtime,
    Test,
    Provided,
    System,
    Optional,
    Excluded,
    Required,
}

impl MavenScope {
    /// Is this one of the scopes scope propagation treats as "test-like"
    /// (spec §4.5: `root_scope(r) ... else required`)?
    pub fn is_test_like(self) -> bool {
        matches!(self, Self::Test | Self::Provided | Self::System | Self::Excluded)
    }
}

impl fmt::Display for MavenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Compile => "compile",
            Self::Runtime => "runtime",
            Self::Test => "test",
            Self::Provided => "provided",
            Self::System => "system",
            Self::Optional => "optional",
            Self::Excluded => "excluded",
            Self::Required => "required",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for MavenScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compile" => Ok(Self::Compile),
            "runtime" => Ok(Self::Runtime),
            "test" => Ok(Self::Test),
            "provided" => Ok(Self::Provided),
            "system" => Ok(Self::System),
            "optional" => Ok(Self::Optional),
            "excluded" => Ok(Self::Excluded),
            "required" => Ok(Self::Required),
            other => Err(format!("unrecognized Maven scope: {other}")),
        }
    }
}

impl Default for MavenScope {
    fn default() -> Self {
        Self::Compile
    }
}

/// Why a package was moved to `Scope::Excluded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExclusionReason {
    /// Lost conflict resolution to a higher-priority sibling version.
    Loser,
    /// Lost to a version forced by project dependency-management.
    OverrideLoser,
    /// Orphaned: every parent of this node is itself excluded.
    ConflictResolutionSubtree,
    /// Reachable only through a test-scoped root.
    TestDependency,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Loser => "loser",
            Self::OverrideLoser => "override-loser",
            Self::ConflictResolutionSubtree => "conflict-resolution-subtree",
            Self::TestDependency => "test-dependency",
        };
        write!(f, "{s}")
    }
}

/// The reconciled inclusion state of a package, as a tagged variant rather
/// than a stringly-typed field (spec §9: "sum types instead of
/// stringly-typed scope fields").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Scope {
    Required,
    Optional,
    Excluded(ExclusionReason),
}

impl Scope {
    pub fn is_excluded(self) -> bool {
        matches!(self, Self::Excluded(_))
    }

    pub fn reason(self) -> Option<ExclusionReason> {
        match self {
            Self::Excluded(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Which conflict-resolution strategy produced a winner/loser pair.
/// Recorded on both sides (spec §3: "recorded on both winner & loser").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Maven,
    Highest,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maven => write!(f, "maven"),
            Self::Highest => write!(f, "highest"),
        }
    }
}
