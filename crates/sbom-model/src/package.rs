use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::scope::{ExclusionReason, MavenScope, Scope, Strategy};

/// A single package release tracked by the resolver, carrying the
/// bookkeeping conflict resolution and scope propagation need to explain
/// *why* a version was or wasn't included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub coordinate: Coordinate,
    pub scope: Scope,
    /// The Maven-style scope as first observed; never mutated after
    /// construction.
    pub original_maven_scope: MavenScope,
    /// If this package lost conflict resolution, the version that won.
    pub winning_version: Option<String>,
    /// If this package won conflict resolution, the versions it beat,
    /// deduplicated and in the order they were defeated.
    pub defeated_versions: Vec<String>,
    /// True iff this package won because project dependency-management
    /// forced its version, not because of ordinary conflict resolution.
    pub is_override_winner: bool,
    /// Which strategy produced this package's winner/loser outcome.
    /// Recorded on both sides of the pair.
    pub scope_strategy: Option<Strategy>,
    /// Vendor-patch annotations (HeroDevs NES and similar): the upstream
    /// version queried against the metadata service differs from the
    /// version actually reported in the SBOM.
    pub version_metadata: BTreeMap<String, String>,
    /// The version to surface in the emitted SBOM (component `version` and
    /// `purl`). Equal to `coordinate.version` except for vendor-patched
    /// inputs (HeroDevs NES and similar), where `coordinate.version` keeps
    /// carrying the full raw string so graph identity and metadata-service
    /// re-querying stay unaffected, and this field carries the patched
    /// version a consumer should actually see.
    pub reported_version: String,
}

impl Package {
    pub fn new(coordinate: Coordinate, original_maven_scope: MavenScope) -> Self {
        let scope = match original_maven_scope {
            MavenScope::Optional => Scope::Optional,
            _ => Scope::Required,
        };
        let reported_version = coordinate.version.clone();
        Self {
            coordinate,
            scope,
            original_maven_scope,
            winning_version: None,
            defeated_versions: Vec::new(),
            is_override_winner: false,
            scope_strategy: None,
            version_metadata: BTreeMap::new(),
            reported_version,
        }
    }

    pub fn identity(&self) -> String {
        self.coordinate.identity()
    }

    pub fn base_key(&self) -> String {
        self.coordinate.base_key()
    }

    /// The reason this package is excluded, if it is.
    pub fn scope_reason(&self) -> Option<ExclusionReason> {
        self.scope.reason()
    }

    /// Whether the Maven scope this package was first observed with is one
    /// scope propagation treats as test-like (spec §4.5's `root_scope`).
    pub fn is_test_like_root(&self) -> bool {
        self.original_maven_scope.is_test_like()
    }

    /// Mark this package excluded, preserving a pre-existing
    /// `override-loser` reason over a later `loser` reason (spec §4.4
    /// redirection: "preserving a pre-existing override-loser reason if
    /// present").
    pub fn exclude(&mut self, reason: ExclusionReason) {
        if let Scope::Excluded(ExclusionReason::OverrideLoser) = self.scope {
            if reason != ExclusionReason::OverrideLoser {
                return;
            }
        }
        self.scope = Scope::Excluded(reason);
    }

    /// Record that this package beat `defeated_version` in conflict
    /// resolution, deduplicating and preserving insertion order.
    pub fn record_defeated(&mut self, defeated_version: impl Into<String>) {
        let defeated_version = defeated_version.into();
        if !self.defeated_versions.contains(&defeated_version) {
            self.defeated_versions.push(defeated_version);
        }
    }
}
