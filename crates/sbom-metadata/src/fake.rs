use std::collections::HashMap;

use async_trait::async_trait;
use sbom_model::Coordinate;

use crate::client::MetadataClient;
use crate::raw_graph::RawGraph;

/// A [`MetadataClient`] that serves canned [`RawGraph`] fixtures keyed by
/// coordinate identity, for deterministic tests that don't hit the
/// network — the donor's dependency-injection pattern (inject the
/// collaborator as a trait, fake it in tests) applied to the metadata
/// service instead of the local artifact cache.
#[derive(Debug, Default)]
pub struct FakeMetadataClient {
    fixtures: HashMap<String, RawGraph>,
}

impl FakeMetadataClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixture(mut self, identity: impl Into<String>, graph: RawGraph) -> Self {
        self.fixtures.insert(identity.into(), graph);
        self
    }
}

#[async_trait]
impl MetadataClient for FakeMetadataClient {
    async fn fetch_graph(&self, coordinate: &Coordinate) -> Option<RawGraph> {
        self.fixtures.get(&coordinate.identity()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_graph::{Relation, VersionKey};

    #[tokio::test]
    async fn returns_fixture_for_known_identity() {
        let graph = RawGraph {
            nodes: vec![crate::raw_graph::RawNode {
                version_key: VersionKey {
                    system: "maven".to_string(),
                    name: "commons:io".to_string(),
                    version: "2.11.0".to_string(),
                },
                relation: Relation::SelfNode,
            }],
            edges: vec![],
        };
        let client = FakeMetadataClient::new().with_fixture("maven:commons:io:2.11.0", graph);
        let coord = Coordinate::new("maven", "commons:io", "2.11.0");
        assert!(client.fetch_graph(&coord).await.is_some());
    }

    #[tokio::test]
    async fn returns_none_for_unknown_identity() {
        let client = FakeMetadataClient::new();
        let coord = Coordinate::new("maven", "commons:io", "2.11.0");
        assert!(client.fetch_graph(&coord).await.is_none());
    }
}
