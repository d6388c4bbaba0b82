use serde::{Deserialize, Serialize};

/// A `(system, name, version)` triple as deps.dev renders it — the wire
/// shape, not [`sbom_model::Coordinate`] (which normalizes `system` through
/// [`sbom_model::Ecosystem`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionKey {
    pub system: String,
    pub name: String,
    pub version: String,
}

/// How a node relates to the package the graph was fetched for. Exactly
/// one node in a [`RawGraph`] has `Relation::SelfNode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    #[serde(rename = "SELF")]
    SelfNode,
    #[serde(rename = "DIRECT")]
    Direct,
    #[serde(rename = "INDIRECT")]
    Indirect,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub version_key: VersionKey,
    pub relation: Relation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEdge {
    pub from_node: usize,
    pub to_node: usize,
}

/// The transitive dependency graph of one package as deps.dev returns it:
/// a flat node list plus index-pair edges.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawGraph {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

impl RawGraph {
    /// The index of the node this graph was fetched for.
    pub fn self_index(&self) -> Option<usize> {
        self.nodes.iter().position(|n| n.relation == Relation::SelfNode)
    }

    pub fn self_node(&self) -> Option<&RawNode> {
        self.self_index().map(|i| &self.nodes[i])
    }
}
