use std::collections::{HashMap, HashSet};

use petgraph::graph::DiGraph;
use petgraph::Direction;
use sbom_util::errors::{SbomError, SbomResult};

use crate::coordinate::Coordinate;
use crate::package::Package;
use crate::scope::MavenScope;

pub use petgraph::graph::NodeIndex;

/// One node per unique package identity. `is_root` marks nodes that were
/// themselves input packages and were never observed as a non-self node in
/// some other input's fetched subgraph (spec §4.2 root detection).
#[derive(Debug, Clone)]
pub struct Node {
    pub package: Package,
    pub is_root: bool,
}

/// The shared-node dependency DAG: one [`Node`] per unique
/// `(system, name, version)` identity, with edges representing
/// "depends on." Backed by `petgraph::DiGraph` to stay aligned with the
/// donor's graph representation, but keyed by full identity rather than
/// `group:artifact` alone — loser and winner versions of the same library
/// must coexist as distinct nodes, which a `group:artifact`-keyed graph
/// cannot represent.
///
/// `parents` is not a separate hand-maintained index: `petgraph` already
/// tracks incoming edges, so [`DependencyGraph::parents_of`] walks
/// `Direction::Incoming` directly. This keeps invariant 2 (edge coherence)
/// true by construction rather than by synchronizing two data structures.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<Node, ()>,
    by_identity: HashMap<String, NodeIndex>,
    /// Identities whose subgraph was actually fetched from the metadata
    /// service (as opposed to merely referenced as someone else's child).
    fetched: HashSet<String>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Obtain the canonical node for `coordinate`, creating it (and its
    /// backing `Package`) if this is the first time this identity has been
    /// observed. Returns the existing node unchanged if it already exists —
    /// callers that need to update scope on an existing package should do
    /// so through the returned index, not by re-registering.
    pub fn get_or_create(&mut self, coordinate: Coordinate, original_maven_scope: MavenScope) -> NodeIndex {
        let identity = coordinate.identity();
        if let Some(&idx) = self.by_identity.get(&identity) {
            return idx;
        }
        let package = Package::new(coordinate, original_maven_scope);
        let idx = self.graph.add_node(Node {
            package,
            is_root: false,
        });
        self.by_identity.insert(identity, idx);
        idx
    }

    pub fn index_of(&self, identity: &str) -> Option<NodeIndex> {
        self.by_identity.get(identity).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut Node {
        &mut self.graph[idx]
    }

    pub fn package(&self, idx: NodeIndex) -> &Package {
        &self.graph[idx].package
    }

    pub fn package_mut(&mut self, idx: NodeIndex) -> &mut Package {
        &mut self.graph[idx].package
    }

    pub fn set_root(&mut self, idx: NodeIndex, is_root: bool) {
        self.graph[idx].is_root = is_root;
    }

    /// Add an edge `parent -> child`, deduplicated by target (invariant 3:
    /// "a node's children list contains each target node at most once").
    /// Returns `true` if a new edge was added, `false` if it already
    /// existed.
    pub fn add_child(&mut self, parent: NodeIndex, child: NodeIndex) -> bool {
        if self.graph.find_edge(parent, child).is_some() {
            return false;
        }
        self.graph.add_edge(parent, child, ());
        true
    }

    /// Children of `idx` in the order their edges were added.
    pub fn children_of(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.target())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
    }

    /// Parents of `idx` — derived directly from incoming edges rather than
    /// a hand-maintained reverse index.
    pub fn parents_of(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| e.source())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
    }

    pub fn has_edge(&self, parent: NodeIndex, child: NodeIndex) -> bool {
        self.graph.find_edge(parent, child).is_some()
    }

    pub fn mark_fetched(&mut self, identity: impl Into<String>) {
        self.fetched.insert(identity.into());
    }

    pub fn is_fetched(&self, identity: &str) -> bool {
        self.fetched.contains(identity)
    }

    pub fn all_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Every node whose identity key in `by_identity` doesn't match its
    /// stored package identity, or any duplicated identity, indicates a bug
    /// in a caller that bypassed `get_or_create`. Checks invariants 1-3;
    /// invariants 5 (loser/winner duality) and 6 (acyclic post-resolution)
    /// are checked by `sbom-resolver` once conflict resolution has run,
    /// since they only hold after that phase completes.
    pub fn check_structural_invariants(&self) -> SbomResult<()> {
        for (identity, &idx) in &self.by_identity {
            let actual = self.graph[idx].package.identity();
            if &actual != identity {
                return Err(SbomError::Resolution {
                    message: format!(
                        "node indexed under {identity} carries package identity {actual}"
                    ),
                }
                .into());
            }
        }
        for idx in self.graph.node_indices() {
            let mut seen = HashSet::new();
            for child in self.children_of(idx) {
                if !seen.insert(child) {
                    return Err(SbomError::Resolution {
                        message: format!(
                            "node {:?} has a duplicate child edge to {:?}",
                            idx, child
                        ),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}
