//! Stitches per-package transitive dependency graphs fetched from a
//! [`MetadataClient`] into one shared-node DAG.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sbom_metadata::{version, MetadataClient, RawGraph, Relation};
use sbom_model::{Coordinate, DependencyGraph, MavenScope, NodeIndex};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Caps how many `FetchGraph` calls run concurrently — the same bound the
/// donor's `resolver::resolve` uses to prefetch POMs level by level,
/// generalized here to "fetch everything in the fetch list at once."
const MAX_CONCURRENT_FETCHES: usize = 8;

/// One project-declared input package: a root of the graph before
/// resolution decides whether it's shadowed by another input's subgraph.
#[derive(Debug, Clone)]
pub struct InputPackage {
    pub coordinate: Coordinate,
    pub scope: MavenScope,
}

/// Per-parent exclusions, keyed by the parent package's `name` (e.g. a
/// Maven `<exclusion>` declared against one dependency, filtering a child
/// by name regardless of which version responds).
pub type Exclusions = HashMap<String, HashSet<String>>;

/// Build the shared-node dependency DAG for `inputs`, fetching each input's
/// (and each not-yet-present managed coordinate's) complete transitive
/// graph from `client` and stitching the results into `graph`.
///
/// Returns the detected root nodes, in input order.
pub async fn build_dependency_trees(
    graph: &mut DependencyGraph,
    client: Arc<dyn MetadataClient>,
    inputs: &[InputPackage],
    managed: &[Coordinate],
    exclusions: &Exclusions,
) -> Vec<NodeIndex> {
    let mut fetch_list: Vec<String> = Vec::new();

    // Phase 1: pre-registration.
    for input in inputs {
        let idx = graph.get_or_create(input.coordinate.clone(), input.scope);
        graph.set_root(idx, true);
        annotate_vendor_version(graph, idx, &input.coordinate.version);
        let identity = input.coordinate.identity();
        if !fetch_list.contains(&identity) {
            fetch_list.push(identity);
        }
    }
    for coordinate in managed {
        let identity = coordinate.identity();
        if graph.index_of(&identity).is_none() {
            let idx = graph.get_or_create(coordinate.clone(), MavenScope::Compile);
            annotate_vendor_version(graph, idx, &coordinate.version);
        }
        if !fetch_list.contains(&identity) {
            fetch_list.push(identity);
        }
    }

    // Phase 2: fetch-and-stitch, bounded concurrency within this one wave —
    // deps.dev returns a package's *complete* transitive graph in a single
    // call, so there is no deeper level to expand into afterward.
    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES));
    let mut fetches = JoinSet::new();
    for identity in fetch_list {
        if graph.is_fetched(&identity) {
            continue;
        }
        let Some(idx) = graph.index_of(&identity) else {
            continue;
        };
        let coordinate = graph.package(idx).coordinate.clone();
        let client = Arc::clone(&client);
        let semaphore = Arc::clone(&semaphore);
        fetches.spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore not closed");
            let raw = client.fetch_graph(&coordinate).await;
            (identity, raw)
        });
    }

    let mut responses: Vec<(String, Option<RawGraph>)> = Vec::new();
    while let Some(result) = fetches.join_next().await {
        responses.push(result.expect("fetch task panicked"));
    }

    let mut appears_as_child: HashSet<String> = HashSet::new();
    let input_identities: HashSet<String> =
        inputs.iter().map(|i| i.coordinate.identity()).collect();

    for (identity, raw) in responses {
        let Some(raw) = raw else {
            // Unknown or failed fetch: the node stays a materialized leaf,
            // and `is_fetched` must stay false for it — highest-wins
            // priority 2 only locks in inputs whose fetch actually
            // succeeded (spec §4.4.2 point 2).
            continue;
        };
        graph.mark_fetched(&identity);
        stitch(graph, &raw, exclusions);

        for (i, node) in raw.nodes.iter().enumerate() {
            if raw.self_index() == Some(i) {
                continue;
            }
            let node_identity =
                format!("{}:{}:{}", node.version_key.system, node.version_key.name, node.version_key.version);
            if input_identities.contains(&node_identity) {
                appears_as_child.insert(node_identity);
            }
        }
    }

    // Phase 3: root detection by set difference.
    let mut roots = Vec::new();
    for input in inputs {
        let identity = input.coordinate.identity();
        let idx = graph
            .index_of(&identity)
            .expect("input was pre-registered in phase 1");
        let is_root = !appears_as_child.contains(&identity);
        graph.set_root(idx, is_root);
        if is_root {
            roots.push(idx);
        }
    }
    roots
}

/// If `version` matches the HeroDevs NES vendor-patch grammar (spec §4.1),
/// record the upstream/patched/artifact annotations onto the node's
/// package so the assembler can surface them as CycloneDX properties (spec
/// §3 `version_metadata`), and set `reported_version` to the patched
/// version so the assembler emits that instead of the raw vendor string. A
/// no-op for ordinary versions. The coordinate's own version string is left
/// untouched — it's still what a later `MetadataClient::fetch_graph` call
/// re-translates to form the upstream query, so annotating here must not
/// disturb it.
fn annotate_vendor_version(graph: &mut DependencyGraph, idx: NodeIndex, version: &str) {
    let translation = version::translate(version);
    if translation.metadata.is_empty() {
        return;
    }
    let package = graph.package_mut(idx);
    package.reported_version = translation.reported_version;
    package.version_metadata.extend(translation.metadata);
}

/// Stitch one fetched [`RawGraph`] into the global graph: obtain-or-create
/// each of its nodes, then add each of its edges, skipping any edge whose
/// target is excluded by the source's declared exclusions.
///
/// Edges are applied as a flat list rather than a recursive walk with a
/// `visited` set: cycles inside one response are harmless here because
/// `DependencyGraph::add_child` already dedups by target, so replaying the
/// same edge twice (as a cycle's back-edge naturally does when the whole
/// edge list is scanned) is a no-op, not an infinite descent.
pub(crate) fn stitch(graph: &mut DependencyGraph, raw: &RawGraph, exclusions: &Exclusions) {
    let mut local_index: HashMap<usize, NodeIndex> = HashMap::new();
    for (i, node) in raw.nodes.iter().enumerate() {
        let coordinate = Coordinate::new(
            &node.version_key.system,
            node.version_key.name.clone(),
            node.version_key.version.clone(),
        );
        let idx = graph.get_or_create(coordinate, MavenScope::Compile);
        annotate_vendor_version(graph, idx, &node.version_key.version);
        local_index.insert(i, idx);
    }

    for edge in &raw.edges {
        let (Some(&parent_idx), Some(&child_idx)) =
            (local_index.get(&edge.from_node), local_index.get(&edge.to_node))
        else {
            continue;
        };
        let parent_name = graph.package(parent_idx).coordinate.name.clone();
        let child_name = graph.package(child_idx).coordinate.name.clone();
        if exclusions
            .get(&parent_name)
            .is_some_and(|excluded| excluded.contains(&child_name))
        {
            continue;
        }
        graph.add_child(parent_idx, child_idx);
    }
}
