//! End-to-end pipeline tests driven by a [`FakeMetadataClient`], covering
//! the six literal scenarios the specification calls out, run through the
//! full `build_dependency_trees -> apply_managed_overrides -> resolve ->
//! propagate` sequence rather than any one stage in isolation.

use std::sync::Arc;

use sbom_metadata::{FakeMetadataClient, MetadataClient, RawEdge, RawGraph, RawNode, Relation, VersionKey};
use sbom_model::{Coordinate, DependencyGraph, ExclusionReason, MavenScope, Strategy};
use sbom_resolver::graph_builder::Exclusions;
use sbom_resolver::{apply_managed_overrides, build_dependency_trees, conflict_resolver, scope_propagator, InputPackage};

fn coord(name: &str, version: &str) -> Coordinate {
    Coordinate::new("maven", name, version)
}

fn vkey(name: &str, version: &str) -> VersionKey {
    VersionKey {
        system: "maven".to_string(),
        name: name.to_string(),
        version: version.to_string(),
    }
}

fn self_and_one_child(self_name: &str, self_version: &str, child_name: &str, child_version: &str) -> RawGraph {
    RawGraph {
        nodes: vec![
            RawNode {
                version_key: vkey(self_name, self_version),
                relation: Relation::SelfNode,
            },
            RawNode {
                version_key: vkey(child_name, child_version),
                relation: Relation::Direct,
            },
        ],
        edges: vec![RawEdge { from_node: 0, to_node: 1 }],
    }
}

fn input(name: &str, version: &str, scope: MavenScope) -> InputPackage {
    InputPackage {
        coordinate: coord(name, version),
        scope,
    }
}

/// Scenario 1: flat input, highest-wins. `B` depends on `commons:io:2.5`,
/// `C` depends on `commons:io:2.11`; `2.11` wins, `2.5` is excluded and the
/// redirected edge points both roots at the winner.
#[tokio::test]
async fn scenario_flat_input_highest_wins() {
    let client: Arc<dyn MetadataClient> = Arc::new(
        FakeMetadataClient::new()
            .with_fixture("maven:a:b:1.0", self_and_one_child("a:b", "1.0", "commons:io", "2.5"))
            .with_fixture("maven:a:c:1.0", self_and_one_child("a:c", "1.0", "commons:io", "2.11")),
    );
    let inputs = vec![
        input("a:b", "1.0", MavenScope::Compile),
        input("a:c", "1.0", MavenScope::Compile),
    ];

    let mut graph = DependencyGraph::new();
    let roots = build_dependency_trees(&mut graph, client, &inputs, &[], &Exclusions::new()).await;
    assert_eq!(roots.len(), 2);

    conflict_resolver::resolve(&mut graph, &roots, Strategy::Highest, &[]);

    let io25 = graph.index_of("maven:commons:io:2.5").unwrap();
    let io211 = graph.index_of("maven:commons:io:2.11").unwrap();

    assert!(graph.package(io25).scope.is_excluded());
    assert_eq!(graph.package(io25).scope_reason(), Some(ExclusionReason::Loser));
    assert_eq!(graph.package(io25).winning_version.as_deref(), Some("2.11"));
    assert!(!graph.package(io211).scope.is_excluded());
    assert_eq!(graph.package(io211).defeated_versions, vec!["2.5".to_string()]);

    let b = graph.index_of("maven:a:b:1.0").unwrap();
    let c = graph.index_of("maven:a:c:1.0").unwrap();
    assert!(graph.has_edge(b, io211));
    assert!(graph.has_edge(c, io211));
}

/// Scenario 2: Maven nearest-wins. Root `X` depends directly on `lib:1.0`
/// and, via `Y`, on `lib:2.0` at depth 2 — the shallower `1.0` wins.
#[tokio::test]
async fn scenario_maven_nearest_wins() {
    let raw_x = RawGraph {
        nodes: vec![
            RawNode { version_key: vkey("g:x", "1.0"), relation: Relation::SelfNode },
            RawNode { version_key: vkey("g:lib", "1.0"), relation: Relation::Direct },
            RawNode { version_key: vkey("g:y", "1.0"), relation: Relation::Direct },
            RawNode { version_key: vkey("g:lib", "2.0"), relation: Relation::Indirect },
        ],
        edges: vec![
            RawEdge { from_node: 0, to_node: 1 },
            RawEdge { from_node: 0, to_node: 2 },
            RawEdge { from_node: 2, to_node: 3 },
        ],
    };
    let client: Arc<dyn MetadataClient> = Arc::new(FakeMetadataClient::new().with_fixture("maven:g:x:1.0", raw_x));
    let inputs = vec![input("g:x", "1.0", MavenScope::Compile)];

    let mut graph = DependencyGraph::new();
    let roots = build_dependency_trees(&mut graph, client, &inputs, &[], &Exclusions::new()).await;
    conflict_resolver::resolve(&mut graph, &roots, Strategy::Maven, &[]);

    let lib10 = graph.index_of("maven:g:lib:1.0").unwrap();
    let lib20 = graph.index_of("maven:g:lib:2.0").unwrap();
    assert!(!graph.package(lib10).scope.is_excluded());
    assert!(graph.package(lib20).scope.is_excluded());
    assert_eq!(graph.package(lib20).scope_reason(), Some(ExclusionReason::Loser));
}

/// Scenario 3: override. Project dependency-management forces `lib -> 3.0`;
/// the fetched graph only contains `lib:2.0`. `3.0` is fetched separately
/// and becomes the override winner.
#[tokio::test]
async fn scenario_override_forces_a_managed_version() {
    let raw_root = self_and_one_child("a:root", "1.0", "g:lib", "2.0");
    let client: Arc<dyn MetadataClient> = Arc::new(
        FakeMetadataClient::new()
            .with_fixture("maven:a:root:1.0", raw_root)
            .with_fixture(
                "maven:g:lib:3.0",
                RawGraph {
                    nodes: vec![RawNode { version_key: vkey("g:lib", "3.0"), relation: Relation::SelfNode }],
                    edges: vec![],
                },
            ),
    );
    let inputs = vec![input("a:root", "1.0", MavenScope::Compile)];
    let managed = vec![coord("g:lib", "3.0")];

    let mut graph = DependencyGraph::new();
    let roots = build_dependency_trees(&mut graph, Arc::clone(&client), &inputs, &managed, &Exclusions::new()).await;
    apply_managed_overrides(&mut graph, client.as_ref(), &managed).await;
    conflict_resolver::resolve(&mut graph, &roots, Strategy::Maven, &["maven:g:lib:3.0".to_string()]);

    let lib20 = graph.index_of("maven:g:lib:2.0").unwrap();
    let lib30 = graph.index_of("maven:g:lib:3.0").unwrap();
    assert!(graph.package(lib20).scope.is_excluded());
    assert_eq!(graph.package(lib20).scope_reason(), Some(ExclusionReason::OverrideLoser));
    assert_eq!(graph.package(lib20).winning_version.as_deref(), Some("3.0"));
    assert!(graph.package(lib30).is_override_winner);
}

/// Scenario 4: exclusion. The parent declares an exclusion against
/// `group:evil`; the fetched graph for the dependency contains it as a
/// child, but the edge is filtered before it ever reaches the graph.
#[tokio::test]
async fn scenario_exclusion_drops_the_named_edge() {
    let raw = self_and_one_child("d:d", "1.0", "group:evil", "1.0");
    let client: Arc<dyn MetadataClient> = Arc::new(FakeMetadataClient::new().with_fixture("maven:d:d:1.0", raw));
    let inputs = vec![input("d:d", "1.0", MavenScope::Compile)];
    let mut exclusions = Exclusions::new();
    exclusions.insert("d:d".to_string(), std::collections::HashSet::from(["group:evil".to_string()]));

    let mut graph = DependencyGraph::new();
    let roots = build_dependency_trees(&mut graph, client, &inputs, &[], &exclusions).await;

    assert_eq!(graph.children_of(roots[0]).count(), 0);
    assert!(graph.index_of("maven:group:evil:1.0").is_none());
}

/// Scenario 5: test-scope propagation. `R_t` (test) and `R_c` (compile)
/// both depend on `U`, which stays required; `V` is reachable only from
/// `R_t` and is excluded as a test dependency.
#[tokio::test]
async fn scenario_test_scope_propagation() {
    let raw_t = RawGraph {
        nodes: vec![
            RawNode { version_key: vkey("g:rt", "1.0"), relation: Relation::SelfNode },
            RawNode { version_key: vkey("g:u", "1.0"), relation: Relation::Direct },
            RawNode { version_key: vkey("g:v", "1.0"), relation: Relation::Direct },
        ],
        edges: vec![
            RawEdge { from_node: 0, to_node: 1 },
            RawEdge { from_node: 0, to_node: 2 },
        ],
    };
    let raw_c = self_and_one_child("g:rc", "1.0", "g:u", "1.0");
    let client: Arc<dyn MetadataClient> = Arc::new(
        FakeMetadataClient::new()
            .with_fixture("maven:g:rt:1.0", raw_t)
            .with_fixture("maven:g:rc:1.0", raw_c),
    );
    let inputs = vec![
        input("g:rt", "1.0", MavenScope::Test),
        input("g:rc", "1.0", MavenScope::Compile),
    ];

    let mut graph = DependencyGraph::new();
    let roots = build_dependency_trees(&mut graph, client, &inputs, &[], &Exclusions::new()).await;
    conflict_resolver::resolve(&mut graph, &roots, Strategy::Maven, &[]);
    scope_propagator::propagate(&mut graph, &roots);

    let u = graph.index_of("maven:g:u:1.0").unwrap();
    let v = graph.index_of("maven:g:v:1.0").unwrap();
    assert!(!graph.package(u).scope.is_excluded());
    assert!(graph.package(v).scope.is_excluded());
    assert_eq!(graph.package(v).scope_reason(), Some(ExclusionReason::TestDependency));
}

/// Scenario 6: a cycle `A -> B -> A` in the fetched graph terminates
/// construction and resolution rather than looping forever, and each node
/// still appears exactly once.
#[tokio::test]
async fn scenario_cycle_terminates_and_each_node_appears_once() {
    let raw = RawGraph {
        nodes: vec![
            RawNode { version_key: vkey("g:a", "1.0"), relation: Relation::SelfNode },
            RawNode { version_key: vkey("g:b", "1.0"), relation: Relation::Direct },
        ],
        edges: vec![
            RawEdge { from_node: 0, to_node: 1 },
            RawEdge { from_node: 1, to_node: 0 },
        ],
    };
    let client: Arc<dyn MetadataClient> = Arc::new(FakeMetadataClient::new().with_fixture("maven:g:a:1.0", raw));
    let inputs = vec![input("g:a", "1.0", MavenScope::Compile)];

    let mut graph = DependencyGraph::new();
    let roots = build_dependency_trees(&mut graph, client, &inputs, &[], &Exclusions::new()).await;
    conflict_resolver::resolve(&mut graph, &roots, Strategy::Maven, &[]);
    scope_propagator::propagate(&mut graph, &roots);

    assert!(graph.check_structural_invariants().is_ok());
    let a = graph.index_of("maven:g:a:1.0").unwrap();
    let b = graph.index_of("maven:g:b:1.0").unwrap();
    assert!(graph.has_edge(a, b));
    assert!(graph.has_edge(b, a));
    assert_eq!(graph.len(), 2);
}
