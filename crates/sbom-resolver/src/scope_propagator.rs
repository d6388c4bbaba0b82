//! Propagates Maven's test/provided/system scope semantics across the
//! reconciled graph: a package reachable only through test-like roots is
//! excluded, unless some other root reaches it through a required path —
//! "required overrides excluded" (spec §4.5).

use std::collections::HashSet;

use sbom_model::{DependencyGraph, ExclusionReason, NodeIndex};

/// Mark every node reachable exclusively from test-like roots as
/// `Excluded(TestDependency)`, unless it's also reachable from a
/// required-scope root.
pub fn propagate(graph: &mut DependencyGraph, roots: &[NodeIndex]) {
    let mut test_roots = Vec::new();
    let mut required_roots = Vec::new();
    for &root in roots {
        if graph.package(root).is_test_like_root() {
            test_roots.push(root);
        } else {
            required_roots.push(root);
        }
    }

    let test_reachable = reachable_from(graph, &test_roots);
    let required_reachable = reachable_from(graph, &required_roots);

    for idx in test_reachable.difference(&required_reachable) {
        let package = graph.package_mut(*idx);
        if !package.scope.is_excluded() {
            package.exclude(ExclusionReason::TestDependency);
        }
    }
}

/// Standard DAG traversal over children edges with a shared `visited` set,
/// so a cycle in the raw graph terminates rather than looping forever.
fn reachable_from(graph: &DependencyGraph, roots: &[NodeIndex]) -> HashSet<NodeIndex> {
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut stack: Vec<NodeIndex> = roots.to_vec();
    for &root in roots {
        visited.insert(root);
    }
    while let Some(idx) = stack.pop() {
        for child in graph.children_of(idx) {
            if visited.insert(child) {
                stack.push(child);
            }
        }
    }
    visited
}
