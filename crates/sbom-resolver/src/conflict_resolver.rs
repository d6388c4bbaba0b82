//! Picks exactly one winning version per `(system, name)` pair, redirects
//! every parent edge onto the winner, and marks losers and their orphaned
//! subtrees as excluded — without ever deleting a node or an edge.

use std::collections::{HashMap, HashSet, VecDeque};

use sbom_model::{DependencyGraph, ExclusionReason, NodeIndex, Scope, Strategy};

use crate::conflict::{ConflictReport, VersionConflict};
use crate::version_compare;

/// Run conflict resolution over every node currently in `graph`, reachable
/// or not, using `strategy` to pick one winner per base key. `roots` is only
/// needed by [`Strategy::Maven`]'s BFS; [`Strategy::Highest`] ignores it in
/// favor of `managed` and `inputs`.
pub fn resolve(
    graph: &mut DependencyGraph,
    roots: &[NodeIndex],
    strategy: Strategy,
    managed: &[String],
) -> ConflictReport {
    let mut winners = match strategy {
        Strategy::Maven => nearest_wins(graph, roots),
        Strategy::Highest => highest_wins(graph, managed),
    };

    // Dependency-management overrides (applied by `OverrideApplier` ahead of
    // this phase) win regardless of strategy: neither nearest-wins nor
    // highest-wins can see an override winner that `OverrideApplier` fetched
    // on the side but that never got wired into the reachable graph as an
    // edge target, so a BFS or version scan could otherwise "re-defeat" it.
    for (base_key, version) in override_locked_winners(graph) {
        winners.insert(base_key, version);
    }

    let report = redirect_losers(graph, &winners, strategy);
    exclude_orphans(graph);
    report
}

/// Every base key with a node forced in by project dependency-management,
/// mapped to that node's version.
fn override_locked_winners(graph: &DependencyGraph) -> HashMap<String, String> {
    let mut locked = HashMap::new();
    for idx in graph.all_indices() {
        let package = graph.package(idx);
        if package.is_override_winner {
            locked.insert(package.base_key(), package.coordinate.version.clone());
        }
    }
    locked
}

/// Maven's default strategy: breadth-first from each root, the shallowest
/// occurrence of a base key wins; ties break toward the higher version
/// (spec §4.4.1).
fn nearest_wins(graph: &DependencyGraph, roots: &[NodeIndex]) -> HashMap<String, String> {
    let mut recorded: HashMap<String, (String, usize)> = HashMap::new();
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();

    for &root in roots {
        if visited.insert(root) {
            queue.push_back((root, 0));
        }
    }

    while let Some((idx, depth)) = queue.pop_front() {
        let package = graph.package(idx);
        let base_key = package.base_key();
        let version = package.coordinate.version.clone();

        match recorded.get(&base_key) {
            None => {
                recorded.insert(base_key, (version, depth));
            }
            Some((existing_version, existing_depth)) => {
                let replace = if depth < *existing_depth {
                    true
                } else if depth == *existing_depth {
                    version_compare::is_higher(&version, existing_version)
                } else {
                    false
                };
                if replace {
                    recorded.insert(base_key, (version, depth));
                }
            }
        }

        for child in graph.children_of(idx) {
            if visited.insert(child) {
                queue.push_back((child, depth + 1));
            }
        }
    }

    recorded.into_iter().map(|(k, (v, _))| (k, v)).collect()
}

/// Priority-merge project dependency-management, then successfully-fetched
/// input versions, then the strictly highest version seen anywhere else
/// (spec §4.4.2).
fn highest_wins(graph: &DependencyGraph, managed: &[String]) -> HashMap<String, String> {
    let mut winners: HashMap<String, String> = HashMap::new();
    let mut locked: HashSet<String> = HashSet::new();

    // Priority 1: project dependency-management entries.
    for identity in managed {
        if let Some(idx) = graph.index_of(identity) {
            let package = graph.package(idx);
            winners.insert(package.base_key(), package.coordinate.version.clone());
            locked.insert(package.base_key());
        }
    }

    // Priority 2: input packages whose fetch succeeded (a root that is
    // actually present and fetched, i.e. not a dangling reference).
    for idx in graph.all_indices() {
        let node = graph.node(idx);
        if !node.is_root {
            continue;
        }
        let package = &node.package;
        let base_key = package.base_key();
        if locked.contains(&base_key) {
            continue;
        }
        if graph.is_fetched(&package.identity()) {
            winners.insert(base_key.clone(), package.coordinate.version.clone());
            locked.insert(base_key);
        }
    }

    // Priority 3: the strictly highest version seen among all remaining
    // nodes.
    for idx in graph.all_indices() {
        let package = graph.package(idx);
        let base_key = package.base_key();
        if locked.contains(&base_key) {
            continue;
        }
        match winners.get(&base_key) {
            None => {
                winners.insert(base_key, package.coordinate.version.clone());
            }
            Some(current) if version_compare::is_higher(&package.coordinate.version, current) => {
                winners.insert(base_key, package.coordinate.version.clone());
            }
            _ => {}
        }
    }

    winners
}

/// For every node whose version does not match its base key's recorded
/// winner, mark it excluded, redirect its parents' edges to the winner, and
/// record the defeat on the winner — without removing the loser's own
/// incoming edges (spec §4.4 "Redirection algorithm").
fn redirect_losers(
    graph: &mut DependencyGraph,
    winners: &HashMap<String, String>,
    strategy: Strategy,
) -> ConflictReport {
    let mut report = ConflictReport::new();

    let losers: Vec<NodeIndex> = graph
        .all_indices()
        .filter(|&idx| {
            let package = graph.package(idx);
            match winners.get(&package.base_key()) {
                Some(winning_version) => *winning_version != package.coordinate.version,
                None => false,
            }
        })
        .collect();

    for loser_idx in losers {
        let package = graph.package(loser_idx);
        let base_key = package.base_key();
        let loser_version = package.coordinate.version.clone();
        let winning_version = winners.get(&base_key).cloned().unwrap_or_default();
        let winner_identity = format!("{}:{}", base_key, winning_version);

        let Some(winner_idx) = graph.index_of(&winner_identity) else {
            // The winner was never materialized as a node (shouldn't happen
            // for any strategy above, since every winner is sourced from an
            // existing node) — skip rather than invent a dangling edge.
            continue;
        };
        if winner_idx == loser_idx {
            continue;
        }

        report.add(VersionConflict {
            coordinate_key: base_key,
            requested: loser_version.clone(),
            resolved: winning_version.clone(),
            reason: format!("{strategy}-wins"),
        });

        let parents: Vec<NodeIndex> = graph.parents_of(loser_idx).collect();

        {
            let loser = graph.package_mut(loser_idx);
            loser.exclude(ExclusionReason::Loser);
            loser.winning_version = Some(winning_version.clone());
            loser.scope_strategy = Some(strategy);
        }
        {
            let winner = graph.package_mut(winner_idx);
            winner.record_defeated(loser_version);
            winner.scope_strategy = Some(strategy);
        }

        for parent in parents {
            if !graph.has_edge(parent, winner_idx) {
                graph.add_child(parent, winner_idx);
            }
        }
    }

    report
}

/// Walk the subtree reachable from every excluded node; a child becomes
/// excluded with reason `ConflictResolutionSubtree` iff *all* of its
/// parents are themselves excluded. Applied to a fixed point so a node
/// saved by any non-excluded parent anchors its whole reachable subtree
/// (spec §4.4 "Orphan exclusion").
fn exclude_orphans(graph: &mut DependencyGraph) {
    loop {
        let mut changed = false;
        let candidates: Vec<NodeIndex> = graph.all_indices().collect();
        for idx in candidates {
            if graph.package(idx).scope.is_excluded() {
                continue;
            }
            let parents: Vec<NodeIndex> = graph.parents_of(idx).collect();
            if parents.is_empty() {
                continue;
            }
            let all_parents_excluded = parents
                .iter()
                .all(|&p| graph.package(p).scope.is_excluded());
            if all_parents_excluded {
                graph
                    .package_mut(idx)
                    .exclude(ExclusionReason::ConflictResolutionSubtree);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
}
