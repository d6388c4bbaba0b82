//! Forces project dependency-management versions into the graph,
//! regardless of what the metadata service suggested for upstream
//! dependents.

use sbom_metadata::MetadataClient;
use sbom_model::{Coordinate, DependencyGraph, ExclusionReason, MavenScope};

use crate::graph_builder::{self, Exclusions};

/// For every node whose `(system, name)` matches one of `managed` with a
/// different version, mark it `override-loser`, fetching the managed
/// version's subgraph first if it isn't already in the graph.
pub async fn apply_managed_overrides(
    graph: &mut DependencyGraph,
    client: &dyn MetadataClient,
    managed: &[Coordinate],
) {
    for target in managed {
        let target_identity = target.identity();
        let target_base = target.base_key();

        let losers: Vec<_> = graph
            .all_indices()
            .filter(|&idx| {
                let pkg = graph.package(idx);
                pkg.base_key() == target_base && pkg.coordinate.version != target.version
            })
            .collect();
        if losers.is_empty() {
            continue;
        }

        let winner_idx = match graph.index_of(&target_identity) {
            Some(idx) => idx,
            None => {
                let idx = graph.get_or_create(target.clone(), MavenScope::Compile);
                if let Some(raw) = client.fetch_graph(target).await {
                    graph_builder::stitch(graph, &raw, &Exclusions::new());
                    graph.mark_fetched(target_identity.clone());
                }
                idx
            }
        };

        for loser_idx in losers {
            let loser_version = graph.package(loser_idx).coordinate.version.clone();
            graph.package_mut(loser_idx).exclude(ExclusionReason::OverrideLoser);
            graph.package_mut(loser_idx).winning_version = Some(target.version.clone());

            let winner = graph.package_mut(winner_idx);
            winner.is_override_winner = true;
            winner.record_defeated(loser_version);
        }
    }
}
