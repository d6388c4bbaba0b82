//! Handler for `sbom-engine create`: the one command this crate
//! implements, wiring the full core pipeline end to end.

use std::path::PathBuf;
use std::sync::Arc;

use sbom_assembler::{assemble, ProjectHeader, SystemClock};
use sbom_metadata::{DepsDevClient, MetadataClient};
use sbom_model::{DependencyGraph, MavenScope, Strategy};
use sbom_resolver::graph_builder::Exclusions;
use sbom_resolver::{build_dependency_trees, conflict_resolver, scope_propagator};
use sbom_util::errors::{SbomError, SbomResult};

use crate::cli::{ScopeFilterArg, StrategyArg};
use crate::input;

pub struct CreateArgs {
    pub input: PathBuf,
    pub strategy: StrategyArg,
    pub scope: ScopeFilterArg,
    pub project_name: String,
    pub output: Option<PathBuf>,
    pub base_url: Option<String>,
}

pub async fn exec(args: CreateArgs) -> SbomResult<()> {
    let mut inputs = input::parse_file(&args.input)?;
    filter_by_scope(&mut inputs, args.scope);

    let client: Arc<dyn MetadataClient> = match args.base_url.as_deref() {
        Some(base_url) => Arc::new(DepsDevClient::with_base_url(base_url)?),
        None => Arc::new(DepsDevClient::new()?),
    };

    let mut graph = DependencyGraph::new();
    let roots = build_dependency_trees(&mut graph, client, &inputs, &[], &Exclusions::new()).await;

    let strategy = match args.strategy {
        StrategyArg::Maven => Strategy::Maven,
        StrategyArg::Highest => Strategy::Highest,
    };
    conflict_resolver::resolve(&mut graph, &roots, strategy, &[]);
    scope_propagator::propagate(&mut graph, &roots);

    graph
        .check_structural_invariants()
        .map_err(|_| SbomError::Resolution {
            message: "graph invariants violated after resolution".to_string(),
        })?;

    tracing::info!(project = %args.project_name, "assembling SBOM");
    let header = ProjectHeader::new("sbom-engine", env!("CARGO_PKG_VERSION"))
        .with_command_line(std::env::args().collect::<Vec<_>>().join(" "));
    let document = assemble(&graph, &header, &SystemClock);
    let json = document.to_json().map_err(|e| SbomError::Generic {
        message: format!("failed to serialize SBOM: {e}"),
    })?;

    match &args.output {
        Some(path) => std::fs::write(path, json).map_err(SbomError::Io)?,
        None => println!("{json}"),
    }

    Ok(())
}

/// Keep only input packages whose declared Maven scope matches `filter`
/// (or all of them, for [`ScopeFilterArg::All`]) before resolution begins.
fn filter_by_scope(inputs: &mut Vec<sbom_resolver::InputPackage>, filter: ScopeFilterArg) {
    let wanted = match filter {
        ScopeFilterArg::All => return,
        ScopeFilterArg::Compile => MavenScope::Compile,
        ScopeFilterArg::Runtime => MavenScope::Runtime,
        ScopeFilterArg::Test => MavenScope::Test,
        ScopeFilterArg::Provided => MavenScope::Provided,
    };
    inputs.retain(|pkg| pkg.scope == wanted);
}
