//! Dependency resolution engine: the core of the SBOM synthesis pipeline.
//!
//! Four collaborating phases, each owning a slice of the shared
//! [`sbom_model::DependencyGraph`]: [`graph_builder`] stitches per-package
//! subgraphs fetched from a `sbom_metadata::MetadataClient` into one
//! shared-node DAG, [`override_applier`] forces project dependency-
//! management versions in ahead of conflict resolution, [`conflict_resolver`]
//! picks one winner per `(system, name)` and redirects edges onto it, and
//! [`scope_propagator`] propagates Maven's test/provided/system scope
//! semantics across whatever the resolver left standing.

pub mod conflict;
pub mod conflict_resolver;
pub mod graph_builder;
pub mod override_applier;
pub mod scope_propagator;
pub mod version_compare;

pub use conflict::{ConflictReport, VersionConflict};
pub use graph_builder::{build_dependency_trees, Exclusions, InputPackage};
pub use override_applier::apply_managed_overrides;
