//! Core data types for the SBOM synthesis engine.
//!
//! This crate defines the shared vocabulary every other crate in the
//! workspace builds on: package coordinates, the `Package` record with its
//! scope/conflict bookkeeping, and the shared-node dependency graph that
//! `sbom-resolver` mutates in place.
//!
//! This crate is intentionally free of async code and network I/O.

pub mod coordinate;
pub mod graph;
pub mod package;
pub mod scope;

pub use coordinate::{Coordinate, Ecosystem};
pub use graph::{DependencyGraph, Node, NodeIndex};
pub use package::Package;
pub use scope::{ExclusionReason, MavenScope, Scope, Strategy};
