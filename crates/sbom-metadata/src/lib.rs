//! Remote package metadata: fetching transitive dependency graphs from
//! deps.dev and translating vendor-patched ("HeroDevs NES") versions.

pub mod client;
pub mod fake;
pub mod raw_graph;
pub mod version;

pub use client::{DepsDevClient, MetadataClient};
pub use fake::FakeMetadataClient;
pub use raw_graph::{RawEdge, RawGraph, RawNode, Relation, VersionKey};
