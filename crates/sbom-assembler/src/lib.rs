//! Emits a deterministic CycloneDX 1.6 document from a reconciled
//! dependency graph: the final stage of the SBOM synthesis pipeline.

pub mod assembler;
pub mod clock;
pub mod cyclonedx;
pub mod purl;

pub use assembler::{assemble, ProjectHeader};
pub use clock::{Clock, FixedClock, SystemClock};
pub use cyclonedx::SbomDocument;
pub use purl::{group_and_name, purl};
