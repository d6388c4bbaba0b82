use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for the SBOM synthesis engine.
#[derive(Debug, Error, Diagnostic)]
pub enum SbomError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input (a flat-list line that doesn't parse, an unknown
    /// ecosystem, etc). Surfaced to the caller; the process exits 1.
    #[error("Input error: {message}")]
    #[diagnostic(help("Check the input file for malformed coordinates"))]
    Input { message: String },

    /// A graph invariant (shared-node uniqueness, edge coherence, loser/
    /// winner duality, ...) was violated. This is always a bug in the
    /// resolver, never a consequence of bad input or a flaky upstream.
    #[error("Internal invariant violation: {message}")]
    #[diagnostic(help("This indicates a bug in the resolver, not bad input"))]
    Resolution { message: String },

    /// Building the shared HTTP client failed. A single fetch returning a
    /// non-200 or timing out is NOT modeled as this error — see
    /// `sbom_metadata::MetadataClient`, which degrades those to `None`.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type SbomResult<T> = miette::Result<T>;
