//! CLI argument definitions.
//!
//! Only the `create` subcommand is implemented here; `enrich`, `print`,
//! `compare`, `stats`, `validate`, and `graph` live outside this crate.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "sbom-engine",
    version,
    about = "Synthesizes a CycloneDX SBOM from a flat list of package coordinates",
    long_about = "Resolves the transitive dependency graph of a set of input packages, \
                  reconciles conflicting versions, propagates scopes, and emits a \
                  deterministic CycloneDX 1.6 document."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level when `--verbose` is not set and `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub loglevel: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    Maven,
    Highest,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFilterArg {
    Compile,
    Runtime,
    Test,
    Provided,
    All,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve an input package list and emit a CycloneDX SBOM.
    Create {
        /// Path to a flat-list input file (one `system:name:version` per
        /// line, `#` starts a comment; Maven `mvn dependency:tree` output
        /// is also tolerated).
        input: PathBuf,

        /// Conflict resolution strategy.
        #[arg(long, value_enum, default_value = "maven")]
        strategy: StrategyArg,

        /// Only emit components whose Maven scope matches (or `all`).
        #[arg(long, value_enum, default_value = "all")]
        scope: ScopeFilterArg,

        /// Project name recorded in the tool-identity metadata.
        #[arg(long, default_value = "sbom-engine")]
        project_name: String,

        /// Write the document to this path instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base URL of the metadata service (overridable for self-hosted
        /// mirrors and tests).
        #[arg(long)]
        base_url: Option<String>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
