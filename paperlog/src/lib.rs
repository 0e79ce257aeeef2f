//! Library half of the `paperlog` binary: CLI definitions and the file-level
//! operations behind each subcommand. Exposed for integration tests and the
//! `xtask` crate.
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod site;
pub mod summaries;
pub mod utils;
