use std::{io, path::PathBuf};

use paperlog_config::ConfigError;
use thiserror::Error;

/// Top-level error type for the paperlog crate.
#[derive(Debug, Error)]
pub enum PaperlogError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("Ledger not found: {}", .0.display())]
  MissingLedger(PathBuf),

  #[error("No paper with link {0} in the ledger")]
  UnknownLink(String),

  #[error("Summary text is empty")]
  EmptySummary,

  #[error("Template error: {0}")]
  Template(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("Thread pool error: {0}")]
  ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl From<tera::Error> for PaperlogError {
  fn from(e: tera::Error) -> Self {
    Self::Template(e.to_string())
  }
}

/// Result alias for paperlog operations.
pub type Result<T, E = PaperlogError> = std::result::Result<T, E>;
