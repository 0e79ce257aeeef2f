//! File helpers shared by the subcommands.
use std::{fs, path::Path};

use log::debug;
use paperlog_core::Ledger;

use crate::error::{PaperlogError, Result};

/// Read and parse the ledger at `path`.
///
/// # Errors
///
/// Returns [`PaperlogError::MissingLedger`] if the file does not exist, or an
/// I/O error if it cannot be read.
pub fn read_ledger(path: &Path) -> Result<Ledger> {
  if !path.exists() {
    return Err(PaperlogError::MissingLedger(path.to_path_buf()));
  }

  let text = fs::read_to_string(path)?;
  debug!("Read ledger {} ({} bytes)", path.display(), text.len());
  Ok(Ledger::parse(&text))
}

/// Read the ledger at `path`, or start an empty one if it does not exist.
///
/// # Errors
///
/// Returns an I/O error if an existing file cannot be read.
pub fn read_or_create_ledger(path: &Path) -> Result<Ledger> {
  match read_ledger(path) {
    Err(PaperlogError::MissingLedger(_)) => {
      debug!("Starting a new ledger at {}", path.display());
      Ok(Ledger::new())
    },
    other => other,
  }
}

/// Write `ledger` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_ledger(path: &Path, ledger: &Ledger) -> Result<()> {
  write_file(path, &ledger.render())
}

/// Write `content` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an I/O error if a directory or the file cannot be written.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, content)?;
  debug!("Wrote {}", path.display());
  Ok(())
}
