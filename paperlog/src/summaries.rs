//! Summary bookkeeping: listing pending papers, storing generated summaries
//! and resetting malformed ones.
use std::{io::Write, path::Path};

use log::{info, warn};
use paperlog_core::{PaperRecord, cell::encode_generated_summary};

use crate::{
  error::{PaperlogError, Result},
  utils::{read_ledger, write_ledger},
};

/// Papers still waiting for a summary, in ledger order.
///
/// # Errors
///
/// Returns an error if the ledger is missing or unreadable.
pub fn pending(ledger_path: &Path) -> Result<Vec<PaperRecord>> {
  let ledger = read_ledger(ledger_path)?;
  Ok(ledger.pending().into_iter().cloned().collect())
}

/// Write `records` as a pretty JSON array followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_pending<W: Write>(
  mut out: W,
  records: &[PaperRecord],
) -> Result<()> {
  serde_json::to_writer_pretty(&mut out, records)?;
  writeln!(out)?;
  Ok(())
}

/// Encode raw summarizer output and store it for the paper at `link`.
///
/// # Errors
///
/// Returns an error if the text is empty after cleanup, no paper matches
/// `link`, or the ledger cannot be read or written.
pub fn store_summary(ledger_path: &Path, link: &str, text: &str) -> Result<()> {
  let payload = encode_generated_summary(text);
  if payload.is_empty() {
    return Err(PaperlogError::EmptySummary);
  }

  let mut ledger = read_ledger(ledger_path)?;
  if !ledger.set_summary(link, &payload) {
    return Err(PaperlogError::UnknownLink(link.to_string()));
  }

  write_ledger(ledger_path, &ledger)?;
  info!("Stored summary for {link}");
  Ok(())
}

/// Reset every summary lacking a section heading to the placeholder.
///
/// Returns the titles that were reset. The ledger is only rewritten when
/// something changed.
///
/// # Errors
///
/// Returns an error if the ledger cannot be read or written.
pub fn clear_malformed(ledger_path: &Path) -> Result<Vec<String>> {
  let mut ledger = read_ledger(ledger_path)?;
  let reset = ledger.reset_malformed_summaries();

  for title in &reset {
    warn!("Reset malformed summary: {title}");
  }

  if reset.is_empty() {
    info!("All summaries are well formed");
  } else {
    write_ledger(ledger_path, &ledger)?;
    info!("Reset {} summaries to the placeholder", reset.len());
  }
  Ok(reset)
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_write_pending() {
    let records = vec![PaperRecord::new("2025-01-01", "T", "L", "C")];
    let mut buf = Vec::new();
    write_pending(&mut buf, &records).expect("write in test");

    let text = String::from_utf8(buf).expect("utf-8 in test");
    assert!(text.ends_with("]\n"));
    let parsed: Vec<PaperRecord> =
      serde_json::from_str(&text).expect("parse in test");
    assert_eq!(parsed, records);
  }

  #[test]
  fn test_store_summary_rejects_empty_text() {
    let result = store_summary(Path::new("does-not-matter.md"), "L", " \n ");
    assert!(matches!(result, Err(PaperlogError::EmptySummary)));
  }
}
