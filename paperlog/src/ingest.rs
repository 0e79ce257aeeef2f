//! Insertion of freshly fetched papers into the ledger.
use std::{fs, path::Path};

use log::{info, warn};
use paperlog_core::{Ledger, PaperRecord, cell::placeholder_cell};
use serde::Deserialize;

use crate::{
  error::Result,
  utils::{read_or_create_ledger, write_ledger},
};

/// One paper as handed over by the fetcher.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct IngestEntry {
  /// Publication date as `YYYY-MM-DD`; may be empty.
  #[serde(default)]
  pub date: String,
  pub title: String,
  pub link: String,
}

/// Outcome of an ingest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
  pub inserted:   usize,
  pub duplicates: usize,
  pub invalid:    usize,
}

impl IngestEntry {
  /// Turn the entry into a pending ledger record.
  ///
  /// Returns `None` if the date is neither empty nor a valid calendar date,
  /// or if the title or link is blank.
  #[must_use]
  pub fn into_record(self) -> Option<PaperRecord> {
    let record = PaperRecord::new(
      self.date.trim(),
      clean_title(&self.title),
      self.link.trim(),
      placeholder_cell(),
    );
    if !record.date.is_empty() && record.published().is_none() {
      warn!("Skipping '{}': invalid date '{}'", record.title, record.date);
      return None;
    }

    if record.title.is_empty() || record.link.is_empty() {
      warn!("Skipping entry with empty title or link: {}", record.link);
      return None;
    }

    Some(record)
  }
}

/// Collapse a title onto one line.
#[must_use]
pub fn clean_title(title: &str) -> String {
  title.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Insert `entries` into `ledger`, newest batch first.
pub fn ingest_entries(
  ledger: &mut Ledger,
  entries: Vec<IngestEntry>,
) -> IngestReport {
  let total = entries.len();
  let records: Vec<PaperRecord> = entries
    .into_iter()
    .filter_map(IngestEntry::into_record)
    .collect();
  let invalid = total - records.len();
  let valid = records.len();

  let inserted = ledger.insert_new(records);
  IngestReport {
    inserted,
    duplicates: valid - inserted,
    invalid,
  }
}

/// Read entries from the JSON file at `input` and add the new ones to the
/// ledger at `ledger_path`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or if the ledger
/// cannot be read or written.
pub fn ingest_file(ledger_path: &Path, input: &Path) -> Result<IngestReport> {
  let entries: Vec<IngestEntry> =
    serde_json::from_str(&fs::read_to_string(input)?)?;
  let mut ledger = read_or_create_ledger(ledger_path)?;

  let report = ingest_entries(&mut ledger, entries);
  if report.inserted > 0 || !ledger_path.exists() {
    write_ledger(ledger_path, &ledger)?;
  }

  info!(
    "Inserted {} new paper(s), skipped {} duplicate(s) and {} invalid \
     entries",
    report.inserted, report.duplicates, report.invalid
  );
  Ok(report)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(date: &str, title: &str, link: &str) -> IngestEntry {
    IngestEntry {
      date:  date.to_string(),
      title: title.to_string(),
      link:  link.to_string(),
    }
  }

  #[test]
  fn test_clean_title() {
    assert_eq!(clean_title("  Multi\n  line\ttitle  "), "Multi line title");
  }

  #[test]
  fn test_into_record() {
    let record = entry("2025-09-26", " A\nB ", " https://arxiv.org/abs/1.2v1 ")
      .into_record();
    assert_eq!(
      record,
      Some(PaperRecord::new(
        "2025-09-26",
        "A B",
        "https://arxiv.org/abs/1.2v1",
        placeholder_cell()
      ))
    );

    assert!(entry("", "T", "L").into_record().is_some());
    assert!(entry("2025-13-01", "T", "L").into_record().is_none());
    assert!(entry("yesterday", "T", "L").into_record().is_none());
    assert!(entry("2025-02-29", "T", "L").into_record().is_none());
    assert_eq!(
      entry(" 2024-02-29 ", "T", "L")
        .into_record()
        .and_then(|r| r.published()),
      Some(jiff::civil::date(2024, 2, 29))
    );
    assert!(entry("", "  ", "L").into_record().is_none());
  }

  #[test]
  fn test_ingest_entries_report() {
    let mut ledger = Ledger::new();
    let report = ingest_entries(&mut ledger, vec![
      entry("2025-09-26", "A", "https://arxiv.org/abs/2509.00001v1"),
      entry("2025-09-26", "A v2", "https://arxiv.org/abs/2509.00001v2"),
      entry("bad", "B", "https://arxiv.org/abs/2509.00002"),
      entry("", "C", "https://arxiv.org/abs/2509.00003"),
    ]);

    assert_eq!(report, IngestReport {
      inserted:   2,
      duplicates: 1,
      invalid:    1,
    });
    assert_eq!(ledger.pending().len(), 2);
  }
}
