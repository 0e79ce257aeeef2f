//! The ledger document: two header lines followed by body rows.
//!
//! Rows that parse are held as [`PaperRecord`]s; every other body line is
//! kept byte-for-byte so that a rewrite never loses text it did not
//! understand.
use crate::{
  cell::{has_section_heading, is_placeholder, placeholder_cell, wrap},
  link::{LedgerKeySet, normalize_link},
  table::{DELIMITER, HEADER_LABELS, HEADER_SEPARATOR, parse_row, serialize_row},
  types::PaperRecord,
};

/// One body line of the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerLine {
  /// A row that split into four fields.
  Record(PaperRecord),
  /// Anything else, kept verbatim.
  Raw(String),
}

impl LedgerLine {
  fn parse(line: &str) -> Self {
    parse_row(line).map_or_else(|| Self::Raw(line.to_string()), Self::Record)
  }

  fn render(&self) -> String {
    match self {
      Self::Record(record) => serialize_row(record),
      Self::Raw(line) => line.clone(),
    }
  }

  /// Whether this is a raw line that looks like a table row.
  fn is_malformed_row(&self) -> bool {
    matches!(self, Self::Raw(line) if line.trim_start().starts_with(DELIMITER))
  }
}

/// An in-memory ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
  header: [String; 2],
  lines:  Vec<LedgerLine>,
}

impl Default for Ledger {
  fn default() -> Self {
    Self {
      header: [HEADER_LABELS.to_string(), HEADER_SEPARATOR.to_string()],
      lines:  Vec::new(),
    }
  }
}

impl Ledger {
  /// An empty ledger with the canonical header.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Parse ledger text.
  ///
  /// The first two lines are taken as the header and kept as they are. Blank
  /// text yields an empty ledger with the canonical header.
  #[must_use]
  pub fn parse(text: &str) -> Self {
    if text.trim().is_empty() {
      return Self::new();
    }

    let mut lines = text.lines();
    let labels = lines.next().unwrap_or(HEADER_LABELS).to_string();
    let separator = lines.next().unwrap_or(HEADER_SEPARATOR).to_string();
    let body: Vec<LedgerLine> = lines.map(LedgerLine::parse).collect();

    let ledger = Self {
      header: [labels, separator],
      lines:  body,
    };
    let malformed = ledger.malformed_count();
    if malformed > 0 {
      log::warn!("Ledger has {malformed} malformed row(s); they are kept unchanged");
    }
    ledger
  }

  /// Serialize the ledger, every line terminated by `\n`.
  #[must_use]
  pub fn render(&self) -> String {
    let mut out = String::new();
    for line in self
      .header
      .iter()
      .cloned()
      .chain(self.lines.iter().map(LedgerLine::render))
    {
      out.push_str(&line);
      out.push('\n');
    }
    out
  }

  /// All parsed records, in ledger order.
  pub fn records(&self) -> impl Iterator<Item = &PaperRecord> {
    self.lines.iter().filter_map(|line| {
      match line {
        LedgerLine::Record(record) => Some(record),
        LedgerLine::Raw(_) => None,
      }
    })
  }

  fn records_mut(&mut self) -> impl Iterator<Item = &mut PaperRecord> {
    self.lines.iter_mut().filter_map(|line| {
      match line {
        LedgerLine::Record(record) => Some(record),
        LedgerLine::Raw(_) => None,
      }
    })
  }

  /// Body lines, parsed or not.
  #[must_use]
  pub fn lines(&self) -> &[LedgerLine] {
    &self.lines
  }

  /// Number of body lines that look like rows but did not parse.
  #[must_use]
  pub fn malformed_count(&self) -> usize {
    self
      .lines
      .iter()
      .filter(|line| line.is_malformed_row())
      .count()
  }

  /// Normalized links already in the ledger.
  ///
  /// Covers every parsed record plus any abstract-page link that appears in
  /// a line that did not parse, so a malformed row still blocks a duplicate.
  #[must_use]
  pub fn key_set(&self) -> LedgerKeySet {
    let mut keys = LedgerKeySet::new();
    for line in &self.lines {
      match line {
        LedgerLine::Record(record) => {
          keys.insert(&record.link);
        },
        LedgerLine::Raw(text) => keys.extend(&LedgerKeySet::scan(text)),
      }
    }
    keys
  }

  /// Insert new records directly after the header, keeping their order.
  ///
  /// A record is skipped when its normalized link is already in the ledger
  /// or appeared earlier in `records`. Stored links are normalized. Returns
  /// the number of records inserted.
  pub fn insert_new<I>(&mut self, records: I) -> usize
  where
    I: IntoIterator<Item = PaperRecord>,
  {
    let mut seen = self.key_set();
    let mut fresh = Vec::new();
    for mut record in records {
      if !seen.insert(&record.link) {
        log::debug!("Skipping duplicate paper: {}", record.link);
        continue;
      }
      record.link = normalize_link(&record.link);
      fresh.push(LedgerLine::Record(record));
    }

    let inserted = fresh.len();
    self.lines.splice(0..0, fresh);
    inserted
  }

  /// Records whose summary is still the placeholder.
  #[must_use]
  pub fn pending(&self) -> Vec<&PaperRecord> {
    self.records().filter(|r| r.is_pending()).collect()
  }

  /// Store a marker-encoded summary payload for the record matching `link`.
  ///
  /// Returns whether a record was updated.
  pub fn set_summary(&mut self, link: &str, payload: &str) -> bool {
    let key = normalize_link(link);
    match self
      .records_mut()
      .find(|r| normalize_link(&r.link) == key)
    {
      Some(record) => {
        record.summary_cell = wrap(payload);
        true
      },
      None => false,
    }
  }

  /// Reset every generated summary that lacks the `<details>` wrapper or a
  /// level-2 section heading back to the placeholder.
  ///
  /// Returns the titles of the records that were reset.
  pub fn reset_malformed_summaries(&mut self) -> Vec<String> {
    let mut reset = Vec::new();
    for record in self.records_mut() {
      let cell = &record.summary_cell;
      if is_placeholder(cell) || has_section_heading(cell) {
        continue;
      }
      record.summary_cell = placeholder_cell();
      reset.push(record.title.clone());
    }
    reset
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: &str = "| 日期 | 标题 | 链接 | 简要总结 |
| --- | --- | --- | --- |
| 2025-09-26 | First | https://arxiv.org/abs/2509.00001 | <details><summary>展开</summary>待生成</details> |
| broken row
| 2025-09-25 | Second | https://arxiv.org/abs/2509.00002 | <details><summary>展开</summary>## 概述<br>x</details> |
";

  #[test]
  fn test_parse_and_render_round_trip() {
    let ledger = Ledger::parse(SAMPLE);
    assert_eq!(ledger.records().count(), 2);
    assert_eq!(ledger.malformed_count(), 1);
    assert_eq!(ledger.render(), SAMPLE);
  }

  #[test]
  fn test_blank_text_gets_header() {
    let ledger = Ledger::parse("  \n");
    assert_eq!(
      ledger.render(),
      format!("{HEADER_LABELS}\n{HEADER_SEPARATOR}\n")
    );
  }

  fn pending_row(title: &str, link: &str) -> PaperRecord {
    PaperRecord::new("2025-09-27", title, link, placeholder_cell())
  }

  #[test]
  fn test_insert_new_dedups() {
    let mut ledger = Ledger::parse(SAMPLE);
    let inserted = ledger.insert_new([
      pending_row("A", "https://arxiv.org/abs/2509.00003v2"),
      pending_row("Dup", "https://arxiv.org/abs/2509.00001v3"),
      pending_row("B", "https://arxiv.org/abs/2509.00004"),
      pending_row("A again", "https://arxiv.org/abs/2509.00003v1"),
    ]);
    assert_eq!(inserted, 2);

    let titles: Vec<&str> =
      ledger.records().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["A", "B", "First", "Second"]);
    assert_eq!(
      ledger.records().next().map(|r| r.link.as_str()),
      Some("https://arxiv.org/abs/2509.00003")
    );
  }

  #[test]
  fn test_insert_new_skips_links_in_malformed_rows() {
    let text = format!(
      "{HEADER_LABELS}\n{HEADER_SEPARATOR}\n| 2025-10-01 | Old | \
       http://arxiv.org/abs/2510.09607 |\n"
    );
    let mut ledger = Ledger::parse(&text);
    assert_eq!(ledger.malformed_count(), 1);
    assert!(ledger.key_set().contains("http://arxiv.org/abs/2510.09607"));

    let inserted =
      ledger.insert_new([pending_row("Old", "http://arxiv.org/abs/2510.09607v2")]);
    assert_eq!(inserted, 0);
    assert_eq!(ledger.render(), text);
  }

  #[test]
  fn test_pending_and_set_summary() {
    let mut ledger = Ledger::parse(SAMPLE);
    assert_eq!(ledger.pending().len(), 1);

    assert!(ledger.set_summary("https://arxiv.org/abs/2509.00001v1", "## 概述<br>新"));
    assert!(ledger.pending().is_empty());
    assert!(!ledger.set_summary("https://arxiv.org/abs/9999.99999", "x"));

    let first = ledger.records().next().expect("record in test");
    assert_eq!(first.summary_cell, wrap("## 概述<br>新"));
  }

  #[test]
  fn test_reset_malformed_summaries() {
    let mut ledger = Ledger::parse(SAMPLE);
    ledger.insert_new([
      PaperRecord::new(
        "",
        "No heading",
        "https://arxiv.org/abs/2509.00005",
        wrap("plain"),
      ),
      PaperRecord::new("", "No wrapper", "https://arxiv.org/abs/2509.00006", "## 概述"),
    ]);

    let reset = ledger.reset_malformed_summaries();
    assert_eq!(reset, ["No heading", "No wrapper"]);
    assert_eq!(ledger.pending().len(), 3);
  }
}
