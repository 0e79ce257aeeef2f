//! Ledger rows: splitting on the column delimiter and escaping it on write.
//!
//! A body row looks like
//!
//! ```text
//! | 2025-09-26 | Title | https://arxiv.org/abs/2509.12345 | <details>...</details> |
//! ```
//!
//! Literal `|` characters inside a field are written as `\|`. The two header
//! lines are the caller's business; everything here works on body rows.
use crate::types::PaperRecord;

/// Column delimiter.
pub const DELIMITER: char = '|';

/// Prefix that turns a delimiter into a literal character.
pub const ESCAPE: char = '\\';

/// The canonical header label row.
pub const HEADER_LABELS: &str = "| 日期 | 标题 | 链接 | 简要总结 |";

/// The canonical header separator row.
pub const HEADER_SEPARATOR: &str = "| --- | --- | --- | --- |";

/// Result of parsing a block of body rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRows {
  /// Rows that split into four fields, in input order.
  pub records: Vec<PaperRecord>,

  /// Non-blank lines that did not parse.
  pub malformed: usize,
}

/// Split a row into unescaped, trimmed fields.
///
/// One leading and one trailing delimiter are dropped first. Returns `None`
/// for lines that do not start with a delimiter.
#[must_use]
pub fn split_row(line: &str) -> Option<Vec<String>> {
  let line = line.trim();
  let inner = line.strip_prefix(DELIMITER)?;
  let inner = strip_closing_delimiter(inner);

  let mut fields = Vec::with_capacity(4);
  let mut current = String::new();
  let mut chars = inner.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      ESCAPE if chars.peek() == Some(&DELIMITER) => {
        current.push(DELIMITER);
        chars.next();
      },
      DELIMITER => {
        fields.push(current.trim().to_string());
        current.clear();
      },
      _ => current.push(c),
    }
  }
  fields.push(current.trim().to_string());

  Some(fields)
}

/// Drop the closing delimiter unless it is escaped.
fn strip_closing_delimiter(inner: &str) -> &str {
  match inner.strip_suffix(DELIMITER) {
    Some(rest) if !ends_with_escape(rest) => rest,
    _ => inner,
  }
}

/// Whether `text` ends in an odd number of escape characters, which would
/// make a following delimiter literal.
fn ends_with_escape(text: &str) -> bool {
  text.chars().rev().take_while(|&c| c == ESCAPE).count() % 2 == 1
}

/// Parse a single body row.
///
/// Returns `None` when the line is not a table row or has fewer than four
/// fields. Extra fields (from an unescaped delimiter inside the summary cell)
/// are joined back into the fourth field.
#[must_use]
pub fn parse_row(line: &str) -> Option<PaperRecord> {
  let mut fields = split_row(line)?;
  if fields.len() < 4 {
    return None;
  }

  let summary_cell = fields.split_off(3).join(&DELIMITER.to_string());
  let mut fields = fields.into_iter();
  let date = fields.next()?;
  let title = fields.next()?;
  let link = fields.next()?;

  Some(PaperRecord {
    date,
    title,
    link,
    summary_cell: summary_cell.trim().to_string(),
  })
}

/// Parse a block of body rows, counting the lines that failed.
///
/// Blank lines are skipped without being counted.
#[must_use]
pub fn parse_rows(body: &str) -> ParsedRows {
  let mut parsed = ParsedRows::default();
  for line in body.lines().filter(|l| !l.trim().is_empty()) {
    match parse_row(line) {
      Some(record) => parsed.records.push(record),
      None => {
        log::debug!("Skipping malformed ledger row: {line}");
        parsed.malformed += 1;
      },
    }
  }
  parsed
}

/// Parse a whole ledger document: the two header lines are skipped.
#[must_use]
pub fn parse_table(text: &str) -> ParsedRows {
  let body = text
    .lines()
    .filter(|l| !l.trim().is_empty())
    .skip(2)
    .collect::<Vec<_>>()
    .join("\n");
  parse_rows(&body)
}

/// Escape literal delimiters in a field.
#[must_use]
pub fn escape_field(field: &str) -> String {
  let mut out = String::with_capacity(field.len());
  for c in field.chars() {
    if c == DELIMITER {
      out.push(ESCAPE);
    }
    out.push(c);
  }
  out
}

/// Serialize a record as one ledger row, without a trailing newline.
#[must_use]
pub fn serialize_row(record: &PaperRecord) -> String {
  format!(
    "{d} {date} {d} {title} {d} {link} {d} {cell} {d}",
    d = DELIMITER,
    date = escape_field(&record.date),
    title = escape_field(&record.title),
    link = escape_field(&record.link),
    cell = escape_field(&record.summary_cell),
  )
}
