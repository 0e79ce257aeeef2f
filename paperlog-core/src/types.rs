//! Record types shared by the codecs and the site builder.
use serde::{Deserialize, Serialize};

/// One row of the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PaperRecord {
  /// Publication date as `YYYY-MM-DD`, or empty when the source had none.
  pub date: String,

  /// Single-line title.
  pub title: String,

  /// Canonical absolute URL of the paper.
  pub link: String,

  /// The `<details>` cell holding either the placeholder or the summary.
  pub summary_cell: String,
}

impl PaperRecord {
  /// Build a record from its four fields.
  #[must_use]
  pub fn new(
    date: impl Into<String>,
    title: impl Into<String>,
    link: impl Into<String>,
    summary_cell: impl Into<String>,
  ) -> Self {
    Self {
      date:         date.into(),
      title:        title.into(),
      link:         link.into(),
      summary_cell: summary_cell.into(),
    }
  }

  /// Parsed publication date, if the `date` field holds a valid calendar
  /// date.
  #[must_use]
  pub fn published(&self) -> Option<jiff::civil::Date> {
    self.date.trim().parse().ok()
  }

  /// Whether the summary cell still carries the placeholder sentinel.
  #[must_use]
  pub fn is_pending(&self) -> bool {
    crate::cell::is_placeholder(&self.summary_cell)
  }
}

/// Markdown and HTML derived from one summary cell. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RecoveredDocument {
  /// Markdown with structural newlines restored.
  pub markdown: String,

  /// HTML rendered from `markdown`.
  pub html: String,
}

/// One entry of the site's `data.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteEntry {
  pub date:             String,
  pub title:            String,
  pub link:             String,
  pub summary_markdown: String,
  pub summary_html:     String,
}

impl SiteEntry {
  /// Attach a rendered document to the record it came from.
  #[must_use]
  pub fn from_parts(record: &PaperRecord, document: RecoveredDocument) -> Self {
    Self {
      date:             record.date.clone(),
      title:            record.title.clone(),
      link:             record.link.clone(),
      summary_markdown: document.markdown,
      summary_html:     document.html,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_published_date() {
    let record = PaperRecord::new("2025-09-26", "T", "L", "C");
    let date = record.published().expect("valid date in test");
    assert_eq!(date.year(), 2025);
    assert_eq!(date.month(), 9);
    assert_eq!(date.day(), 26);

    assert!(PaperRecord::new("", "T", "L", "C").published().is_none());
    assert!(
      PaperRecord::new("2025-02-30", "T", "L", "C")
        .published()
        .is_none()
    );
  }

  #[test]
  fn test_is_pending() {
    let pending = PaperRecord::new(
      "",
      "T",
      "L",
      "<details><summary>展开</summary>待生成</details>",
    );
    assert!(pending.is_pending());

    let done = PaperRecord::new("", "T", "L", "<details>## a</details>");
    assert!(!done.is_pending());
  }

  #[test]
  fn test_site_entry_field_names() {
    let record = PaperRecord::new("2025-09-26", "T", "L", "C");
    let entry = SiteEntry::from_parts(&record, RecoveredDocument {
      markdown: "## a".to_string(),
      html:     "<h2>a</h2>".to_string(),
    });

    let value = serde_json::to_value(&entry).expect("serialize in test");
    let keys: Vec<&str> = value
      .as_object()
      .expect("object in test")
      .keys()
      .map(String::as_str)
      .collect();
    assert_eq!(keys, [
      "date",
      "title",
      "link",
      "summary_markdown",
      "summary_html"
    ]);
  }
}
