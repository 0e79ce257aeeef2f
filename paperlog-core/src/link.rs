//! Canonical paper links, used as the ledger's deduplication key.
use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use crate::utils::compile_or_never;

/// `arxiv.org/abs/<id>` followed by one or more `v<digits>` revisions.
static VERSIONED_ABS_LINK: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never(
    "VERSIONED_ABS_LINK",
    r"(?i)(arxiv\.org/abs/\d+\.\d+)(?:v\d+)+",
  )
});

/// Any abstract-page link, wherever it appears in raw ledger text.
static ABS_LINK: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never("ABS_LINK", r"(?i)https?://arxiv\.org/abs/[\w\-./]+")
});

/// Normalize a paper link for comparison.
///
/// Surrounding whitespace is trimmed and a trailing revision suffix
/// (`v1`, `v2`, ...) after an abstract-page identifier is removed. Links of
/// any other shape are returned trimmed and otherwise untouched.
///
/// The result is a fixed point: normalizing twice gives the same link.
///
/// ```rust
/// use paperlog_core::normalize_link;
///
/// assert_eq!(
///   normalize_link(" http://arxiv.org/abs/2510.09607v2 "),
///   "http://arxiv.org/abs/2510.09607"
/// );
/// ```
#[must_use]
pub fn normalize_link(link: &str) -> String {
  VERSIONED_ABS_LINK
    .replace_all(link.trim(), "$1")
    .trim()
    .to_string()
}

/// The set of normalized links already present in a ledger.
///
/// Every lookup and insertion goes through [`normalize_link`], so callers
/// cannot accidentally compare a raw link against a normalized one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerKeySet {
  links: HashSet<String>,
}

impl LedgerKeySet {
  /// Create an empty key set.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Collect every abstract-page link found anywhere in raw ledger text.
  ///
  /// This does not need the table to be well formed, so rows that fail to
  /// parse still count as present.
  #[must_use]
  pub fn scan(text: &str) -> Self {
    ABS_LINK
      .find_iter(text)
      .map(|m| m.as_str())
      .collect()
  }

  /// Whether `link` is already present, after normalization.
  #[must_use]
  pub fn contains(&self, link: &str) -> bool {
    self.links.contains(&normalize_link(link))
  }

  /// Insert `link`, returning `false` if its normalized form was present.
  pub fn insert(&mut self, link: &str) -> bool {
    self.links.insert(normalize_link(link))
  }

  /// Add every link of `other`.
  pub fn extend(&mut self, other: &Self) {
    self.links.extend(other.links.iter().cloned());
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.links.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.links.is_empty()
  }
}

impl<'a> FromIterator<&'a str> for LedgerKeySet {
  fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
    let mut set = Self::new();
    for link in iter {
      set.insert(link);
    }
    set
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_strips_version_suffix() {
    let base = "http://arxiv.org/abs/2510.09607";
    assert_eq!(normalize_link("http://arxiv.org/abs/2510.09607v2"), base);
    assert_eq!(normalize_link("http://arxiv.org/abs/2510.09607v1"), base);
    assert_eq!(normalize_link(base), base);
  }

  #[test]
  fn test_host_is_case_insensitive() {
    assert_eq!(
      normalize_link("https://ArXiv.ORG/abs/2509.12345v3"),
      "https://ArXiv.ORG/abs/2509.12345"
    );
  }

  #[test]
  fn test_other_links_only_trimmed() {
    assert_eq!(
      normalize_link("  https://example.com/abs/1234v2  "),
      "https://example.com/abs/1234v2"
    );
    assert_eq!(
      normalize_link("https://arxiv.org/pdf/2510.09607v2"),
      "https://arxiv.org/pdf/2510.09607v2"
    );
  }

  #[test]
  fn test_normalize_is_projection() {
    for link in [
      "http://arxiv.org/abs/2510.09607v2",
      "http://arxiv.org/abs/2510.09607v2v3",
      " https://arxiv.org/abs/2401.00001 ",
      "not a link",
      "",
    ] {
      let once = normalize_link(link);
      assert_eq!(normalize_link(&once), once, "not a projection for {link:?}");
    }
  }

  #[test]
  fn test_key_set_dedups_revisions() {
    let mut keys = LedgerKeySet::new();
    assert!(keys.insert("http://arxiv.org/abs/2510.09607v1"));
    assert!(!keys.insert("http://arxiv.org/abs/2510.09607v2"));
    assert!(keys.contains("http://arxiv.org/abs/2510.09607"));
    assert_eq!(keys.len(), 1);
  }

  #[test]
  fn test_scan_raw_text() {
    let text = "| 日期 | 标题 | 链接 | 简要总结 |\n| --- | --- | --- | --- |\n| \
                2025-09-26 | A | http://arxiv.org/abs/2509.12345v2 | x |\nbroken \
                https://arxiv.org/abs/2401.00001 row\n";
    let keys = LedgerKeySet::scan(text);
    assert_eq!(keys.len(), 2);
    assert!(keys.contains("http://arxiv.org/abs/2509.12345v7"));
    assert!(keys.contains("https://arxiv.org/abs/2401.00001"));
  }
}
