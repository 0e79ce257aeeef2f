//! The collapsible `<details>` wrapper around a summary payload.
//!
//! Cells look like `<details><summary>展开</summary>payload</details>`. The
//! payload stores its newlines as `<br>` markers because a table row cannot
//! contain a raw newline.
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::{collapse_blank_runs, compile_or_never};

/// Label shown on the collapsed cell.
pub const SUMMARY_LABEL: &str = "展开";

/// Sentinel payload for a summary that has not been generated yet.
pub const PLACEHOLDER: &str = "待生成";

/// Inline line-break marker written by the summarizer.
pub const LINE_BREAK_MARKER: &str = "<br>";

/// Every spelling of the line-break marker accepted on read.
const LINE_BREAK_SPELLINGS: [&str; 3] = ["<br>", "<br/>", "<br />"];

static DETAILS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never("DETAILS_BLOCK", r"(?is)<details>(.*?)</details>")
});

static SUMMARY_LABEL_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never("SUMMARY_LABEL_ELEMENT", r"(?is)<summary>.*?</summary>")
});

static THINK_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never("THINK_BLOCK", r"(?is)<think>.*?</think>")
});

static SECTION_HEADING: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("SECTION_HEADING", r"##\s"));

/// Text between `<details>` and `</details>`, if the cell has a wrapper.
fn details_inner(cell: &str) -> Option<&str> {
  DETAILS_BLOCK
    .captures(cell)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str())
}

/// Turn every line-break marker into a real newline.
#[must_use]
pub fn markers_to_newlines(text: &str) -> String {
  LINE_BREAK_SPELLINGS
    .iter()
    .fold(text.to_string(), |acc, marker| acc.replace(marker, "\n"))
}

/// Turn every newline into the line-break marker.
#[must_use]
pub fn newlines_to_markers(text: &str) -> String {
  text.replace('\n', LINE_BREAK_MARKER)
}

/// Extract the payload of a summary cell.
///
/// The `<summary>` label is dropped, line-break markers become newlines and
/// surrounding whitespace is trimmed. A cell without a `<details>` wrapper is
/// treated as if the whole cell were the payload.
#[must_use]
pub fn extract_payload(cell: &str) -> String {
  let inner = details_inner(cell).unwrap_or(cell);
  let without_label = SUMMARY_LABEL_ELEMENT.replace_all(inner, "");
  markers_to_newlines(&without_label).trim().to_string()
}

/// Wrap already marker-encoded payload text into a summary cell.
#[must_use]
pub fn wrap(payload: &str) -> String {
  format!("<details><summary>{SUMMARY_LABEL}</summary>{payload}</details>")
}

/// The cell written for a paper whose summary is still pending.
#[must_use]
pub fn placeholder_cell() -> String {
  wrap(PLACEHOLDER)
}

/// Whether a cell still holds the placeholder sentinel anywhere.
#[must_use]
pub fn is_placeholder(cell: &str) -> bool {
  cell.contains(PLACEHOLDER)
}

/// Whether a generated cell has the expected shape: a `<details>` wrapper
/// whose payload contains at least one level-2 section heading.
#[must_use]
pub fn has_section_heading(cell: &str) -> bool {
  let Some(inner) = details_inner(cell) else {
    return false;
  };
  SECTION_HEADING.is_match(&markers_to_newlines(inner))
}

/// Normalize raw summarizer output into marker-encoded payload text.
///
/// Reasoning blocks (`<think>...</think>`) are removed, runs of spaces and
/// tabs collapse to one space, three or more newlines collapse to two,
/// trailing spaces are removed from every line and finally every newline is
/// replaced by [`LINE_BREAK_MARKER`].
#[must_use]
pub fn encode_generated_summary(text: &str) -> String {
  let without_think = THINK_BLOCK.replace_all(text.trim(), "");
  let mut squeezed = String::with_capacity(without_think.len());
  let mut in_blank = false;
  for c in without_think.trim().chars() {
    if c == ' ' || c == '\t' {
      if !in_blank {
        squeezed.push(' ');
      }
      in_blank = true;
    } else {
      in_blank = false;
      squeezed.push(c);
    }
  }

  let collapsed = collapse_blank_runs(&squeezed);
  let tidy = collapsed
    .split('\n')
    .map(|line| line.trim_end_matches(' '))
    .collect::<Vec<_>>()
    .join("\n");

  newlines_to_markers(&tidy)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extract_payload() {
    let cell = "<details><summary>展开</summary>## 概述<br>这是总结。<br>- \
                要点一<br>- 要点二</details>";
    assert_eq!(extract_payload(cell), "## 概述\n这是总结。\n- 要点一\n- 要点二");
  }

  #[test]
  fn test_all_marker_spellings() {
    let cell = "<details><summary>x</summary>a<br>b<br/>c<br />d</details>";
    assert_eq!(extract_payload(cell), "a\nb\nc\nd");
  }

  #[test]
  fn test_wrapper_case_insensitive() {
    let cell = "<DETAILS><Summary>展开</Summary> body </DETAILS>";
    assert_eq!(extract_payload(cell), "body");
  }

  #[test]
  fn test_missing_wrapper_falls_back() {
    assert_eq!(extract_payload("  plain text  "), "plain text");
    assert_eq!(extract_payload(""), "");
  }

  #[test]
  fn test_wrap_and_placeholder() {
    assert_eq!(wrap("x<br>y"), "<details><summary>展开</summary>x<br>y</details>");
    assert!(is_placeholder(&placeholder_cell()));
    assert!(!is_placeholder(&wrap("## 概述")));
  }

  #[test]
  fn test_has_section_heading() {
    assert!(has_section_heading(&wrap("## 概述<br>text")));
    assert!(has_section_heading(&wrap("intro<br>## 方法 text")));
    assert!(!has_section_heading(&wrap("# only h1")));
    assert!(!has_section_heading(&wrap("##nospace")));
    assert!(!has_section_heading("## no wrapper"));
  }

  #[test]
  fn test_encode_generated_summary() {
    let raw = "<think>\nreasoning\n</think>\n## 概述  \n\n\n\nSome\t\ttext \nmore";
    assert_eq!(
      encode_generated_summary(raw),
      "## 概述<br><br>Some text<br>more"
    );
    assert_eq!(encode_generated_summary("   "), "");
  }

  #[test]
  fn test_marker_translation_round_trip() {
    let text = "line one\nline two";
    assert_eq!(markers_to_newlines(&newlines_to_markers(text)), text);
  }
}
