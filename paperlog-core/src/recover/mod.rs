//! Line-break recovery for summary payloads.
//!
//! Summaries reach the ledger with their newlines either translated into
//! `<br>` markers (and restored by [`crate::cell::extract_payload`]) or lost
//! altogether. [`recover`] puts the structural newlines back so that the text
//! can be rendered line by line.
//!
//! Two branches exist:
//!
//! - [`RecoveryBranch::Preserved`]: the text already has newlines. Only light
//!   normalization runs (headings and enclosed rules get their own line,
//!   blank-line runs collapse).
//! - [`RecoveryBranch::Reconstructed`]: the text is a single line. Headings,
//!   rules, dash bullets, numbered items and bold section bullets are all
//!   split out again.
//!
//! # Known limitation
//!
//! A number directly after `**` is never treated as a list item, so
//! `**1. Introduction**` stays intact. The price is that a genuine inline
//! enumeration starting right after a bold delimiter is not split either.
mod rules;
mod scanner;

use self::rules::{
  break_after_terminal_punctuation,
  break_before_headings,
  collapse_blank_lines,
  isolate_all_rules,
  isolate_enclosed_rules,
  lift_leading_heading,
  split_bold_items,
  split_dash_items,
  split_numbered_items,
};

/// Upper bound on normalization passes before giving up on a fixed point.
const MAX_PASSES: usize = 8;

/// Which recovery strategy applies to a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryBranch {
  /// The payload still contains real newlines.
  Preserved,
  /// The payload is a single line and its structure has to be rebuilt.
  Reconstructed,
}

impl RecoveryBranch {
  /// Pick the branch for `payload`.
  #[must_use]
  pub fn detect(payload: &str) -> Self {
    if payload.contains('\n') {
      Self::Preserved
    } else {
      Self::Reconstructed
    }
  }
}

/// Restore the structural newlines of a summary payload.
///
/// The result is trimmed, and it is a fixed point:
/// `recover(&recover(x)) == recover(x)` for every input.
///
/// ```rust
/// use paperlog_core::recover::recover;
///
/// assert_eq!(
///   recover("## 贡献 1. 提出新方法 2. 构建数据集"),
///   "## 贡献\n1. 提出新方法\n2. 构建数据集"
/// );
/// ```
#[must_use]
pub fn recover(payload: &str) -> String {
  let mut current = recover_once(payload);
  for _ in 0..MAX_PASSES {
    let next = recover_once(&current);
    if next == current {
      return current;
    }
    current = next;
  }

  log::warn!(
    "Line-break recovery did not settle after {MAX_PASSES} passes; using \
     the last result"
  );
  current
}

/// A single recovery pass, without the fixed-point iteration.
#[must_use]
pub fn recover_once(payload: &str) -> String {
  let chars: Vec<char> = payload.chars().collect();
  let branch = RecoveryBranch::detect(payload);
  log::trace!("Recovering {} chars via {branch:?}", chars.len());

  let recovered = match branch {
    RecoveryBranch::Preserved => normalize(&chars),
    RecoveryBranch::Reconstructed => reconstruct(&chars),
  };

  recovered.into_iter().collect::<String>().trim().to_string()
}

/// Light normalization for text that kept its newlines.
fn normalize(chars: &[char]) -> Vec<char> {
  let text = break_before_headings(chars);
  let text = isolate_enclosed_rules(&text);
  collapse_blank_lines(&text)
}

/// Full reconstruction for text that lost every newline.
fn reconstruct(chars: &[char]) -> Vec<char> {
  let text = break_before_headings(chars);
  let text = lift_leading_heading(&text);
  let text = isolate_all_rules(&text);
  let text = split_dash_items(&text);
  let text = split_numbered_items(&text);
  let text = split_bold_items(&text);
  let text = break_after_terminal_punctuation(&text);
  collapse_blank_lines(&text)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_branch_detection() {
    assert_eq!(RecoveryBranch::detect("a\nb"), RecoveryBranch::Preserved);
    assert_eq!(RecoveryBranch::detect("a b"), RecoveryBranch::Reconstructed);
    assert_eq!(RecoveryBranch::detect(""), RecoveryBranch::Reconstructed);
  }

  #[test]
  fn test_preserved_text_is_left_alone() {
    let text = "## 概述\n这是总结。\n- 要点一\n- 要点二";
    assert_eq!(recover(text), text);
  }

  #[test]
  fn test_preserved_heading_glued_to_text() {
    assert_eq!(recover("前言 ## 概述\n正文"), "前言\n## 概述\n正文");
  }

  #[test]
  fn test_preserved_collapses_blank_runs() {
    assert_eq!(recover("a\n\n\n\nb"), "a\n\nb");
  }

  #[test]
  fn test_preserved_does_not_split_dashes() {
    assert_eq!(recover("a - b\nc"), "a - b\nc");
  }

  #[test]
  fn test_reconstructs_flattened_summary() {
    let flat = "## 论文概述 本文提出新方法。## 核心贡献 1. 提出框架 2. 构建数据集 \
                --- ## 方法 - **模块A**：感知 - **模块B**：规划";
    let expected = "## 论文概述 本文提出新方法。\n## 核心贡献\n1. 提出框架\n2. \
                    构建数据集\n---\n## 方法\n- **模块A**：感知\n- **模块B**：规划";
    assert_eq!(recover(flat), expected);
  }

  #[test]
  fn test_bold_numbered_title_is_kept() {
    assert_eq!(recover("**1. Introduction** text"), "**1. Introduction** text");
  }

  #[test]
  fn test_empty_and_blank_payloads() {
    assert_eq!(recover(""), "");
    assert_eq!(recover("   \n\t "), "");
  }

  #[test]
  fn test_recover_is_idempotent() {
    for text in [
      "## a --- b - c 1. d",
      "a - # b",
      "x ---## y",
      "-----",
      "a---b---c",
      "\n  --- b",
      "结束。 ## 下一节 - **粗体**：说明",
      "a\n\n\n---\n\n\n## h",
      "1. one 2. two 3. three",
    ] {
      let once = recover(text);
      assert_eq!(recover(&once), once, "not idempotent for {text:?}");
    }
  }
}
