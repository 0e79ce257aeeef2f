//! The individual recovery rules.
//!
//! Each rule is a single left-to-right scan that copies its input and
//! rewrites the non-overlapping spans it recognizes. Rules never delete a
//! non-whitespace character, except [`split_dash_items`] which normalizes an
//! en dash bullet to `-`.
use super::scanner::{
  at,
  before,
  digit_run_end,
  hash_run_end,
  heading_marker_at,
  is_decimal_digit,
  starts_with_at,
  ws_run_end,
};

/// Horizontal rule token.
const RULE: &str = "---";

/// Full-width sentence terminators that may be glued to a following heading.
const TERMINAL_PUNCTUATION: [char; 4] = ['。', '！', '？', '；'];

/// Put every heading marker that follows other content on its own line.
///
/// The whitespace run between a non-`#` character and a `#`-run followed by
/// whitespace is replaced by a single newline. A heading at the very start
/// of the text, or one preceded only by whitespace, is left alone.
#[must_use]
pub fn break_before_headings(chars: &[char]) -> Vec<char> {
  let mut out = Vec::with_capacity(chars.len() + 8);
  let mut i = 0;
  while let Some(c) = at(chars, i) {
    out.push(c);
    i += 1;
    if c.is_whitespace() || c == '#' {
      continue;
    }
    let run_end = ws_run_end(chars, i);
    if heading_marker_at(chars, run_end) {
      out.push('\n');
      i = run_end;
    }
  }
  out
}

/// Drop leading whitespace in front of a heading that opens the text.
#[must_use]
pub fn lift_leading_heading(chars: &[char]) -> Vec<char> {
  if at(chars, 0) == Some('#') {
    return chars.to_vec();
  }
  let start = ws_run_end(chars, 0);
  let hashes = hash_run_end(chars, start);
  if hashes > start && at(chars, hashes).is_some_and(char::is_whitespace) {
    chars[start..].to_vec()
  } else {
    chars.to_vec()
  }
}

/// Give a `---` that sits between two pieces of content a line of its own.
///
/// Used when the text already has newlines: only a rule with content on
/// both sides (on the same or adjacent lines) is touched, and the
/// whitespace around it is replaced by exactly one newline on each side.
#[must_use]
pub fn isolate_enclosed_rules(chars: &[char]) -> Vec<char> {
  let mut out = Vec::with_capacity(chars.len() + 8);
  let mut i = 0;
  while let Some(c) = at(chars, i) {
    match enclosed_rule_end(chars, i) {
      Some(next) => {
        out.push(c);
        out.extend(['\n', '-', '-', '-', '\n']);
        out.push(chars[next]);
        i = next + 1;
      },
      None => {
        out.push(c);
        i += 1;
      },
    }
  }
  out
}

/// If a rule enclosed by content starts after the character at `i`, return
/// the index of the content character that follows it.
fn enclosed_rule_end(chars: &[char], i: usize) -> Option<usize> {
  if at(chars, i)? == '\n' {
    return None;
  }
  let rule_start = ws_run_end(chars, i + 1);
  if !starts_with_at(chars, rule_start, RULE) {
    return None;
  }
  let rule_end = rule_start + RULE.len();
  let trailing_end = ws_run_end(chars, rule_end);
  if trailing_end < chars.len() {
    return Some(trailing_end);
  }
  // Nothing but whitespace after the rule: the last non-newline whitespace
  // character stands in for the following content.
  (rule_end..chars.len()).rev().find(|&k| chars[k] != '\n')
}

/// Force every `---` onto its own line, swallowing the whitespace around it.
#[must_use]
pub fn isolate_all_rules(chars: &[char]) -> Vec<char> {
  let mut out = Vec::with_capacity(chars.len() + 8);
  let mut i = 0;
  while i < chars.len() {
    let run_end = ws_run_end(chars, i);
    if starts_with_at(chars, run_end, RULE) {
      out.extend(['\n', '-', '-', '-', '\n']);
      i = ws_run_end(chars, run_end + RULE.len());
    } else if run_end > i {
      out.extend_from_slice(&chars[i..run_end]);
      i = run_end;
    } else {
      out.push(chars[i]);
      i += 1;
    }
  }
  out
}

/// Turn a hyphen or en dash surrounded by whitespace into a bullet that
/// starts a new line.
#[must_use]
pub fn split_dash_items(chars: &[char]) -> Vec<char> {
  let mut out = Vec::with_capacity(chars.len() + 8);
  let mut i = 0;
  while i < chars.len() {
    let run_end = ws_run_end(chars, i);
    if run_end == i {
      out.push(chars[i]);
      i += 1;
      continue;
    }
    if matches!(at(chars, run_end), Some('-' | '–')) {
      let after = ws_run_end(chars, run_end + 1);
      if after > run_end + 1 {
        out.extend(['\n', '-', ' ']);
        i = after;
        continue;
      }
    }
    out.extend_from_slice(&chars[i..run_end]);
    i = run_end;
  }
  out
}

/// Start a new line before an inline `<digits>. ` enumeration.
///
/// Nothing happens when the number already opens a line, or when it comes
/// right after a `**` delimiter: `**1. Introduction**` is a bold title, not
/// a list item. Only complete numbers are considered, so `12.` is never cut
/// into `1` and `2.`.
#[must_use]
pub fn split_numbered_items(chars: &[char]) -> Vec<char> {
  let mut out = Vec::with_capacity(chars.len() + 8);
  let mut i = 0;
  while i < chars.len() {
    if let Some(item_end) = numbered_item_at(chars, i) {
      let number_start = ws_run_end(chars, i);
      out.push('\n');
      out.extend_from_slice(&chars[number_start..item_end]);
      i = item_end;
    } else {
      out.push(chars[i]);
      i += 1;
    }
  }
  out
}

/// If optional whitespace and then `<digits>.<whitespace>` start at `i`,
/// return the end of the trailing whitespace.
fn numbered_item_at(chars: &[char], i: usize) -> Option<usize> {
  if before(chars, i) == Some('\n') || follows_bold_delimiter(chars, i) {
    return None;
  }
  let number_start = ws_run_end(chars, i);
  if number_start == i && before(chars, i).is_some_and(is_decimal_digit)
  {
    return None;
  }
  let number_end = digit_run_end(chars, number_start);
  if number_end == number_start || at(chars, number_end) != Some('.') {
    return None;
  }
  let item_end = ws_run_end(chars, number_end + 1);
  (item_end > number_end + 1).then_some(item_end)
}

fn follows_bold_delimiter(chars: &[char], i: usize) -> bool {
  i >= 2 && chars[i - 2] == '*' && chars[i - 1] == '*'
}

/// Put a `- **section**` bullet on its own line.
#[must_use]
pub fn split_bold_items(chars: &[char]) -> Vec<char> {
  let mut out = Vec::with_capacity(chars.len() + 8);
  let mut i = 0;
  while i < chars.len() {
    let run_end = ws_run_end(chars, i);
    if run_end == i {
      out.push(chars[i]);
      i += 1;
      continue;
    }
    if let Some((text_start, text_end)) = bold_item_after(chars, run_end) {
      out.extend(['\n', '-', ' ', '*', '*']);
      out.extend_from_slice(&chars[text_start..text_end]);
      out.extend(['*', '*']);
      i = text_end + 2;
      continue;
    }
    out.extend_from_slice(&chars[i..run_end]);
    i = run_end;
  }
  out
}

/// Match `-<ws>**text**` at `dash`, returning the bounds of `text`.
///
/// `text` is non-empty, stays on one line and ends at the first `**`.
fn bold_item_after(chars: &[char], dash: usize) -> Option<(usize, usize)> {
  if at(chars, dash)? != '-' {
    return None;
  }
  let open = ws_run_end(chars, dash + 1);
  if open == dash + 1 || !starts_with_at(chars, open, "**") {
    return None;
  }
  let text_start = open + 2;
  let mut k = text_start + 1;
  while k < chars.len() {
    if chars[k - 1] == '\n' {
      return None;
    }
    if starts_with_at(chars, k, "**") {
      return Some((text_start, k));
    }
    k += 1;
  }
  None
}

/// Start a new line between a full-width sentence terminator and a heading
/// glued to it.
#[must_use]
pub fn break_after_terminal_punctuation(chars: &[char]) -> Vec<char> {
  let mut out = Vec::with_capacity(chars.len() + 8);
  let mut i = 0;
  while let Some(c) = at(chars, i) {
    out.push(c);
    i += 1;
    if !TERMINAL_PUNCTUATION.contains(&c) {
      continue;
    }
    let hashes = ws_run_end(chars, i);
    let hashes_end = hash_run_end(chars, hashes);
    if hashes_end == hashes {
      continue;
    }
    let marker_end = ws_run_end(chars, hashes_end);
    if marker_end > hashes_end {
      out.push('\n');
      out.extend_from_slice(&chars[hashes..marker_end]);
      i = marker_end;
    }
  }
  out
}

/// Collapse runs of three or more newlines into exactly two.
#[must_use]
pub fn collapse_blank_lines(chars: &[char]) -> Vec<char> {
  let mut out = Vec::with_capacity(chars.len());
  let mut run = 0usize;
  for &c in chars {
    if c == '\n' {
      run += 1;
      if run > 2 {
        continue;
      }
    } else {
      run = 0;
    }
    out.push(c);
  }
  out
}
