//! Character-level lookups shared by the recovery rules.
//!
//! The rules work on a `&[char]` so that lookbehind is a plain index
//! operation and multi-byte punctuation needs no special handling.
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::compile_or_never;

/// A single Unicode decimal digit (`Nd`), e.g. `7` or `７`.
static DECIMAL_DIGIT: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("DECIMAL_DIGIT", r"^\d$"));

/// Whether `c` is a decimal digit in any script.
#[must_use]
pub fn is_decimal_digit(c: char) -> bool {
  c.is_ascii_digit()
    || (!c.is_ascii() && DECIMAL_DIGIT.is_match(c.encode_utf8(&mut [0; 4])))
}

/// Index of the first non-whitespace character at or after `from`.
#[must_use]
pub fn ws_run_end(chars: &[char], from: usize) -> usize {
  run_end(chars, from, |c| c.is_whitespace())
}

/// Index of the first character at or after `from` that is not `#`.
#[must_use]
pub fn hash_run_end(chars: &[char], from: usize) -> usize {
  run_end(chars, from, |c| c == '#')
}

/// Index of the first character at or after `from` that is not a decimal
/// digit.
#[must_use]
pub fn digit_run_end(chars: &[char], from: usize) -> usize {
  run_end(chars, from, is_decimal_digit)
}

fn run_end(chars: &[char], from: usize, pred: impl Fn(char) -> bool) -> usize {
  chars
    .get(from..)
    .map_or(chars.len(), |rest| {
      from + rest.iter().take_while(|&&c| pred(c)).count()
    })
}

/// Whether `pattern` occurs at index `at`.
#[must_use]
pub fn starts_with_at(chars: &[char], at: usize, pattern: &str) -> bool {
  let mut idx = at;
  for expected in pattern.chars() {
    if chars.get(idx) != Some(&expected) {
      return false;
    }
    idx += 1;
  }
  true
}

/// Whether a heading marker (`#` run followed by whitespace) starts at `at`.
#[must_use]
pub fn heading_marker_at(chars: &[char], at: usize) -> bool {
  let end = hash_run_end(chars, at);
  end > at && chars.get(end).is_some_and(|c| c.is_whitespace())
}

/// Character at `idx`, if any.
#[must_use]
pub fn at(chars: &[char], idx: usize) -> Option<char> {
  chars.get(idx).copied()
}

/// Character immediately before `idx`, if any.
#[must_use]
pub fn before(chars: &[char], idx: usize) -> Option<char> {
  idx.checked_sub(1).and_then(|i| at(chars, i))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
  }

  #[test]
  fn test_runs() {
    let text = chars("  ##  12x");
    assert_eq!(ws_run_end(&text, 0), 2);
    assert_eq!(hash_run_end(&text, 2), 4);
    assert_eq!(digit_run_end(&text, 6), 8);
    assert_eq!(ws_run_end(&text, 9), 9);
    assert_eq!(ws_run_end(&text, 42), text.len());
  }

  #[test]
  fn test_decimal_digits_in_any_script() {
    assert!(is_decimal_digit('7'));
    assert!(is_decimal_digit('７'));
    assert!(is_decimal_digit('٣'));
    assert!(!is_decimal_digit('²'));
    assert!(!is_decimal_digit('x'));
    assert_eq!(digit_run_end(&chars("１２. x"), 0), 2);
  }

  #[test]
  fn test_heading_marker_at() {
    assert!(heading_marker_at(&chars("## a"), 0));
    assert!(heading_marker_at(&chars("#\tb"), 0));
    assert!(!heading_marker_at(&chars("##a"), 0));
    assert!(!heading_marker_at(&chars("##"), 0));
    assert!(!heading_marker_at(&chars("a ## b"), 0));
  }

  #[test]
  fn test_starts_with_at() {
    let text = chars("a---b");
    assert!(starts_with_at(&text, 1, "---"));
    assert!(!starts_with_at(&text, 2, "---"));
    assert!(!starts_with_at(&text, 4, "bb"));
  }

  #[test]
  fn test_before() {
    let text = chars("ab");
    assert_eq!(before(&text, 0), None);
    assert_eq!(before(&text, 1), Some('a'));
  }
}
