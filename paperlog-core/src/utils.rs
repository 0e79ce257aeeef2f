//! Small helpers shared by the codecs.
use regex::Regex;

/// Create a regex that never matches anything.
///
/// Used as the fallback when one of the crate's static patterns fails to
/// compile, so that a broken pattern degrades to "no match" instead of a
/// panic.
///
/// # Panics
///
/// Panics if the fallback pattern `^\b$` fails to compile, which cannot
/// happen.
#[must_use]
#[allow(clippy::unwrap_used, reason = "The fallback pattern is a constant")]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| Regex::new(r"^\b$").unwrap())
}

/// Compile a static pattern, logging and falling back to
/// [`never_matching_regex`] on failure.
#[must_use]
pub fn compile_or_never(name: &str, pattern: &str) -> Regex {
  Regex::new(pattern).unwrap_or_else(|e| {
    log::error!("Failed to compile {name} regex: {e}");
    never_matching_regex()
  })
}

/// Collapse every run of three or more `\n` into exactly two.
#[must_use]
pub fn collapse_blank_runs(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut run = 0usize;
  for c in text.chars() {
    if c == '\n' {
      run += 1;
      if run <= 2 {
        out.push(c);
      }
    } else {
      run = 0;
      out.push(c);
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_never_matching_regex() {
    let re = never_matching_regex();
    assert!(!re.is_match(""));
    assert!(!re.is_match("anything at all"));
  }

  #[test]
  fn test_collapse_blank_runs() {
    assert_eq!(collapse_blank_runs("a\n\n\n\nb"), "a\n\nb");
    assert_eq!(collapse_blank_runs("a\n\nb\nc"), "a\n\nb\nc");
    assert_eq!(collapse_blank_runs("\n\n\n"), "\n\n");
  }
}
