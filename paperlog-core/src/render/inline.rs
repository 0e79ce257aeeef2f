//! Inline spans: code, bold and links.
//!
//! The three spans are applied as successive passes over the whole line, in
//! that order. There is no nesting model and no escaping: a `**` inside a
//! code span is still turned into bold by the second pass.
use std::sync::LazyLock;

use html_escape::encode_double_quoted_attribute;
use regex::{Captures, Regex};

use crate::utils::compile_or_never;

static CODE_SPAN: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("CODE_SPAN", r"`([^`]+)`"));

static BOLD_SPAN: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("BOLD_SPAN", r"\*\*([^*]+)\*\*"));

static LINK_SPAN: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never("LINK_SPAN", r"\[([^\]]+)\]\(([^)]+)\)")
});

/// Render the inline spans of a single line.
#[must_use]
pub fn render_inline(text: &str) -> String {
  let text = CODE_SPAN.replace_all(text, "<code>$1</code>");
  let text = BOLD_SPAN.replace_all(&text, "<strong>$1</strong>");
  LINK_SPAN
    .replace_all(&text, |caps: &Captures| {
      format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        encode_double_quoted_attribute(&caps[2]),
        &caps[1]
      )
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_code_span() {
    assert_eq!(render_inline("run `cargo test` now"), "run <code>cargo test</code> now");
    assert_eq!(render_inline("empty `` ticks"), "empty `` ticks");
  }

  #[test]
  fn test_bold_span() {
    assert_eq!(render_inline("**重点**：内容"), "<strong>重点</strong>：内容");
    assert_eq!(render_inline("a ** b"), "a ** b");
  }

  #[test]
  fn test_link_span() {
    assert_eq!(
      render_inline("see [paper](https://arxiv.org/abs/2509.12345)"),
      r#"see <a href="https://arxiv.org/abs/2509.12345" target="_blank" rel="noopener noreferrer">paper</a>"#
    );
  }

  #[test]
  fn test_link_target_is_attribute_escaped() {
    let html = render_inline(r#"[x](https://e.com/?a=1&b="2")"#);
    assert!(html.contains("a=1&amp;b="));
    assert!(!html.contains(r#"b="2""#));
  }

  #[test]
  fn test_spans_do_not_nest() {
    assert_eq!(
      render_inline("`**x**`"),
      "<code><strong>x</strong></code>",
      "bold still applies inside code"
    );
  }

  #[test]
  fn test_plain_text_passes_through() {
    assert_eq!(render_inline("a < b & c"), "a < b & c");
  }
}
