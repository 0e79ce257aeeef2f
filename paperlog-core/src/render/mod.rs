//! A small, line-oriented Markdown renderer.
//!
//! The grammar is fixed: ATX headings (levels above 4 are clamped to 4),
//! `---` rules, `-`/`*` bullet lists, `1.` numbered lists and paragraphs,
//! plus the inline spans in [`inline`]. Lines are consumed in a single
//! forward pass. Anything that is not recognized becomes a paragraph.
pub mod inline;

use std::sync::LazyLock;

use regex::Regex;

pub use self::inline::render_inline;
use crate::utils::compile_or_never;

/// Deepest heading level emitted.
pub const MAX_HEADING_LEVEL: usize = 4;

/// Class attached to level-2 headings for the stylesheet.
pub const SECTION_TITLE_CLASS: &str = "section-title";

static HEADING_LINE: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("HEADING_LINE", r"^(#{1,6})\s+(.+)$"));

static UNORDERED_MARKER: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("UNORDERED_MARKER", r"^[-*]\s+"));

static ORDERED_MARKER: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("ORDERED_MARKER", r"^\d+\.\s+"));

/// What a single line is, judged on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
  Blank,
  Heading { level: usize, text: &'a str },
  Rule,
  UnorderedItem(&'a str),
  OrderedItem(&'a str),
  Paragraph(&'a str),
}

impl<'a> LineKind<'a> {
  /// Classify a line. Trailing whitespace is ignored.
  #[must_use]
  pub fn classify(line: &'a str) -> Self {
    let line = line.trim_end();
    if line.is_empty() {
      return Self::Blank;
    }

    if let Some(caps) = HEADING_LINE.captures(line) {
      let hashes = caps.get(1).map_or(1, |m| m.as_str().len());
      let text = caps.get(2).map_or("", |m| m.as_str().trim());
      return Self::Heading {
        level: hashes.min(MAX_HEADING_LEVEL),
        text,
      };
    }

    if line.trim() == "---" {
      return Self::Rule;
    }

    if let Some(m) = UNORDERED_MARKER.find(line) {
      return Self::UnorderedItem(line[m.end()..].trim());
    }

    if let Some(m) = ORDERED_MARKER.find(line) {
      return Self::OrderedItem(line[m.end()..].trim());
    }

    Self::Paragraph(line)
  }
}

/// List the renderer is currently inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListState {
  #[default]
  Default,
  InsideUnorderedList,
  InsideOrderedList,
}

impl ListState {
  const fn tag(self) -> Option<&'static str> {
    match self {
      Self::Default => None,
      Self::InsideUnorderedList => Some("ul"),
      Self::InsideOrderedList => Some("ol"),
    }
  }
}

/// Single-pass block renderer.
///
/// Feed lines with [`BlockRenderer::push_line`] and collect the HTML with
/// [`BlockRenderer::finish`]. A list ends at the first line that is not an
/// item of the same kind, and is never resumed afterwards.
#[derive(Debug, Default)]
pub struct BlockRenderer {
  state: ListState,
  items: Vec<String>,
  out:   Vec<String>,
}

impl BlockRenderer {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Current list state.
  #[must_use]
  pub const fn state(&self) -> ListState {
    self.state
  }

  /// Consume one line of Markdown.
  pub fn push_line(&mut self, line: &str) {
    match LineKind::classify(line) {
      LineKind::UnorderedItem(text) => {
        self.push_item(ListState::InsideUnorderedList, text);
      },
      LineKind::OrderedItem(text) => {
        self.push_item(ListState::InsideOrderedList, text);
      },
      other => {
        self.close_list();
        self.out.push(render_block(&other));
      },
    }
  }

  fn push_item(&mut self, kind: ListState, text: &str) {
    if self.state != kind {
      self.close_list();
      self.state = kind;
    }
    self.items.push(format!("<li>{}</li>", render_inline(text)));
  }

  fn close_list(&mut self) {
    if let Some(tag) = self.state.tag() {
      let items = self.items.concat();
      self.out.push(format!("<{tag}>{items}</{tag}>"));
    }
    self.items.clear();
    self.state = ListState::Default;
  }

  /// Close any open list and join the emitted blocks.
  ///
  /// Consecutive blank entries collapse into one and the result is trimmed.
  #[must_use]
  pub fn finish(mut self) -> String {
    self.close_list();

    let mut kept: Vec<&str> = Vec::with_capacity(self.out.len());
    let mut prev_blank = false;
    for block in &self.out {
      let is_blank = block.is_empty();
      if is_blank && prev_blank {
        continue;
      }
      kept.push(block);
      prev_blank = is_blank;
    }

    kept.join("\n").trim().to_string()
  }
}

/// HTML for a block that is not a list item.
fn render_block(kind: &LineKind<'_>) -> String {
  match kind {
    LineKind::Blank => String::new(),
    LineKind::Heading { level, text } => {
      let class = if *level == 2 {
        format!(r#" class="{SECTION_TITLE_CLASS}""#)
      } else {
        String::new()
      };
      format!("<h{level}{class}>{}</h{level}>", render_inline(text))
    },
    LineKind::Rule => "<hr/>".to_string(),
    LineKind::UnorderedItem(text)
    | LineKind::OrderedItem(text)
    | LineKind::Paragraph(text) => format!("<p>{}</p>", render_inline(text)),
  }
}

/// Render recovered Markdown into HTML.
///
/// ```rust
/// use paperlog_core::render::render;
///
/// assert_eq!(
///   render("## 方法\n- a\n- b"),
///   r#"<h2 class="section-title">方法</h2>
/// <ul><li>a</li><li>b</li></ul>"#
/// );
/// ```
#[must_use]
pub fn render(markdown: &str) -> String {
  let mut renderer = BlockRenderer::new();
  for line in markdown.lines() {
    renderer.push_line(line);
  }
  renderer.finish()
}
