#![allow(clippy::expect_used, clippy::panic, reason = "Fine in tests")]
use paperlog_core::render::render;

/// Check that every fragment appears in the rendered HTML.
fn assert_html_contains(html: &str, expected: &[&str]) {
  for &needle in expected {
    assert!(
      html.contains(needle),
      "Expected HTML to contain '{needle}', but it did not.\nFull \
       HTML:\n{html}"
    );
  }
}

#[test]
fn test_heading_then_paragraph() {
  let html = render("# Title\n\nBody text.");
  assert_eq!(html, "<h1>Title</h1>\n\n<p>Body text.</p>");
}

#[test]
fn test_list_then_paragraph() {
  let html = render("- a\n- b\n\nc");
  assert_eq!(html, "<ul><li>a</li><li>b</li></ul>\n\n<p>c</p>");
  assert_eq!(html.matches("<ul>").count(), 1);
}

#[test]
fn test_ordered_list() {
  assert_eq!(
    render("1. first\n2. second"),
    "<ol><li>first</li><li>second</li></ol>"
  );
}

#[test]
fn test_lone_rule() {
  assert_eq!(render("---"), "<hr/>");
}

#[test]
fn test_full_summary() {
  let markdown = "## 论文概述\n本文提出 **VLA** 模型。\n---\n## 核心贡献\n1. \
                  提出 `ActionHead`\n2. 开源代码：[GitHub](https://github.com/x/y)\n\n\
                  ### 细节\n* 感知\n* 规划";
  let html = render(markdown);

  assert_html_contains(&html, &[
    r#"<h2 class="section-title">论文概述</h2>"#,
    "<p>本文提出 <strong>VLA</strong> 模型。</p>",
    "<hr/>",
    r#"<h2 class="section-title">核心贡献</h2>"#,
    "<ol><li>提出 <code>ActionHead</code></li>",
    r#"<a href="https://github.com/x/y" target="_blank" rel="noopener noreferrer">GitHub</a>"#,
    "<h3>细节</h3>",
    "<ul><li>感知</li><li>规划</li></ul>",
  ]);
  assert!(!html.contains("\n\n\n"));
}

#[test]
fn test_unknown_constructs_become_paragraphs() {
  for line in ["| a | b |", "> quote", "![img](x.png)", "#hashtag", "-dash"] {
    let html = render(line);
    assert!(
      html.starts_with("<p>") && html.ends_with("</p>"),
      "expected a paragraph for {line:?}, got {html:?}"
    );
  }
}

#[test]
fn test_rendering_is_deterministic() {
  let markdown = "## a\n- b\n1. c\n\n\nd";
  assert_eq!(render(markdown), render(markdown));
}
