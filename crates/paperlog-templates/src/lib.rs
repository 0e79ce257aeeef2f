/// Page shell, rendered with Tera. Expects `site_title`, `site_subtitle`,
/// `paper_count` and `generated_on` in its context.
pub const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

pub const STYLE_CSS: &str = include_str!("../templates/style.css");
pub const APP_JS: &str = include_str!("../templates/app.js");

/// Files copied verbatim into the site's `assets/` directory, by file name.
pub const STATIC_ASSETS: [(&str, &str); 2] =
  [("style.css", STYLE_CSS), ("app.js", APP_JS)];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_index_uses_assets() {
    assert!(INDEX_TEMPLATE.contains("assets/style.css"));
    assert!(INDEX_TEMPLATE.contains("assets/app.js"));
    assert!(INDEX_TEMPLATE.contains("{{ site_title }}"));
  }

  #[test]
  fn test_app_reads_data_json() {
    assert!(APP_JS.contains("assets/data.json"));
    assert!(APP_JS.contains("summary_html"));
  }

  #[test]
  fn test_static_assets() {
    let names: Vec<&str> = STATIC_ASSETS.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, ["style.css", "app.js"]);
    assert!(STATIC_ASSETS.iter().all(|(_, content)| !content.is_empty()));
  }
}
