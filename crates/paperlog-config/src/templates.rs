use std::fmt;

/// Error type for default config generation.
#[derive(Debug)]
pub enum TemplateError {
  /// The requested configuration format is not supported.
  UnsupportedFormat(String),
}

impl fmt::Display for TemplateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedFormat(format) => {
        write!(f, "Unsupported config format: {format}")
      },
    }
  }
}

impl std::error::Error for TemplateError {}

/// Default configuration file in TOML, with every field explained.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# paperlog configuration file

# Markdown table holding one row per paper
ledger_path = "papers.md"

# Directory the static site is written to
output_dir = "site"

# Topic keyword, shown in the site title. The ARXIV_QUERY_KEYWORD environment
# variable takes precedence over this value.
keyword = "VLA"

# Number of threads used to render summaries (defaults to number of CPU cores)
# jobs = 4

# Page title (defaults to "<keyword> 论文精选")
# site_title = "VLA 论文精选"
"#;

/// Default configuration file in JSON.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "ledger_path": "papers.md",
  "output_dir": "site",
  "keyword": "VLA"
}
"#;

/// Get the default configuration file for the requested format.
///
/// # Errors
///
/// Returns an error if the requested format is not supported.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
