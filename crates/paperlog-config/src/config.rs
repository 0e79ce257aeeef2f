use std::{
  fs,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable that overrides [`Config::keyword`].
pub const KEYWORD_ENV: &str = "ARXIV_QUERY_KEYWORD";

/// File names searched for in the working directory, in order.
pub const CONFIG_FILENAMES: [&str; 3] =
  ["paperlog.toml", "paperlog.json", ".paperlog.toml"];

/// Configuration for paperlog.
///
/// Fields are loaded from a TOML or JSON file, then overridden by the
/// environment, `--config KEY=VALUE` flags and finally subcommand flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Markdown table holding the paper rows.
  pub ledger_path: PathBuf,

  /// Directory the static site is written to.
  pub output_dir: PathBuf,

  /// Topic keyword shown in the site title.
  pub keyword: String,

  /// Number of threads used for rendering.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub jobs: Option<usize>,

  /// Explicit page title. Derived from the keyword when unset.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub site_title: Option<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      ledger_path: PathBuf::from("papers.md"),
      output_dir:  PathBuf::from("site"),
      keyword:     "VLA".to_string(),
      jobs:        None,
      site_title:  None,
    }
  }
}

impl Config {
  /// Page title: the configured one, or `"<keyword> 论文精选"`.
  #[must_use]
  pub fn site_title(&self) -> String {
    self
      .site_title
      .clone()
      .unwrap_or_else(|| format!("{} 论文精选", self.keyword))
  }

  /// Line shown under the page title.
  #[must_use]
  pub fn site_subtitle(&self) -> String {
    format!("精选 {} 相关的最新 arXiv 论文", self.keyword)
  }

  /// Load configuration from a file.
  ///
  /// The format is picked from the extension (`.toml` or `.json`).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  #[allow(
    clippy::option_if_let_else,
    reason = "Clearer with explicit match on extension"
  )]
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    log::debug!("Loading config file {}", path.display());
    let content = fs::read_to_string(path).inspect_err(|e| {
      log::error!("Failed to read config file {}: {e}", path.display());
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) => {
        match ext.to_lowercase().as_str() {
          "json" => {
            serde_json::from_str(&content).map_err(|e| {
              log::error!("Invalid JSON in {}", path.display());
              ConfigError::Serde(e)
            })
          },
          "toml" => {
            toml::from_str(&content).map_err(|e| {
              log::error!("Invalid TOML in {}", path.display());
              ConfigError::Toml(e)
            })
          },
          _ => {
            Err(ConfigError::Config(format!(
              "Unsupported config file format: {}",
              path.display()
            )))
          },
        }
      },
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load configuration from files, the environment and overrides.
  ///
  /// Explicit `config_files` are merged in order; without any, a config file
  /// is looked up in the working directory. The [`KEYWORD_ENV`] variable is
  /// applied next, then `config_overrides`.
  ///
  /// # Errors
  ///
  /// Returns an error if a config file cannot be loaded, an override is
  /// malformed or the result fails validation.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged_config = Self::from_file(first)?;
      for config_path in rest {
        merged_config.merge(Self::from_file(config_path)?);
      }

      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }

      merged_config
    } else if let Some(discovered_config) = Self::find_config_file() {
      log::info!(
        "Using discovered config file: {}",
        discovered_config.display()
      );
      Self::from_file(&discovered_config)?
    } else {
      Self::default()
    };

    config.apply_environment(|key| std::env::var(key).ok());

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    config.validate()?;
    Ok(config)
  }

  /// Apply environment overrides, reading variables through `lookup`.
  ///
  /// Only [`KEYWORD_ENV`] is consulted; an empty value is ignored.
  pub fn apply_environment<F>(&mut self, lookup: F)
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(keyword) = lookup(KEYWORD_ENV)
      .map(|v| v.trim().to_string())
      .filter(|v| !v.is_empty())
    {
      log::debug!("Using keyword from {KEYWORD_ENV}: {keyword}");
      self.keyword = keyword;
    }
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  ///
  /// - An override string is not in KEY=VALUE format
  /// - A key is not recognized
  /// - A value cannot be parsed as the expected type
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Apply a single override. Empty values reset optional fields.
  ///
  /// # Errors
  ///
  /// Returns an error for unknown keys and unparsable values.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "ledger_path" => self.ledger_path = PathBuf::from(value),
      "output_dir" => self.output_dir = PathBuf::from(value),
      "keyword" => value.clone_into(&mut self.keyword),
      "jobs" => {
        self.jobs = if value.is_empty() {
          None
        } else {
          Some(value.parse().map_err(|e| {
            ConfigError::Config(format!(
              "Invalid value for '{key}': '{value}' ({e})"
            ))
          })?)
        };
      },
      "site_title" => {
        self.site_title =
          (!value.is_empty()).then(|| value.to_string());
      },
      _ => {
        return Err(ConfigError::Config(format!(
          "Unknown configuration key: '{key}'"
        )));
      },
    }

    Ok(())
  }

  /// Merge another config into this one, with the other config's values taking
  /// precedence.
  ///
  /// Plain fields are always replaced; [`Option`] fields only when the other
  /// config has [`Some`] value.
  pub fn merge(&mut self, other: Self) {
    self.ledger_path = other.ledger_path;
    self.output_dir = other.output_dir;
    self.keyword = other.keyword;
    self.jobs = other.jobs.or(self.jobs);
    if other.site_title.is_some() {
      self.site_title = other.site_title;
    }
  }

  /// Check values that cannot be expressed by the types alone.
  ///
  /// # Errors
  ///
  /// Returns an error if the keyword is blank or `jobs` is zero.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.keyword.trim().is_empty() {
      return Err(ConfigError::Config("Keyword must not be empty".to_string()));
    }

    if self.jobs == Some(0) {
      return Err(ConfigError::Config(
        "Number of jobs must be at least 1".to_string(),
      ));
    }

    Ok(())
  }

  /// Search for a config file in the working directory.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    Self::find_config_file_in(&current_dir)
  }

  /// Search for a config file in `dir`.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|filename| dir.join(filename))
      .find(|path| path.exists())
  }

  /// Write a default configuration file with commented explanations.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)
      .map_err(|e| ConfigError::Template(e.to_string()))?;

    fs::write(path, config_content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {}",
        path.display(),
        e
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}
