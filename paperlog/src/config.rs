//! Glue between the CLI and [`paperlog_config::Config`].
use paperlog_config::{Config, ConfigError};

use crate::cli::{Cli, Commands};

/// Load the configuration for `cli`: files, environment, `--config`
/// overrides and finally subcommand flags.
///
/// # Errors
///
/// Returns an error if a config file cannot be loaded, an override is
/// malformed or the merged result is invalid.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
  let mut config = Config::load(&cli.config_files, &cli.config_overrides)?;
  if let Some(command) = &cli.command {
    merge_with_cli(&mut config, command);
  }
  config.validate()?;
  Ok(config)
}

/// Apply subcommand flags on top of `config`.
pub fn merge_with_cli(config: &mut Config, command: &Commands) {
  if let Commands::Build {
    ledger,
    output_dir,
    keyword,
    jobs,
  } = command
  {
    if let Some(ledger) = ledger {
      config.ledger_path.clone_from(ledger);
    }

    if let Some(output_dir) = output_dir {
      config.output_dir.clone_from(output_dir);
    }

    if let Some(keyword) = keyword {
      config.keyword.clone_from(keyword);
    }

    config.jobs = jobs.or(config.jobs);
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn test_build_flags_win() {
    let mut config = Config {
      jobs: Some(4),
      ..Config::default()
    };

    merge_with_cli(&mut config, &Commands::Build {
      ledger:     Some(PathBuf::from("other.md")),
      output_dir: None,
      keyword:    Some("LLM".to_string()),
      jobs:       None,
    });

    assert_eq!(config.ledger_path, PathBuf::from("other.md"));
    assert_eq!(config.output_dir, PathBuf::from("site"));
    assert_eq!(config.keyword, "LLM");
    assert_eq!(config.jobs, Some(4));
  }

  #[test]
  fn test_other_commands_leave_config_alone() {
    let mut config = Config::default();
    merge_with_cli(&mut config, &Commands::Clear);
    assert_eq!(config, Config::default());
  }
}
