use std::{fs, io, path::Path};

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use paperlog::{
  cli::{Cli, Commands},
  config,
  ingest,
  site,
  summaries,
};
use paperlog_config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  // Init does not need a configuration
  if let Some(Commands::Init {
    output,
    format,
    force,
  }) = &cli.command
  {
    return init_config(output, format, *force);
  }

  let config = config::load(&cli).wrap_err("Failed to load configuration")?;
  let ledger = config.ledger_path.as_path();

  match cli.command.as_ref().unwrap_or(&Commands::Build {
    ledger:     None,
    output_dir: None,
    keyword:    None,
    jobs:       None,
  }) {
    Commands::Init { .. } => {},

    Commands::Build { .. } => {
      let report = site::build_site(&config).wrap_err_with(|| {
        format!("Failed to build site into {}", config.output_dir.display())
      })?;
      if report.malformed > 0 {
        log::warn!(
          "{} malformed ledger row(s) were left out of the site",
          report.malformed
        );
      }
    },

    Commands::Ingest { file } => {
      ingest::ingest_file(ledger, file).wrap_err_with(|| {
        format!("Failed to ingest papers from {}", file.display())
      })?;
    },

    Commands::Pending => {
      let records = summaries::pending(ledger).wrap_err_with(|| {
        format!("Failed to read pending papers from {}", ledger.display())
      })?;
      info!("{} paper(s) waiting for a summary", records.len());
      summaries::write_pending(io::stdout().lock(), &records)
        .wrap_err("Failed to write pending papers")?;
    },

    Commands::Summary { link, file } => {
      let text = match file {
        Some(path) => {
          fs::read_to_string(path).wrap_err_with(|| {
            format!("Failed to read summary from {}", path.display())
          })?
        },
        None => {
          io::read_to_string(io::stdin())
            .wrap_err("Failed to read summary from stdin")?
        },
      };
      summaries::store_summary(ledger, link, &text)
        .wrap_err_with(|| format!("Failed to store summary for {link}"))?;
    },

    Commands::Clear => {
      summaries::clear_malformed(ledger).wrap_err_with(|| {
        format!("Failed to clear summaries in {}", ledger.display())
      })?;
    },
  }

  Ok(())
}

/// Write a default configuration file to `output`.
fn init_config(output: &Path, format: &str, force: bool) -> Result<()> {
  // Check if file already exists and that we're not forcing overwrite
  if output.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      output.display()
    );
  }

  // Create parent directories if needed
  if let Some(parent) = output.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
    info!("Created directory: {}", parent.display());
  }

  Config::generate_default_config(format, output).wrap_err_with(|| {
    format!("Failed to generate configuration file: {}", output.display())
  })?;

  info!(
    "Configuration file created successfully. Edit it to customize your \
     paperlog setup."
  );
  Ok(())
}
