use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for paperlog
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Keep a Markdown ledger of arXiv papers and publish it as a site"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`]). Defaults to `build`.
  #[command(subcommand)]
  pub command: Option<Commands>,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", action = clap::ArgAction::Append, global = true)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", action = clap::ArgAction::Append, global = true)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the paperlog CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new paperlog configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "paperlog.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Render the ledger into a static site.
  Build {
    /// Path to the ledger file.
    #[arg(short, long)]
    ledger: Option<PathBuf>,

    /// Output directory for the generated site.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Topic keyword used in the page title.
    #[arg(short, long)]
    keyword: Option<String>,

    /// Number of threads to use for rendering.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,
  },

  /// Insert new papers from a JSON array of `{date, title, link}` objects.
  Ingest {
    /// JSON file produced by the fetcher.
    file: PathBuf,
  },

  /// Print the papers still waiting for a summary as JSON.
  Pending,

  /// Store a generated summary for one paper.
  Summary {
    /// Link of the paper, any revision.
    #[arg(long)]
    link: String,

    /// File holding the summary text. Read from stdin when omitted.
    #[arg(short, long)]
    file: Option<PathBuf>,
  },

  /// Reset summaries without a section heading back to the placeholder.
  Clear,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
