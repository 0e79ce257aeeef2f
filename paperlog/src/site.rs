//! Static site emission.
use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use paperlog_config::Config;
use paperlog_core::{PaperRecord, SiteEntry, build_site_data};
use paperlog_templates::{INDEX_TEMPLATE, STATIC_ASSETS};
use tera::Tera;

use crate::{
  error::Result,
  utils::{read_ledger, write_file},
};

/// Summary of a site build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReport {
  pub papers:     usize,
  pub pending:    usize,
  pub malformed:  usize,
  pub output_dir: PathBuf,
}

/// Render the page shell for `config`.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_index(config: &Config, paper_count: usize) -> Result<String> {
  let mut tera = Tera::default();
  tera.add_raw_template("index.html", INDEX_TEMPLATE)?;

  let mut context = tera::Context::new();
  context.insert("site_title", &config.site_title());
  context.insert("site_subtitle", &config.site_subtitle());
  context.insert("paper_count", &paper_count);
  context.insert("generated_on", &jiff::Zoned::now().date().to_string());

  Ok(tera.render("index.html", &context)?)
}

/// Render every record on a dedicated pool of `jobs` threads.
///
/// # Errors
///
/// Returns an error if the thread pool cannot be created.
pub fn render_entries(
  records: &[PaperRecord],
  jobs: usize,
) -> Result<Vec<SiteEntry>> {
  let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

  let spinner = ProgressBar::new_spinner();
  spinner.set_style(
    ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
      .unwrap_or_else(|_| ProgressStyle::default_spinner()),
  );
  spinner.set_message(format!(
    "Rendering {} summaries on {jobs} thread(s)",
    records.len()
  ));
  spinner.enable_steady_tick(Duration::from_millis(100));

  let entries = pool.install(|| build_site_data(records));
  spinner.finish_and_clear();
  Ok(entries)
}

/// Build the site described by `config`.
///
/// Writes `index.html`, `assets/style.css`, `assets/app.js` and
/// `assets/data.json` under the output directory.
///
/// # Errors
///
/// Returns an error if the ledger is missing or unreadable, or if any output
/// file cannot be written.
pub fn build_site(config: &Config) -> Result<SiteReport> {
  info!("Building site from {}", config.ledger_path.display());
  let ledger = read_ledger(&config.ledger_path)?;
  let records: Vec<PaperRecord> = ledger.records().cloned().collect();

  let jobs = config.jobs.unwrap_or_else(num_cpus::get);
  let entries = render_entries(&records, jobs)?;

  let out = &config.output_dir;
  let assets = out.join("assets");
  write_file(&out.join("index.html"), &render_index(config, entries.len())?)?;
  for (name, content) in STATIC_ASSETS {
    write_file(&assets.join(name), content)?;
  }
  write_file(
    &assets.join("data.json"),
    &serde_json::to_string_pretty(&entries)?,
  )?;

  let report = SiteReport {
    papers:     entries.len(),
    pending:    records.iter().filter(|r| r.is_pending()).count(),
    malformed:  ledger.malformed_count(),
    output_dir: out.clone(),
  };
  info!(
    "Site written to {} ({} papers, {} pending)",
    out.display(),
    report.papers,
    report.pending
  );
  Ok(report)
}
