//! Record-to-entry transform feeding the site's `data.json`.
use rayon::prelude::*;

use crate::{
  cell::{extract_payload, is_placeholder},
  recover::recover,
  render::render,
  types::{PaperRecord, RecoveredDocument, SiteEntry},
};

/// Recover and render the summary held in one cell.
///
/// A placeholder cell yields an empty document; the front end shows its own
/// pending notice for those.
#[must_use]
pub fn render_cell(cell: &str) -> RecoveredDocument {
  if is_placeholder(cell) {
    return RecoveredDocument::default();
  }

  let markdown = recover(&extract_payload(cell));
  let html = render(&markdown);
  RecoveredDocument { markdown, html }
}

/// Build the site entries for `records`, in the same order.
///
/// Cells are rendered in parallel on the current rayon pool. Nothing is
/// sorted, grouped or deduplicated here.
#[must_use]
pub fn build_site_data(records: &[PaperRecord]) -> Vec<SiteEntry> {
  log::debug!("Rendering {} summary cells", records.len());
  records
    .par_iter()
    .map(|record| SiteEntry::from_parts(record, render_cell(&record.summary_cell)))
    .collect()
}
