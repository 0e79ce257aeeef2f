//! # paperlog-core
//!
//! The pure text core of paperlog. A ledger of research papers is kept as a
//! Markdown table whose last column holds a collapsible `<details>` cell. The
//! summary stored in that cell has lost its line structure, so rendering it
//! takes three steps:
//!
//! 1. [`cell::extract_payload`] unwraps the cell and turns `<br>` markers back
//!    into newlines.
//! 2. [`recover::recover`] reinserts the structural newlines that are still
//!    missing (headings, rules, list items).
//! 3. [`render::render`] turns the recovered Markdown into HTML using a small,
//!    fixed grammar.
//!
//! [`site::build_site_data`] runs the three steps over every record.
//!
//! ## Quick Start
//!
//! ```rust
//! use paperlog_core::{cell, recover, render};
//!
//! let cell = "<details><summary>展开</summary>## 概述<br>这是总结。</details>";
//! let markdown = recover::recover(&cell::extract_payload(cell));
//! let html = render::render(&markdown);
//!
//! assert_eq!(markdown, "## 概述\n这是总结。");
//! assert!(html.starts_with(r#"<h2 class="section-title">概述</h2>"#));
//! ```
//!
//! Every function in this crate is total: there is no input for which they
//! fail. Malformed rows are reported as values, unknown Markdown falls back to
//! paragraphs, and nothing here touches the file system or the environment.

pub mod cell;
pub mod ledger;
pub mod link;
pub mod recover;
pub mod render;
pub mod site;
pub mod table;
mod types;
pub mod utils;

pub use crate::{
  ledger::Ledger,
  link::{LedgerKeySet, normalize_link},
  site::build_site_data,
  types::{PaperRecord, RecoveredDocument, SiteEntry},
};
