//! # vaultpress
//!
//! Command-line build of a Zola site from an exported Obsidian vault.
//!
//! The binary is a thin shell over [`run`]: settings and paths are resolved
//! first, then the site skeleton is filled in, the vault is converted and the
//! theme scripts are written.

pub mod pipeline;

pub use pipeline::{BuildSummary, run, write_report};
pub use vaultpress_core::prelude::*;
pub use vaultpress_export::{BuildReport, BuildReportExporter, ExportFormat, create_build_report};
pub use vaultpress_site::{BuildOutcome, SiteBuilder};
