//! # Export System
//!
//! Everything written outside the content tree after a build, plus the
//! optional build report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vaultpress_export::{
//!     BuildReportExporter, ExportFormat, create_build_report, substitute_placeholders,
//!     write_scripts,
//! };
//! use vaultpress_site::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let config = BuildConfig::builder("vault", "build").build()?;
//! let settings = Settings::load(None)?;
//!
//! substitute_placeholders(&config, &settings)?;
//! let outcome = SiteBuilder::new(config.clone(), settings.clone()).build()?;
//! write_scripts(&config, outcome.graph.payload(), &settings)?;
//!
//! let report = create_build_report(&config, &outcome);
//! println!("{}", BuildReportExporter::export(&report, ExportFormat::Json)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Outputs
//!
//! ### Scripts
//!
//! `<site>/static/js/graph_info.js` holds the graph payload and the
//! `graph_is_local` / `graph_link_replace` flags; `settings.js` holds
//! `sidebar_collapsed`.
//!
//! ### Placeholders
//!
//! `<site>/config.toml` and `<site>/content/_index.md` have every
//! `___KEY___` replaced with the matching setting, unless the build is local.
//!
//! ### Reports
//!
//! - JSON: the full [`BuildReport`], pretty-printed
//! - CSV: one summary row, a blank line, then one row per broken link
//!
//! Exporters return strings; no I/O happens inside them.

pub mod placeholders;
pub mod report;
pub mod scripts;

pub use placeholders::{PLACEHOLDER_FILES, substitute, substitute_placeholders};
pub use report::{
    BrokenLinksExporter, BuildReport, BuildReportExporter, ExportFormat, create_build_report,
};
pub use scripts::{GRAPH_SCRIPT, SETTINGS_SCRIPT, graph_script, settings_script, write_scripts};
