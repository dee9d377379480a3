//! Build orchestration shared by the CLI and the integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;
use vaultpress_core::prelude::*;
use vaultpress_export::{
    BuildReport, BuildReportExporter, ExportFormat, substitute_placeholders, write_scripts,
};
use vaultpress_site::{BuildOutcome, SiteBuilder};

/// What one run of the pipeline touched
pub struct BuildSummary {
    pub outcome: BuildOutcome,
    /// Skeleton files whose placeholders were filled in
    pub substituted: Vec<PathBuf>,
    /// Generated scripts under `static/js`
    pub scripts: Vec<PathBuf>,
}

/// Run a full build: placeholders, content tree, graph, scripts.
///
/// Settings must already be loaded, so configuration errors surface before
/// anything is written.
#[instrument(skip_all, fields(site = ?config.site_dir), name = "pipeline")]
pub fn run(config: &BuildConfig, settings: &Settings) -> Result<BuildSummary> {
    let substituted = substitute_placeholders(config, settings)?;

    let outcome = SiteBuilder::new(config.clone(), settings.clone()).build()?;

    let scripts = write_scripts(config, outcome.graph.payload(), settings)?;

    if !outcome.broken_links.is_empty() {
        log::warn!(
            "Build finished with {} broken link(s) replaced by {}",
            outcome.broken_links.len(),
            NOT_FOUND_URL
        );
    }

    Ok(BuildSummary {
        outcome,
        substituted,
        scripts,
    })
}

/// Serialize a report and write it to `path`.
pub fn write_report(path: &Path, report: &BuildReport, format: ExportFormat) -> Result<()> {
    let content = BuildReportExporter::export(report, format)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io_at(parent, e))?;
    }
    fs::write(path, content).map_err(|e| Error::io_at(path, e))?;
    log::info!("Wrote {} build report to {}", format, path.display());
    Ok(())
}
