//! Build report in JSON or CSV.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vaultpress_core::prelude::*;
use vaultpress_core::{CsvBuilder, to_json_string};
use vaultpress_graph::GraphStats;
use vaultpress_site::BuildOutcome;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON format (pretty-printed)
    #[default]
    Json,
    /// CSV format (summary row, blank line, broken-link table)
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(Error::config_error(format!(
                "Unknown report format '{}' (expected json or csv)",
                other
            ))),
        }
    }
}

/// Summary of one build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    pub timestamp: String,
    pub vault: String,
    pub site: String,
    pub sections: usize,
    pub pages: usize,
    pub resources: usize,
    pub renamed_pages: usize,
    pub links_rewritten: usize,
    pub graph: GraphStats,
    pub broken_links: Vec<BrokenLinkRecord>,
}

/// Create a report from a finished build
pub fn create_build_report(config: &BuildConfig, outcome: &BuildOutcome) -> BuildReport {
    BuildReport {
        timestamp: Utc::now().to_rfc3339(),
        vault: config.vault_dir.display().to_string(),
        site: config.site_dir.display().to_string(),
        sections: outcome.sections,
        pages: outcome.pages,
        resources: outcome.resources,
        renamed_pages: outcome.renamed_pages,
        links_rewritten: outcome.links_rewritten,
        graph: outcome.graph.stats(),
        broken_links: outcome.broken_links.clone(),
    }
}

/// Build report exporter
pub struct BuildReportExporter;

impl BuildReportExporter {
    /// Export the full report as JSON
    pub fn to_json(report: &BuildReport) -> Result<String> {
        to_json_string(report, "build report")
    }

    /// Export the summary as a single CSV row
    pub fn to_csv(report: &BuildReport) -> Result<String> {
        let csv = CsvBuilder::new(vec![
            "timestamp",
            "vault",
            "site",
            "sections",
            "pages",
            "resources",
            "renamed_pages",
            "links_rewritten",
            "graph_links",
            "ghost_links",
            "isolated_pages",
            "connected_components",
            "average_degree",
            "broken_links",
        ])
        .add_row_owned(vec![
            report.timestamp.clone(),
            report.vault.clone(),
            report.site.clone(),
            report.sections.to_string(),
            report.pages.to_string(),
            report.resources.to_string(),
            report.renamed_pages.to_string(),
            report.links_rewritten.to_string(),
            report.graph.total_links.to_string(),
            report.graph.ghost_links.to_string(),
            report.graph.isolated_pages.to_string(),
            report.graph.connected_components.to_string(),
            format!("{:.3}", report.graph.average_degree),
            report.broken_links.len().to_string(),
        ])
        .build();

        Ok(csv)
    }

    /// Export in the requested format
    pub fn export(report: &BuildReport, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => Self::to_json(report),
            ExportFormat::Csv => Ok(format!(
                "{}\n{}",
                Self::to_csv(report)?,
                BrokenLinksExporter::to_csv(&report.broken_links)?
            )),
        }
    }
}

/// Broken links exporter
pub struct BrokenLinksExporter;

impl BrokenLinksExporter {
    /// Export broken links as JSON
    pub fn to_json(links: &[BrokenLinkRecord]) -> Result<String> {
        to_json_string(links, "broken links")
    }

    /// Export broken links as CSV
    pub fn to_csv(links: &[BrokenLinkRecord]) -> Result<String> {
        let csv = links
            .iter()
            .fold(
                CsvBuilder::new(vec!["source_file", "target", "line", "reason"]),
                |csv, link| {
                    csv.add_row_owned(vec![
                        link.source_file.display().to_string(),
                        link.target.clone(),
                        link.line.to_string(),
                        link.reason.clone(),
                    ])
                },
            )
            .build();

        Ok(csv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report() -> BuildReport {
        BuildReport {
            timestamp: "2025-01-01T00:00:00+00:00".to_string(),
            vault: "vault".to_string(),
            site: "build".to_string(),
            sections: 2,
            pages: 5,
            resources: 1,
            renamed_pages: 0,
            links_rewritten: 7,
            graph: GraphStats {
                total_pages: 5,
                total_links: 4,
                ghost_links: 1,
                isolated_pages: 1,
                connected_components: 2,
                average_degree: 1.6,
            },
            broken_links: vec![BrokenLinkRecord {
                source_file: PathBuf::from("notes/a.md"),
                target: "../../x.md".to_string(),
                line: 3,
                reason: "escapes the vault root, badly".to_string(),
            }],
        }
    }

    #[test]
    fn test_json_export() {
        let json = BuildReportExporter::to_json(&report()).unwrap();
        assert!(json.contains("\"pages\": 5"));
        assert!(json.contains("\"ghost_links\": 1"));
        assert!(json.contains("notes/a.md"));
    }

    #[test]
    fn test_summary_csv() {
        let csv = BuildReportExporter::to_csv(&report()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("timestamp,vault,site,sections,pages"));
        assert!(lines[1].ends_with(",4,1,1,2,1.600,1"));
    }

    #[test]
    fn test_broken_links_csv_quotes() {
        let csv = BrokenLinksExporter::to_csv(&report().broken_links).unwrap();
        assert_eq!(
            csv,
            "source_file,target,line,reason\nnotes/a.md,../../x.md,3,\"escapes the vault root, badly\"\n"
        );
    }

    #[test]
    fn test_export_formats() {
        let report = report();
        assert!(BuildReportExporter::export(&report, ExportFormat::Json)
            .unwrap()
            .starts_with('{'));
        let csv = BuildReportExporter::export(&report, ExportFormat::Csv).unwrap();
        assert!(csv.contains("\n\nsource_file,target,line,reason\n"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
