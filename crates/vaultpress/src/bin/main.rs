//! vaultpress CLI

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use vaultpress::{BuildConfig, ExportFormat, Settings, create_build_report, run, write_report};

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Plain lines on stderr
    Human,
    /// One JSON object per event, including tracing spans
    Json,
}

/// vaultpress - publish an Obsidian vault as a Zola site
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the exported Obsidian vault
    #[arg(long, env = "VAULT")]
    vault: PathBuf,

    /// Root of the Zola site skeleton to write into
    #[arg(long, env = "SITE_DIR", default_value = "build")]
    site: PathBuf,

    /// TOML file holding options under [build.environment] (e.g. netlify.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Local preview: leave ___KEY___ placeholders in the site untouched
    #[arg(long, action = clap::ArgAction::SetTrue)]
    local: bool,

    /// Write a build report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Build report format (json, csv)
    #[arg(long, default_value = "json")]
    report_format: ExportFormat,

    /// Log output style
    #[arg(long, value_enum, default_value = "human")]
    log_format: LogFormat,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only warnings and errors
    #[arg(short, long, action = clap::ArgAction::SetTrue, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Warn;
        }
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn init_logging(format: LogFormat, level: log::LevelFilter) -> Result<()> {
    match format {
        LogFormat::Human => {
            simple_logger::SimpleLogger::new()
                .with_level(level)
                .with_utc_timestamps()
                .init()
                .context("Failed to initialize logger")?;
        }
        LogFormat::Json => {
            // RUST_LOG wins over -v/-q when set
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_str()));
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
        }
    }
    Ok(())
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_format, args.level())?;

    log::info!("vaultpress v{}", env!("CARGO_PKG_VERSION"));

    let config_file = args.config.as_deref().map(expand);
    let settings = Settings::load(config_file.as_deref()).context("Failed to load settings")?;

    let config = BuildConfig::builder(expand(&args.vault), expand(&args.site))
        .local(args.local)
        .build()
        .context("Invalid build paths")?;

    let summary = run(&config, &settings).with_context(|| {
        format!(
            "Build of {} into {} failed",
            config.vault_dir.display(),
            config.site_dir.display()
        )
    })?;

    if let Some(path) = args.report.as_deref() {
        let report = create_build_report(&config, &summary.outcome);
        write_report(&expand(path), &report, args.report_format)
            .context("Failed to write build report")?;
    }

    log::info!(
        "Done: {} pages, {} sections, {} resources",
        summary.outcome.pages,
        summary.outcome.sections,
        summary.outcome.resources
    );
    Ok(())
}
