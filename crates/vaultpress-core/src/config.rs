//! Configuration types for a vaultpress build.
//!
//! Two halves:
//! - [`Settings`]: the site option set (`SITE_URL`, `SLUGIFY`, ...), read once
//!   from an optional `netlify.toml`-style file and the process environment.
//! - [`BuildConfig`]: the filesystem side (vault and site directories), built
//!   and validated through [`BuildConfigBuilder`].

use crate::error::{Error, Result};
use config::{Config, ConfigError as SourceError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default vis-network options handed to the graph viewer.
pub const DEFAULT_GRAPH_OPTIONS: &str = r##"{
	nodes: {
		shape: "dot",
		color: isDark() ? "#8c8e91" : "#dee2e6",
		font: {
			face: "Inter",
			color: isDark() ? "#c9cdd1" : "#616469",
			strokeColor: isDark() ? "#c9cdd1" : "#616469",
		},
		scaling: {
			label: {
				enabled: true,
			},
		},
	},
	edges: {
		color: { inherit: "both" },
		width: 0.8,
		smooth: {
			type: "continuous",
		},
		hoverWidth: 4,
	},
	interaction: {
		hover: true,
	},
	height: "100%",
	width: "100%",
	physics: {
		solver: "repulsion",
	},
}"##;

const DEFAULT_SITE_TITLE: &str = "Someone's Second Brain";
const DEFAULT_TIMEZONE: &str = "Asia/Hong_Kong";
const DEFAULT_LANDING_TITLE: &str = "I love obsidian-zola!";
const DEFAULT_LANDING_DESCRIPTION: &str = "I have nothing but intelligence.";
const DEFAULT_LANDING_BUTTON: &str = "Click to steal some";
const DEFAULT_SUBSECTION_SYMBOL: &str = "👉";
const DEFAULT_ROOT_SECTION_NAME: &str = "main";

/// Names skipped during the vault walk unless overridden.
pub const DEFAULT_EXCLUDED_NAMES: [&str; 4] = [".obsidian", ".git", ".DS_Store", ".trash"];

/// Sort key written into every section's `sort_by` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Title,
    Date,
    Weight,
    Slug,
    None,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Date => "date",
            Self::Weight => "weight",
            Self::Slug => "slug",
            Self::None => "none",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "date" => Ok(Self::Date),
            "weight" => Ok(Self::Weight),
            "slug" => Ok(Self::Slug),
            "none" => Ok(Self::None),
            other => Err(Error::config_error(format!(
                "SORT_BY must be one of title, date, weight, slug, none (got '{}')",
                other
            ))),
        }
    }
}

/// Interpret a yes/no style option value. Empty means off.
pub fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "n" | "no" | "f" | "false" | "off" | "0" => Ok(false),
        "y" | "yes" | "t" | "true" | "on" | "1" => Ok(true),
        other => Err(Error::config_error(format!(
            "{} expects a yes/no value (got '{}')",
            key, other
        ))),
    }
}

/// Options as they arrive from a source, before defaults and validation.
///
/// Every field is optional so file and environment layers can be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    #[serde(alias = "SITE_URL")]
    pub site_url: Option<String>,
    #[serde(alias = "REPO_URL")]
    pub repo_url: Option<String>,
    #[serde(alias = "SITE_TITLE")]
    pub site_title: Option<String>,
    #[serde(alias = "SITE_TITLE_TAB")]
    pub site_title_tab: Option<String>,
    #[serde(alias = "TIMEZONE")]
    pub timezone: Option<String>,
    #[serde(alias = "LANDING_PAGE")]
    pub landing_page: Option<String>,
    #[serde(alias = "LANDING_TITLE")]
    pub landing_title: Option<String>,
    #[serde(alias = "LANDING_DESCRIPTION")]
    pub landing_description: Option<String>,
    #[serde(alias = "LANDING_BUTTON")]
    pub landing_button: Option<String>,
    #[serde(alias = "SORT_BY")]
    pub sort_by: Option<String>,
    #[serde(alias = "GANALYTICS")]
    pub ganalytics: Option<String>,
    #[serde(alias = "SLUGIFY")]
    pub slugify: Option<String>,
    #[serde(alias = "HOME_GRAPH")]
    pub home_graph: Option<String>,
    #[serde(alias = "PAGE_GRAPH")]
    pub page_graph: Option<String>,
    #[serde(alias = "LOCAL_GRAPH")]
    pub local_graph: Option<String>,
    #[serde(alias = "GRAPH_LINK_REPLACE")]
    pub graph_link_replace: Option<String>,
    #[serde(alias = "SIDEBAR_COLLAPSED")]
    pub sidebar_collapsed: Option<String>,
    #[serde(alias = "SUBSECTION_SYMBOL")]
    pub subsection_symbol: Option<String>,
    #[serde(alias = "ROOT_SECTION_NAME")]
    pub root_section_name: Option<String>,
    #[serde(alias = "FOOTER")]
    pub footer: Option<String>,
    #[serde(alias = "GRAPH_OPTIONS")]
    pub graph_options: Option<String>,
}

impl RawSettings {
    /// Overlay `other` on top of `self`; values present in `other` win.
    pub fn merge(self, other: RawSettings) -> RawSettings {
        RawSettings {
            site_url: other.site_url.or(self.site_url),
            repo_url: other.repo_url.or(self.repo_url),
            site_title: other.site_title.or(self.site_title),
            site_title_tab: other.site_title_tab.or(self.site_title_tab),
            timezone: other.timezone.or(self.timezone),
            landing_page: other.landing_page.or(self.landing_page),
            landing_title: other.landing_title.or(self.landing_title),
            landing_description: other.landing_description.or(self.landing_description),
            landing_button: other.landing_button.or(self.landing_button),
            sort_by: other.sort_by.or(self.sort_by),
            ganalytics: other.ganalytics.or(self.ganalytics),
            slugify: other.slugify.or(self.slugify),
            home_graph: other.home_graph.or(self.home_graph),
            page_graph: other.page_graph.or(self.page_graph),
            local_graph: other.local_graph.or(self.local_graph),
            graph_link_replace: other.graph_link_replace.or(self.graph_link_replace),
            sidebar_collapsed: other.sidebar_collapsed.or(self.sidebar_collapsed),
            subsection_symbol: other.subsection_symbol.or(self.subsection_symbol),
            root_section_name: other.root_section_name.or(self.root_section_name),
            footer: other.footer.or(self.footer),
            graph_options: other.graph_options.or(self.graph_options),
        }
    }
}

/// Validated site options. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub site_url: String,
    pub repo_url: String,
    pub site_title: String,
    pub site_title_tab: String,
    pub timezone: String,
    pub landing_page: String,
    pub landing_title: String,
    pub landing_description: String,
    pub landing_button: String,
    pub sort_by: SortBy,
    pub ganalytics: String,
    pub slugify: bool,
    pub home_graph: bool,
    pub page_graph: bool,
    pub local_graph: bool,
    pub graph_link_replace: bool,
    pub sidebar_collapsed: bool,
    pub subsection_symbol: String,
    pub root_section_name: String,
    pub footer: String,
    pub graph_options: String,
}

impl Settings {
    /// Settings with every default applied and the two required URLs set.
    pub fn new(site_url: impl Into<String>, repo_url: impl Into<String>) -> Self {
        let site_title = DEFAULT_SITE_TITLE.to_string();
        Self {
            site_url: site_url.into(),
            repo_url: repo_url.into(),
            site_title_tab: site_title.clone(),
            site_title,
            timezone: DEFAULT_TIMEZONE.to_string(),
            landing_page: String::new(),
            landing_title: DEFAULT_LANDING_TITLE.to_string(),
            landing_description: DEFAULT_LANDING_DESCRIPTION.to_string(),
            landing_button: DEFAULT_LANDING_BUTTON.to_string(),
            sort_by: SortBy::default(),
            ganalytics: String::new(),
            slugify: true,
            home_graph: true,
            page_graph: true,
            local_graph: false,
            graph_link_replace: false,
            sidebar_collapsed: false,
            subsection_symbol: DEFAULT_SUBSECTION_SYMBOL.to_string(),
            root_section_name: DEFAULT_ROOT_SECTION_NAME.to_string(),
            footer: String::new(),
            graph_options: DEFAULT_GRAPH_OPTIONS.to_string(),
        }
    }

    /// Load settings from an optional file plus the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let env = Environment::default();
        Self::from_sources(file, env)
    }

    /// Load settings from an optional file plus an explicit environment source.
    ///
    /// The file is TOML and carries the options under `[build.environment]`;
    /// a file without that table contributes nothing. The environment layer
    /// overrides the file.
    pub fn from_sources(file: Option<&Path>, env: Environment) -> Result<Self> {
        let from_file = match file {
            Some(path) => {
                if !path.is_file() {
                    return Err(Error::config_error(format!(
                        "Settings file does not exist: {}",
                        path.display()
                    )));
                }
                let cfg = Config::builder()
                    .add_source(File::from(path).format(FileFormat::Toml))
                    .build()
                    .map_err(|e| {
                        Error::config_error(format!("Failed to read {}: {}", path.display(), e))
                    })?;
                match cfg.get::<RawSettings>("build.environment") {
                    Ok(raw) => raw,
                    Err(SourceError::NotFound(_)) => {
                        log::warn!(
                            "{} has no [build.environment] table, using environment only",
                            path.display()
                        );
                        RawSettings::default()
                    }
                    Err(e) => {
                        return Err(Error::config_error(format!(
                            "Invalid settings in {}: {}",
                            path.display(),
                            e
                        )));
                    }
                }
            }
            None => RawSettings::default(),
        };

        let from_env = Config::builder()
            .add_source(env)
            .build()
            .and_then(|cfg| cfg.try_deserialize::<RawSettings>())
            .map_err(|e| Error::config_error(format!("Invalid environment settings: {}", e)))?;

        Self::from_raw(from_file.merge(from_env))
    }

    /// Apply defaults and validate.
    pub fn from_raw(raw: RawSettings) -> Result<Self> {
        let site_url = required("SITE_URL", raw.site_url)?;
        let repo_url = required("REPO_URL", raw.repo_url)?;

        let site_title = raw
            .site_title
            .unwrap_or_else(|| DEFAULT_SITE_TITLE.to_string());
        let site_title_tab = match raw.site_title_tab {
            Some(tab) if !tab.is_empty() => tab,
            _ => site_title.clone(),
        };

        let sort_by = match raw.sort_by.as_deref() {
            Some(value) => value.parse()?,
            None => SortBy::default(),
        };

        let settings = Self {
            site_url,
            repo_url,
            site_title,
            site_title_tab,
            timezone: raw.timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            landing_page: raw.landing_page.unwrap_or_default(),
            landing_title: raw
                .landing_title
                .unwrap_or_else(|| DEFAULT_LANDING_TITLE.to_string()),
            landing_description: raw
                .landing_description
                .unwrap_or_else(|| DEFAULT_LANDING_DESCRIPTION.to_string()),
            landing_button: raw
                .landing_button
                .unwrap_or_else(|| DEFAULT_LANDING_BUTTON.to_string()),
            sort_by,
            ganalytics: raw.ganalytics.unwrap_or_default(),
            slugify: flag("SLUGIFY", raw.slugify, true)?,
            home_graph: flag("HOME_GRAPH", raw.home_graph, true)?,
            page_graph: flag("PAGE_GRAPH", raw.page_graph, true)?,
            local_graph: flag("LOCAL_GRAPH", raw.local_graph, false)?,
            graph_link_replace: flag("GRAPH_LINK_REPLACE", raw.graph_link_replace, false)?,
            sidebar_collapsed: flag("SIDEBAR_COLLAPSED", raw.sidebar_collapsed, false)?,
            subsection_symbol: raw
                .subsection_symbol
                .unwrap_or_else(|| DEFAULT_SUBSECTION_SYMBOL.to_string()),
            root_section_name: match raw.root_section_name {
                Some(name) if !name.is_empty() => name,
                _ => DEFAULT_ROOT_SECTION_NAME.to_string(),
            },
            footer: raw.footer.unwrap_or_default(),
            graph_options: raw
                .graph_options
                .unwrap_or_else(|| DEFAULT_GRAPH_OPTIONS.to_string()),
        };

        log::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// `___KEY___` placeholder names and their substitution values.
    pub fn placeholders(&self) -> Vec<(&'static str, String)> {
        let yes_no = |b: bool| if b { "true" } else { "false" }.to_string();
        vec![
            ("SITE_URL", self.site_url.clone()),
            ("REPO_URL", self.repo_url.clone()),
            ("SITE_TITLE", self.site_title.clone()),
            ("SITE_TITLE_TAB", self.site_title_tab.clone()),
            ("TIMEZONE", self.timezone.clone()),
            ("LANDING_PAGE", self.landing_page.clone()),
            ("LANDING_TITLE", self.landing_title.clone()),
            ("LANDING_DESCRIPTION", self.landing_description.clone()),
            ("LANDING_BUTTON", self.landing_button.clone()),
            ("SORT_BY", self.sort_by.to_string()),
            ("GANALYTICS", self.ganalytics.clone()),
            ("SLUGIFY", yes_no(self.slugify)),
            ("HOME_GRAPH", yes_no(self.home_graph)),
            ("PAGE_GRAPH", yes_no(self.page_graph)),
            ("LOCAL_GRAPH", yes_no(self.local_graph)),
            ("GRAPH_LINK_REPLACE", yes_no(self.graph_link_replace)),
            ("SIDEBAR_COLLAPSED", yes_no(self.sidebar_collapsed)),
            ("SUBSECTION_SYMBOL", self.subsection_symbol.clone()),
            ("ROOT_SECTION_NAME", self.root_section_name.clone()),
            ("FOOTER", self.footer.clone()),
            ("GRAPH_OPTIONS", self.graph_options.clone()),
        ]
    }
}

fn required(key: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::config_error(format!(
            "build.environment.{} not set and has no default",
            key
        ))),
    }
}

fn flag(key: &str, value: Option<String>, default: bool) -> Result<bool> {
    match value {
        Some(v) => parse_flag(key, &v),
        None => Ok(default),
    }
}

/// Filesystem configuration for one build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Exported vault to read from
    pub vault_dir: PathBuf,
    /// Zola site root to write into
    pub site_dir: PathBuf,
    /// Entry names skipped anywhere in the vault
    pub excluded_names: HashSet<String>,
    /// Skip `___KEY___` substitution in the site skeleton
    pub local: bool,
}

impl BuildConfig {
    /// Create a new build config with builder
    pub fn builder(vault_dir: impl Into<PathBuf>, site_dir: impl Into<PathBuf>) -> BuildConfigBuilder {
        BuildConfigBuilder::new(vault_dir, site_dir)
    }

    /// Root of the generated content tree (`<site>/content/docs`)
    pub fn docs_dir(&self) -> PathBuf {
        self.site_dir.join("content").join("docs")
    }

    /// Directory receiving the generated scripts (`<site>/static/js`)
    pub fn script_dir(&self) -> PathBuf {
        self.site_dir.join("static").join("js")
    }

    /// Validate the build configuration
    pub fn validate(&self) -> Result<()> {
        if !self.vault_dir.exists() {
            return Err(Error::config_error(format!(
                "Vault path does not exist: {}",
                self.vault_dir.display()
            )));
        }

        if !self.vault_dir.is_dir() {
            return Err(Error::config_error(format!(
                "Vault path is not a directory: {}",
                self.vault_dir.display()
            )));
        }

        if self.site_dir.starts_with(&self.vault_dir) {
            return Err(Error::config_error(format!(
                "Site directory {} must not live inside the vault",
                self.site_dir.display()
            )));
        }

        Ok(())
    }
}

/// Builder for BuildConfig
pub struct BuildConfigBuilder {
    vault_dir: PathBuf,
    site_dir: PathBuf,
    excluded_names: HashSet<String>,
    local: bool,
}

impl BuildConfigBuilder {
    /// Create a new builder
    pub fn new(vault_dir: impl Into<PathBuf>, site_dir: impl Into<PathBuf>) -> Self {
        Self {
            vault_dir: vault_dir.into(),
            site_dir: site_dir.into(),
            excluded_names: DEFAULT_EXCLUDED_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            local: false,
        }
    }

    /// Skip an additional entry name during the walk
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excluded_names.insert(name.into());
        self
    }

    /// Local preview build: leave placeholders in the site skeleton alone
    pub fn local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<BuildConfig> {
        let config = BuildConfig {
            vault_dir: self.vault_dir,
            site_dir: self.site_dir,
            excluded_names: self.excluded_names,
            local: self.local,
        };
        config.validate()?;
        Ok(config)
    }
}
