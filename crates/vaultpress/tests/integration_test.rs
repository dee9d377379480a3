//! End-to-end builds of small vaults into a site skeleton

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use vaultpress::{BuildConfig, ExportFormat, Settings, create_build_report, run, write_report};

struct Workspace {
    vault: TempDir,
    site: TempDir,
}

impl Workspace {
    fn new(files: &[(&str, &str)]) -> Self {
        let vault = TempDir::new().expect("Failed to create vault dir");
        for (rel, content) in files {
            write(vault.path(), rel, content);
        }

        let site = TempDir::new().expect("Failed to create site dir");
        write(
            site.path(),
            "config.toml",
            "base_url = \"___SITE_URL___\"\ntitle = \"___SITE_TITLE___\"\nslugify = ___SLUGIFY___\n",
        );
        write(
            site.path(),
            "content/_index.md",
            "+++\ntitle = \"___LANDING_TITLE___\"\n+++\n",
        );

        Self { vault, site }
    }

    fn config(&self, local: bool) -> BuildConfig {
        BuildConfig::builder(self.vault.path(), self.site.path())
            .local(local)
            .build()
            .expect("Failed to create build config")
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.site.path().join(rel))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", rel, e))
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn settings() -> Settings {
    let mut settings = Settings::new("https://notes.dev", "https://git.dev/notes");
    settings.site_title = "Garden".to_string();
    settings
}

fn sample_vault() -> Workspace {
    Workspace::new(&[
        ("Home.md", "Start at [Intro](Topics/Intro.md).\n"),
        (
            "Topics/Intro.md",
            "---\nmodified: 2024-01-02\n---\nBack [home](../Home.md#top), see ![diagram](Diagram%20One.png)\nand [lost](../../outside.md).\n",
        ),
        ("Topics/Diagram One.png", "PNG"),
        ("Topics/Deep Dive/Notes.md", "Up to [intro](../Intro.md) and [web](https://example.com)\n"),
        (".obsidian/workspace.json", "{}"),
    ])
}

#[test]
fn test_full_build() {
    let ws = sample_vault();
    let summary = run(&ws.config(false), &settings()).expect("Build failed");

    let outcome = &summary.outcome;
    assert_eq!(outcome.pages, 3);
    assert_eq!(outcome.sections, 3);
    assert_eq!(outcome.resources, 1);
    assert_eq!(outcome.broken_links.len(), 1);
    assert_eq!(outcome.broken_links[0].target, "../../outside.md");

    let intro = ws.read("content/docs/topics/intro.md");
    assert!(intro.starts_with("---\ntitle: Intro\n"));
    assert!(intro.contains("<meta property=\"article:modified_time\" content=\"2024-01-02\"/>"));
    assert!(intro.contains("[home](/docs/home#top)"));
    assert!(intro.contains("![diagram](/docs/topics/diagram-one.png)"));
    assert!(intro.contains("[lost](/404)"));
    assert!(!intro.contains("modified: 2024-01-02"));

    let notes = ws.read("content/docs/topics/deep-dive/notes.md");
    assert!(notes.contains("[intro](/docs/topics/intro)"));
    assert!(notes.contains("[web](https://example.com)"));

    assert_eq!(ws.read("content/docs/topics/diagram-one.png"), "PNG");
    let deep_dive = ws.read("content/docs/topics/deep-dive/_index.md");
    assert!(deep_dive.contains("title: Topics/Deep Dive"));
    assert!(deep_dive.contains("weight: 2"));
    assert!(!ws.site.path().join("content/docs/.obsidian").exists());
}

#[test]
fn test_graph_script_payload() {
    let ws = sample_vault();
    run(&ws.config(false), &settings()).expect("Build failed");

    let script = ws.read("static/js/graph_info.js");
    let lines: Vec<_> = script.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "var graph_is_local=false");
    assert_eq!(lines[2], "var graph_link_replace=false");

    let json = lines[0].strip_prefix("var graph_data=").expect("graph_data prefix");
    let payload: serde_json::Value = serde_json::from_str(json).expect("Invalid graph JSON");

    let nodes = payload["nodes"].as_array().unwrap();
    let urls: Vec<_> = nodes.iter().map(|n| n["url"].as_str().unwrap()).collect();
    assert_eq!(urls, vec!["/docs/home", "/docs/topics/deep-dive/notes", "/docs/topics/intro"]);

    // home-intro and intro-notes; the png link and /404 are not pages
    assert_eq!(payload["edges"].as_array().unwrap().len(), 2);

    // the most linked page is colored
    let intro = &nodes[2];
    assert_eq!(intro["id"], 2);
    assert!(intro["color"].is_string());

    assert_eq!(ws.read("static/js/settings.js"), "var sidebar_collapsed=false");
}

#[test]
fn test_placeholders_substituted() {
    let ws = sample_vault();
    let summary = run(&ws.config(false), &settings()).expect("Build failed");

    assert_eq!(summary.substituted.len(), 2);
    assert_eq!(
        ws.read("config.toml"),
        "base_url = \"https://notes.dev\"\ntitle = \"Garden\"\nslugify = true\n"
    );
    assert!(ws.read("content/_index.md").contains("I love obsidian-zola!"));
}

#[test]
fn test_local_build_keeps_placeholders() {
    let ws = sample_vault();
    let summary = run(&ws.config(true), &settings()).expect("Build failed");

    assert!(summary.substituted.is_empty());
    assert!(ws.read("config.toml").contains("___SITE_URL___"));
    assert!(ws.site.path().join("content/docs/home.md").is_file());
}

#[test]
fn test_settings_from_netlify_file() {
    let ws = sample_vault();
    let file = ws.vault.path().join("netlify.toml");
    fs::write(
        &file,
        "[build]\ncommand = \"zola build\"\n\n[build.environment]\nSITE_URL = \"https://file.dev\"\nREPO_URL = \"https://git.dev/file\"\nSLUGIFY = \"n\"\n",
    )
    .unwrap();

    let env = config::Environment::default().source(Some(HashMap::from([(
        "SITE_URL".to_string(),
        "https://env.dev".to_string(),
    )])));
    let settings = Settings::from_sources(Some(&file), env).expect("Failed to load settings");

    assert_eq!(settings.site_url, "https://env.dev");
    assert_eq!(settings.repo_url, "https://git.dev/file");
    assert!(!settings.slugify);
}

#[test]
fn test_missing_required_setting() {
    let env = config::Environment::default().source(Some(HashMap::from([(
        "SITE_URL".to_string(),
        "https://env.dev".to_string(),
    )])));
    let err = Settings::from_sources(None, env).unwrap_err();
    assert!(err.to_string().contains("REPO_URL"));
}

#[test]
fn test_missing_vault_rejected() {
    let site = TempDir::new().unwrap();
    let result = BuildConfig::builder(site.path().join("nope"), site.path()).build();
    assert!(result.is_err());
}

#[test]
fn test_build_report_written() {
    let ws = sample_vault();
    let config = ws.config(true);
    let summary = run(&config, &settings()).expect("Build failed");
    let report = create_build_report(&config, &summary.outcome);

    let json_path = ws.site.path().join("reports/build.json");
    write_report(&json_path, &report, ExportFormat::Json).expect("Failed to write JSON report");
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["pages"], 3);
    assert_eq!(json["graph"]["total_links"], 2);
    assert_eq!(json["broken_links"][0]["target"], "../../outside.md");

    let csv_path = ws.site.path().join("reports/build.csv");
    write_report(&csv_path, &report, ExportFormat::Csv).expect("Failed to write CSV report");
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("timestamp,vault,site,"));
    assert!(csv.contains("\n\nsource_file,target,line,reason\n"));
    assert!(csv.contains("outside.md"));
}
