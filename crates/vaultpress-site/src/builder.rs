//! Vault walk that writes the Zola content tree and collects the graph.

use crate::doc_path::DocPath;
use crate::transform::DocumentTransformer;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;
use vaultpress_core::prelude::*;
use vaultpress_graph::{GraphAccumulator, KnowledgeGraph};
use walkdir::WalkDir;

const SECTION_INDEX: &str = "_index.md";

/// Everything a finished build produced besides the files themselves
pub struct BuildOutcome {
    pub sections: usize,
    pub pages: usize,
    pub resources: usize,
    /// Pages renamed with the `-nested` suffix
    pub renamed_pages: usize,
    pub links_rewritten: usize,
    pub broken_links: Vec<BrokenLinkRecord>,
    pub graph: KnowledgeGraph,
}

/// Converts one vault into one site
pub struct SiteBuilder {
    config: BuildConfig,
    settings: Settings,
}

impl SiteBuilder {
    pub fn new(config: BuildConfig, settings: Settings) -> Self {
        Self { config, settings }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Walk the vault once and write every section, page and resource.
    ///
    /// Entries are processed in case-insensitive path order, so section
    /// weights and graph IDs are stable between runs. Any read or write
    /// failure aborts the build; broken links never do.
    #[instrument(skip(self), fields(vault = ?self.config.vault_dir), name = "site_build")]
    pub fn build(&self) -> Result<BuildOutcome> {
        log::info!("Building site from vault: {:?}", self.config.vault_dir);

        let docs_dir = self.config.docs_dir();
        fs::create_dir_all(&docs_dir).map_err(|e| Error::io_at(&docs_dir, e))?;

        let entries = self.scan_entries()?;
        log::info!("Found {} vault entries", entries.len());

        let transformer = DocumentTransformer::new(&self.settings);
        let mut acc = GraphAccumulator::new();
        let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut outcome = Counts::default();
        let mut broken_links = Vec::new();

        for path in entries {
            let doc = DocPath::new(&self.config.vault_dir, &path, self.settings.slugify)?;
            let target = match doc.kind {
                DocKind::Section => doc.new_path(&docs_dir).join(SECTION_INDEX),
                DocKind::Page | DocKind::Resource => doc.new_path(&docs_dir),
            };
            if let Some(previous) = written.insert(target.clone(), doc.old_rel_path.clone()) {
                log::warn!(
                    "{} and {} map to the same output {}, the latter wins",
                    previous.display(),
                    doc.old_rel_path.display(),
                    target.display()
                );
            }

            match doc.kind {
                DocKind::Section => {
                    let content = transformer.transform_section(&doc, outcome.sections)?;
                    write_output(&target, content.as_bytes())?;
                    log::debug!("Found section: {}", doc.new_rel_path.display());
                    outcome.sections += 1;
                }
                DocKind::Page => {
                    let source =
                        fs::read_to_string(&doc.old_path).map_err(|e| Error::io_at(&doc.old_path, e))?;
                    let page = transformer.transform_page(&doc, &source, doc.modified()?)?;
                    write_output(&target, page.content.as_bytes())?;
                    log::debug!("Found page: {}", page.url);

                    acc.add_node(page.url, page.title);
                    acc.extend(page.edges);
                    outcome.links_rewritten += page.links_rewritten;
                    broken_links.extend(page.broken_links);
                    outcome.pages += 1;
                    if doc.renamed {
                        outcome.renamed_pages += 1;
                    }
                }
                DocKind::Resource => {
                    copy_resource(&doc.old_path, &target)?;
                    log::debug!("Copied resource: {}", doc.new_rel_path.display());
                    outcome.resources += 1;
                }
            }
        }

        let graph = KnowledgeGraph::build(&acc);

        log::info!(
            "Build complete: {} sections, {} pages, {} resources, {} graph links, {} broken links",
            outcome.sections,
            outcome.pages,
            outcome.resources,
            graph.edge_count(),
            broken_links.len()
        );

        Ok(BuildOutcome {
            sections: outcome.sections,
            pages: outcome.pages,
            resources: outcome.resources,
            renamed_pages: outcome.renamed_pages,
            links_rewritten: outcome.links_rewritten,
            broken_links,
            graph,
        })
    }

    /// All vault entries (root included) minus excluded names, sorted by
    /// lowercased vault-relative path.
    fn scan_entries(&self) -> Result<Vec<PathBuf>> {
        let root = &self.config.vault_dir;
        let excluded = &self.config.excluded_names;

        let mut entries = Vec::new();
        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| excluded.contains(name))
        });
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                match e.into_io_error() {
                    Some(io) => Error::io_at(path, io),
                    None => Error::invalid_path(format!("Filesystem loop at {}", path.display())),
                }
            })?;
            entries.push(entry.into_path());
        }

        entries.sort_by_cached_key(|path| {
            path.strip_prefix(root)
                .unwrap_or(path.as_path())
                .to_string_lossy()
                .to_lowercase()
        });
        Ok(entries)
    }
}

#[derive(Default)]
struct Counts {
    sections: usize,
    pages: usize,
    resources: usize,
    renamed_pages: usize,
    links_rewritten: usize,
}

fn write_output(target: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io_at(parent, e))?;
    }
    fs::write(target, content).map_err(|e| Error::io_at(target, e))
}

fn copy_resource(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io_at(parent, e))?;
    }
    fs::copy(source, target)
        .map(|_| ())
        .map_err(|e| Error::io_at(source, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        vault: TempDir,
        site: TempDir,
    }

    impl Fixture {
        fn new(files: &[(&str, &str)]) -> Self {
            let vault = TempDir::new().unwrap();
            for (rel, content) in files {
                let path = vault.path().join(rel);
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(path, content).unwrap();
            }
            Self {
                vault,
                site: TempDir::new().unwrap(),
            }
        }

        fn builder(&self, slugify: bool) -> SiteBuilder {
            let config = BuildConfig::builder(self.vault.path(), self.site.path())
                .build()
                .unwrap();
            let mut settings = Settings::new("https://notes.dev", "https://git.dev/notes");
            settings.slugify = slugify;
            SiteBuilder::new(config, settings)
        }

        fn read(&self, rel: &str) -> String {
            fs::read_to_string(self.site.path().join("content/docs").join(rel)).unwrap()
        }
    }

    #[test]
    fn test_build_tree() {
        let fixture = Fixture::new(&[
            ("Home.md", "[Intro](Notes/Intro.md)"),
            ("Notes/Intro.md", "[home](../Home.md) ![img](pic.png) [gone](missing.md)"),
            ("Notes/pic.png", "PNG"),
            (".obsidian/app.json", "{}"),
        ]);

        let outcome = fixture.builder(true).build().unwrap();
        assert_eq!(outcome.sections, 2);
        assert_eq!(outcome.pages, 2);
        assert_eq!(outcome.resources, 1);
        assert!(outcome.broken_links.is_empty());

        let intro = fixture.read("notes/intro.md");
        assert!(intro.contains("[home](/docs/home) ![img](/docs/notes/pic.png) [gone](/docs/notes/missing)"));
        assert_eq!(fixture.read("notes/pic.png"), "PNG");
        assert!(fixture.read("_index.md").contains("title: main"));
        assert!(fixture.read("notes/_index.md").contains("weight: 1"));
        assert!(!fixture.site.path().join("content/docs/.obsidian").exists());

        // Home <-> Intro collapses into one edge; the link to missing.md is a ghost
        let stats = outcome.graph.stats();
        assert_eq!(stats.total_pages, 2);
        assert_eq!(stats.total_links, 1);
        assert_eq!(stats.ghost_links, 1);

        let payload = outcome.graph.payload();
        assert_eq!(payload.nodes[0].url, "/docs/home");
        assert_eq!(payload.nodes[1].url, "/docs/notes/intro");
    }

    #[test]
    fn test_parent_link_without_slugify() {
        let fixture = Fixture::new(&[("notes/a.md", "[See](../c.md#sec)"), ("c.md", "C")]);

        let outcome = fixture.builder(false).build().unwrap();
        assert!(fixture.read("notes/a.md").ends_with("[See](/docs/c#sec)\n"));
        assert_eq!(outcome.graph.payload().edges.len(), 1);
        assert_eq!(outcome.graph.degree("/docs/notes/a"), Some(1));
    }

    #[test]
    fn test_collision_rename() {
        let fixture = Fixture::new(&[("Topic.md", "top"), ("Topic/Child.md", "child")]);

        let outcome = fixture.builder(true).build().unwrap();
        assert_eq!(outcome.renamed_pages, 1);
        assert!(fixture.read("topic-nested.md").contains("title: Topic"));
        assert!(fixture.read("topic/_index.md").contains("title: Topic"));
        assert!(fixture.read("topic/child.md").ends_with("child\n"));
    }

    #[test]
    fn test_parent_link_from_unsluggable_directory() {
        let fixture = Fixture::new(&[("???/a.md", "[b](../b.md)"), ("b.md", "B")]);

        let outcome = fixture.builder(true).build().unwrap();
        assert!(outcome.broken_links.is_empty());
        assert!(fixture.read("a.md").ends_with("[b](/docs/b)\n"));
        assert_eq!(outcome.graph.degree("/docs/a"), Some(1));
    }

    #[test]
    fn test_broken_links_reported() {
        let fixture = Fixture::new(&[("a.md", "line\n[x](../../out.md)")]);

        let outcome = fixture.builder(true).build().unwrap();
        assert_eq!(outcome.broken_links.len(), 1);
        assert_eq!(outcome.broken_links[0].source_file, PathBuf::from("a.md"));
        assert_eq!(outcome.broken_links[0].line, 2);
        assert!(fixture.read("a.md").contains("[x](/404)"));
        assert!(outcome.graph.payload().edges.is_empty());
    }

    #[test]
    fn test_sections_weighted_in_case_insensitive_order() {
        let fixture = Fixture::new(&[("b/x.md", ""), ("A/y.md", ""), ("c/z.md", "")]);

        fixture.builder(true).build().unwrap();
        assert!(fixture.read("a/_index.md").contains("weight: 1"));
        assert!(fixture.read("b/_index.md").contains("weight: 2"));
        assert!(fixture.read("c/_index.md").contains("weight: 3"));
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let fixture = Fixture::new(&[
            ("One.md", "[two](Two.md) [three](sub/Three.md)"),
            ("Two.md", "[one](One.md)"),
            ("sub/Three.md", "[one](../One.md#top)"),
        ]);
        let builder = fixture.builder(true);

        let first = builder.build().unwrap();
        let first_page = fixture.read("sub/three.md");
        let second = builder.build().unwrap();

        assert_eq!(first.graph.payload(), second.graph.payload());
        assert_eq!(first_page, fixture.read("sub/three.md"));
    }
}
