//! Page and section content generation.

use crate::doc_path::DocPath;
use crate::resolver::LinkResolver;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::Path;
use vaultpress_core::prelude::*;
use vaultpress_parser::{
    extract_links, fix_latex_line_break, render_metadata, replace_links, split_frontmatter,
    split_lines,
};

/// Zola template for pages
pub const PAGE_TEMPLATE: &str = "docs/page.html";
/// Zola template for sections
pub const SECTION_TEMPLATE: &str = "docs/section.html";

const FENCE: &str = "---";

/// Frontmatter written at the top of every page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageFrontmatter {
    pub title: String,
    pub date: String,
    pub updated: String,
    pub template: &'static str,
}

/// Frontmatter of a section `_index.md`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionFrontmatter {
    pub title: String,
    pub template: &'static str,
    pub sort_by: SortBy,
    pub weight: usize,
    pub extra: SectionExtra,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionExtra {
    pub sidebar: String,
}

/// A rewritten page and what it contributed to the graph
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedPage {
    /// Full output file content
    pub content: String,
    /// Site URL of the page
    pub url: String,
    pub title: String,
    /// One edge per Markdown link, including links that became `/404`
    pub edges: Vec<Edge>,
    pub broken_links: Vec<BrokenLinkRecord>,
    /// Internal links rewritten (broken ones included)
    pub links_rewritten: usize,
}

/// Turns vault entries into Zola content
pub struct DocumentTransformer<'a> {
    settings: &'a Settings,
    resolver: LinkResolver,
}

impl<'a> DocumentTransformer<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            resolver: LinkResolver::new(settings.slugify),
        }
    }

    /// Rewrite a page.
    ///
    /// Any Obsidian frontmatter is stripped, every internal link is pointed at
    /// its site URL (or `/404`), trailing LaTeX line breaks are doubled, and
    /// the generated frontmatter plus rendered metadata is put on top.
    pub fn transform_page(
        &self,
        doc: &DocPath,
        source: &str,
        modified: DateTime<Utc>,
    ) -> Result<TransformedPage> {
        let url = doc.page_url();
        let title = doc.page_title();

        let lines = split_lines(source);
        let split = split_frontmatter(&lines);

        let mut edges = Vec::new();
        let mut broken_links = Vec::new();
        let mut links_rewritten = 0;
        let mut body = Vec::with_capacity(split.body.len());

        for (offset, line) in split.body.iter().enumerate() {
            let links = extract_links(line);
            let rewritten = replace_links(line, &links, |link| {
                let target_url = match self.resolver.resolve(link, doc) {
                    Ok(target_url) => target_url,
                    Err(e) => {
                        log::warn!(
                            "Broken link in {}: '{}' ({})",
                            doc.old_rel_path.display(),
                            link.raw_target,
                            e
                        );
                        broken_links.push(BrokenLinkRecord {
                            source_file: doc.old_rel_path.clone(),
                            target: link.raw_target.clone(),
                            line: split.stripped + offset + 1,
                            reason: broken_reason(e),
                        });
                        NOT_FOUND_URL.to_string()
                    }
                };
                if link.is_markdown {
                    edges.push(Edge::new(url.clone(), target_url.clone()));
                }
                links_rewritten += 1;
                format!(
                    "[{}]({}{})",
                    link.title,
                    target_url,
                    link.heading.as_deref().unwrap_or("")
                )
            });
            body.push(fix_latex_line_break(&rewritten).into_owned());
        }

        let frontmatter = PageFrontmatter {
            title: title.clone(),
            date: modified.to_rfc3339_opts(SecondsFormat::Secs, true),
            updated: modified.to_rfc3339_opts(SecondsFormat::Secs, true),
            template: PAGE_TEMPLATE,
        };

        let mut content = fenced(&frontmatter, &doc.old_rel_path)?;
        for html in render_metadata(&split.metadata) {
            content.push_str(&html);
            content.push('\n');
        }
        for line in &body {
            content.push_str(line);
            content.push('\n');
        }

        Ok(TransformedPage {
            content,
            url,
            title,
            edges,
            broken_links,
            links_rewritten,
        })
    }

    /// `_index.md` content for a section; `index` is its position among all
    /// sections in walk order.
    pub fn transform_section(&self, doc: &DocPath, index: usize) -> Result<String> {
        let root_name = &self.settings.root_section_name;
        let frontmatter = SectionFrontmatter {
            title: doc.section_title(root_name),
            template: SECTION_TEMPLATE,
            sort_by: self.settings.sort_by,
            weight: index,
            extra: SectionExtra {
                sidebar: doc.section_sidebar(&self.settings.subsection_symbol, root_name),
            },
        };
        fenced(&frontmatter, &doc.old_rel_path)
    }
}

fn broken_reason(err: Error) -> String {
    match err {
        Error::BrokenLink { reason, .. } => reason,
        other => other.to_string(),
    }
}

/// Serialize as YAML between `---` fences
fn fenced<T: Serialize>(frontmatter: &T, source: &Path) -> Result<String> {
    let yaml = serde_yaml::to_string(frontmatter).map_err(|e| {
        Error::parse_error(format!(
            "Failed to write frontmatter for {}: {}",
            source.display(),
            e
        ))
    })?;
    Ok(format!("{}\n{}{}\n", FENCE, yaml, FENCE))
}
