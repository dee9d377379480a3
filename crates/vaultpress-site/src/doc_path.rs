//! Paths of vault entries and where they land in the site.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Component, Path, PathBuf};
use vaultpress_core::prelude::*;
use vaultpress_parser::{normalize_path, title_case};

const COLLISION_SUFFIX: &str = "-nested";

/// One entry of the vault (directory, page or resource) and its output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPath {
    /// Path on disk
    pub old_path: PathBuf,
    /// Path relative to the vault root
    pub old_rel_path: PathBuf,
    /// Path relative to the docs root of the site
    pub new_rel_path: PathBuf,
    pub kind: DocKind,
    /// Page renamed because a sibling directory has the same name
    pub renamed: bool,
}

impl DocPath {
    /// Classify `path` (which must live under `vault_root`) and compute its
    /// output path.
    pub fn new(vault_root: &Path, path: &Path, slugify: bool) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| Error::io_at(path, e))?;
        let old_rel_path = path
            .strip_prefix(vault_root)
            .map_err(|_| {
                Error::invalid_path(format!(
                    "{} is outside the vault {}",
                    path.display(),
                    vault_root.display()
                ))
            })?
            .to_path_buf();

        let kind = if metadata.is_dir() {
            DocKind::Section
        } else if path.extension().is_some_and(|ext| ext == MARKDOWN_EXTENSION) {
            DocKind::Page
        } else {
            DocKind::Resource
        };

        let mut rel_path = old_rel_path.clone();
        let mut renamed = false;
        if kind == DocKind::Page
            && let (Some(parent), Some(stem)) = (path.parent(), path.file_stem())
            && parent.join(stem).is_dir()
        {
            let mut name = stem.to_os_string();
            name.push(COLLISION_SUFFIX);
            name.push(".");
            name.push(MARKDOWN_EXTENSION);
            rel_path.set_file_name(name);
            renamed = true;
            log::info!(
                "Name collision with sibling folder, renaming: {}",
                old_rel_path.display()
            );
        }

        let new_rel_path = normalize_path(&rel_path, slugify, kind == DocKind::Section);

        Ok(Self {
            old_path: path.to_path_buf(),
            old_rel_path,
            new_rel_path,
            kind,
            renamed,
        })
    }

    /// Absolute output path under `docs_dir`
    pub fn new_path(&self, docs_dir: &Path) -> PathBuf {
        docs_dir.join(&self.new_rel_path)
    }

    /// Whether this is the vault root
    pub fn is_root(&self) -> bool {
        self.old_rel_path.as_os_str().is_empty()
    }

    /// Directory of the source path, relative to the vault root.
    ///
    /// Relative links inside this entry are resolved from here.
    pub fn old_parent(&self) -> &Path {
        self.old_rel_path.parent().unwrap_or(Path::new(""))
    }

    /// Title-cased file stem
    pub fn page_title(&self) -> String {
        let stem = self
            .old_path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        title_case(&stem)
    }

    /// Vault-relative path of a section, or `root_name` for the vault root
    pub fn section_title(&self, root_name: &str) -> String {
        if self.is_root() {
            return root_name.to_string();
        }
        rel_segments(&self.old_rel_path).join("/")
    }

    /// Sidebar label: `symbol` once per nesting level, then the last segment
    pub fn section_sidebar(&self, symbol: &str, root_name: &str) -> String {
        let segments = rel_segments(&self.old_rel_path);
        match segments.split_last() {
            Some((last, parents)) => format!("{}{}", symbol.repeat(parents.len()), last),
            None => root_name.to_string(),
        }
    }

    /// Site URL of a page: `/docs/` + output path without `.md`, percent-encoded
    pub fn page_url(&self) -> String {
        let without_ext = if self.kind == DocKind::Page {
            self.new_rel_path.with_extension("")
        } else {
            self.new_rel_path.clone()
        };
        site_url(&rel_segments(&without_ext))
    }

    /// Last modification time of the source
    pub fn modified(&self) -> Result<DateTime<Utc>> {
        let modified = fs::metadata(&self.old_path)
            .and_then(|m| m.modified())
            .map_err(|e| Error::io_at(&self.old_path, e))?;
        Ok(DateTime::<Utc>::from(modified))
    }
}

/// Normal components of a relative path as strings
pub(crate) fn rel_segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Percent-encode each segment and join under the docs prefix
pub(crate) fn site_url<S: AsRef<str>>(segments: &[S]) -> String {
    let encoded: Vec<_> = segments
        .iter()
        .map(|s| urlencoding::encode(s.as_ref()).into_owned())
        .collect();
    format!("{}/{}", DOCS_PREFIX, encoded.join("/"))
}
