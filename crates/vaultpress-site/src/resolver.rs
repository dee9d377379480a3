//! Relative link targets to site URLs.

use crate::doc_path::{DocPath, rel_segments, site_url};
use std::path::{Path, PathBuf};
use vaultpress_core::prelude::*;
use vaultpress_parser::{Link, normalize_path};

/// Resolve a relative `target` written in a document whose source directory
/// is `base` (relative to the vault root).
///
/// The target is percent-decoded, joined onto `base` with `.` and `..`
/// handled lexically, normalized, and re-encoded under `/docs/`. Joining
/// happens before normalization, so `..` steps over directories whose names
/// slugify to nothing. Markdown
/// targets are passed without their `.md`, which is restored for
/// normalization so they land on the same URL as the page itself.
pub fn resolve_link(target: &str, base: &Path, is_markdown: bool, slugify: bool) -> Result<String> {
    if target.is_empty() {
        return Err(Error::broken_link(target, "empty link target"));
    }
    if target.starts_with('/') {
        return Err(Error::broken_link(target, "absolute link target"));
    }

    let decoded = urlencoding::decode(target)
        .map_err(|e| Error::broken_link(target, format!("invalid percent-encoding: {}", e)))?;

    let mut segments = rel_segments(base);
    for part in decoded.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(Error::broken_link(target, "escapes the vault root"));
                }
            }
            other => segments.push(other.to_string()),
        }
    }

    let resolved: PathBuf = segments.iter().collect();
    let normalized = if is_markdown && !segments.is_empty() {
        let mut with_ext = resolved.into_os_string();
        with_ext.push(".");
        with_ext.push(MARKDOWN_EXTENSION);
        normalize_path(Path::new(&with_ext), slugify, false).with_extension("")
    } else {
        normalize_path(&resolved, slugify, false)
    };

    Ok(site_url(&rel_segments(&normalized)))
}

/// Resolves links found in one document
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver {
    slugify: bool,
}

impl LinkResolver {
    pub fn new(slugify: bool) -> Self {
        Self { slugify }
    }

    /// Site URL for `link` as written in `doc`
    pub fn resolve(&self, link: &Link, doc: &DocPath) -> Result<String> {
        resolve_link(&link.target, doc.old_parent(), link.is_markdown, self.slugify)
    }
}
