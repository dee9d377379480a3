//! # vaultpress Parser
//!
//! Line-oriented scanning of exported vault pages. Nothing here touches the
//! filesystem; every function works on strings and relative paths.
//!
//! - [`links`]: bracket-depth scanner for `[title](target)` links
//! - [`slug`]: segment slugs, output path normalization, page titles
//! - [`frontmatter`]: Obsidian frontmatter stripping and metadata HTML
//! - [`lines`]: line splitting and the LaTeX line-break fix
//!
//! ## Quick Start
//!
//! ```
//! use vaultpress_parser::prelude::*;
//! use std::path::Path;
//!
//! let line = "See [the intro](../Getting%20Started.md#setup).";
//! let link = &extract_markdown_links(line)[0];
//! assert_eq!(link.target, "../Getting%20Started");
//!
//! let out = normalize_path(Path::new("Getting Started.md"), true, false);
//! assert_eq!(out, Path::new("getting-started.md"));
//! ```

pub mod frontmatter;
pub mod lines;
pub mod links;
pub mod slug;

pub use frontmatter::{MetadataKey, SplitPage, render_metadata, split_frontmatter};
pub use lines::{fix_latex_line_break, split_lines};
pub use links::{Link, extract_links, extract_markdown_links, is_internal_target, replace_links};
pub use slug::{normalize_path, slugify, title_case};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::frontmatter::{MetadataKey, render_metadata, split_frontmatter};
    pub use crate::lines::{fix_latex_line_break, split_lines};
    pub use crate::links::{Link, extract_links, extract_markdown_links, replace_links};
    pub use crate::slug::{normalize_path, slugify, title_case};
}
