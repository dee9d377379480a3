//! # Site Builder
//!
//! Turns an exported vault into a Zola content tree.
//!
//! This crate provides:
//! - Classification of vault entries into sections, pages and resources
//! - Output path computation (slugs, `-nested` collision renames)
//! - Relative link resolution to `/docs/...` URLs
//! - Page and section frontmatter generation
//! - The single-pass build that writes everything and collects the graph
//!
//! ## Quick Start
//!
//! ```no_run
//! use vaultpress_site::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = BuildConfig::builder("/path/to/vault", "/path/to/site").build()?;
//!     let settings = Settings::load(None)?;
//!
//!     let outcome = SiteBuilder::new(config, settings).build()?;
//!     println!("{} pages, {} broken links", outcome.pages, outcome.broken_links.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Core Modules
//!
//! - [`doc_path`]: where each vault entry is written and under which URL
//! - [`resolver`]: relative targets to site URLs; failures become `/404`
//! - [`transform`]: page rewriting and frontmatter
//! - [`builder`]: the vault walk

pub mod builder;
pub mod doc_path;
pub mod resolver;
pub mod transform;

pub use builder::{BuildOutcome, SiteBuilder};
pub use doc_path::DocPath;
pub use resolver::{LinkResolver, resolve_link};
pub use transform::{
    DocumentTransformer, PAGE_TEMPLATE, PageFrontmatter, SECTION_TEMPLATE, SectionExtra,
    SectionFrontmatter, TransformedPage,
};

pub mod prelude {
    pub use crate::builder::{BuildOutcome, SiteBuilder};
    pub use crate::doc_path::DocPath;
    pub use crate::resolver::{LinkResolver, resolve_link};
    pub use crate::transform::{DocumentTransformer, TransformedPage};
    pub use vaultpress_core::prelude::*;
}
