//! # vaultpress Core
//!
//! Core data models, error types, and configuration for publishing an Obsidian
//! vault export as a Zola content tree. This crate defines the canonical types
//! that all other crates depend on.
//!
//! ## Architecture Principles
//!
//! - **Zero Panic in Libraries**: All errors are `Result<T, Error>`
//! - **Type-Driven Design**: Strong types replace string-based options
//! - **Builder Pattern for Complex Types**: [`BuildConfig`] is assembled by a builder
//! - **Immutable by Default**: [`Settings`] are read once and never mutated
//!
//! ## Core Modules
//!
//! - [`models`] - Edges, document kinds and broken-link records
//! - [`error`] - Error types and Result alias
//! - [`config`] - Site settings and build paths
//! - [`utils`] - Serialization, CSV and HTML helpers
//!
//! ## Usage Examples
//!
//! ### Edges are unordered
//!
//! ```
//! use vaultpress_core::prelude::*;
//!
//! let edge = Edge::new("/docs/notes/a", "/docs/c");
//! assert_eq!(edge.low(), "/docs/c");
//! assert_eq!(edge, Edge::new("/docs/c", "/docs/notes/a"));
//! ```
//!
//! ### Error Handling
//!
//! ```
//! use vaultpress_core::prelude::*;
//!
//! fn resolve() -> Result<String> {
//!     Err(Error::broken_link("", "empty target"))
//! }
//!
//! let err = resolve().unwrap_err();
//! assert!(err.is_recoverable());
//! ```
//!
//! ### Settings
//!
//! ```
//! use vaultpress_core::prelude::*;
//!
//! let settings = Settings::new("https://notes.example.com", "https://git.example.com/notes");
//! assert!(settings.slugify);
//! assert_eq!(settings.sort_by, SortBy::Title);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use config::*;
pub use error::{Error, Result};
pub use models::*;
pub use utils::{CsvBuilder, html_escape, to_json_compact, to_json_string};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{BuildConfig, BuildConfigBuilder, Settings, SortBy};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        BrokenLinkRecord, DOCS_PREFIX, DocKind, Edge, MARKDOWN_EXTENSION, NOT_FOUND_URL,
    };
}
