//! Core data models shared across the pipeline.
//!
//! These types are designed to be:
//! - **Serializable**: report-facing types derive Serialize/Deserialize
//! - **Ordered**: edges compare lexicographically so sets iterate deterministically
//! - **Type-Safe**: enums replace magic strings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// URL namespace every generated page lives under.
pub const DOCS_PREFIX: &str = "/docs";

/// Terminal page that unresolvable links point at.
pub const NOT_FOUND_URL: &str = "/404";

/// Extension marking a page in the vault.
pub const MARKDOWN_EXTENSION: &str = "md";

/// How an entry of the vault is published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    /// Directory: becomes a section with an `_index.md`
    Section,
    /// Markdown file: transformed and registered as a graph node
    Page,
    /// Anything else: copied byte-for-byte
    Resource,
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Section => "section",
            Self::Page => "page",
            Self::Resource => "resource",
        })
    }
}

/// Undirected link between two site URLs.
///
/// The endpoints are stored in lexicographic order so `a -> b` and `b -> a`
/// are the same edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    low: String,
    high: String,
}

impl Edge {
    /// Create an edge, ordering the endpoints.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Lexicographically smaller endpoint
    pub fn low(&self) -> &str {
        &self.low
    }

    /// Lexicographically larger endpoint
    pub fn high(&self) -> &str {
        &self.high
    }

    /// Edge from a page to itself
    pub fn is_loop(&self) -> bool {
        self.low == self.high
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.low, self.high)
    }
}

/// A link that was replaced with the not-found placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLinkRecord {
    /// Vault-relative path of the document holding the link
    pub source_file: PathBuf,
    /// Target as written in the document
    pub target: String,
    /// 1-based line number in the document body
    pub line: usize,
    /// Why resolution failed
    pub reason: String,
}
