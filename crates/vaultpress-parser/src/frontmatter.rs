//! Obsidian frontmatter stripping and metadata rendering.
//!
//! Pages exported from a vault may start with their own `---` block. It is
//! removed before the page is rewritten; the keys in [`MetadataKey`] are turned
//! into HTML snippets placed after the generated frontmatter.

use serde_yaml::{Mapping, Value};
use std::fmt;
use vaultpress_core::html_escape;

const FENCE: &str = "---";

/// A page split into its leading metadata and its body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitPage<'a> {
    /// Parsed metadata; empty when absent or unparseable
    pub metadata: Mapping,
    /// Lines after the closing fence, or all lines if there was no block
    pub body: &'a [String],
    /// Number of lines removed
    pub stripped: usize,
}

/// Remove a leading `---` ... `---` block.
///
/// The block is only recognised when the first line starts with `---` and a
/// later line also does; otherwise the page is returned untouched.
pub fn split_frontmatter(lines: &[String]) -> SplitPage<'_> {
    let untouched = SplitPage {
        metadata: Mapping::new(),
        body: lines,
        stripped: 0,
    };

    match lines.first() {
        Some(first) if first.starts_with(FENCE) => {}
        _ => return untouched,
    }

    let Some(close) = lines
        .iter()
        .skip(1)
        .position(|line| line.starts_with(FENCE))
        .map(|offset| offset + 1)
    else {
        return untouched;
    };

    let yaml = lines[1..close].join("\n");
    let metadata = if yaml.trim().is_empty() {
        Mapping::new()
    } else {
        match serde_yaml::from_str::<Value>(&yaml) {
            Ok(Value::Mapping(map)) => map,
            Ok(_) => Mapping::new(),
            Err(e) => {
                log::warn!("Ignoring unparseable frontmatter: {}", e);
                Mapping::new()
            }
        }
    };

    SplitPage {
        metadata,
        body: &lines[close + 1..],
        stripped: close + 1,
    }
}

/// Metadata keys that produce HTML in the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataKey {
    /// `modified: <date>` becomes an `article:modified_time` meta tag
    Modified,
    /// `button: <text>` becomes a styled button
    Button,
}

impl MetadataKey {
    pub const ALL: [MetadataKey; 2] = [MetadataKey::Modified, MetadataKey::Button];

    /// Look up a key by its frontmatter name.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modified => "modified",
            Self::Button => "button",
        }
    }

    /// HTML for this key with the given value.
    pub fn render(&self, value: &str) -> String {
        let value = html_escape(value);
        match self {
            Self::Modified => format!(
                r#"<meta property="article:modified_time" content="{}"/>"#,
                value
            ),
            Self::Button => format!(r#"<button class="button">{}</button>"#, value),
        }
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render every recognised key in `metadata`, in document order.
pub fn render_metadata(metadata: &Mapping) -> Vec<String> {
    metadata
        .iter()
        .filter_map(|(key, value)| {
            let key = MetadataKey::from_key(key.as_str()?)?;
            Some(key.render(&scalar_text(value)))
        })
        .collect()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
