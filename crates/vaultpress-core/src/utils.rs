//! Shared utilities for operations across vaultpress crates.
//!
//! Provides DRY helpers for:
//! - Serialization with consistent error handling
//! - CSV report building
//! - HTML escaping for rendered metadata

use crate::{Error, Result};

/// Generic JSON serialization with consistent error handling
/// Works with any type that implements Serialize (including slices)
pub fn to_json_string<T: serde::Serialize + ?Sized>(data: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(|e| {
        Error::other(format!("Failed to serialize {} as JSON: {}", context, e))
    })
}

/// Compact JSON, for payloads embedded in generated scripts
pub fn to_json_compact<T: serde::Serialize + ?Sized>(data: &T, context: &str) -> Result<String> {
    serde_json::to_string(data).map_err(|e| {
        Error::other(format!("Failed to serialize {} as JSON: {}", context, e))
    })
}

/// Generic CSV serialization builder
/// Use the CsvBuilder fluent API to construct and export CSV data
pub struct CsvBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvBuilder {
    /// Create a new CSV with headers
    pub fn new(headers: Vec<&str>) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row of data from owned strings
    pub fn add_row_owned(mut self, values: Vec<String>) -> Self {
        self.rows.push(values);
        self
    }

    /// Build the CSV string, quoting fields that need it
    pub fn build(self) -> String {
        let mut csv = self
            .headers
            .iter()
            .map(|h| csv_field(h))
            .collect::<Vec<_>>()
            .join(",")
            + "\n";
        for row in self.rows {
            csv.push_str(&row.iter().map(|v| csv_field(v)).collect::<Vec<_>>().join(","));
            csv.push('\n');
        }
        csv
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Escape text for use inside HTML content or a double-quoted attribute.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
