//! JavaScript files read by the site theme.

use std::fs;
use std::path::PathBuf;
use vaultpress_core::prelude::*;
use vaultpress_graph::GraphPayload;

/// Graph data and graph flags
pub const GRAPH_SCRIPT: &str = "graph_info.js";
/// Sidebar flags
pub const SETTINGS_SCRIPT: &str = "settings.js";

fn js_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// `graph_info.js` content
pub fn graph_script(payload: &GraphPayload, settings: &Settings) -> Result<String> {
    Ok([
        format!("var graph_data={}", payload.to_json()?),
        format!("var graph_is_local={}", js_bool(settings.local_graph)),
        format!("var graph_link_replace={}", js_bool(settings.graph_link_replace)),
    ]
    .join("\n"))
}

/// `settings.js` content
pub fn settings_script(settings: &Settings) -> String {
    format!("var sidebar_collapsed={}", js_bool(settings.sidebar_collapsed))
}

/// Write both scripts into the site's static JS directory.
pub fn write_scripts(
    config: &BuildConfig,
    payload: &GraphPayload,
    settings: &Settings,
) -> Result<Vec<PathBuf>> {
    let dir = config.script_dir();
    fs::create_dir_all(&dir).map_err(|e| Error::io_at(&dir, e))?;

    let outputs = [
        (dir.join(GRAPH_SCRIPT), graph_script(payload, settings)?),
        (dir.join(SETTINGS_SCRIPT), settings_script(settings)),
    ];

    let mut written = Vec::with_capacity(outputs.len());
    for (path, content) in outputs {
        fs::write(&path, content).map_err(|e| Error::io_at(&path, e))?;
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
