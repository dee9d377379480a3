//! `___KEY___` substitution in the site skeleton.

use std::fs;
use std::path::PathBuf;
use vaultpress_core::prelude::*;

/// Files of the site skeleton that carry placeholders, relative to the site root
pub const PLACEHOLDER_FILES: [&str; 2] = ["config.toml", "content/_index.md"];

/// Replace every `___KEY___` in `text` with its value.
pub fn substitute(text: &str, placeholders: &[(&'static str, String)]) -> String {
    placeholders
        .iter()
        .fold(text.to_string(), |acc, (key, value)| {
            acc.replace(&format!("___{}___", key), value)
        })
}

/// Fill in the placeholders of the site skeleton in place.
///
/// Local builds are left alone. Missing files are skipped with a warning.
/// Returns the files that were rewritten.
pub fn substitute_placeholders(config: &BuildConfig, settings: &Settings) -> Result<Vec<PathBuf>> {
    if config.local {
        log::info!("Local build, leaving site placeholders untouched");
        return Ok(Vec::new());
    }

    let placeholders = settings.placeholders();
    let mut rewritten = Vec::new();
    for rel in PLACEHOLDER_FILES {
        let path = config.site_dir.join(rel);
        if !path.is_file() {
            log::warn!("No {} in site, skipping substitution", rel);
            continue;
        }
        let content = fs::read_to_string(&path).map_err(|e| Error::io_at(&path, e))?;
        fs::write(&path, substitute(&content, &placeholders)).map_err(|e| Error::io_at(&path, e))?;
        log::debug!("Substituted placeholders in {}", path.display());
        rewritten.push(path);
    }
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(local: bool) -> (TempDir, TempDir, BuildConfig) {
        let vault = TempDir::new().unwrap();
        let site = TempDir::new().unwrap();
        fs::write(
            site.path().join("config.toml"),
            "base_url = \"___SITE_URL___\"\ntitle = \"___SITE_TITLE___\"\ntab = \"___SITE_TITLE_TAB___\"\n",
        )
        .unwrap();
        let config = BuildConfig::builder(vault.path(), site.path())
            .local(local)
            .build()
            .unwrap();
        (vault, site, config)
    }

    #[test]
    fn test_substitute() {
        let placeholders = vec![("A", "1".to_string()), ("A_B", "2".to_string())];
        assert_eq!(substitute("___A___ ___A_B___ ___C___", &placeholders), "1 2 ___C___");
    }

    #[test]
    fn test_substitutes_existing_files() {
        let (_vault, site, config) = setup(false);
        let mut settings = Settings::new("https://notes.dev", "https://git.dev/notes");
        settings.site_title = "Brain".to_string();
        settings.site_title_tab = "Tab".to_string();

        let rewritten = substitute_placeholders(&config, &settings).unwrap();
        assert_eq!(rewritten, vec![site.path().join("config.toml")]);

        let content = fs::read_to_string(site.path().join("config.toml")).unwrap();
        assert_eq!(
            content,
            "base_url = \"https://notes.dev\"\ntitle = \"Brain\"\ntab = \"Tab\"\n"
        );
    }

    #[test]
    fn test_local_build_skips() {
        let (_vault, site, config) = setup(true);
        let settings = Settings::new("https://notes.dev", "https://git.dev/notes");

        assert!(substitute_placeholders(&config, &settings).unwrap().is_empty());
        let content = fs::read_to_string(site.path().join("config.toml")).unwrap();
        assert!(content.contains("___SITE_URL___"));
    }
}
