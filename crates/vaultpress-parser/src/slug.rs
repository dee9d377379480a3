//! Slugs, output paths and page titles.

use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const SEPARATOR: char = '-';

/// Lowercase a segment and collapse every run of non-alphanumerics into one `-`.
///
/// Accents are folded (`Café` becomes `cafe`); other letters are kept as-is.
/// Leading and trailing separators are trimmed.
///
/// ```
/// use vaultpress_parser::slugify;
///
/// assert_eq!(slugify("My  Note (draft)"), "my-note-draft");
/// assert_eq!(slugify("Café Olé"), "cafe-ole");
/// ```
pub fn slugify(text: &str) -> String {
    let folded = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c));

    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;
    for c in folded {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Map a vault-relative path to its output path.
///
/// With `slugify` off the path is returned unchanged. Otherwise every
/// directory segment is slugified; for files (`no_suffix == false`) the stem is
/// split on `.`, each part slugified, and the lowercased extension re-attached.
/// Segments that slugify to nothing are dropped.
///
/// `no_suffix` is set for directories and URLs, where the last segment is
/// treated like any other.
pub fn normalize_path(path: &Path, slugify_enabled: bool, no_suffix: bool) -> PathBuf {
    if !slugify_enabled {
        return path.to_path_buf();
    }

    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if no_suffix {
        return parts
            .iter()
            .map(|part| slugify(part))
            .filter(|part| !part.is_empty())
            .collect();
    }

    let Some((file_name, parents)) = parts.split_last() else {
        return PathBuf::new();
    };

    let mut normalized: PathBuf = parents
        .iter()
        .map(|part| slugify(part))
        .filter(|part| !part.is_empty())
        .collect();
    normalized.push(normalize_file_name(file_name));
    normalized
}

fn normalize_file_name(file_name: &str) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|s| s.to_string_lossy().to_lowercase());

    let name = stem
        .split('.')
        .map(slugify)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".");

    let name = if name.is_empty() {
        stem.to_lowercase()
    } else {
        name
    };

    match extension {
        Some(ext) => format!("{}.{}", name, ext),
        None => name,
    }
}

/// Title derived from a file stem.
///
/// Words are split on spaces; a word that starts with an uppercase letter is
/// kept verbatim, any other word is title-cased.
///
/// ```
/// use vaultpress_parser::title_case;
///
/// assert_eq!(title_case("my NASA notes"), "My NASA Notes");
/// assert_eq!(title_case("well-known facts"), "Well-Known Facts");
/// ```
pub fn title_case(stem: &str) -> String {
    stem.split(' ')
        .map(|word| match word.chars().next() {
            Some(first) if first.is_uppercase() => word.to_string(),
            Some(_) => title_word(word),
            None => String::new(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut in_run = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if in_run {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
