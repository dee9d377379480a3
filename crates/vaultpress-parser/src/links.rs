//! Link scanner for `[title](target)` constructs.
//!
//! Single pass over the line with a stack of open `[` frames. When a `]` is
//! directly followed by `(`, the target is read up to the matching `)`. A
//! completed link marks every enclosing frame as tainted, so an outer match
//! whose span contains an inner link is rejected while the inner one is kept.
//!
//! ```
//! use vaultpress_parser::extract_links;
//!
//! let links = extract_links("[See](../c.md#sec) and [site](https://x.dev)");
//! assert_eq!(links.len(), 1);
//! assert_eq!(links[0].target, "../c");
//! assert_eq!(links[0].heading.as_deref(), Some("#sec"));
//! assert!(links[0].is_markdown);
//! ```

use std::ops::Range;

const MARKDOWN_MARKER: &str = ".md";

/// An internal link found in one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Byte span of `[title](target)` in the line
    pub span: Range<usize>,
    /// Text between the brackets
    pub title: String,
    /// Target body with the heading and `.md` marker removed (still percent-encoded)
    pub target: String,
    /// `#heading` suffix, including the `#`
    pub heading: Option<String>,
    /// Target ended in `.md`
    pub is_markdown: bool,
    /// Target exactly as written
    pub raw_target: String,
}

impl Link {
    /// The matched construct within `line`.
    pub fn full_match<'a>(&self, line: &'a str) -> &'a str {
        &line[self.span.clone()]
    }
}

/// Whether a target points inside the vault.
///
/// `http...` and `mailto:` targets are external; `#heading` alone refers to
/// the current document.
pub fn is_internal_target(target: &str) -> bool {
    !(target.starts_with("http") || target.starts_with("mailto:") || target.starts_with('#'))
}

struct Frame {
    start: usize,
    tainted: bool,
}

/// All internal links in `line`, in order of appearance.
///
/// Linear in the line length: target ends are matched up front, and a
/// completed link taints only the innermost open frame, which hands the
/// taint outward when it is popped.
pub fn extract_links(line: &str) -> Vec<Link> {
    let bytes = line.as_bytes();
    let closers = match_target_parens(bytes);
    let mut frames: Vec<Frame> = Vec::new();
    let mut links = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'[' => frames.push(Frame {
                start: i,
                tainted: false,
            }),
            b']' => {
                let Some(frame) = frames.pop() else {
                    i += 1;
                    continue;
                };
                if let Some(outer) = frames.last_mut() {
                    outer.tainted |= frame.tainted;
                }
                if bytes.get(i + 1) != Some(&b'(') {
                    i += 1;
                    continue;
                }
                if let Some(target_end) = closers[i + 1] {
                    let raw = &line[i + 2..target_end];
                    if !frame.tainted && is_internal_target(raw) {
                        links.push(build_link(
                            frame.start..target_end + 1,
                            &line[frame.start + 1..i],
                            raw,
                        ));
                    }
                    if let Some(outer) = frames.last_mut() {
                        outer.tainted = true;
                    }
                    i = target_end + 1;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }

    links
}

/// Internal links whose target names a Markdown file.
pub fn extract_markdown_links(line: &str) -> Vec<Link> {
    extract_links(line)
        .into_iter()
        .filter(|link| link.is_markdown)
        .collect()
}

/// Rebuild `line` with each link's span replaced by `render(link)`.
///
/// `links` must come from scanning this same line.
pub fn replace_links<F>(line: &str, links: &[Link], mut render: F) -> String
where
    F: FnMut(&Link) -> String,
{
    let mut out = String::with_capacity(line.len());
    let mut cursor = 0;
    for link in links {
        out.push_str(&line[cursor..link.span.start]);
        out.push_str(&render(link));
        cursor = link.span.end;
    }
    out.push_str(&line[cursor..]);
    out
}

/// For every `(`, the index of the `)` that closes it, counting nested
/// parentheses. Whitespace ends every open parenthesis, as does the end of
/// the line, leaving it unmatched.
fn match_target_parens(bytes: &[u8]) -> Vec<Option<usize>> {
    let mut closers = vec![None; bytes.len()];
    let mut open: Vec<usize> = Vec::new();
    for (pos, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => open.push(pos),
            b')' => {
                if let Some(opener) = open.pop() {
                    closers[opener] = Some(pos);
                }
            }
            b if b.is_ascii_whitespace() => open.clear(),
            _ => {}
        }
    }
    closers
}

fn build_link(span: Range<usize>, title: &str, raw: &str) -> Link {
    let (body, heading) = match raw.find('#') {
        Some(pos) => (&raw[..pos], Some(raw[pos..].to_string())),
        None => (raw, None),
    };
    let (target, is_markdown) = match body.strip_suffix(MARKDOWN_MARKER) {
        Some(stem) => (stem, true),
        None => (body, false),
    };

    Link {
        span,
        title: title.to_string(),
        target: target.to_string(),
        heading,
        is_markdown,
        raw_target: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_link_with_heading() {
        let line = "Read [See](../c.md#sec) now";
        let links = extract_links(line);
        assert_eq!(links.len(), 1);

        let link = &links[0];
        assert_eq!(link.full_match(line), "[See](../c.md#sec)");
        assert_eq!(link.title, "See");
        assert_eq!(link.target, "../c");
        assert_eq!(link.heading.as_deref(), Some("#sec"));
        assert!(link.is_markdown);
        assert_eq!(link.raw_target, "../c.md#sec");
    }

    #[test]
    fn test_resource_link_is_internal_but_not_markdown() {
        let links = extract_links("![diagram](img/flow%20chart.png)");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "img/flow%20chart.png");
        assert!(!links[0].is_markdown);
        assert!(extract_markdown_links("![diagram](img/flow%20chart.png)").is_empty());
    }

    #[test]
    fn test_external_and_anchor_links_skipped() {
        let line = "[a](https://x.dev) [b](http://y.dev) [c](mailto:me@x.dev) [d](#local)";
        assert!(extract_links(line).is_empty());
    }

    #[test]
    fn test_nested_link_rejects_outer() {
        let line = "[outer [inner](b.md) text](a.md)";
        let links = extract_links(line);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "inner");
        assert_eq!(links[0].target, "b");
    }

    #[test]
    fn test_nested_external_link_rejects_outer() {
        let links = extract_links("[[x](https://x.dev)](a.md)");
        assert!(links.is_empty());
    }

    #[test]
    fn test_plain_brackets_in_title() {
        let links = extract_links("[see [1]](notes.md)");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "see [1]");
    }

    #[test]
    fn test_stray_bracket_does_not_leak_into_title() {
        let links = extract_links("[a] and [b](c.md)");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "b");
    }

    #[test]
    fn test_whitespace_in_target_is_not_a_link() {
        assert!(extract_links("[a](my note.md)").is_empty());
    }

    #[test]
    fn test_parentheses_inside_target() {
        let links = extract_links("[w](Rust%20(language).md)");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "Rust%20(language)");
        assert!(links[0].is_markdown);
    }

    #[test]
    fn test_empty_target_is_reported() {
        let links = extract_links("[t]()");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "");
        assert!(!links[0].is_markdown);
    }

    #[test]
    fn test_multiple_links_keep_order() {
        let links = extract_links("[a](a.md), [b](b.png) and [c](sub/c.md#x)");
        let targets: Vec<_> = links.iter().map(|l| l.target.as_str()).collect();
        assert_eq!(targets, vec!["a", "b.png", "sub/c"]);
        assert_eq!(extract_markdown_links("[a](a.md), [b](b.png) and [c](sub/c.md#x)").len(), 2);
    }

    #[test]
    fn test_replace_links_by_span() {
        let line = "[a](a.md) then [a](a.md)";
        let links = extract_links(line);
        let mut n = 0;
        let out = replace_links(line, &links, |link| {
            n += 1;
            format!("[{}](/docs/{}{})", link.title, link.target, n)
        });
        assert_eq!(out, "[a](/docs/a1) then [a](/docs/a2)");
    }

    #[test]
    fn test_failed_target_still_scanned_for_links() {
        let links = extract_links("[a](([b](x.md) y");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "b");
        assert_eq!(links[0].target, "x");
    }

    #[test]
    fn test_taint_reaches_every_enclosing_frame() {
        let links = extract_links("[x [y [z](c.md) w](b.md) v](a.md) [k](d.md)");
        let targets: Vec<_> = links.iter().map(|l| l.target.as_str()).collect();
        assert_eq!(targets, vec!["c", "d"]);
    }

    #[test]
    fn test_long_pathological_lines_scan_in_linear_time() {
        let n = 200_000;
        let start = std::time::Instant::now();

        assert!(extract_links(&"[](".repeat(n)).is_empty());

        let line = format!("{}{}", "[".repeat(n), "[a](b.md)".repeat(n));
        let links = extract_links(&line);
        assert_eq!(links.len(), n);
        assert!(links.iter().all(|l| l.target == "b"));

        let line = format!("{}x", "[a](".repeat(n));
        assert!(extract_links(&line).is_empty());

        assert!(
            start.elapsed() < std::time::Duration::from_secs(5),
            "scan took {:?}",
            start.elapsed()
        );
    }

    #[test]
    fn test_unicode_title() {
        let line = "→ [Café ☕](café.md)";
        let links = extract_links(line);
        assert_eq!(links[0].title, "Café ☕");
        assert_eq!(links[0].full_match(line), "[Café ☕](café.md)");
    }
}
