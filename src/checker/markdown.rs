// src/checker/markdown.rs
// =============================================================================
// This module extracts URLs from Markdown text.
//
// Three sources of URLs, in priority order:
// 1. Inline links `[label](url)`: the URL is taken verbatim, context = label
// 2. Inline HTML anchors `<a href="url">text</a>` (see html.rs)
// 3. Bare URLs anywhere in the text, including fenced code blocks,
//    context = "code/text"
//
// Within one file the first extraction of a URL wins: a URL already found as
// a link is not added again as a bare URL.
//
// Link destinations are matched with a regex rather than a CommonMark parser
// so that URLs are kept exactly as written and links inside code blocks are
// still found.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

use super::html::extract_html_anchors;
use super::outcome::CheckTarget;

/// Context recorded for URLs found in running text or code
pub const BARE_URL_CONTEXT: &str = "code/text";

// [label](destination)
static INLINE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").expect("valid inline link regex"));

// A URL token ends at whitespace, quotes, backticks, angle/square/round
// brackets, or an ampersand (HTML entities in code samples)
static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s'"`<>\]\[()&]+"#).expect("valid bare URL regex"));

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

// Extracts every http(s) URL from one Markdown file
//
// Parameters:
//   content: the file's text
//   source: the file path relative to the docs root (kept on each target)
//
// Returns: link targets in extraction order. Inline links may repeat; HTML
// anchors and bare URLs are only added if the file has not produced them yet.
pub fn extract_markdown_links(content: &str, source: &str) -> Vec<CheckTarget> {
    let mut targets: Vec<CheckTarget> = Vec::new();

    for captures in INLINE_LINK.captures_iter(content) {
        let label = captures.get(1).map_or("", |m| m.as_str());
        let url = captures.get(2).map_or("", |m| m.as_str()).trim();
        if is_http_link(url) {
            targets.push(CheckTarget::link(url, source, label));
        }
    }

    for (url, text) in extract_html_anchors(content) {
        if is_http_link(&url) && !already_found(&targets, &url) {
            targets.push(CheckTarget::link(url, source, text));
        }
    }

    for url in extract_bare_urls(content) {
        if !already_found(&targets, url) {
            targets.push(CheckTarget::link(url, source, BARE_URL_CONTEXT));
        }
    }

    targets
}

// Finds bare URL tokens and strips trailing sentence punctuation
fn extract_bare_urls(content: &str) -> impl Iterator<Item = &str> {
    BARE_URL
        .find_iter(content)
        .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION))
}

fn already_found(targets: &[CheckTarget], url: &str) -> bool {
    targets.iter().any(|t| t.value == url)
}

// Only http:// and https:// URLs are probed; relative paths, anchors,
// mailto: and friends are ignored
pub fn is_http_link(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(targets: &[CheckTarget]) -> Vec<&str> {
        targets.iter().map(|t| t.value.as_str()).collect()
    }

    #[test]
    fn test_extract_simple_link() {
        let markdown = "Check out [Rust](https://www.rust-lang.org)!";
        let links = extract_markdown_links(markdown, "index.md");
        assert_eq!(urls(&links), vec!["https://www.rust-lang.org"]);
        assert_eq!(links[0].context.as_deref(), Some("Rust"));
        assert_eq!(links[0].source.as_deref(), Some("index.md"));
    }

    #[test]
    fn test_link_style_wins_over_bare_capture() {
        let markdown = "[Docs](https://good.example/api)\n\nCheck out https://good.example/api for more.";
        let links = extract_markdown_links(markdown, "guide.md");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].value, "https://good.example/api");
        assert_eq!(links[0].context.as_deref(), Some("Docs"));
    }

    #[test]
    fn test_html_anchor_wins_over_bare_capture() {
        let markdown = r#"<a href="https://x.test/p">Explorer</a> or https://x.test/p."#;
        let links = extract_markdown_links(markdown, "p.md");
        assert_eq!(urls(&links), vec!["https://x.test/p"]);
        assert_eq!(links[0].context.as_deref(), Some("Explorer"));
    }

    #[test]
    fn test_link_style_wins_over_html_anchor() {
        let markdown = r#"<a href="https://x.test/p">Map</a> and [Explorer](https://x.test/p)"#;
        let links = extract_markdown_links(markdown, "p.md");
        assert_eq!(urls(&links), vec!["https://x.test/p"]);
        assert_eq!(links[0].context.as_deref(), Some("Explorer"));
    }

    #[test]
    fn test_bare_urls_in_code_blocks() {
        let markdown = r#"
```js
const rpc = new JsonRpc("https://rpc.docs.test", { fetch });
fetch('https://api.docs.test/v1/history');
```
"#;
        let links = extract_markdown_links(markdown, "sdk.md");
        assert_eq!(
            urls(&links),
            vec!["https://rpc.docs.test", "https://api.docs.test/v1/history"]
        );
        assert!(links.iter().all(|l| l.context.as_deref() == Some(BARE_URL_CONTEXT)));
    }

    #[test]
    fn test_trailing_punctuation_is_stripped() {
        let markdown = "See https://a.test/page. Or https://b.test/x?, and https://c.test/y!";
        let links = extract_markdown_links(markdown, "p.md");
        assert_eq!(
            urls(&links),
            vec!["https://a.test/page", "https://b.test/x", "https://c.test/y"]
        );
    }

    #[test]
    fn test_bare_url_stops_at_ampersand_and_brackets() {
        let markdown = "curl 'https://a.test/q?x=1&amp;y=2' and <https://b.test/path>";
        let links = extract_markdown_links(markdown, "p.md");
        assert_eq!(urls(&links), vec!["https://a.test/q?x=1", "https://b.test/path"]);
    }

    #[test]
    fn test_inline_link_duplicates_are_kept_bare_duplicates_are_not() {
        let markdown = "[a](https://a.test) [b](https://a.test) https://c.test https://c.test";
        let links = extract_markdown_links(markdown, "p.md");
        assert_eq!(urls(&links), vec!["https://a.test", "https://a.test", "https://c.test"]);
    }

    #[test]
    fn test_link_destination_kept_verbatim() {
        let markdown = "[Spec](  https://a.test/Path/../Index.HTML#Top  )";
        let links = extract_markdown_links(markdown, "p.md");
        assert_eq!(urls(&links), vec!["https://a.test/Path/../Index.HTML#Top"]);
    }

    #[test]
    fn test_skip_mailto_and_relative_links() {
        let markdown = "Email [me](mailto:test@docs.test), see [docs](./docs/README.md) or [top](#top)";
        let links = extract_markdown_links(markdown, "p.md");
        assert!(links.is_empty());
    }

    #[test]
    fn test_every_extracted_url_is_http() {
        let markdown = "[ftp](ftp://files.test) [x](https://x.test) http://y.test file:///etc";
        let links = extract_markdown_links(markdown, "p.md");
        assert!(links.iter().all(|l| is_http_link(&l.value)));
        assert_eq!(links.len(), 2);
    }
}
