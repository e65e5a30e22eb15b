// src/checker/html.rs
// =============================================================================
// This module extracts anchors from raw HTML embedded in Markdown pages.
//
// Documentation pages often drop down to HTML for buttons, cards and tables:
//   <a href="https://explorer.xprnetwork.org" target="_blank">Explorer</a>
//
// We use the `scraper` crate which:
// - Parses HTML (here: the whole Markdown file as a fragment) into a DOM
// - Supports CSS selectors for finding elements
// - Tolerates the surrounding Markdown, which it simply sees as text
//
// Only the raw href and the anchor text are returned; deciding which hrefs
// are worth checking is left to the caller.
// =============================================================================

use scraper::{Html, Selector};

// Extracts (href, anchor text) pairs from all <a href> elements
//
// Example:
//   content = "Open the <a href='https://explorer.test'>Explorer</a>."
//   result  = [("https://explorer.test", "Explorer")]
pub fn extract_html_anchors(content: &str) -> Vec<(String, String)> {
    // Cheap pre-check: most Markdown files contain no anchors at all
    if !content.contains("<a") && !content.contains("<A") {
        return Vec::new();
    }

    let fragment = Html::parse_fragment(content);

    // The selector is a constant and known to be valid
    let selector = Selector::parse("a[href]").expect("valid anchor selector");

    fragment
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?.trim();
            let text = element.text().collect::<String>();
            Some((href.to_string(), text.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_anchor_with_text() {
        let content = r#"Open the <a href="https://explorer.test" target="_blank">Block Explorer</a>."#;
        let anchors = extract_html_anchors(content);
        assert_eq!(
            anchors,
            vec![("https://explorer.test".to_string(), "Block Explorer".to_string())]
        );
    }

    #[test]
    fn test_relative_hrefs_are_returned_raw() {
        let content = r#"<a href="/guide/">Guide</a> <a href="mailto:team@docs.test">Mail</a>"#;
        let anchors = extract_html_anchors(content);
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].0, "/guide/");
        assert_eq!(anchors[1].0, "mailto:team@docs.test");
    }

    #[test]
    fn test_markdown_without_html() {
        let content = "# Title\n\n[Docs](https://docs.test) and a < b comparison";
        assert!(extract_html_anchors(content).is_empty());
    }

    #[test]
    fn test_anchor_without_href_is_ignored() {
        let content = r#"<a name="top"></a><a href="https://x.test">X</a>"#;
        let anchors = extract_html_anchors(content);
        assert_eq!(anchors, vec![("https://x.test".to_string(), "X".to_string())]);
    }
}
