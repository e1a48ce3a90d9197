// src/fetch/html.rs
// =============================================================================
// This module extracts link targets from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Unlike a link checker, the crawler wants the href values exactly as the
// page wrote them: no resolving against the page URL, no filtering of
// mailto: or javascript: links, no de-duplication. Deciding what to keep is
// the crawl worker's job.
// =============================================================================

use scraper::{Html, Selector};

// Turns raw HTML into the list of <a href="..."> values it contains
//
// Implementations must be safe to share between all workers.
pub trait AnchorExtractor: Send + Sync {
    fn extract_anchors(&self, html: &str) -> Vec<String>;
}

// AnchorExtractor backed by scraper's HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlAnchorExtractor;

impl AnchorExtractor for HtmlAnchorExtractor {
    // Returns every href, in document order, duplicates included
    //
    // Example:
    //   html   = "<a href='/docs'>Docs</a><a>no href</a><a href='/docs'>Again</a>"
    //   result = ["/docs", "/docs"]
    fn extract_anchors(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        // The selector is a constant and known to be valid
        let selector = Selector::parse("a[href]").expect("'a[href]' is a valid CSS selector");

        document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<String> {
        HtmlAnchorExtractor.extract_anchors(html)
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        assert_eq!(extract(html), vec!["https://www.rust-lang.org"]);
    }

    #[test]
    fn test_relative_links_are_not_resolved() {
        let html = r#"<a href="/docs">Docs</a><a href="../about">About</a>"#;
        assert_eq!(extract(html), vec!["/docs", "../about"]);
    }

    #[test]
    fn test_keeps_document_order_and_duplicates() {
        let html = r#"
            <p><a href="//example.com/a">A</a></p>
            <a href="http://other.com/b">B</a>
            <a href="//example.com/a">A again</a>
        "#;
        assert_eq!(
            extract(html),
            vec!["//example.com/a", "http://other.com/b", "//example.com/a"]
        );
    }

    #[test]
    fn test_skips_anchors_without_href() {
        let html = r#"<a name="top">Top</a><a href="">Empty</a>"#;
        assert_eq!(extract(html), vec![""]);
    }

    #[test]
    fn test_ignores_non_anchor_tags() {
        let html = r#"<link href="/style.css"><img src="/x.png"><area href="/map">"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_no_validation_of_values() {
        let html = r#"<a href="mailto:me@example.com">Mail</a><a href="javascript:void(0)">JS</a>"#;
        assert_eq!(extract(html), vec!["mailto:me@example.com", "javascript:void(0)"]);
    }

    #[test]
    fn test_malformed_markup_still_yields_links() {
        let html = r#"<div><a href="/unclosed">text<p>more</div>"#;
        assert_eq!(extract(html), vec!["/unclosed"]);
    }
}
