//! HTML → text lines and anchors.
//!
//! The newsletter body is flattened the way a reader sees it: every text
//! node inside `<main>` becomes one or more trimmed lines, and every anchor
//! is kept alongside its visible text for later link harvesting.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

static MAIN_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("main").expect("main selector"));

static ANCHOR_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector"));

/// Elements whose text is never shown to the reader.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// A hyperlink found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Visible anchor text with whitespace runs collapsed.
    pub text: String,
    /// Target URL, resolved against the page URL when relative.
    pub href: String,
}

/// Text lines and anchors extracted from one page.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Trimmed, non-empty lines in document order.
    pub lines: Vec<String>,
    /// Anchors in document order.
    pub links: Vec<PageLink>,
}

/// Parse a page into lines and anchors, scoped to `<main>` when present.
pub fn parse_page(html: &str, base_url: Option<&Url>) -> PageContent {
    let doc = Html::parse_document(html);
    let root = doc
        .select(&MAIN_SEL)
        .next()
        .unwrap_or_else(|| doc.root_element());

    let content = PageContent {
        lines: text_lines(root),
        links: anchors(root, base_url),
    };

    tracing::debug!(
        lines = content.lines.len(),
        links = content.links.len(),
        "page parsed"
    );

    content
}

/// Split already-extracted body text into trimmed, non-empty lines.
pub fn lines_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

fn text_lines(root: ElementRef<'_>) -> Vec<String> {
    let mut lines = Vec::new();

    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.parent().is_some_and(|p| {
            p.value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        lines.extend(lines_from_text(text));
    }

    lines
}

fn anchors(root: ElementRef<'_>, base_url: Option<&Url>) -> Vec<PageLink> {
    root.select(&ANCHOR_SEL)
        .filter_map(|el| {
            let href = el.value().attr("href")?.trim();
            if href.is_empty() {
                return None;
            }
            let text = el
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            Some(PageLink {
                text,
                href: resolve_href(href, base_url),
            })
        })
        .collect()
}

fn resolve_href(href: &str, base_url: Option<&Url>) -> String {
    match base_url.map(|base| base.join(href)) {
        Some(Ok(resolved)) => resolved.to_string(),
        _ => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_scoped_to_main() {
        let html = r#"<html><body>
            <nav>Site Menu</nav>
            <main>
              <h2>ENGAGE</h2>
              <p><strong>Fall Fest</strong></p>
              <p>Oct. 3, 5 p.m., The Lawn</p>
              <script>var tracking = 1;</script>
            </main>
            <footer>Copyright</footer>
        </body></html>"#;

        let page = parse_page(html, None);
        assert_eq!(
            page.lines,
            vec!["ENGAGE", "Fall Fest", "Oct. 3, 5 p.m., The Lawn"]
        );
    }

    #[test]
    fn whole_document_used_without_main() {
        let html = "<html><body><p>Alpha</p>\n<p>  Beta  </p></body></html>";
        let page = parse_page(html, None);
        assert_eq!(page.lines, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn anchors_resolve_relative_hrefs() {
        let html = r#"<main>
            <a href="/events/fall-fest">Fall Fest tickets</a>
            <a href="https://instagram.com/uvafest"> Fall <em>Fest</em> on Instagram </a>
            <a href="">empty</a>
        </main>"#;
        let base = Url::parse("https://studentaffairs.virginia.edu/connections").unwrap();
        let page = parse_page(html, Some(&base));

        assert_eq!(page.links.len(), 2);
        assert_eq!(
            page.links[0].href,
            "https://studentaffairs.virginia.edu/events/fall-fest"
        );
        assert_eq!(page.links[1].text, "Fall Fest on Instagram");
    }

    #[test]
    fn text_splits_on_newlines() {
        let lines = lines_from_text("  ENGAGE \n\n Fall Fest\r\n   \nOct. 3");
        assert_eq!(lines, vec!["ENGAGE", "Fall Fest", "Oct. 3"]);
    }

    #[test]
    fn fixture_page_has_lines_and_links() {
        let html = std::fs::read_to_string("../../../fixtures/html/connections.html")
            .expect("read fixture");
        let page = parse_page(&html, None);
        assert!(page.lines.iter().any(|l| l == "ENGAGE"));
        assert!(!page.lines.iter().any(|l| l.contains("Subscribe to our mailing list")));
        assert!(!page.links.is_empty());
    }
}
