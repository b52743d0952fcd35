//! Small tree helpers over `scraper`
//!
//! Everything here borrows from a parsed `Html` and must stay synchronous:
//! `Html` is not `Send`, so callers parse, extract owned strings and drop the
//! document before any await point.

use hmh_domain::query::collapse_whitespace;
use scraper::{ElementRef, Html};

/// Page chrome that never holds guidance
const CHROME_TAGS: &[&str] = &[
    "nav", "header", "footer", "aside", "script", "style", "noscript",
];

/// Heading levels that delimit sections
pub(crate) const SECTION_BREAKS: &[&str] = &["h2", "h3"];

/// List containers
pub(crate) const LIST_TAGS: &[&str] = &["ul", "ol"];

/// A parsed page with its extraction scope resolved
pub struct Page {
    document: Html,
}

impl Page {
    /// Parse a full HTML document
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// The `main` element, else the first `article`, else the whole document
    pub fn scope(&self) -> ElementRef<'_> {
        let root = self.document.root_element();
        first_named(root, "main")
            .or_else(|| first_named(root, "article"))
            .unwrap_or(root)
    }

    /// Every element inside the scope, in document order
    pub fn elements(&self) -> Vec<ElementRef<'_>> {
        self.scope()
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .collect()
    }

    /// Text of the first `h1` anywhere in the document
    pub fn title(&self) -> Option<String> {
        first_named(self.document.root_element(), "h1")
            .map(|h1| collapse_whitespace(&text_of(h1)))
            .filter(|t| !t.is_empty())
    }
}

fn first_named<'a>(root: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == name)
}

/// Whether the element's tag is one of `names`
pub(crate) fn is_named(el: &ElementRef<'_>, names: &[&str]) -> bool {
    names.contains(&el.value().name())
}

/// Whether the element is, or sits inside, page chrome
pub(crate) fn in_chrome(el: &ElementRef<'_>) -> bool {
    is_named(el, CHROME_TAGS)
        || el
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|a| is_named(&a, CHROME_TAGS))
}

/// Trimmed text nodes joined by single spaces
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-cased, whitespace-collapsed text of an element with typographic
/// apostrophes folded to `'`
pub(crate) fn heading_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&text_of(el))
        .to_lowercase()
        .replace('\u{2019}', "'")
}

/// Descendants (excluding `el`) whose tag is one of `names`
pub(crate) fn descendants_named<'a>(
    el: ElementRef<'a>,
    names: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |e| is_named(e, names))
}

/// Whitespace-collapsed text of every `li` under a list
pub(crate) fn list_items(list: ElementRef<'_>) -> Vec<String> {
    descendants_named(list, &["li"])
        .map(|li| collapse_whitespace(&text_of(li)))
        .collect()
}

/// Whether the element has a `class` token containing `fragment`
pub(crate) fn has_class_fragment(el: &ElementRef<'_>, fragment: &str) -> bool {
    el.value().classes().any(|c| c.contains(fragment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_prefers_main() {
        let page = Page::parse(
            "<body><article><p>a</p></article><main><p>m</p></main></body>",
        );
        assert_eq!(page.scope().value().name(), "main");
    }

    #[test]
    fn test_scope_falls_back_to_article_then_root() {
        let page = Page::parse("<body><article><p>a</p></article></body>");
        assert_eq!(page.scope().value().name(), "article");

        let page = Page::parse("<body><p>x</p></body>");
        assert_eq!(page.scope().value().name(), "html");
    }

    #[test]
    fn test_text_of_joins_trimmed_pieces() {
        let page = Page::parse("<main><li>  Wash <a>hands</a>\n often </li></main>");
        let li = page.elements().into_iter().find(|e| is_named(e, &["li"])).unwrap();
        assert_eq!(text_of(li), "Wash hands often");
    }

    #[test]
    fn test_in_chrome() {
        let page = Page::parse("<main><nav><ul><li>x</li></ul></nav><ul><li>y</li></ul></main>");
        let lists: Vec<_> = page
            .elements()
            .into_iter()
            .filter(|e| is_named(e, LIST_TAGS))
            .collect();
        assert_eq!(lists.len(), 2);
        assert!(in_chrome(&lists[0]));
        assert!(!in_chrome(&lists[1]));
    }

    #[test]
    fn test_class_fragment() {
        let page = Page::parse(
            r#"<main><div class="nhsuk-card nhsuk-card--care nhsuk-card--care--urgent">x</div></main>"#,
        );
        let div = page.elements().into_iter().find(|e| is_named(e, &["div"])).unwrap();
        assert!(has_class_fragment(&div, "nhsuk-card--care"));
        assert!(!has_class_fragment(&div, "nhsuk-card--feature"));
    }

    #[test]
    fn test_title() {
        let page = Page::parse("<header><h1> Back   pain </h1></header>");
        assert_eq!(page.title().as_deref(), Some("Back pain"));
        assert_eq!(Page::parse("<p>none</p>").title(), None);
    }
}
