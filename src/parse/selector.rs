//! Tree lookups shared by the field extractors.
//!
//! Every lookup returns the first match in document order and treats a missing node
//! or attribute as "no value".

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

/// Parses a CSS selector, falling back to one that matches nothing.
///
/// A bad selector is logged and turns its lookup into a permanent miss instead of a
/// panic in the request path.
pub(crate) fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        Selector::parse("*:not(*)").unwrap_or_else(|e| {
            panic!("Fallback selector '*:not(*)' failed to parse: {e}")
        })
    })
}

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta", "meta content lookup"));

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("link[rel]", "link lookup"));

/// `content` of the first `<meta>` whose `name` or `property` equals `key`.
///
/// Keys compare ASCII case-insensitively, so `OG:Title` finds `og:title`.
pub(crate) fn meta_content(document: &Html, key: &str) -> Option<String> {
    document
        .select(&META_SELECTOR)
        .find(|meta| {
            let element = meta.value();
            [element.attr("name"), element.attr("property")]
                .into_iter()
                .flatten()
                .any(|value| value.trim().eq_ignore_ascii_case(key))
        })
        .and_then(|meta| meta.value().attr("content"))
        .map(str::to_string)
}

/// First of several meta keys that yields a non-empty `content`.
pub(crate) fn first_meta_content(document: &Html, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| meta_content(document, key))
        .find(|value| !value.trim().is_empty())
}

/// `href` of the first `<link>` whose `rel` satisfies `rel_matches`.
///
/// `rel_matches` receives the lower-cased, trimmed `rel` value.
pub(crate) fn link_href(document: &Html, rel_matches: impl Fn(&str) -> bool) -> Option<String> {
    document
        .select(&LINK_SELECTOR)
        .find(|link| {
            link.value()
                .attr("rel")
                .is_some_and(|rel| rel_matches(&rel.trim().to_ascii_lowercase()))
        })
        .and_then(|link| link.value().attr("href"))
        .map(str::to_string)
}

/// `attr` of the first element matching `selector`.
pub(crate) fn first_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(str::to_string)
}

/// `attr` of the first element matching `selector` whose value is not blank.
pub(crate) fn first_non_empty_attr(
    document: &Html,
    selector: &Selector,
    attr: &str,
) -> Option<String> {
    document
        .select(selector)
        .filter_map(|element| element.value().attr(attr))
        .find(|value| !value.trim().is_empty())
        .map(str::to_string)
}

/// Text content of the first element matching `selector`.
pub(crate) fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}
