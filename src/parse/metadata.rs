//! Field extraction.
//!
//! Each field follows its own ordered list of sources and the first non-empty value
//! wins. Missing nodes, missing attributes and malformed markup all collapse to `None`.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Serialize;

use super::encoding::decode_html;
use super::selector::{
    first_attr, first_meta_content, first_non_empty_attr, first_text, link_href, meta_content,
    parse_selector_with_fallback,
};
use super::text::clean_text;
use super::resolve::{fallback_favicon_url, resolve_url};

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("title", "title extraction"));

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("img[src]", "image extraction"));

static HTML_LANG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("html[lang]", "lang extraction"));

static META_CHARSET_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta[charset]", "charset extraction"));

/// Metadata extracted from one page.
///
/// Serializes with every key present in a fixed order; missing values are `null`.
/// `canonical` and `favicon` are always `Some` after [`extract_metadata`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataMap {
    /// og:title, twitter:title or `<title>`, whitespace collapsed
    pub title: Option<String>,
    /// og:description, twitter:description or meta description, whitespace collapsed
    pub description: Option<String>,
    /// Absolute URL of the preview image
    pub image: Option<String>,
    /// Absolute URL of the site icon
    pub favicon: Option<String>,
    /// Declared canonical URL, or the page URL itself
    pub canonical: Option<String>,
    /// `<html lang>` as written
    pub lang: Option<String>,
    /// `<meta charset>` as written
    pub charset: Option<String>,
    /// Keywords meta content as written
    pub keywords: Option<String>,
    /// Author meta content as written
    pub author: Option<String>,
}

/// Extracts metadata from raw page bytes.
///
/// `base_url` is the final URL of the fetch and anchors relative links. Never fails:
/// empty or broken markup yields `None` fields, with `canonical` and `favicon` still
/// derived from `base_url`.
pub fn extract_metadata(html: &[u8], base_url: &str) -> MetadataMap {
    extract_metadata_with_hint(html, base_url, None)
}

/// Same as [`extract_metadata`], with the response Content-Type as a charset hint.
pub fn extract_metadata_with_hint(
    html: &[u8],
    base_url: &str,
    content_type: Option<&str>,
) -> MetadataMap {
    let text = decode_html(html, content_type);
    let document = Html::parse_document(&text);
    log::debug!(
        "Parsed {} bytes from {} ({} parser errors ignored)",
        html.len(),
        base_url,
        document.errors.len()
    );

    MetadataMap {
        title: extract_title(&document),
        description: extract_description(&document),
        image: extract_image(&document, base_url),
        favicon: Some(extract_favicon(&document, base_url)),
        canonical: Some(extract_canonical(&document, base_url)),
        lang: first_attr(&document, &HTML_LANG_SELECTOR, "lang"),
        charset: first_attr(&document, &META_CHARSET_SELECTOR, "charset"),
        keywords: meta_content(&document, "keywords"),
        author: meta_content(&document, "author"),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let value = first_meta_content(document, &["og:title", "twitter:title"]).or_else(|| {
        first_text(document, &TITLE_SELECTOR).filter(|title| !title.trim().is_empty())
    });
    clean_text(value.as_deref())
}

fn extract_description(document: &Html) -> Option<String> {
    let value = first_meta_content(
        document,
        &["og:description", "twitter:description", "description"],
    );
    clean_text(value.as_deref())
}

fn extract_image(document: &Html, base_url: &str) -> Option<String> {
    let value = first_meta_content(document, &["og:image", "twitter:image"])
        .or_else(|| link_href(document, |rel| rel == "image_src").filter(|h| !h.is_empty()))
        .or_else(|| first_non_empty_attr(document, &IMG_SELECTOR, "src"));
    resolve_url(value.as_deref(), base_url)
}

/// First icon link, resolved, or the site's `/favicon.ico`.
fn extract_favicon(document: &Html, base_url: &str) -> String {
    link_href(document, |rel| rel.contains("icon"))
        .and_then(|href| resolve_url(Some(&href), base_url))
        .unwrap_or_else(|| fallback_favicon_url(base_url))
}

fn extract_canonical(document: &Html, base_url: &str) -> String {
    link_href(document, |rel| rel == "canonical")
        .and_then(|href| resolve_url(Some(&href), base_url))
        .unwrap_or_else(|| base_url.to_string())
}
