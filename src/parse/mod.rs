//! HTML metadata extraction.
//!
//! Turns raw page bytes into a [`MetadataMap`]:
//! - bytes are decoded to UTF-8 (BOM, header hint, `<meta>` declaration, legacy fallback)
//! - the document is parsed tolerantly; parser errors are ignored
//! - each field walks its own ordered sources, first non-empty value wins
//! - image, favicon and canonical links are made absolute against the page URL
//!
//! All lookups use CSS selectors via the `scraper` crate.

mod encoding;
mod metadata;
mod selector;
mod text;
mod resolve;

pub use encoding::decode_html;
pub use metadata::{extract_metadata, extract_metadata_with_hint, MetadataMap};
pub use text::clean_text;
pub use resolve::resolve_url;

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
