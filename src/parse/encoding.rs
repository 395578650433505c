//! Body decoding.
//!
//! Pages arrive as raw bytes in whatever charset the site uses. Everything downstream
//! works on UTF-8, so the bytes are decoded once here before the document is built.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252, X_USER_DEFINED};
use log::debug;
use regex::bytes::Regex;

use crate::config::CHARSET_PRESCAN_BYTES;

/// `charset=` inside a Content-Type value
static CONTENT_TYPE_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i-u)charset\s*=\s*["']?([A-Za-z0-9_:.\-]+)"#)
        .unwrap_or_else(|e| panic!("Invalid content-type charset pattern: {e}"))
});

/// `<meta charset=...>` or `<meta http-equiv=... content="...; charset=...">`
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9_:.\-]+)"#)
        .unwrap_or_else(|e| panic!("Invalid meta charset pattern: {e}"))
});

/// Finds the encoding named by a `charset=` parameter in a Content-Type value.
pub(crate) fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    let caps = CONTENT_TYPE_CHARSET.captures(content_type.as_bytes())?;
    Encoding::for_label(caps.get(1)?.as_bytes())
}

/// Finds a charset declared in a `<meta>` tag near the start of the document.
///
/// A document whose `<meta>` could be read as ASCII is not UTF-16, so a UTF-16 label
/// there means UTF-8 and `x-user-defined` means windows-1252.
fn charset_from_meta_prescan(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(CHARSET_PRESCAN_BYTES)];
    let caps = META_CHARSET.captures(head)?;
    let declared = Encoding::for_label(caps.get(1)?.as_bytes())?;
    if declared == X_USER_DEFINED {
        return Some(WINDOWS_1252);
    }
    Some(declared.output_encoding())
}

/// Without a byte-order mark a header naming UTF-16 is ignored.
fn is_utf16(encoding: &'static Encoding) -> bool {
    encoding == UTF_16LE || encoding == UTF_16BE
}

/// Whether `bytes` is UTF-8, allowing one multi-byte sequence cut off at the end.
///
/// The size guard can stop a transfer in the middle of a character.
fn is_utf8_allowing_cut_tail(bytes: &[u8]) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() && bytes.len() - e.valid_up_to() < 4,
    }
}

/// Picks the encoding for a body.
///
/// Order: byte-order mark, then UTF-8 whenever the bytes validate as UTF-8, then the
/// Content-Type hint, then a `<meta>` declaration, and finally windows-1252 (the web's
/// de facto legacy default). Valid UTF-8 wins over declarations because mislabelled
/// pages are far more common than legacy text that happens to validate.
pub(crate) fn sniff_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if is_utf8_allowing_cut_tail(bytes) {
        return UTF_8;
    }
    if let Some(encoding) = content_type
        .and_then(charset_from_content_type)
        .filter(|encoding| !is_utf16(*encoding))
    {
        return encoding;
    }
    charset_from_meta_prescan(bytes).unwrap_or(WINDOWS_1252)
}

/// Decodes a body to UTF-8.
///
/// Never fails: undecodable sequences become U+FFFD.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = sniff_encoding(bytes, content_type);
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        debug!(
            "Body had malformed {} sequences, replaced during decoding",
            actual.name()
        );
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_utf8() {
        let html = "<title>Café</title>".as_bytes();
        assert_eq!(decode_html(html, None), "<title>Café</title>");
    }

    #[test]
    fn test_decode_latin1_from_content_type() {
        // "Café" in ISO-8859-1
        let bytes = b"<title>Caf\xe9</title>";
        let text = decode_html(bytes, Some("text/html; charset=ISO-8859-1"));
        assert_eq!(text, "<title>Café</title>");
    }

    #[test]
    fn test_decode_latin1_from_meta_charset() {
        let bytes = b"<html><head><meta charset=\"iso-8859-1\"><title>Caf\xe9</title>";
        let text = decode_html(bytes, None);
        assert!(text.contains("Café"));
    }

    #[test]
    fn test_decode_from_http_equiv_meta() {
        let bytes = b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1251\"><title>\xcf\xf0\xe8\xe2\xe5\xf2</title>";
        let text = decode_html(bytes, None);
        assert!(text.contains("Привет"));
    }

    #[test]
    fn test_decode_undeclared_legacy_falls_back_to_windows_1252() {
        let bytes = b"<title>na\xefve</title>";
        assert_eq!(decode_html(bytes, None), "<title>naïve</title>");
    }

    #[test]
    fn test_decode_utf8_cut_mid_character_stays_utf8() {
        let full = "<title>日本</title>".as_bytes();
        // Cut inside the second three-byte character
        let cut = &full[..full.len() - "</title>".len() - 1];
        assert!(is_utf8_allowing_cut_tail(cut));
        let text = decode_html(cut, None);
        assert!(text.starts_with("<title>日"));
    }

    #[test]
    fn test_decode_bom_wins_over_hint() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("<title>ü</title>".as_bytes());
        let text = decode_html(&bytes, Some("text/html; charset=iso-8859-1"));
        assert_eq!(text, "<title>ü</title>");
    }

    #[test]
    fn test_valid_utf8_wins_over_mislabelled_meta() {
        let html = "<meta charset=\"iso-8859-1\"><title>Café</title>".as_bytes();
        assert_eq!(sniff_encoding(html, None), UTF_8);
        assert!(decode_html(html, None).contains("Café"));
    }

    #[test]
    fn test_meta_utf16_label_decodes_as_ascii_compatible() {
        let bytes = b"<meta charset=\"utf-16\"><title>Caf\xe9</title>";
        assert_eq!(sniff_encoding(bytes, None), UTF_8);
        let text = decode_html(bytes, None);
        assert!(text.starts_with("<meta charset=\"utf-16\"><title>Caf"));
        assert!(text.ends_with("</title>"));
    }

    #[test]
    fn test_meta_x_user_defined_maps_to_windows_1252() {
        let bytes = b"<meta charset=\"x-user-defined\"><title>Caf\xe9</title>";
        assert_eq!(sniff_encoding(bytes, None), WINDOWS_1252);
        assert!(decode_html(bytes, None).contains("Caf\u{e9}"));
    }

    #[test]
    fn test_header_utf16_without_bom_is_ignored() {
        let bytes = b"<title>Caf\xe9</title>";
        assert_eq!(
            sniff_encoding(bytes, Some("text/html; charset=utf-16")),
            WINDOWS_1252
        );
        assert_eq!(
            decode_html(bytes, Some("text/html; charset=UTF-16BE")),
            "<title>Caf\u{e9}</title>"
        );
    }

    #[test]
    fn test_unknown_charset_label_is_ignored() {
        assert!(charset_from_content_type("text/html; charset=x-made-up").is_none());
        assert!(charset_from_content_type("text/html").is_none());
    }
}
