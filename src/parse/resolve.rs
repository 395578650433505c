//! Relative URL resolution for extracted links.
//!
//! This is a deliberately small resolver. `.` and `..` segments are kept as written
//! and the base URL's query and fragment never take part.

use url::Url;

/// Scheme, authority and directory taken from a base URL.
struct BaseParts {
    scheme: String,
    /// Host plus `:port` when the port is not the scheme's default
    authority: String,
    /// Base path up to, not including, its last `/`
    directory: String,
}

impl BaseParts {
    fn from_base(base_url: &str) -> Self {
        match Url::parse(base_url) {
            Ok(url) => {
                let host = url.host_str().unwrap_or_default();
                let authority = match url.port() {
                    Some(port) => format!("{host}:{port}"),
                    None => host.to_string(),
                };
                let path = url.path();
                let directory = path
                    .rfind('/')
                    .map(|idx| path[..idx].to_string())
                    .unwrap_or_default();
                Self {
                    scheme: url.scheme().to_string(),
                    authority,
                    directory,
                }
            }
            Err(e) => {
                log::debug!("Base URL '{}' did not parse ({}), using defaults", base_url, e);
                Self {
                    scheme: "http".to_string(),
                    authority: String::new(),
                    directory: String::new(),
                }
            }
        }
    }
}

/// Whether `candidate` starts with an RFC 3986 scheme such as `https:` or `data:`.
fn has_scheme(candidate: &str) -> bool {
    let Some((scheme, _)) = candidate.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolves a link found in a page against the page's URL.
///
/// - empty or missing: `None`
/// - already has a scheme: returned unchanged
/// - `//host/path`: gets the base scheme
/// - `/path`: gets the base scheme and host
/// - anything else: appended to the directory of the base path
///
/// # Examples
///
/// ```
/// use url_metadata::resolve_url;
///
/// let base = "https://example.com/blog/post";
/// assert_eq!(
///     resolve_url(Some("/img/a.png"), base).as_deref(),
///     Some("https://example.com/img/a.png")
/// );
/// assert_eq!(
///     resolve_url(Some("a.png"), base).as_deref(),
///     Some("https://example.com/blog/a.png")
/// );
/// ```
pub fn resolve_url(candidate: Option<&str>, base_url: &str) -> Option<String> {
    let candidate = candidate.filter(|c| !c.is_empty())?;

    if has_scheme(candidate) {
        return Some(candidate.to_string());
    }

    let base = BaseParts::from_base(base_url);

    if candidate.starts_with("//") {
        return Some(format!("{}:{}", base.scheme, candidate));
    }
    if candidate.starts_with('/') {
        return Some(format!("{}://{}{}", base.scheme, base.authority, candidate));
    }
    Some(format!(
        "{}://{}{}/{}",
        base.scheme, base.authority, base.directory, candidate
    ))
}

/// The conventional `/favicon.ico` at the root of the base URL's site.
pub(crate) fn fallback_favicon_url(base_url: &str) -> String {
    let base = BaseParts::from_base(base_url);
    if base.authority.is_empty() {
        "/favicon.ico".to_string()
    } else {
        format!("{}://{}/favicon.ico", base.scheme, base.authority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com/blog/post";

    #[test]
    fn test_resolve_empty_is_none() {
        assert_eq!(resolve_url(None, BASE), None);
        assert_eq!(resolve_url(Some(""), BASE), None);
    }

    #[test]
    fn test_resolve_absolute_unchanged() {
        for absolute in [
            "https://x.com/a.png",
            "http://cdn.example.org/img.jpg?v=2",
            "data:image/png;base64,AAAA",
            "mailto:someone@example.com",
        ] {
            assert_eq!(resolve_url(Some(absolute), BASE).as_deref(), Some(absolute));
            assert_eq!(
                resolve_url(Some(absolute), "not a base").as_deref(),
                Some(absolute)
            );
        }
    }

    #[test]
    fn test_resolve_protocol_relative() {
        assert_eq!(
            resolve_url(Some("//cdn.example.com/a.png"), BASE).as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(
            resolve_url(Some("//cdn.example.com/a.png"), "http://example.com/").as_deref(),
            Some("http://cdn.example.com/a.png")
        );
    }

    #[test]
    fn test_resolve_root_relative() {
        assert_eq!(
            resolve_url(Some("/img/a.png"), BASE).as_deref(),
            Some("https://example.com/img/a.png")
        );
    }

    #[test]
    fn test_resolve_path_relative() {
        assert_eq!(
            resolve_url(Some("a.png"), BASE).as_deref(),
            Some("https://example.com/blog/a.png")
        );
    }

    #[test]
    fn test_resolve_path_relative_against_directory_and_root() {
        assert_eq!(
            resolve_url(Some("a.png"), "https://example.com/blog/").as_deref(),
            Some("https://example.com/blog/a.png")
        );
        assert_eq!(
            resolve_url(Some("a.png"), "https://example.com").as_deref(),
            Some("https://example.com/a.png")
        );
    }

    #[test]
    fn test_resolve_keeps_dot_segments() {
        assert_eq!(
            resolve_url(Some("../a.png"), BASE).as_deref(),
            Some("https://example.com/blog/../a.png")
        );
    }

    #[test]
    fn test_resolve_ignores_base_query() {
        assert_eq!(
            resolve_url(Some("a.png"), "https://example.com/blog/post?page=2#top").as_deref(),
            Some("https://example.com/blog/a.png")
        );
    }

    #[test]
    fn test_resolve_keeps_non_default_port() {
        assert_eq!(
            resolve_url(Some("/a.png"), "http://127.0.0.1:8080/x").as_deref(),
            Some("http://127.0.0.1:8080/a.png")
        );
        assert_eq!(
            resolve_url(Some("/a.png"), "https://example.com:443/x").as_deref(),
            Some("https://example.com/a.png")
        );
    }

    #[test]
    fn test_resolve_unparseable_base_uses_defaults() {
        assert_eq!(
            resolve_url(Some("/a.png"), "not a base").as_deref(),
            Some("http:///a.png")
        );
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("https://x"));
        assert!(has_scheme("svn+ssh://x"));
        assert!(!has_scheme("/path:with-colon"));
        assert!(!has_scheme("a.png"));
        assert!(!has_scheme("1abc:x"));
        assert!(!has_scheme(":x"));
    }

    #[test]
    fn test_fallback_favicon_url() {
        assert_eq!(fallback_favicon_url(BASE), "https://example.com/favicon.ico");
        assert_eq!(
            fallback_favicon_url("http://localhost:3000/a/b"),
            "http://localhost:3000/favicon.ico"
        );
        assert_eq!(fallback_favicon_url("garbage"), "/favicon.ico");
    }
}
