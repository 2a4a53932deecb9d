//! URL Utility Functions
//!
//! Link resolution for the renderer and output filename derivation.

use url::Url;

/// Stem used when a URL yields no usable filename.
pub const FALLBACK_STEM: &str = "output";

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    is_absolute_url(url_str).1
}

/// Resolve a link target against the page URL.
///
/// Same-page anchors (`#...`) and special schemes are returned unchanged, as
/// are absolute URLs. Without a base, relative targets are left as written.
#[must_use]
pub fn create_absolute_url(url_str: &str, base: Option<&Url>) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() || url_str.starts_with('#') {
        return url_str.to_string();
    }

    if url_str.starts_with("data:")
        || url_str.starts_with("mailto:")
        || url_str.starts_with("tel:")
    {
        return url_str.to_string();
    }

    if is_absolute_url(url_str).0 {
        return url_str.to_string();
    }

    match base.map(|b| b.join(url_str)) {
        Some(Ok(resolved)) => resolved.to_string(),
        _ => url_str.to_string(),
    }
}

/// Derive an output filename stem (no extension) from a URL.
///
/// - the last path segment, with its final extension stripped;
/// - for an empty path, the first label of the host with `www.` removed;
/// - otherwise [`FALLBACK_STEM`].
///
/// # Examples
///
/// ```
/// use htmldown::url_utils::output_stem;
///
/// assert_eq!(output_stem("https://example.com/a/b/report.html"), "report");
/// assert_eq!(output_stem("https://www.example.com"), "example");
/// ```
#[must_use]
pub fn output_stem(url_str: &str) -> String {
    let Ok(url) = Url::parse(url_str.trim()) else {
        return FALLBACK_STEM.to_string();
    };

    let path = url.path().trim_matches('/');
    let stem = if path.is_empty() {
        url.host_str()
            .map(|host| host.replace("www.", ""))
            .and_then(|host| host.split('.').next().map(str::to_string))
            .unwrap_or_default()
    } else {
        let segment = path.rsplit('/').next().unwrap_or_default();
        match segment.rsplit_once('.') {
            Some((name, _ext)) => name.to_string(),
            None => segment.to_string(),
        }
    };

    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}
