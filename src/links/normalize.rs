use url::Url;

/// Makes a URL absolute against a site origin
///
/// - `//host/path` becomes `https://host/path`
/// - `/path` becomes `{origin}/path`
/// - anything else is returned unchanged
///
/// # Examples
///
/// ```
/// use price_tracker::links::absolutize;
///
/// let origin = "https://www.amazon.com";
/// assert_eq!(absolutize("//cdn.x/y.jpg", origin), "https://cdn.x/y.jpg");
/// assert_eq!(absolutize("/img/y.jpg", origin), "https://www.amazon.com/img/y.jpg");
/// assert_eq!(absolutize("https://already/abs.jpg", origin), "https://already/abs.jpg");
/// ```
pub fn absolutize(raw: &str, origin: &str) -> String {
    let raw = raw.trim();

    if raw.starts_with("//") {
        format!("https:{}", raw)
    } else if raw.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), raw)
    } else {
        raw.to_string()
    }
}

/// Returns `scheme://host[:port]` for a URL, without a trailing slash
pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Resolves an anchor `href` found on `base` into an absolute http(s) URL
///
/// Root- and protocol-relative hrefs go through [`absolutize`] with `origin`.
/// Other relative forms are joined against `base`. Returns `None` for empty
/// hrefs, fragment-only links, and non-http schemes such as `javascript:` or
/// `mailto:`.
pub fn resolve_href(href: &str, origin: &str, base: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let candidate = if href.starts_with('/') {
        absolutize(href, origin)
    } else {
        href.to_string()
    };

    let resolved = base.join(&candidate).ok()?;
    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Some(resolved.to_string())
    } else {
        None
    }
}
