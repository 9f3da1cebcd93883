use url::Url;

/// Resolves an href attribute value against the page it was found on
///
/// Returns None for links that cannot become fetchable URLs:
/// - empty or fragment-only hrefs (same-page anchors)
/// - `javascript:`, `mailto:`, `tel:` and `data:` schemes
/// - hrefs that fail to resolve against the base URL
/// - anything that resolves to a non-HTTP(S) scheme
///
/// A malformed href is dropped here rather than surfaced as an error; the
/// crawl must not stop over one bad anchor.
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut resolved = base.join(href).ok()?;

    // Fragments address positions within a page, not distinct pages;
    // keeping them would enqueue the same URL twice.
    resolved.set_fragment(None);

    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Some(resolved)
    } else {
        None
    }
}
