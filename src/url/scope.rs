use url::Url;

/// Extracts the network location (`host[:port]`) from a URL
///
/// The host is lowercased; the port is included only when it is explicit and
/// not the default for the scheme (the `url` crate drops default ports during
/// parsing). Returns None for URLs without a host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use quarry::url::network_location;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(network_location(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://site.test:8080/").unwrap();
/// assert_eq!(network_location(&url), Some("site.test:8080".to_string()));
/// ```
pub fn network_location(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Checks whether two URLs share the same network location
///
/// Comparison is exact-match on `host[:port]`: no subdomain generalization,
/// so `blog.example.com` is out of scope for a crawl rooted at `example.com`.
pub fn same_scope(a: &Url, b: &Url) -> bool {
    match (network_location(a), network_location(b)) {
        (Some(na), Some(nb)) => na == nb,
        _ => false,
    }
}
