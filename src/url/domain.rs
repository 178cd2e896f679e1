use url::Url;

/// Normalizes a host for comparison: lowercase, leading `www.` stripped
///
/// # Examples
///
/// ```
/// use sitescan::url::normalize_host;
///
/// assert_eq!(normalize_host("WWW.Example.COM"), "example.com");
/// assert_eq!(normalize_host("blog.example.com"), "blog.example.com");
/// ```
pub fn normalize_host(host: &str) -> String {
    let lowered = host.to_lowercase();
    match lowered.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lowered,
    }
}

/// Extracts the normalized domain from a URL
///
/// Returns `None` for URLs without a host, which cannot occur for http(s)
/// URLs produced by the normalizer.
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(normalize_host)
}
