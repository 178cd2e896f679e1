use crate::url::domain::normalize_host;
use crate::UrlError;
use url::Url;

/// Normalizes a URL string into sitescan's canonical form
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject schemes other than http/https
/// 3. Lowercase the host
/// 4. Remove the leading www. prefix from the host
/// 5. Remove the fragment (everything after #)
///
/// The query string is preserved: `/search?q=a` and `/search?q=b` are
/// different pages and must dedup separately.
///
/// # Examples
///
/// ```
/// use sitescan::url::normalize_url;
///
/// let url = normalize_url("https://WWW.EXAMPLE.COM/page?q=1#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page?q=1");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    canonicalize(url)
}

/// Resolves a raw href against the page it was found on and normalizes it
///
/// Relative hrefs (`../up`, `/abs`, `page.html`, scheme-relative `//host/x`)
/// resolve with standard URL semantics via [`Url::join`]. Malformed hrefs are
/// rejected with a `UrlError`, which callers treat as "skip", not as fatal.
pub fn normalize_href(href: &str, base: &Url) -> Result<Url, UrlError> {
    let url = base.join(href).map_err(|e| UrlError::Parse(e.to_string()))?;
    canonicalize(url)
}

/// Prepares a user-submitted seed URL
///
/// Prepends `https://` when the input lacks a scheme, then normalizes. No
/// further validation: an unreachable or nonsensical seed surfaces as a
/// broken link during the crawl, not as an upfront rejection.
pub fn prepare_seed(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.contains("://") {
        normalize_url(trimmed)
    } else {
        normalize_url(&format!("https://{}", trimmed))
    }
}

/// Applies the canonical-form rewrites to an already-parsed URL
fn canonicalize(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::UnsupportedScheme(url.scheme().to_string()));
    }

    let host = url.host_str().ok_or(UrlError::MissingHost)?;
    let normalized_host = normalize_host(host);
    if normalized_host.is_empty() {
        return Err(UrlError::MissingHost);
    }
    if normalized_host != host {
        url.set_host(Some(&normalized_host))
            .map_err(|e| UrlError::Parse(e.to_string()))?;
    }

    url.set_fragment(None);

    Ok(url)
}
