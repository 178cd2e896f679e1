//! HTML link-extraction adapter
//!
//! Thin wrapper over the `scraper` crate. The crawler core never inspects
//! HTML structure beyond this module's contract: give it a page body, get
//! back the raw href strings worth following.

use scraper::{Html, Selector};

/// Extracts followable raw hrefs from an HTML document
///
/// Collects the `href` attribute of every `<a>` tag and filters out hrefs
/// that can never lead to a page: `mailto:`, `javascript:`, `tel:`, data
/// URIs, fragment-only anchors, and empty strings. Resolution against the
/// page URL and normalization happen downstream.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut hrefs = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                let href = href.trim();
                if is_followable(href) {
                    hrefs.push(href.to_string());
                }
            }
        }
    }

    hrefs
}

/// Decides whether an href is worth handing to the normalizer
fn is_followable(href: &str) -> bool {
    if href.is_empty() || href.starts_with('#') {
        return false;
    }

    !(href.starts_with("mailto:")
        || href.starts_with("javascript:")
        || href.starts_with("tel:")
        || href.starts_with("data:"))
}
