//! Integration tests for the crawler
//!
//! These tests use wiremock to stand up mock HTTP servers and exercise the
//! full crawl cycle end-to-end. The crawled site lives on 127.0.0.1; when a
//! test needs an "external" site it addresses a second mock server via
//! localhost, which is a different host as far as domain scoping is
//! concerned while reaching the same listener.

use sitescan::config::{Config, DomainEntry};
use sitescan::url::prepare_seed;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config tuned for fast tests
fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.max_concurrent_fetches = 4;
    config.crawler.page_timeout_secs = 3;
    config.crawler.probe_timeout_secs = 2;
    config
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

/// Rewrites a mock server's URI to address it as an external host
fn as_external(uri: &str) -> String {
    uri.replace("127.0.0.1", "localhost")
}

#[tokio::test]
async fn test_crawl_counts_pages_and_finds_links() {
    let site = MockServer::start().await;
    let external = MockServer::start().await;
    let external_base = as_external(&external.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(format!(
            r#"<html><body>
            <a href="/page1">Page 1</a>
            <a href="{}/x">Elsewhere</a>
            </body></html>"#,
            external_base
        )))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html_response(
            r#"<html><body>
            <a href="/missing">Gone</a>
            <a href="/">Home</a>
            </body></html>"#
                .to_string(),
        ))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(html_response("<html><body>external</body></html>".to_string()))
        .mount(&external)
        .await;

    let seed = prepare_seed(&site.uri()).unwrap();
    let report = sitescan::crawl(seed, test_config()).await.unwrap();

    assert_eq!(report.pages_scanned, 2, "report: {:?}", report);
    assert_eq!(report.outbound_links, vec![format!("{}/x", external_base)]);
    assert_eq!(
        report.broken_links,
        vec![format!("{}/missing", site.uri())]
    );
    assert!(report.elapsed_seconds >= 0.0);
}

#[tokio::test]
async fn test_broken_external_link_in_both_sets() {
    let site = MockServer::start().await;
    let external = MockServer::start().await;
    let external_base = as_external(&external.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(format!(
            r#"<html><body><a href="{}/dead">Dead link</a></body></html>"#,
            external_base
        )))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/dead"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&external)
        .await;

    let seed = prepare_seed(&site.uri()).unwrap();
    let report = sitescan::crawl(seed, test_config()).await.unwrap();

    let dead = format!("{}/dead", external_base);
    assert_eq!(report.pages_scanned, 1);
    assert_eq!(report.outbound_links, vec![dead.clone()]);
    assert_eq!(report.broken_links, vec![dead]);
}

#[tokio::test]
async fn test_denylisted_link_never_touched() {
    let site = MockServer::start().await;
    let external = MockServer::start().await;
    let external_base = as_external(&external.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(format!(
            r#"<html><body><a href="{}/page">Noise</a></body></html>"#,
            external_base
        )))
        .mount(&site)
        .await;

    // A denylisted host must never receive a probe
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&external)
        .await;

    let mut config = test_config();
    config.denylist.push(DomainEntry {
        domain: "localhost".to_string(),
    });

    let seed = prepare_seed(&site.uri()).unwrap();
    let report = sitescan::crawl(seed, config).await.unwrap();

    assert_eq!(report.pages_scanned, 1);
    assert!(report.outbound_links.is_empty());
    assert!(report.broken_links.is_empty());
}

#[tokio::test]
async fn test_duplicate_links_fetched_and_probed_once() {
    let site = MockServer::start().await;
    let external = MockServer::start().await;
    let external_base = as_external(&external.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(format!(
            r#"<html><body>
            <a href="/page1">One</a>
            <a href="/page1">One again</a>
            <a href="/page1#section">One with fragment</a>
            <a href="{0}/x">Out</a>
            <a href="{0}/x">Out again</a>
            </body></html>"#,
            external_base
        )))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html_response("<html><body>page 1</body></html>".to_string()))
        .expect(1)
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&external)
        .await;

    let seed = prepare_seed(&site.uri()).unwrap();
    let report = sitescan::crawl(seed, test_config()).await.unwrap();

    assert_eq!(report.pages_scanned, 2);
    assert_eq!(report.outbound_links.len(), 1);
    assert!(report.broken_links.is_empty());
}

#[tokio::test]
async fn test_mailto_and_fragment_links_ignored() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            r##"<html><body>
            <a href="mailto:someone@example.com">Mail</a>
            <a href="tel:+15551234567">Call</a>
            <a href="javascript:void(0)">Script</a>
            <a href="#section">Anchor</a>
            </body></html>"##
                .to_string(),
        ))
        .mount(&site)
        .await;

    let seed = prepare_seed(&site.uri()).unwrap();
    let report = sitescan::crawl(seed, test_config()).await.unwrap();

    assert_eq!(report.pages_scanned, 1);
    assert!(report.outbound_links.is_empty());
    assert!(report.broken_links.is_empty());
}

#[tokio::test]
async fn test_seed_timeout_yields_broken_seed_and_terminates() {
    let site = MockServer::start().await;

    // Responds well past the page timeout
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            html_response("<html><body>slow</body></html>".to_string())
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&site)
        .await;

    let mut config = test_config();
    config.crawler.page_timeout_secs = 1;

    let seed = prepare_seed(&site.uri()).unwrap();
    let report = sitescan::crawl(seed.clone(), config).await.unwrap();

    assert_eq!(report.pages_scanned, 0);
    assert_eq!(report.broken_links, vec![seed.as_str().to_string()]);
    assert!(report.outbound_links.is_empty());
}

#[tokio::test]
async fn test_internal_404_not_counted_as_scanned() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            r#"<html><body><a href="/gone">Gone</a></body></html>"#.to_string(),
        ))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    let seed = prepare_seed(&site.uri()).unwrap();
    let report = sitescan::crawl(seed, test_config()).await.unwrap();

    assert_eq!(report.pages_scanned, 1);
    assert_eq!(report.broken_links, vec![format!("{}/gone", site.uri())]);
}

#[tokio::test]
async fn test_error_status_page_still_scanned() {
    let site = MockServer::start().await;

    // Any non-404 status counts as a scanned page and its links are followed
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string(r#"<html><body><a href="/other">Other</a></body></html>"#)
                .insert_header("content-type", "text/html"),
        )
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/other"))
        .respond_with(html_response("<html><body>ok</body></html>".to_string()))
        .mount(&site)
        .await;

    let seed = prepare_seed(&site.uri()).unwrap();
    let report = sitescan::crawl(seed, test_config()).await.unwrap();

    assert_eq!(report.pages_scanned, 2);
    assert!(report.broken_links.is_empty());
}
