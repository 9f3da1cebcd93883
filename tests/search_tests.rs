//! Integration tests for the query pipeline over a crawled index

use quarry::config::{CrawlerConfig, SpellingConfig};
use quarry::crawler::CrawlEngine;
use quarry::index::SearchIndex;
use quarry::search::{DictionaryCorrector, QueryPipeline};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_crawler_config() -> CrawlerConfig {
    CrawlerConfig {
        fetch_timeout_secs: 1,
        user_agent: "quarry-test/0.1".to_string(),
    }
}

async fn mount_page(server: &MockServer, route: &str, title: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    "<html><head><title>{}</title></head><body>{}</body></html>",
                    title, body
                ))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn crawl_sample_site(server: &MockServer, index: &mut SearchIndex) {
    mount_page(
        server,
        "/",
        "Wildlife",
        r#"<a href="/platypus">platypus</a> <a href="/echidna">echidna</a>
        An overview of monotreme wildlife."#,
    )
    .await;
    mount_page(
        server,
        "/platypus",
        "Platypus",
        "The platypus is a semiaquatic monotreme. The platypus hunts underwater.",
    )
    .await;
    mount_page(
        server,
        "/echidna",
        "Echidna",
        "The echidna is a spiny monotreme that eats ants.",
    )
    .await;

    let mut engine = CrawlEngine::new(&test_crawler_config(), index).unwrap();
    engine.crawl(&format!("{}/", server.uri())).await.unwrap();
}

#[tokio::test]
async fn test_search_over_crawled_pages() {
    let server = MockServer::start().await;
    let mut index = SearchIndex::open_in_memory().unwrap();
    crawl_sample_site(&server, &mut index).await;

    let corrector = DictionaryCorrector::from_index(&index, &SpellingConfig::default()).unwrap();
    let pipeline = QueryPipeline::new(&index, corrector);

    // "platypus" occurs twice on its own page and once on the overview.
    let hits = pipeline.search("platypus").unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits[0].url.ends_with("/platypus"));
    assert!(hits[0].score > hits[1].score);
}

#[tokio::test]
async fn test_misspelled_query_corrected_against_corpus() {
    let server = MockServer::start().await;
    let mut index = SearchIndex::open_in_memory().unwrap();
    crawl_sample_site(&server, &mut index).await;

    let corrector = DictionaryCorrector::from_index(&index, &SpellingConfig::default()).unwrap();
    let pipeline = QueryPipeline::new(&index, corrector);

    let corrected = pipeline.search("platypis").unwrap();
    let literal = pipeline.search("platypus").unwrap();

    assert!(!corrected.is_empty());
    let corrected_urls: Vec<&str> = corrected.iter().map(|h| h.url.as_str()).collect();
    let literal_urls: Vec<&str> = literal.iter().map(|h| h.url.as_str()).collect();
    assert_eq!(corrected_urls, literal_urls);
}

#[tokio::test]
async fn test_index_survives_restart() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("quarry.db");

    let before: Vec<(String, f64)> = {
        let mut index = SearchIndex::open(&db_path).unwrap();
        crawl_sample_site(&server, &mut index).await;
        index
            .search("monotreme")
            .unwrap()
            .into_iter()
            .map(|h| (h.url, h.score))
            .collect()
    };
    assert_eq!(before.len(), 3);

    // A fresh process would reopen the same path; results must be identical.
    let reopened = SearchIndex::open(&db_path).unwrap();
    let after: Vec<(String, f64)> = reopened
        .search("monotreme")
        .unwrap()
        .into_iter()
        .map(|h| (h.url, h.score))
        .collect();

    assert_eq!(before, after);
}

#[tokio::test]
async fn test_empty_query_after_crawl() {
    let server = MockServer::start().await;
    let mut index = SearchIndex::open_in_memory().unwrap();
    crawl_sample_site(&server, &mut index).await;

    let corrector = DictionaryCorrector::from_index(&index, &SpellingConfig::default()).unwrap();
    let pipeline = QueryPipeline::new(&index, corrector);

    assert!(pipeline.search("").unwrap().is_empty());
}
