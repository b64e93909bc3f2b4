//! End-to-end tests of the service routers, driven through tower
//! without binding a socket.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use pipeline::testing::{MockChatModel, MockExtractor, MockFetcher, MockSummarizer};
use pipeline::{
    ExtractStage, MemoryCacheStore, Pipeline, ScrapeStage, SummarizeStage, DEFAULT_CHARACTER_LIMIT,
};
use serde_json::{json, Value};
use server_core::routes;
use tower::ServiceExt;

const EVENT_PAGE: &str = r#"
<html><body>
  <div id="eventcontainer">
    <div class="event-details">
      <a href="https://example.org/a" title="Story Time"></a>
      <div style="padding: 4px">Main Library<br>Sat 10am</div>
    </div>
    <div class="event-details">
      <a href="https://example.org/b" title="Craft Hour"></a>
      <div style="padding: 4px">Annex<br>Sun 2pm</div>
    </div>
    <div class="event-details">
      <a href="https://example.org/c" title="Puppet Show"></a>
      <div style="padding: 4px">Park<br>Mon 9am</div>
    </div>
  </div>
</body></html>
"#;

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn extract_returns_events_for_well_formed_page() {
    let cache = Arc::new(MemoryCacheStore::new());
    let app = routes::extract::router(Arc::new(ExtractStage::new(cache)));

    let (status, body) = post_json(app, "/process", json!({ "html": EVENT_PAGE })).await;

    assert_eq!(status, StatusCode::OK);
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["title"], "Story Time");
    assert_eq!(events[0]["url"], "https://example.org/a");
    assert_eq!(events[0]["location"], "Main Library");
    assert_eq!(events[0]["dateRange"], "Sat 10am");
}

#[tokio::test]
async fn extract_without_container_is_a_problem_response() {
    let cache = Arc::new(MemoryCacheStore::new());
    let app = routes::extract::router(Arc::new(ExtractStage::new(cache)));

    let (status, body) = post_json(
        app,
        "/process",
        json!({ "html": "<html><body><p>nothing here</p></body></html>" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Structure not found");
    assert_eq!(body["status"], 404);
    assert!(body["detail"].as_str().unwrap().contains("eventcontainer"));
}

#[tokio::test]
async fn scrape_rejects_non_http_url_without_fetching() {
    let cache = Arc::new(MemoryCacheStore::new());
    let stage = ScrapeStage::new(cache, Duration::from_secs(1)).unwrap();
    let app = routes::scrape::router(Arc::new(stage));

    let (status, body) = post_json(app, "/process", json!({ "url": "ftp://example.com" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Invalid request");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn scrape_rejects_missing_url() {
    let cache = Arc::new(MemoryCacheStore::new());
    let stage = ScrapeStage::new(cache, Duration::from_secs(1)).unwrap();
    let app = routes::scrape::router(Arc::new(stage));

    let (status, body) = post_json(app, "/process", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn summarise_rejects_blank_markdown() {
    let cache = Arc::new(MemoryCacheStore::new());
    let model = Arc::new(MockChatModel::replying("unused"));
    let app = routes::summarise::router(Arc::new(SummarizeStage::new(cache, model)));

    let (status, body) = post_json(app, "/process", json!({ "markdown": "   " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Invalid request");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn summarise_returns_model_reply() {
    let cache = Arc::new(MemoryCacheStore::new());
    let model = Arc::new(MockChatModel::replying("A short digest."));
    let app = routes::summarise::router(Arc::new(SummarizeStage::new(cache, model.clone())));

    let (status, body) = post_json(
        app,
        "/process",
        json!({ "markdown": "# Events\n\n## Story Time\n", "characterLimit": 200 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "A short digest.");
    assert_eq!(model.call_count(), 1);
    let (system, _) = model.last_call().unwrap();
    assert!(system.contains("200 characters"));
}

#[tokio::test]
async fn summarise_defaults_character_limit() {
    let cache = Arc::new(MemoryCacheStore::new());
    let model = Arc::new(MockChatModel::replying("A short digest."));
    let app = routes::summarise::router(Arc::new(SummarizeStage::new(cache, model.clone())));

    let (status, _) = post_json(app, "/process", json!({ "markdown": "# Events\n" })).await;

    assert_eq!(status, StatusCode::OK);
    let (system, _) = model.last_call().unwrap();
    assert!(system.contains(&format!("{DEFAULT_CHARACTER_LIMIT} characters")));
}

#[tokio::test]
async fn whatson_returns_full_pipeline_result() {
    let fetcher = Arc::new(MockFetcher::returning(EVENT_PAGE));
    let cache = Arc::new(MemoryCacheStore::new());
    let extractor = Arc::new(ExtractStage::new(cache));
    let summarizer = Arc::new(MockSummarizer::replying("Three events this weekend."));
    let pipeline = Arc::new(Pipeline::new(fetcher, extractor, summarizer));
    let app = routes::whatson::router(pipeline, "https://example.org/whats-on");

    let (status, body) = get_json(app, "/process").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["targetUrl"], "https://example.org/whats-on");
    assert_eq!(body["summary"], "Three events this weekend.");
    assert_eq!(body["familyEvents"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn whatson_surfaces_extract_failure_as_upstream() {
    let fetcher = Arc::new(MockFetcher::returning("<html></html>"));
    let extractor = Arc::new(MockExtractor::failing());
    let summarizer = Arc::new(MockSummarizer::replying("unused"));
    let pipeline = Arc::new(Pipeline::new(fetcher, extractor, summarizer));
    let app = routes::whatson::router(pipeline, "https://example.org/whats-on");

    let (status, body) = get_json(app, "/process").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["title"], "Upstream stage failed");
    assert_eq!(
        body["detail"],
        "upstream error: no events received from extract stage"
    );
}

#[tokio::test]
async fn health_endpoints_respond() {
    let cache = Arc::new(MemoryCacheStore::new());
    let app = routes::extract::router(Arc::new(ExtractStage::new(cache)));

    let (status, body) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
