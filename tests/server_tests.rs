//! Integration tests for the HTTP endpoint.
//!
//! These exercise the router end to end over a real listener, with mock
//! sources standing in for the external providers.

use std::sync::Arc;

use serde_json::{json, Value};

use exus_search::models::{ResultKind, SourceName};
use exus_search::server::{build_router, AppState};
use exus_search::sources::mock::{make_result, MockSource};
use exus_search::sources::{Source, SourceRegistry, TrendFetcher};
use exus_search::utils::HttpClient;

fn http_client() -> Arc<HttpClient> {
    Arc::new(HttpClient::new().unwrap())
}

/// A trend fetcher pointed at nothing; tests that never take the trends
/// branch still need one in the state.
fn dead_trends() -> Arc<TrendFetcher> {
    Arc::new(TrendFetcher::with_base_url(
        http_client(),
        String::new(),
        "http://127.0.0.1:9",
    ))
}

fn state_with_registry(registry: SourceRegistry) -> AppState {
    AppState::new(Arc::new(registry), dead_trends(), None)
}

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_server(state: AppState) -> String {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn options_preflight_gets_cors_headers() {
    let base = spawn_server(state_with_registry(SourceRegistry::from_groups(
        Vec::new(),
        Vec::new(),
    )))
    .await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, &base)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
    assert_eq!(
        response.headers()["access-control-allow-headers"],
        "authorization, x-client-info, apikey, content-type"
    );
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_body_maps_to_500_error_shape() {
    let base = spawn_server(state_with_registry(SourceRegistry::from_groups(
        Vec::new(),
        Vec::new(),
    )))
    .await;

    let response = reqwest::Client::new()
        .post(&base)
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch results");
    assert!(!body["details"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn all_sources_failing_still_returns_200_with_empty_papers() {
    let broken = MockSource::new("broken", SourceName::Arxiv, ResultKind::Research);
    broken.set_failing(true);
    let registry =
        SourceRegistry::from_groups(vec![Arc::new(broken) as Arc<dyn Source>], Vec::new());
    let base = spawn_server(state_with_registry(registry)).await;

    let response = reqwest::Client::new()
        .post(&base)
        .json(&json!({"query": "anything"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["papers"], json!([]));
}

#[tokio::test]
async fn research_mode_only_reaches_the_research_group() {
    let research = MockSource::new("research", SourceName::Arxiv, ResultKind::Research);
    research.set_results(vec![make_result(
        "https://arxiv.org/abs/1",
        "paper",
        SourceName::Arxiv,
        ResultKind::Research,
    )]);
    let web = MockSource::new("web", SourceName::Wikipedia, ResultKind::Web);
    web.set_results(vec![make_result(
        "https://en.wikipedia.org/wiki/X",
        "article",
        SourceName::Wikipedia,
        ResultKind::Web,
    )]);

    let registry = SourceRegistry::from_groups(
        vec![Arc::new(research) as Arc<dyn Source>],
        vec![Arc::new(web) as Arc<dyn Source>],
    );
    let base = spawn_server(state_with_registry(registry)).await;

    let response = reqwest::Client::new()
        .post(&base)
        .json(&json!({"query": "x", "type": "research"}))
        .send()
        .await
        .unwrap();

    let body: Value = response.json().await.unwrap();
    let papers = body["papers"].as_array().unwrap();
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0]["source"], "arXiv");
    assert_eq!(papers[0]["type"], "research");
}

#[tokio::test]
async fn url_collision_keeps_later_value_and_ranking_applies() {
    let research = MockSource::new("research", SourceName::Arxiv, ResultKind::Research);
    let mut early = make_result(
        "https://shared.example/doc",
        "from arxiv",
        SourceName::Arxiv,
        ResultKind::Research,
    );
    early.abstract_text = "mentions deep learning".to_string();
    research.set_results(vec![early]);

    let web = MockSource::new("web", SourceName::Jstor, ResultKind::Web);
    web.set_results(vec![
        make_result(
            "https://shared.example/doc",
            "from jstor",
            SourceName::Jstor,
            ResultKind::Web,
        ),
        make_result(
            "https://other.example/deep-learning",
            "deep learning survey",
            SourceName::Jstor,
            ResultKind::Web,
        ),
    ]);

    let registry = SourceRegistry::from_groups(
        vec![Arc::new(research) as Arc<dyn Source>],
        vec![Arc::new(web) as Arc<dyn Source>],
    );
    let base = spawn_server(state_with_registry(registry)).await;

    let response = reqwest::Client::new()
        .post(&base)
        .json(&json!({"query": "deep learning", "type": "all"}))
        .send()
        .await
        .unwrap();

    let body: Value = response.json().await.unwrap();
    let papers = body["papers"].as_array().unwrap();
    assert_eq!(papers.len(), 2);

    // Title match (3.0) outranks the collided entry, which lost its
    // research payload to the later web write and scores 0.
    assert_eq!(papers[0]["title"], "deep learning survey");
    assert_eq!(papers[1]["title"], "from jstor");
    assert_eq!(papers[1]["source"], "JSTOR");
    assert_eq!(papers[1]["type"], "web");
}

#[tokio::test]
async fn trends_failure_downgrades_to_empty_list() {
    let mut upstream = mockito::Server::new_async().await;
    upstream
        .mock("GET", "/search.json")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let trends = Arc::new(TrendFetcher::with_base_url(
        http_client(),
        "k".to_string(),
        upstream.url(),
    ));
    let state = AppState::new(
        Arc::new(SourceRegistry::from_groups(Vec::new(), Vec::new())),
        trends,
        None,
    );
    let base = spawn_server(state).await;

    let response = reqwest::Client::new()
        .post(&base)
        .json(&json!({"type": "trends"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["trends"], json!([]));
}

#[tokio::test]
async fn trends_entries_pass_through_verbatim() {
    let mut upstream = mockito::Server::new_async().await;
    upstream
        .mock("GET", "/search.json")
        .match_query(mockito::Matcher::Any)
        .with_body(r#"{"daily_trends":[{"query":"eclipse","extra":{"deep":1}}]}"#)
        .create_async()
        .await;

    let trends = Arc::new(TrendFetcher::with_base_url(
        http_client(),
        "k".to_string(),
        upstream.url(),
    ));
    let state = AppState::new(
        Arc::new(SourceRegistry::from_groups(Vec::new(), Vec::new())),
        trends,
        None,
    );
    let base = spawn_server(state).await;

    let response = reqwest::Client::new()
        .post(&base)
        .json(&json!({"type": "trends"}))
        .send()
        .await
        .unwrap();

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["trends"],
        json!([{"query": "eclipse", "extra": {"deep": 1}}])
    );
}

#[tokio::test]
async fn configured_bearer_token_is_enforced() {
    let state = AppState::new(
        Arc::new(SourceRegistry::from_groups(Vec::new(), Vec::new())),
        dead_trends(),
        Some("secret".to_string()),
    );
    let base = spawn_server(state).await;
    let client = reqwest::Client::new();

    let denied = client
        .post(&base)
        .json(&json!({"query": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status(), 401);
    let body: Value = denied.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch results");

    let allowed = client
        .post(&base)
        .bearer_auth("secret")
        .json(&json!({"query": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.status(), 200);
}
