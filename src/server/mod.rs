//! HTTP server: router, CORS, dispatch and top-level error wrapping.
//!
//! One route. Browser clients talk to it directly, so every response,
//! success or failure, carries the permissive CORS headers. Failures map
//! to a single JSON error shape with status 500; partial provider outages
//! are not failures and still produce 200 with whatever survived.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use axum::Router;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{SearchMode, SearchRequest};
use crate::pipeline;
use crate::sources::{SourceRegistry, TrendFetcher};
use crate::utils::HttpClient;

const GENERIC_ERROR: &str = "Failed to fetch results";

/// Shared state for all request handlers, immutable after startup.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<SourceRegistry>,
    trends: Arc<TrendFetcher>,
    bearer_token: Option<String>,
}

impl AppState {
    /// Create the handler state.
    pub fn new(
        registry: Arc<SourceRegistry>,
        trends: Arc<TrendFetcher>,
        bearer_token: Option<String>,
    ) -> Self {
        Self {
            registry,
            trends,
            bearer_token,
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handle_search).options(handle_preflight))
        .with_state(state)
}

/// Bind the configured address and serve until the process is stopped.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let client = Arc::new(HttpClient::new()?);
    let registry = Arc::new(SourceRegistry::new(&config, client.clone())?);
    let trends = Arc::new(TrendFetcher::new(client, config.api_keys.serpapi.clone()));
    let state = AppState::new(registry, trends, config.server.bearer_token.clone());

    let app = build_router(state);
    let listener = TcpListener::bind(&config.server.bind).await?;
    info!(addr = %config.server.bind, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install shutdown handler");
        return;
    }
    info!("shutting down");
}

fn cors_headers() -> [(HeaderName, &'static str); 2] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "authorization, x-client-info, apikey, content-type",
        ),
    ]
}

fn error_response(status: StatusCode, details: String) -> Response {
    (
        status,
        cors_headers(),
        Json(json!({ "error": GENERIC_ERROR, "details": details })),
    )
        .into_response()
}

fn bearer_authorized(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == expected)
}

async fn handle_preflight() -> Response {
    (StatusCode::OK, cors_headers(), ()).into_response()
}

async fn handle_search(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(expected) = &state.bearer_token {
        if !bearer_authorized(&headers, expected) {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "missing or invalid bearer token".to_string(),
            );
        }
    }

    // Deserialized by hand so a malformed body maps to the one error shape
    // instead of the framework's rejection status.
    let request: SearchRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    if request.mode == SearchMode::Trends {
        let trends = match state.trends.fetch().await {
            Ok(trends) => trends,
            Err(e) => {
                warn!(error = %e, "trend fetch failed, returning empty");
                Vec::new()
            }
        };
        return (StatusCode::OK, cors_headers(), Json(json!({ "trends": trends })))
            .into_response();
    }

    let papers = pipeline::run(&state.registry, request.mode, &request.query).await;
    (StatusCode::OK, cors_headers(), Json(json!({ "papers": papers }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_authorized() {
        let mut headers = HeaderMap::new();
        assert!(!bearer_authorized(&headers, "secret"));

        headers.insert(header::AUTHORIZATION, "Bearer secret".parse().unwrap());
        assert!(bearer_authorized(&headers, "secret"));
        assert!(!bearer_authorized(&headers, "other"));

        headers.insert(header::AUTHORIZATION, "Basic secret".parse().unwrap());
        assert!(!bearer_authorized(&headers, "secret"));
    }
}
