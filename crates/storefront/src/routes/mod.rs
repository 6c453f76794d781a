//! HTTP routes for the dev server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health         - Health check
//! GET  /theme.json     - Theme palette
//!
//! # Dev proxy (any method)
//! /user*               - Forwarded to the local backend
//! /admin*              - Forwarded to the local backend
//! ```
//!
//! Anything else is a 404.

use axum::{
    Json, Router,
    extract::{Request, State},
    middleware,
    response::Response,
    routing::get,
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::Result;
use crate::middleware::request_id_middleware;
use crate::state::AppState;
use crate::theme::{THEME, Theme};

/// Build the dev server router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/theme.json", get(theme))
        .fallback(proxy)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Serve the theme palette.
async fn theme() -> Json<Theme> {
    Json(THEME)
}

/// Forward everything else through the dev proxy.
async fn proxy(State(state): State<AppState>, request: Request) -> Result<Response> {
    state.proxy().forward(request).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::DevServerConfig;
    use crate::middleware::REQUEST_ID_HEADER;
    use crate::theme::{PRIMARY_MAIN, SECONDARY_MAIN};

    fn test_app() -> Router {
        let config = DevServerConfig::from_lookup(|_| None).unwrap();
        app(AppState::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_theme_json() {
        let response = test_app()
            .oneshot(Request::get("/theme.json").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["palette"]["primary"]["main"], PRIMARY_MAIN);
        assert_eq!(value["palette"]["secondary"]["main"], SECONDARY_MAIN);
    }

    #[tokio::test]
    async fn test_unmatched_path_is_not_found() {
        let response = test_app()
            .oneshot(Request::get("/cart").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let response = test_app()
            .oneshot(
                Request::get("/health")
                    .header(REQUEST_ID_HEADER, "req-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).unwrap(),
            "req-123"
        );
    }
}
