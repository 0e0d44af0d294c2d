//! HTTP route handlers.
//!
//! `/echo` reflects a JSON body and `/health` is the liveness probe. Anything
//! else, including a known path with the wrong method, is a plain 404.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod echo;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CACHE_CONTROL, HeaderValue, StatusCode},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    decompression::RequestDecompressionLayer, set_header::SetResponseHeaderLayer,
};

use crate::config::{HttpServerConfig, CACHE_CONTROL_HEALTH};
use crate::middleware::request_id_layer;

/// Empty 404, shared by unknown paths and unsupported methods.
async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Creates the Axum router with both routes.
pub fn create_router(config: &HttpServerConfig) -> Router {
    let echo_routes = Router::new()
        .route("/echo", post(echo::echo).fallback(not_found))
        // Limit is enforced by the extractor, on the inflated body
        .route_layer(DefaultBodyLimit::max(config.body_limit_bytes))
        // gzip/deflate are inflated; other encodings reach the extractor untouched
        .route_layer(RequestDecompressionLayer::new().pass_through_unaccepted(true));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new()
        .route("/health", get(health::health).fallback(not_found))
        .route_layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    Router::new()
        .merge(echo_routes)
        .merge(health_routes)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
