//! HTTP API
//!
//! - [`health`] - liveness probe
//! - [`auth`] - signup, login, current profile
//! - [`menu`] - menu browsing and admin management
//! - [`orders`] - order placement and status changes
//! - [`analytics`] - sales dashboard (admin)
//! - [`sample_data`] - sample menu seeding
//!
//! Request bodies go through [`JsonBody`] so shape errors use the error
//! envelope.

pub mod analytics;
pub mod auth;
pub mod extract;
pub mod health;
pub mod menu;
pub mod orders;
pub mod sample_data;

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::middleware;

pub use extract::JsonBody;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator (UUID v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public
        .merge(health::router())
        .merge(sample_data::router())
        // Signup/login public, /me requires a token
        .merge(auth::router())
        // Reads public, writes admin
        .merge(menu::router())
        // Authenticated
        .merge(orders::router())
        // Admin
        .merge(analytics::router())
}

/// Build the fully configured application with all middleware
///
/// Used by the HTTP server and by integration tests. Layers listed later wrap
/// the earlier ones, so CORS and the request id see every response, including
/// authentication failures.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // ========== Inner: per-request handling ==========
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        .layer(CompressionLayer::new())
        // Request logging, sees CurrentUser injected by require_auth
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        // ========== Authentication ==========
        // JWT verification, injects CurrentUser
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        // ========== Outer: request id and CORS ==========
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(CorsLayer::permissive())
}
