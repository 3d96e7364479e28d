//! Analytics API Module (admin)

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/analytics",
        get(handler::report).route_layer(middleware::from_fn(require_admin)),
    )
}
