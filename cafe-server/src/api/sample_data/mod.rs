//! Sample data API Module
//!
//! `POST /api/init-sample-data` is public and only writes into an empty menu.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/init-sample-data", post(handler::init_sample_data))
}
