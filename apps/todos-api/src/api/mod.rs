//! API routes module
//!
//! This module defines all HTTP API routes for the StickyTasks API.

pub mod health;
pub mod todos;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/todos", todos::router(state))
        .merge(health::router(state.clone()))
}

/// Routes served outside `/api`
pub fn root_routes() -> Router {
    Router::new().route("/", get(welcome))
}

async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "StickyTasks API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
