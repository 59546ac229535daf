//! Readiness endpoint backed by a real MongoDB ping.

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

/// Create the readiness router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(state)
}

/// Readiness check endpoint.
///
/// 200 with `{"mongodb": "connected", "status": "ready"}` when the server
/// answers a ping, 503 otherwise.
async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "mongodb",
        Box::pin(async {
            let health = database::mongodb::check_health_detailed(&state.mongo_client).await;
            tracing::debug!(latency_ms = health.response_time_ms, "MongoDB ping");

            if health.healthy {
                Ok(())
            } else {
                Err(health
                    .message
                    .unwrap_or_else(|| "MongoDB ping failed".to_string()))
            }
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
