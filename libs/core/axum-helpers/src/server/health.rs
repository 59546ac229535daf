use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use core_config::{AppInfo, Environment};
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Value, json};
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

/// Liveness payload served by `/health`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub environment: &'static str,
    pub uptime_secs: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone)]
struct HealthState {
    app: AppInfo,
    environment: Environment,
    started_at: Instant,
}

/// A boxed future for health checks with a string error
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs multiple health checks concurrently and returns aggregated results.
///
/// The body is `{"status": "ready" | "not ready", "<name>": "connected" | "disconnected", ...}`.
///
/// # Example
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
///     "mongodb",
///     Box::pin(async {
///         ping(&client).await.map_err(|e| e.to_string())
///     }),
/// )];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let names: Vec<_> = checks.iter().map(|(name, _)| *name).collect();
    let futures: Vec<_> = checks.into_iter().map(|(_, check)| check).collect();
    let results = join_all(futures).await;

    let mut response = serde_json::Map::new();
    let mut all_healthy = true;

    for (name, result) in names.into_iter().zip(results) {
        let status = match result {
            Ok(_) => "connected",
            Err(e) => {
                tracing::error!("Readiness check failed: {} error: {:?}", name, e);
                all_healthy = false;
                "disconnected"
            }
        };
        response.insert(name.to_string(), json!(status));
    }

    response.insert(
        "status".to_string(),
        json!(if all_healthy { "ready" } else { "not ready" }),
    );

    let body = Json(Value::Object(response));
    if all_healthy {
        Ok((StatusCode::OK, body))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, body))
    }
}

async fn health_handler(State(state): State<HealthState>) -> Response {
    let response = HealthResponse {
        status: "OK",
        name: state.app.name,
        version: state.app.version,
        environment: state.environment.as_str(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        timestamp: Utc::now(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Creates a router with the `/health` liveness endpoint.
///
/// Always answers 200 while the process is running; uptime counts from the
/// moment this router is built.
///
/// # Example
/// ```ignore
/// use axum_helpers::health_router;
/// use core_config::{Environment, app_info};
///
/// let app = Router::new().merge(health_router(app_info!(), Environment::from_env()));
/// ```
pub fn health_router(app_info: AppInfo, environment: Environment) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(HealthState {
            app: app_info,
            environment,
            started_at: Instant::now(),
        })
}
