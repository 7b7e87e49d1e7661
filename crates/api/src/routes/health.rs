//! Liveness probe routes.

use axum::extract::{Path, Query, State};
use axum::{routing::get, Json, Router};
use marquee_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Mirrors the HTTP status, for clients that only log the body.
    pub status: u16,
    pub status_message: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Current server time, UTC.
    pub timestamp: Timestamp,
    /// Configured bind address.
    pub address: String,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Echo of the `?echo=` query parameter.
    pub echo: Option<String>,
    /// Echo of the path segment on `/health/{path_echo}`.
    pub path_echo: Option<String>,
}

#[derive(Deserialize)]
pub struct HealthParams {
    pub echo: Option<String>,
}

async fn make_health(
    state: &AppState,
    echo: Option<String>,
    path_echo: Option<String>,
) -> HealthResponse {
    let db_healthy = marquee_db::health_check(&state.pool).await.is_ok();

    HealthResponse {
        status: 200,
        status_message: "OK",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now(),
        address: state.config.bind_address(),
        db_healthy,
        echo,
        path_echo,
    }
}

/// GET /health
async fn health_check(
    State(state): State<AppState>,
    Query(params): Query<HealthParams>,
) -> Json<HealthResponse> {
    Json(make_health(&state, params.echo, None).await)
}

/// GET /health/{path_echo}
async fn health_check_with_path(
    State(state): State<AppState>,
    Path(path_echo): Path<String>,
    Query(params): Query<HealthParams>,
) -> Json<HealthResponse> {
    Json(make_health(&state, params.echo, Some(path_echo)).await)
}

/// Mount health check routes at root level.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/{path_echo}", get(health_check_with_path))
}
