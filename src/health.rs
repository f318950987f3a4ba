//! Liveness and readiness endpoints. `/healthz` reports static service
//! identity; `/readyz` pings the database with a short timeout and reports
//! degraded status when it does not answer in time.

use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::DatabaseConnection;
use serde_json::json;

const READINESS_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub version: String,
}

pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api",
        "version": state.version,
    }))
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = matches!(
        tokio::time::timeout(READINESS_TIMEOUT, state.db.ping()).await,
        Ok(Ok(()))
    );

    let (status, status_text) = if db_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    let body = json!({
        "status": status_text,
        "db": if db_ok { "up" } else { "down" },
    });
    (status, Json(body))
}
