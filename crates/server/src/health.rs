use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sqlx::{Pool, Postgres};
use std::sync::OnceLock;
use std::time::Instant;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: String,
    pub db: String,
    pub uptime_seconds: u64,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(pool): State<Pool<Postgres>>) -> (StatusCode, Json<HealthResponse>) {
    let db = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await;

    let (code, status, db) = match db {
        Ok(_) => (StatusCode::OK, "ok", "connected".to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not reach the database");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", format!("error: {e}"))
        }
    };

    let uptime_seconds = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            db,
            uptime_seconds,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
