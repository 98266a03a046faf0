//! Health Check Handlers
//!
//! - `GET /health` - version and a static status
//! - `GET /health/live` - the process answers
//! - `GET /health/ready` - PostgreSQL answers and the image root is writable

use std::path::Path;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::infrastructure::metrics;
use crate::startup::AppState;

static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);
static SERVER_START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Database round trips slower than this report `degraded`.
const SLOW_QUERY_MS: u64 = 100;

/// Pin the uptime origin to server startup
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
    Lazy::force(&SERVER_START_TIME);
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

/// Readiness report
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize)]
pub struct ReadinessChecks {
    pub database: CheckResult,
    pub image_storage: CheckResult,
}

impl ReadinessChecks {
    /// The worst status among the checks.
    fn overall(&self) -> HealthStatus {
        self.database.status.max(self.image_storage.status)
    }
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckResult {
    fn failed(message: String) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            latency_ms: None,
            message: Some(message),
        }
    }
}

/// Ordered from best to worst.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// 200 while the board can serve posts and store images, 503 otherwise
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let checks = ReadinessChecks {
        database: check_database(&state).await,
        image_storage: check_image_root(state.uploader.root()).await,
    };

    let idle = state.db.num_idle() as u32;
    metrics::update_db_pool_stats(
        idle,
        state.db.size().saturating_sub(idle),
        state.settings.database.max_connections,
    );

    let status = checks.overall();
    let code = if status == HealthStatus::Unhealthy {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        code,
        Json(ReadinessResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds: SERVER_START.elapsed().as_secs(),
            started_at: SERVER_START_TIME.to_rfc3339(),
            checks,
        }),
    )
}

async fn check_database(state: &AppState) -> CheckResult {
    let start = Instant::now();
    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => {
            let latency = start.elapsed().as_millis() as u64;
            CheckResult {
                status: if latency < SLOW_QUERY_MS {
                    HealthStatus::Healthy
                } else {
                    HealthStatus::Degraded
                },
                latency_ms: Some(latency),
                message: None,
            }
        }
        Err(e) => CheckResult::failed(format!("Database connection failed: {}", e)),
    }
}

/// Uploads need an existing, writable directory.
async fn check_image_root(root: &Path) -> CheckResult {
    match tokio::fs::metadata(root).await {
        Ok(meta) if !meta.is_dir() => {
            CheckResult::failed(format!("{} is not a directory", root.display()))
        }
        Ok(meta) if meta.permissions().readonly() => {
            CheckResult::failed(format!("{} is read-only", root.display()))
        }
        Ok(_) => CheckResult {
            status: HealthStatus::Healthy,
            latency_ms: None,
            message: None,
        },
        Err(e) => CheckResult::failed(format!("Image root {} unavailable: {}", root.display(), e)),
    }
}
