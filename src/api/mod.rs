//! HTTP API handlers served next to the rendered app.

use std::sync::OnceLock;
use std::time::Instant;

use axum::Json;
use serde::Serialize;

static STARTED_AT: OnceLock<Instant> = OnceLock::new();

/// Record the process start; later calls keep the first instant.
pub fn mark_started() {
    STARTED_AT.get_or_init(Instant::now);
}

fn uptime_secs() -> u64 {
    STARTED_AT.get().map_or(0, |started| started.elapsed().as_secs())
}

/// General status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// GET /status - Service health check
pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "survex-web",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: uptime_secs(),
    })
}

/// Routes mounted beside the Dioxus app router.
pub fn router() -> axum::Router {
    axum::Router::new().route("/status", axum::routing::get(status_handler))
}
