//! Liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

const SERVICE: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Body of both probe endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok", or "not_ready: <reason>".
    pub status: String,
    pub service: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries_loaded: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_edges: Option<usize>,
}

impl HealthStatus {
    pub fn alive() -> Self {
        Self {
            status: "ok".to_string(),
            service: SERVICE.to_string(),
            version: VERSION.to_string(),
            countries_loaded: None,
            border_edges: None,
        }
    }

    pub fn ready(countries: usize, edges: usize) -> Self {
        Self {
            countries_loaded: Some(countries),
            border_edges: Some(edges),
            ..Self::alive()
        }
    }

    pub fn not_ready(reason: &str) -> Self {
        Self {
            status: format!("not_ready: {reason}"),
            ..Self::alive()
        }
    }
}

/// `GET /health/live`: the process is up.
pub async fn health_live() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthStatus::alive()))
}

/// `GET /health/ready`: 200 once a snapshot is cached, 503 before that.
///
/// The probe never triggers a fetch itself.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let cache = state.service().cache();
    match cache.cached() {
        Some(snapshot) => {
            let status = HealthStatus::ready(snapshot.len(), snapshot.graph().edge_count());
            (StatusCode::OK, Json(status)).into_response()
        }
        None => {
            let reason = if cache.is_loading() {
                "dataset loading"
            } else {
                "dataset not loaded"
            };
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus::not_ready(reason)),
            )
                .into_response()
        }
    }
}
