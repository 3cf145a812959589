//! Countries HTTP service.
//!
//! # Endpoints
//!
//! - `GET /countries?search=<query>` - search by name, code, or currency code
//! - `GET /country/{code}` - details for one country
//! - `GET /route?start=<code>&end=<code>` - shortest land-border route
//! - `GET /metrics` - Prometheus metrics
//! - `GET /health/live`, `GET /health/ready` - probes
//!
//! # Configuration
//!
//! - `COUNTRIES_DATASET_URL` - upstream dataset URL
//! - `COUNTRIES_DATASET_SOURCE` - local JSON file used instead of the upstream
//! - `COUNTRIES_FETCH_TIMEOUT_SECS` - upstream timeout (default: 30)
//! - `COUNTRIES_PRELOAD` - load the dataset before serving (default: true)
//! - `SERVICE_PORT` - HTTP port (default: 3000)
//! - `RUST_LOG`, `LOG_FORMAT` - see [`countries_service::logging`]
//! - `METRICS_ENABLED` - set to `false` to disable the recorder

use std::env;
use std::net::SocketAddr;

use tracing::{error, info, warn};

use countries_service::{init_logging, init_metrics, router, AppState, LoggingConfig, MetricsConfig};

const DEFAULT_PORT: u16 = 3000;

fn preload_enabled() -> bool {
    env::var("COUNTRIES_PRELOAD")
        .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no"))
        .unwrap_or(true)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env();
    init_logging(&logging_config);

    if let Err(e) = init_metrics(&MetricsConfig::from_env()) {
        warn!(error = %e, "metrics recorder not installed, continuing without metrics");
    }

    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT);

    info!(service = %logging_config.service, port, "starting countries service");

    let state = AppState::from_env().map_err(|e| {
        error!(error = %e, "failed to configure dataset source");
        e
    })?;

    if preload_enabled() {
        // A failed preload is not fatal; the next query retries the fetch.
        match state.service().snapshot().await {
            Ok(snapshot) => info!(countries = snapshot.len(), "dataset preloaded"),
            Err(e) => warn!(error = %e, "dataset preload failed"),
        }
    }

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
