//! Prometheus metrics for the countries service.
//!
//! HTTP-level counters are recorded by [`crate::middleware::track_request`];
//! this module owns the recorder and the business metrics.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// `METRICS_ENABLED`: anything but "false" enables metrics (default: true).
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Self { enabled }
    }
}

/// Install the global Prometheus recorder. Only the first call succeeds.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// `GET /metrics` in Prometheus exposition format.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => write!(f, "failed to install metrics recorder: {e}"),
        }
    }
}

impl std::error::Error for MetricsError {}

// Business metrics

/// `countries_searches_total` and the `countries_search_matches` histogram.
pub fn record_search(matches: usize) {
    metrics::counter!("countries_searches_total").increment(1);
    metrics::histogram!("countries_search_matches").record(matches as f64);
}

/// `countries_detail_lookups_total`, labelled by whether the code was known.
pub fn record_detail_lookup(found: bool) {
    let result = if found { "found" } else { "unknown" };
    metrics::counter!("countries_detail_lookups_total", "result" => result).increment(1);
}

/// `countries_routes_planned_total`, labelled `found` or `no_route`; found
/// routes also record their hop count.
pub fn record_route_planned(hops: Option<usize>) {
    let outcome = if hops.is_some() { "found" } else { "no_route" };
    metrics::counter!("countries_routes_planned_total", "outcome" => outcome).increment(1);
    if let Some(hops) = hops {
        metrics::histogram!("countries_route_hops").record(hops as f64);
    }
}

/// `countries_requests_failed_total` by endpoint and reason.
pub fn record_request_failed(endpoint: &'static str, reason: &'static str) {
    metrics::counter!(
        "countries_requests_failed_total",
        "endpoint" => endpoint,
        "reason" => reason
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        assert!(MetricsConfig::default().enabled);
    }

    #[test]
    fn disabled_config_is_rejected() {
        let config = MetricsConfig { enabled: false };
        assert_eq!(init_metrics(&config), Err(MetricsError::Disabled));
    }

    #[tokio::test]
    async fn handler_renders_without_recorder() {
        let output = metrics_handler().await;
        assert_eq!(output, "# Metrics not initialized\n");
    }

    #[test]
    fn business_helpers_do_not_panic_without_recorder() {
        record_search(4);
        record_detail_lookup(true);
        record_detail_lookup(false);
        record_route_planned(Some(3));
        record_route_planned(None);
        record_request_failed("route", "unknown_country");
    }

    #[test]
    fn error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert!(MetricsError::InstallFailed("boom".to_string())
            .to_string()
            .contains("boom"));
    }
}
