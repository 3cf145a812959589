//! HTTP surface for the countries library.
//!
//! - [`router`]: `/countries`, `/country/{code}`, `/route`, health probes, `/metrics`
//! - [`AppState`]: one [`countries_lib::CountryService`] shared by all handlers
//! - [`ProblemDetails`]: RFC 9457 error bodies
//! - [`ServiceResponse`]: success wrapper carrying a content type
//! - [`logging`], [`metrics`], [`middleware`]: observability plumbing
//!
//! Handlers hold no business logic; search, lookup, routing, and the
//! single-flight dataset cache all live in `countries-lib`.

#![deny(warnings)]

mod handlers;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;
mod views;

#[cfg(test)]
mod test_utils;

pub use handlers::router;
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{init_metrics, metrics_handler, MetricsConfig, MetricsError};
pub use middleware::{extract_or_generate_request_id, track_request, RequestId};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_DATASET_UNAVAILABLE, PROBLEM_INVALID_REQUEST,
    PROBLEM_UNKNOWN_COUNTRY,
};
pub use request::{RouteQuery, SearchQuery, Validate};
pub use response::ServiceResponse;
pub use state::AppState;
pub use views::{CountryDetail, RouteResponse, SearchResult};
