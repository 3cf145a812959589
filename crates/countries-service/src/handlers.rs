//! Query endpoints and the router that mounts them.
//!
//! Handlers are thin: validate the query string, call [`countries_lib`]
//! through [`AppState::service`], and project the result.

use axum::{
    extract::{Path, Query, State},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::{debug, warn};

use countries_lib::Error as LibError;

use crate::health::{health_live, health_ready};
use crate::metrics::{
    metrics_handler, record_detail_lookup, record_request_failed, record_route_planned,
    record_search,
};
use crate::middleware::{track_request, RequestId};
use crate::problem::{from_lib_error, ProblemDetails};
use crate::request::{RouteQuery, SearchQuery, Validate};
use crate::response::ServiceResponse;
use crate::views::{CountryDetail, RouteResponse, SearchResult};
use crate::AppState;

/// Every route, wrapped in request tracking and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/countries", get(search_handler))
        .route("/country/{code}", get(detail_handler))
        .route("/route", get(route_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(middleware::from_fn(track_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::MissingParameter { .. } => "missing_parameter",
        LibError::UnknownCountry { .. } => "unknown_country",
        LibError::Fetch(_) => "dataset_unavailable",
    }
}

fn lib_failure(endpoint: &'static str, error: &LibError, request_id: &RequestId) -> Response {
    warn!(endpoint, error = %error, "query failed");
    record_request_failed(endpoint, failure_reason(error));
    from_lib_error(error, request_id.as_str()).into_response()
}

fn invalid(endpoint: &'static str, problem: Box<ProblemDetails>) -> Response {
    record_request_failed(endpoint, "missing_parameter");
    (*problem).into_response()
}

/// `GET /countries?search=<query>`
async fn search_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Response {
    if let Err(problem) = query.validate(request_id.as_str()) {
        return invalid("search", problem);
    }

    match state.service().search(query.query()).await {
        Ok(countries) => {
            record_search(countries.len());
            debug!(query = query.query(), matches = countries.len(), "search served");
            let results: Vec<SearchResult> = countries.iter().map(SearchResult::from).collect();
            Json(results).into_response()
        }
        Err(e) => lib_failure("search", &e, &request_id),
    }
}

/// `GET /country/{code}`
async fn detail_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(code): Path<String>,
) -> Response {
    match state.service().country(&code).await {
        Ok(country) => {
            record_detail_lookup(true);
            ServiceResponse::new(CountryDetail::from(&country)).into_response()
        }
        Err(e) => {
            if matches!(e, LibError::UnknownCountry { .. }) {
                record_detail_lookup(false);
            }
            lib_failure("detail", &e, &request_id)
        }
    }
}

/// `GET /route?start=<code>&end=<code>`
async fn route_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RouteQuery>,
) -> Response {
    if let Err(problem) = query.validate(request_id.as_str()) {
        return invalid("route", problem);
    }

    match state.service().route(query.start(), query.end()).await {
        Ok(outcome) => {
            record_route_planned(outcome.hop_count());
            debug!(
                start = query.start(),
                end = query.end(),
                hops = ?outcome.hop_count(),
                "route served"
            );
            ServiceResponse::new(RouteResponse::from(&outcome)).into_response()
        }
        Err(e) => lib_failure("route", &e, &request_id),
    }
}
