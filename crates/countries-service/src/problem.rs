//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Every non-2xx response from the query routes uses this shape.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use countries_lib::Error as LibError;

/// Problem type URI for unknown country codes.
pub const PROBLEM_UNKNOWN_COUNTRY: &str = "/problems/unknown-country";

/// Problem type URI for missing or blank request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for an unavailable upstream dataset.
pub const PROBLEM_DATASET_UNAVAILABLE: &str = "/problems/dataset-unavailable";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use countries_service::{ProblemDetails, PROBLEM_UNKNOWN_COUNTRY};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_UNKNOWN_COUNTRY,
///     "Unknown Country",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("Country 'XYZ' not found")
/// .with_request_id("req-12345");
/// assert_eq!(problem.status, 404);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request ID of the failing request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Always "application/problem+json".
    pub content_type: String,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: "application/problem+json".to_string(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 for a missing or blank query parameter.
    pub fn missing_parameter(name: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(format!("The '{name}' parameter is required and cannot be empty"))
        .with_request_id(request_id)
    }

    /// 404 for a code absent from the dataset.
    pub fn unknown_country(
        code: &str,
        suggestions: &[String],
        request_id: impl Into<String>,
    ) -> Self {
        let detail = if suggestions.is_empty() {
            format!("Country '{code}' not found")
        } else {
            format!(
                "Country '{code}' not found. Did you mean: {}?",
                suggestions.join(", ")
            )
        };

        Self::new(
            PROBLEM_UNKNOWN_COUNTRY,
            "Unknown Country",
            StatusCode::NOT_FOUND,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 503 when the dataset could not be loaded.
    pub fn dataset_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_DATASET_UNAVAILABLE,
            "Dataset Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.detail.as_deref().unwrap_or(""))
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        *response.status_mut() = status;
        response
    }
}

/// Map a library error onto its HTTP problem.
///
/// `MissingParameter` is 400, `UnknownCountry` is 404, and any fetch failure
/// is 503. The fetch error text is passed through unchanged.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::MissingParameter { name } => ProblemDetails::missing_parameter(name, request_id),
        LibError::UnknownCountry { code, suggestions } => {
            ProblemDetails::unknown_country(code, suggestions, request_id)
        }
        LibError::Fetch(fetch) => ProblemDetails::dataset_unavailable(fetch.to_string(), request_id),
    }
}
