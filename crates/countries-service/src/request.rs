//! Query-string types and validation for the HTTP endpoints.
//!
//! Parameters are optional at the deserialization layer so that a missing
//! parameter becomes a problem response from [`Validate`] rather than an
//! extractor rejection.

use serde::{Deserialize, Serialize};

use crate::ProblemDetails;

/// Validation trait for request types.
pub trait Validate {
    /// Check required fields, tagging any problem with `request_id`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

fn require(name: &str, value: Option<&str>, request_id: &str) -> Result<(), Box<ProblemDetails>> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(Box::new(ProblemDetails::missing_parameter(name, request_id))),
    }
}

/// `GET /countries?search=<query>`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    pub fn query(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}

impl Validate for SearchQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require("search", self.search.as_deref(), request_id)
    }
}

/// `GET /route?start=<code>&end=<code>`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RouteQuery {
    pub fn start(&self) -> &str {
        self.start.as_deref().unwrap_or_default()
    }

    pub fn end(&self) -> &str {
        self.end.as_deref().unwrap_or_default()
    }
}

impl Validate for RouteQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require("start", self.start.as_deref(), request_id)?;
        require("end", self.end.as_deref(), request_id)
    }
}
