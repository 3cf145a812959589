//! Response wrapper for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Successful payload plus its content type, mirroring [`crate::ProblemDetails`].
///
/// The payload's fields are flattened into the top-level object, so `T` must
/// serialize as a map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,

    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Hops {
        hops: usize,
        route: Vec<String>,
    }

    #[test]
    fn payload_fields_are_flattened() {
        let response = ServiceResponse::new(Hops {
            hops: 1,
            route: vec!["United Kingdom".to_string(), "Ireland".to_string()],
        });
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"hops\":1"));
        assert!(json.contains("\"route\":["));
        assert!(json.contains("\"content_type\":\"application/json\""));
        assert!(!json.contains("\"data\""));
    }

    #[test]
    fn round_trips_through_from() {
        let data = Hops {
            hops: 0,
            route: Vec::new(),
        };
        let response: ServiceResponse<Hops> = data.clone().into();
        assert_eq!(response.data, data);
    }
}
