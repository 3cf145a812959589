use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Convenient result alias for the countries library.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to obtain the country dataset from its source.
///
/// The error is `Clone` so that a single failed fetch can be handed to every
/// caller that was waiting on it. Non-clonable causes are kept behind `Arc`.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The HTTP request could not be completed (connection, TLS, timeout).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Arc<reqwest::Error>,
    },

    /// The upstream answered with a non-success status code.
    #[error("upstream {url} responded with status {status}")]
    Status { url: String, status: u16 },

    /// The payload could not be decoded as a list of countries.
    #[error("failed to decode country dataset: {source}")]
    Decode {
        #[source]
        source: Arc<serde_json::Error>,
    },

    /// A local dataset override could not be read.
    #[error("failed to read dataset from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The source returned a well-formed but empty dataset.
    #[error("country dataset was empty")]
    EmptyDataset,
}

impl FetchError {
    pub(crate) fn request(url: &str, source: reqwest::Error) -> Self {
        FetchError::Request {
            url: url.to_string(),
            source: Arc::new(source),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(source: serde_json::Error) -> Self {
        FetchError::Decode {
            source: Arc::new(source),
        }
    }
}

/// Top-level library error type.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The dataset could not be loaded; no query can be answered.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Raised when a country code could not be found in the dataset.
    #[error("unknown country code: {code}{}", format_suggestions(.suggestions))]
    UnknownCountry {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when a required query parameter is absent or blank.
    #[error("missing required parameter '{name}'")]
    MissingParameter { name: &'static str },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
