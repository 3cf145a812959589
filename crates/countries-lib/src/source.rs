//! Upstream providers of the country dataset.
//!
//! The default provider downloads the full collection from
//! `restcountries.com`. Tests and offline runs may point
//! `COUNTRIES_DATASET_SOURCE` at a local JSON file with the same shape, which
//! replaces the network call entirely.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::{debug, info};

use crate::country::{parse_countries, Country};
use crate::error::FetchError;

/// Upstream endpoint returning every country in one response.
pub const DEFAULT_DATASET_URL: &str = "https://restcountries.com/v3.1/all?fields=name,cca3,population,capital,languages,currencies,borders,flags,timezones";

const DATASET_URL_ENV: &str = "COUNTRIES_DATASET_URL";
const DATASET_SOURCE_ENV: &str = "COUNTRIES_DATASET_SOURCE";
const FETCH_TIMEOUT_ENV: &str = "COUNTRIES_FETCH_TIMEOUT_SECS";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One-shot bulk read of the full country collection.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Country>, FetchError>;

    /// Short description used in log fields.
    fn describe(&self) -> String;
}

/// Where the dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub url: String,
    pub local_override: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATASET_URL.to_string(),
            local_override: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SourceConfig {
    /// Create configuration from environment variables.
    ///
    /// - `COUNTRIES_DATASET_URL`: upstream URL (default: restcountries v3.1)
    /// - `COUNTRIES_DATASET_SOURCE`: local JSON file used instead of the network
    /// - `COUNTRIES_FETCH_TIMEOUT_SECS`: HTTP timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        let url = env::var(DATASET_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATASET_URL.to_string());

        let local_override = env::var_os(DATASET_SOURCE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let timeout = env::var(FETCH_TIMEOUT_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Self {
            url,
            local_override,
            timeout,
        }
    }

    /// Build the source this configuration describes.
    pub fn into_source(self) -> Result<Arc<dyn DatasetSource>, FetchError> {
        if let Some(path) = self.local_override {
            info!(path = %path.display(), "using local dataset override");
            return Ok(Arc::new(FileSource::new(path)));
        }
        Ok(Arc::new(HttpSource::new(self.url, self.timeout)?))
    }
}

/// Resolve the dataset source from the environment.
pub fn source_from_env() -> Result<Arc<dyn DatasetSource>, FetchError> {
    SourceConfig::from_env().into_source()
}

/// Downloads the dataset over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let url = url.into();
        let client = Client::builder()
            .user_agent(concat!("countries-lib/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::request(&url, e))?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<Country>, FetchError> {
        debug!(url = %self.url, "requesting country dataset");
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::request(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::request(&self.url, e))?;
        parse_countries(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the dataset from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn fetch(&self) -> Result<Vec<Country>, FetchError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source: Arc::new(source),
            })?;
        parse_countries(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a fixed set of records. Useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    countries: Vec<Country>,
}

impl StaticSource {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Country>, FetchError> {
        Ok(self.countries.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} countries)", self.countries.len())
    }
}
