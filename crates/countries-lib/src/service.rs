//! Query surface consumed by the transport layers (HTTP service, CLI).
//!
//! Every operation validates its own parameters first, then makes sure the
//! dataset is loaded, and only then touches the snapshot. A failed load is
//! returned to the caller as [`Error::Fetch`]; no query ever runs against a
//! partial or empty dataset.

use std::sync::Arc;

use tracing::debug;

use crate::cache::DatasetCache;
use crate::country::Country;
use crate::error::{Error, Result};
use crate::routing::{plan_route, RouteOutcome};
use crate::search::search;
use crate::snapshot::Snapshot;
use crate::source::DatasetSource;

/// Country lookup, detail and routing over a lazily loaded snapshot.
#[derive(Debug)]
pub struct CountryService {
    cache: DatasetCache,
}

impl CountryService {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            cache: DatasetCache::new(source),
        }
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// Load the dataset if needed and return it.
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>> {
        Ok(self.cache.ensure_loaded().await?)
    }

    /// Countries whose name, code, or currency code matches `query`.
    pub async fn search(&self, query: &str) -> Result<Vec<Country>> {
        let query = required("search", query)?;
        let snapshot = self.snapshot().await?;
        let results: Vec<Country> = search(&snapshot, query).into_iter().cloned().collect();
        debug!(query, matches = results.len(), "search completed");
        Ok(results)
    }

    /// Full record for one country, or `None` when the code is unknown.
    pub async fn detail(&self, code: &str) -> Result<Option<Country>> {
        let code = required("code", code)?;
        let snapshot = self.snapshot().await?;
        Ok(snapshot.lookup(code).cloned())
    }

    /// Full record for one country, failing with suggestions when the code
    /// is unknown.
    pub async fn country(&self, code: &str) -> Result<Country> {
        let code = required("code", code)?;
        let snapshot = self.snapshot().await?;
        snapshot.resolve(code).cloned()
    }

    /// Shortest land route between two countries.
    pub async fn route(&self, start: &str, end: &str) -> Result<RouteOutcome> {
        let start = required("start", start)?;
        let end = required("end", end)?;
        let snapshot = self.snapshot().await?;
        let outcome = plan_route(&snapshot, start, end)?;
        debug!(start, end, hops = ?outcome.hop_count(), "route planned");
        Ok(outcome)
    }
}

fn required<'a>(name: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingParameter { name });
    }
    Ok(trimmed)
}
