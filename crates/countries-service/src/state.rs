//! Application state shared by the axum handlers.

use std::sync::Arc;

use countries_lib::{source_from_env, CountryService, DatasetSource, FetchError};

/// Shared application state for all axum handlers.
///
/// Cheap to clone; every clone points at the same [`CountryService`] and
/// therefore the same dataset cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    service: CountryService,
}

impl AppState {
    /// Wrap a dataset source. Nothing is fetched until the first query.
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                service: CountryService::new(source),
            }),
        }
    }

    /// Build state from the `COUNTRIES_*` environment variables.
    pub fn from_env() -> Result<Self, FetchError> {
        let source = source_from_env()?;
        tracing::info!(source = %source.describe(), "dataset source configured");
        Ok(Self::new(source))
    }

    pub fn service(&self) -> &CountryService {
        &self.inner.service
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.inner.service.cache();
        f.debug_struct("AppState")
            .field("source", &cache.source_description())
            .field("loaded", &cache.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::fixture_state;

    #[tokio::test]
    async fn clones_share_one_cache() {
        let state = fixture_state();
        let clone = state.clone();

        state.service().snapshot().await.unwrap();
        assert!(clone.service().cache().is_loaded());
    }

    #[test]
    fn debug_reports_source_and_load_state() {
        let debug = format!("{:?}", fixture_state());
        assert!(debug.contains("AppState"));
        assert!(debug.contains("loaded: false"));
    }
}
