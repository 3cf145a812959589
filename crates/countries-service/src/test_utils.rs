//! Fixtures for handler tests.

use std::path::PathBuf;
use std::sync::Arc;

use countries_lib::FileSource;

use crate::state::AppState;

/// Path to the JSON fixture shared with the library tests.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/countries_minimal.json"
);

/// Fresh state over the fixture file; each call has its own empty cache.
pub fn fixture_state() -> AppState {
    AppState::new(Arc::new(FileSource::new(PathBuf::from(TEST_FIXTURE_PATH))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_path_exists() {
        assert!(PathBuf::from(TEST_FIXTURE_PATH).exists());
    }
}
