#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use countries_lib::{Country, DatasetSource, FetchError};

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/countries_minimal.json")
}

/// Hand-built graph: A -> [B, C], B -> [D], C -> [], D -> [].
pub fn diamond() -> Vec<Country> {
    vec![
        Country::new("A", "Alpha", &["B", "C"]),
        Country::new("B", "Beta", &["D"]),
        Country::new("C", "Gamma", &[]),
        Country::new("D", "Delta", &[]),
    ]
}

/// Source double that counts calls, waits before answering, and fails the
/// first `failures` calls.
pub struct CountingSource {
    calls: AtomicUsize,
    delay: Duration,
    failures: usize,
    countries: Vec<Country>,
}

impl CountingSource {
    pub fn new(countries: Vec<Country>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay: Duration::from_millis(50),
            failures: 0,
            countries,
        }
    }

    pub fn failing_first(mut self, failures: usize) -> Self {
        self.failures = failures;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatasetSource for CountingSource {
    async fn fetch(&self) -> Result<Vec<Country>, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if call <= self.failures {
            return Err(FetchError::Status {
                url: "test://countries".to_string(),
                status: 503,
            });
        }
        Ok(self.countries.clone())
    }

    fn describe(&self) -> String {
        "counting".to_string()
    }
}
