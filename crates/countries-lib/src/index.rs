use std::collections::HashMap;
use std::sync::Arc;

use crate::country::{normalize_code, Country};

/// Minimum Jaro-Winkler similarity for a code or name to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Case-insensitive exact-match lookup table from country code to record.
#[derive(Debug, Clone, Default)]
pub struct CountryIndex {
    by_code: HashMap<String, Arc<Country>>,
}

impl CountryIndex {
    /// Build the index. When a code appears more than once the last record wins.
    pub fn build(countries: &[Arc<Country>]) -> Self {
        let mut by_code = HashMap::with_capacity(countries.len());
        for country in countries {
            by_code.insert(country.key(), Arc::clone(country));
        }
        Self { by_code }
    }

    /// Lookup a country by code, ignoring case.
    pub fn lookup(&self, code: &str) -> Option<&Country> {
        self.by_code.get(&normalize_code(code)).map(Arc::as_ref)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(&normalize_code(code))
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Codes of countries whose code or name resembles `query`, best first.
    pub fn suggestions(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = self
            .by_code
            .iter()
            .map(|(code, country)| {
                let by_code = strsim::jaro_winkler(&needle, &code.to_lowercase());
                let by_name = strsim::jaro_winkler(&needle, &country.name.to_lowercase());
                (by_code.max(by_name), code.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, code)| code.to_string())
            .collect()
    }
}
