use std::sync::Arc;

use crate::country::Country;
use crate::error::{Error, Result};
use crate::graph::{build_graph, BorderGraph};
use crate::index::CountryIndex;

/// Maximum number of "did you mean" suggestions attached to an unknown code.
pub const MAX_SUGGESTIONS: usize = 3;

/// Immutable in-memory copy of the full country dataset.
///
/// The lookup index and border graph are derived once at construction and
/// shared read-only for the lifetime of the snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot {
    countries: Vec<Arc<Country>>,
    index: CountryIndex,
    graph: BorderGraph,
}

impl Snapshot {
    pub fn new(countries: Vec<Country>) -> Self {
        let countries: Vec<Arc<Country>> = countries.into_iter().map(Arc::new).collect();
        let index = CountryIndex::build(&countries);
        let graph = build_graph(countries.iter().map(Arc::as_ref));
        Self {
            countries,
            index,
            graph,
        }
    }

    /// Countries in source order.
    pub fn countries(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter().map(Arc::as_ref)
    }

    /// Lookup a country by code, ignoring case.
    pub fn lookup(&self, code: &str) -> Option<&Country> {
        self.index.lookup(code)
    }

    /// Lookup a country by code, failing with suggestions when it is unknown.
    pub fn resolve(&self, code: &str) -> Result<&Country> {
        self.lookup(code).ok_or_else(|| self.unknown_country(code))
    }

    /// The "unknown country" error for `code`, with close matches attached.
    pub fn unknown_country(&self, code: &str) -> Error {
        Error::UnknownCountry {
            code: code.trim().to_string(),
            suggestions: self.index.suggestions(code, MAX_SUGGESTIONS),
        }
    }

    pub fn index(&self) -> &CountryIndex {
        &self.index
    }

    pub fn graph(&self) -> &BorderGraph {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
