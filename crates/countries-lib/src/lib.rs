//! Countries library entry points.
//!
//! This crate fetches the world countries dataset from the upstream provider,
//! keeps it in memory for the lifetime of the process, indexes it by country
//! code, derives the land-border graph, and runs shortest-route searches over
//! it. Higher-level consumers (CLI, HTTP service) should only depend on the
//! functions exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod cache;
pub mod country;
pub mod error;
pub mod graph;
pub mod index;
pub mod path;
pub mod routing;
pub mod search;
pub mod service;
pub mod snapshot;
pub mod source;

pub use cache::{DatasetCache, FetchStats};
pub use country::{parse_countries, Country, Currency, RegionalBlock};
pub use error::{Error, FetchError, Result};
pub use graph::{build_graph, BorderGraph};
pub use index::CountryIndex;
pub use path::find_route;
pub use routing::{plan_route, RouteOutcome};
pub use search::search;
pub use service::CountryService;
pub use snapshot::{Snapshot, MAX_SUGGESTIONS};
pub use source::{
    source_from_env, DatasetSource, FileSource, HttpSource, SourceConfig, StaticSource,
    DEFAULT_DATASET_URL,
};
