//! Countries CLI library.
//!
//! Rendering of search results, country details, and routes for the
//! `countries` binary.

pub mod output;
