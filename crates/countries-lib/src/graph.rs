use std::collections::HashMap;
use std::sync::Arc;

use crate::country::{normalize_code, Country};

/// Directed land-border graph keyed by normalized country code.
///
/// Edges come straight from each country's `borders` list. The relation is
/// not symmetrized: `A -> B` does not imply `B -> A`.
#[derive(Debug, Clone, Default)]
pub struct BorderGraph {
    adjacency: Arc<HashMap<String, Vec<String>>>,
}

impl BorderGraph {
    /// Return the neighbours for a given code, in source order.
    ///
    /// Unknown codes have no outgoing edges.
    pub fn neighbors(&self, code: &str) -> &[String] {
        self.adjacency
            .get(&normalize_code(code))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.adjacency.contains_key(&normalize_code(code))
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}

/// Build the border graph. A repeated code replaces the earlier edge list.
pub fn build_graph<'a>(countries: impl IntoIterator<Item = &'a Country>) -> BorderGraph {
    let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
    for country in countries {
        let edges = country
            .borders
            .iter()
            .map(|target| normalize_code(target))
            .collect();
        adjacency.insert(country.key(), edges);
    }

    BorderGraph {
        adjacency: Arc::new(adjacency),
    }
}

impl BorderGraph {
    /// Build a graph from raw `(code, borders)` pairs.
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = (&'a str, &'a [&'a str])>) -> Self {
        let countries: Vec<Country> = edges
            .into_iter()
            .map(|(code, borders)| Country::new(code, code, borders))
            .collect();
        build_graph(&countries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_preserve_source_order() {
        let graph = BorderGraph::from_edges([("A", &["C", "B"][..]), ("B", &[][..])]);
        assert_eq!(graph.neighbors("a"), ["C", "B"]);
    }

    #[test]
    fn unknown_node_has_no_neighbors() {
        let graph = BorderGraph::from_edges([("A", &["B"][..])]);
        assert!(graph.neighbors("B").is_empty());
        assert!(graph.neighbors("ZZZ").is_empty());
    }

    #[test]
    fn edges_are_directed() {
        let graph = BorderGraph::from_edges([("A", &["B"][..]), ("B", &[][..])]);
        assert_eq!(graph.neighbors("A"), ["B"]);
        assert!(graph.neighbors("B").is_empty());
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn dangling_and_self_edges_are_kept() {
        let graph = BorderGraph::from_edges([("A", &["A", "GHOST"][..])]);
        assert_eq!(graph.neighbors("A"), ["A", "GHOST"]);
        assert!(!graph.contains("GHOST"));
    }

    #[test]
    fn repeated_code_replaces_edges_and_targets_are_normalized() {
        let graph = BorderGraph::from_edges([
            ("A", &["B"][..]),
            ("b", &["c"][..]),
            ("a", &["C"][..]),
        ]);

        assert_eq!(graph.neighbors("A"), ["C"]);
        assert_eq!(graph.neighbors("B"), ["C"]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
    }
}
