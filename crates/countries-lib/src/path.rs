use std::collections::{HashMap, VecDeque};

use crate::country::normalize_code;
use crate::graph::BorderGraph;

/// Find the route with the fewest border crossings between `start` and `goal`
/// using breadth-first search.
///
/// Nodes are marked on enqueue, so the parent recorded when `goal` is first
/// reached belongs to the earliest-enqueued shortest path. Among paths of
/// equal length the one following neighbour order wins. Returned codes are
/// normalized.
pub fn find_route(graph: &BorderGraph, start: &str, goal: &str) -> Option<Vec<String>> {
    let start = normalize_code(start);
    let goal = normalize_code(goal);

    if start == goal {
        return Some(vec![start]);
    }

    let mut parents: HashMap<&str, Option<&str>> = HashMap::new();
    let mut queue = VecDeque::new();

    parents.insert(start.as_str(), None);
    queue.push_back(start.as_str());

    while let Some(current) = queue.pop_front() {
        for next in graph.neighbors(current) {
            let next = next.as_str();
            if parents.contains_key(next) {
                continue;
            }

            parents.insert(next, Some(current));
            if next == goal {
                return Some(reconstruct_path(&parents, &start, &goal));
            }
            queue.push_back(next);
        }
    }

    None
}

fn reconstruct_path(parents: &HashMap<&str, Option<&str>>, start: &str, goal: &str) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node.to_string());
        if node == start {
            break;
        }
        current = parents.get(node).copied().flatten();
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> BorderGraph {
        BorderGraph::from_edges([
            ("A", &["B", "C"][..]),
            ("B", &["D"][..]),
            ("C", &[][..]),
            ("D", &[][..]),
        ])
    }

    #[test]
    fn same_node_is_single_step() {
        assert_eq!(find_route(&diamond(), "C", "c"), Some(vec!["C".to_string()]));
    }

    #[test]
    fn shortest_path_prefers_first_listed_neighbour() {
        let graph = BorderGraph::from_edges([
            ("A", &["B", "C"][..]),
            ("B", &["D"][..]),
            ("C", &["D"][..]),
            ("D", &[][..]),
        ]);
        assert_eq!(find_route(&graph, "A", "D").unwrap(), ["A", "B", "D"]);

        let swapped = BorderGraph::from_edges([
            ("A", &["C", "B"][..]),
            ("B", &["D"][..]),
            ("C", &["D"][..]),
            ("D", &[][..]),
        ]);
        assert_eq!(find_route(&swapped, "A", "D").unwrap(), ["A", "C", "D"]);
    }

    #[test]
    fn diamond_route() {
        assert_eq!(find_route(&diamond(), "a", "d").unwrap(), ["A", "B", "D"]);
    }

    #[test]
    fn unreachable_goal_is_none() {
        assert!(find_route(&diamond(), "D", "A").is_none());
        assert!(find_route(&diamond(), "C", "D").is_none());
    }

    #[test]
    fn dangling_intermediate_nodes_are_dead_ends() {
        let graph = BorderGraph::from_edges([
            ("A", &["GHOST", "A", "B"][..]),
            ("B", &["C"][..]),
            ("C", &[][..]),
        ]);
        assert_eq!(find_route(&graph, "A", "C").unwrap(), ["A", "B", "C"]);
    }
}
