//! Breadth first search over unweighted graphs.

use crate::datastr::graph::*;
use std::collections::VecDeque;

/// Find a path with the fewest hops from `from` to `to`.
/// The path includes both endpoints, so a path from a node to itself is just that node.
pub fn shortest_path<G: for<'a> LinkIterGraph<'a>>(graph: &G, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
    let n = graph.num_nodes();
    // parent of each discovered node, the root points to itself
    let mut parents: Vec<Option<NodeId>> = vec![None; n];
    let mut queue = VecDeque::new();

    parents[from as usize] = Some(from);
    queue.push_back(from);

    while let Some(node) = queue.pop_front() {
        if node == to {
            let mut path = vec![to];
            let mut current = to;
            while current != from {
                current = parents[current as usize].expect("discovered node without parent");
                path.push(current);
            }
            path.reverse();
            return Some(path);
        }

        for neighbor in graph.neighbor_iter(node) {
            if parents[neighbor as usize].is_none() {
                parents[neighbor as usize] = Some(node);
                queue.push_back(neighbor);
            }
        }
    }

    None
}

pub fn is_reachable<G: for<'a> LinkIterGraph<'a>>(graph: &G, from: NodeId, to: NodeId) -> bool {
    shortest_path(graph, from, to).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> ConnectionGraph {
        //  0 - 1 - 2    4 - 5
        //  |       |
        //  +-- 3 --+
        let mut graph = ConnectionGraph::new(6);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(0, 3);
        graph.add_edge(3, 2);
        graph.add_edge(4, 5);
        graph
    }

    #[test]
    fn finds_fewest_hops() {
        let graph = graph();
        assert_eq!(shortest_path(&graph, 0, 2).map(|path| path.len()), Some(3));
        assert_eq!(shortest_path(&graph, 0, 0), Some(vec![0]));
        assert_eq!(shortest_path(&graph, 4, 5), Some(vec![4, 5]));
    }

    #[test]
    fn separate_components_are_unreachable() {
        let graph = graph();
        assert!(!is_reachable(&graph, 0, 4));
        assert!(!is_reachable(&graph, 5, 2));
        assert!(is_reachable(&graph, 2, 0));
    }
}
