//! Random connection graphs where every node ends up with between `MIN_DEGREE` and `MAX_DEGREE` neighbors.

use crate::datastr::graph::*;
use rand::prelude::*;

/// Build a random graph with `num_nodes` nodes.
///
/// Edges are added one at a time between two uniformly drawn open nodes until every node has at least
/// `MIN_DEGREE` neighbors. The second endpoint is drawn among the admissible partners of the first one,
/// which is the same distribution as redrawing until the partner is different and not yet connected.
///
/// For `MIN_DEGREE < num_nodes <= MAX_DEGREE + 1` there is always an admissible edge while some node is
/// below `MIN_DEGREE`, so the loop terminates.
pub fn random_connections<R: Rng + ?Sized>(num_nodes: usize, rng: &mut R) -> ConnectionGraph {
    assert!(
        (MIN_DEGREE + 1..=MAX_DEGREE + 1).contains(&num_nodes),
        "cannot build a graph with {} nodes and degrees in [{}, {}]",
        num_nodes,
        MIN_DEGREE,
        MAX_DEGREE
    );

    let mut graph = ConnectionGraph::new(num_nodes);
    while !graph.is_complete() {
        add_random_connection(&mut graph, rng);
    }
    graph
}

fn add_random_connection<R: Rng + ?Sized>(graph: &mut ConnectionGraph, rng: &mut R) {
    let num_nodes = graph.num_nodes() as NodeId;
    let candidates: Vec<NodeId> = (0..num_nodes)
        .filter(|&node| graph.is_open(node) && partners(graph, node).next().is_some())
        .collect();
    let &from = candidates.choose(rng).expect("no admissible edge left in incomplete graph");

    let admissible: Vec<NodeId> = partners(graph, from).collect();
    let &to = admissible.choose(rng).expect("candidate without partner");

    graph.add_edge(from, to);
}

fn partners(graph: &ConnectionGraph, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    (0..graph.num_nodes() as NodeId).filter(move |&other| graph.can_connect(node, other))
}
