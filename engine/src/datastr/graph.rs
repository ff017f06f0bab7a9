//! Something with graphs, but small.
//!
//! Traits for working with undirected room connection graphs and the adjacency list
//! representation used while generating them.

/// Node ids are 32bit unsigned ints
pub type NodeId = u32;

/// No node may have more connections than this.
pub const MAX_DEGREE: usize = 6;
/// Generation is done once every node has at least this many connections.
pub const MIN_DEGREE: usize = 3;

/// Base trait for graphs.
/// Interesting behaviour will be added through subtraits.
pub trait Graph {
    fn num_nodes(&self) -> usize;
    fn num_arcs(&self) -> usize;
    fn degree(&self, node: NodeId) -> usize;
}

/// Trait for graph data structures which allow iterating over the neighbors of a node.
pub trait LinkIterGraph<'a>: Graph {
    /// Type of the neighbor iterator.
    type Iter: Iterator<Item = NodeId> + 'a;

    /// Get a iterator over the neighbors of the given node, in insertion order.
    fn neighbor_iter(&'a self, node: NodeId) -> Self::Iter;
}

/// Symmetric adjacency lists over a fixed number of node slots.
///
/// Every edge is stored in both directions, there are no self loops, no parallel edges
/// and no node exceeds `MAX_DEGREE`. Neighbors keep the order in which the edges were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionGraph {
    adjacency: Vec<Vec<NodeId>>,
}

impl ConnectionGraph {
    /// Create a graph with `num_nodes` unconnected nodes.
    pub fn new(num_nodes: usize) -> ConnectionGraph {
        assert!(num_nodes < <NodeId>::max_value() as usize);
        ConnectionGraph {
            adjacency: (0..num_nodes).map(|_| Vec::with_capacity(MAX_DEGREE)).collect(),
        }
    }

    /// Borrow the neighbors of `node` as a slice
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node as usize]
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.neighbors(from).contains(&to)
    }

    /// Can `node` take another connection without exceeding `MAX_DEGREE`?
    pub fn is_open(&self, node: NodeId) -> bool {
        self.degree(node) < MAX_DEGREE
    }

    /// Could the undirected edge `(from, to)` be added?
    pub fn can_connect(&self, from: NodeId, to: NodeId) -> bool {
        from != to && self.is_open(from) && self.is_open(to) && !self.has_edge(from, to)
    }

    /// Add the undirected edge `(from, to)`.
    /// Panics if this would create a self loop, a parallel edge or exceed the degree limit.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        assert_ne!(from, to, "self loops are not allowed");
        assert!(!self.has_edge(from, to), "edge ({}, {}) already exists", from, to);
        assert!(self.is_open(from) && self.is_open(to), "degree limit exceeded");

        self.adjacency[from as usize].push(to);
        self.adjacency[to as usize].push(from);
    }

    /// Does every node have at least `MIN_DEGREE` connections?
    pub fn is_complete(&self) -> bool {
        self.adjacency.iter().all(|neighbors| neighbors.len() >= MIN_DEGREE)
    }

    /// Iterate over each undirected edge once, as `(smaller id, larger id)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(node, neighbors)| neighbors.iter().map(move |&neighbor| (node as NodeId, neighbor)))
            .filter(|&(node, neighbor)| node < neighbor)
    }
}

impl Graph for ConnectionGraph {
    fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    fn num_arcs(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node as usize].len()
    }
}

impl<'a> LinkIterGraph<'a> for ConnectionGraph {
    type Iter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn neighbor_iter(&'a self, node: NodeId) -> Self::Iter {
        self.neighbors(node).iter().copied()
    }
}
