//! A weighted directed graph over arbitrary node identities. Every node keeps its outgoing
//! edges in insertion order; the order matters because it decides how ties are broken
//! during traversals and searches.
//!
//! ```rust
//! use weightgraph::graph::*;
//!
//! let mut graph = WeightedDigraph::new();
//! graph.add_edge("London", "Paris", 340);
//! graph.add_edge("London", "Berlin", 930);
//! graph.add_edge("Paris", "Berlin", 880);
//!
//! assert_eq!(graph.num_nodes(), 3);
//! assert_eq!(graph.nodes(), vec![&"Berlin", &"London", &"Paris"]);
//! assert_eq!(graph.to_string(), "Berlin\nLondon -> Paris (340), Berlin (930)\nParis -> Berlin (880)");
//! ```
//!
//! ## Node order
//!
//! Methods which iterate over all nodes ([WeightedDigraph::nodes], the [Display](std::fmt::Display)
//! implementation, cycle detection and topological sorting) use the order fixed by
//! [NodeId::arrange]. Integers, characters and strings are sorted ascending, any other
//! identity type keeps the order in which nodes were first added unless its [NodeId]
//! implementation says otherwise:
//!
//! ```rust
//! use weightgraph::graph::*;
//!
//! #[derive(Clone, PartialEq, Eq, Hash, Debug)]
//! struct City(&'static str);
//! impl NodeId for City {}
//!
//! let mut graph = WeightedDigraph::new();
//! graph.add_edge(City("Oslo"), City("Bergen"), 1);
//! graph.add_node(City("Aarhus"));
//! assert_eq!(graph.nodes(), vec![&City("Oslo"), &City("Bergen"), &City("Aarhus")]);
//! ```
use std::fmt;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use fxhash::FxHashMap;
use itertools::Itertools;

pub type Weight = i64;

/// Identity of a graph node.
///
/// Implementors only have to decide on the canonical node order through [NodeId::arrange],
/// the default implementation keeps insertion order.
pub trait NodeId: Clone + Eq + Hash + Debug {
    /// Rearranges `nodes`, given in insertion order, into the canonical order.
    fn arrange(_nodes: &mut [&Self]) {}
}

macro_rules! sorted_node_id {
    ($($t:ty),*) => {
        $(
            impl NodeId for $t {
                fn arrange(nodes: &mut [&Self]) {
                    nodes.sort_unstable();
                }
            }
        )*
    };
}

sorted_node_id!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool, String);

impl<'a> NodeId for &'a str {
    fn arrange(nodes: &mut [&Self]) {
        nodes.sort_unstable();
    }
}

impl<A, B> NodeId for (A, B) where A: NodeId + Ord, B: NodeId + Ord {
    fn arrange(nodes: &mut [&Self]) {
        nodes.sort_unstable();
    }
}

/// An outgoing edge, stored with its source node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<N> {
    pub target: N,
    pub weight: Weight,
}

impl<N> Edge<N> {
    pub fn new(target: N, weight: Weight) -> Self {
        Edge { target, weight }
    }
}

/// A node alongside its outgoing edges.
#[derive(Debug, Clone)]
pub(crate) struct AdjNode<N> {
    pub(crate) id: N,
    pub(crate) edges: Vec<Edge<N>>,
}

impl<N> AdjNode<N> {
    fn new(id: N) -> Self {
        AdjNode { id, edges: Vec::new() }
    }
}

/// Weighted directed graph backed by adjacency lists, see the [module documentation](self).
///
/// Parallel edges and self-loops are allowed, and weights are not validated. Negative weights
/// are accepted but void the guarantees of the shortest-path searches in
/// [algorithms::paths](crate::algorithms::paths).
#[derive(Debug, Clone)]
pub struct WeightedDigraph<N: NodeId> {
    indices: FxHashMap<N, usize>,
    nodes: Vec<AdjNode<N>>,
    m: usize
}

impl<N: NodeId> PartialEq for WeightedDigraph<N> {
    fn eq(&self, other: &Self) -> bool {
        if self.num_nodes() != other.num_nodes() {
            return false
        }
        if self.num_edges() != other.num_edges() {
            return false
        }
        self.nodes.iter().all(|node| {
            other.neighbours(&node.id).map_or(false, |edges| edges == node.edges.as_slice())
        })
    }
}
impl<N: NodeId> Eq for WeightedDigraph<N> {}

impl<N: NodeId> Default for WeightedDigraph<N> {
    fn default() -> Self {
        WeightedDigraph::new()
    }
}

impl<N: NodeId> WeightedDigraph<N> {
    pub fn new() -> Self {
        WeightedDigraph {
            indices: FxHashMap::default(),
            nodes: Vec::new(),
            m: 0
        }
    }

    pub fn with_capacity(n_guess: usize) -> Self {
        WeightedDigraph {
            indices: FxHashMap::with_capacity_and_hasher(n_guess, Default::default()),
            nodes: Vec::with_capacity(n_guess),
            m: 0
        }
    }

    /*
        Basic properties and queries
    */
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.m
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, u: &N) -> bool {
        self.indices.contains_key(u)
    }

    /// Returns whether at least one edge leads from `u` to `v`.
    pub fn has_edge(&self, u: &N, v: &N) -> bool {
        self.weight(u, v).is_some()
    }

    /// Returns the weight of the first stored edge from `u` to `v`.
    pub fn weight(&self, u: &N, v: &N) -> Option<Weight> {
        self.neighbours(u)?.iter().find(|e| e.target == *v).map(|e| e.weight)
    }

    /// Returns the outgoing edges of `u` in insertion order, or `None` if
    /// `u` is not contained in the graph.
    pub fn neighbours(&self, u: &N) -> Option<&[Edge<N>]> {
        self.index_of(u).map(|i| self.nodes[i].edges.as_slice())
    }

    /// Returns all nodes in canonical order, see [NodeId::arrange].
    pub fn nodes(&self) -> Vec<&N> {
        let mut res: Vec<&N> = self.nodes.iter().map(|node| &node.id).collect();
        N::arrange(&mut res);
        res
    }

    /// Iterates over all edges as `(source, edge)` pairs, grouped by source in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &Edge<N>)> + '_ {
        self.nodes.iter().flat_map(|node| node.edges.iter().map(move |e| (&node.id, e)))
    }

    /*
        Editing
    */

    /// Adds `u` to the graph. Returns `false` if it was already present.
    pub fn add_node(&mut self, u: N) -> bool {
        if self.indices.contains_key(&u) {
            return false
        }
        tracing::trace!(node = ?u, "add node");
        self.indices.insert(u.clone(), self.nodes.len());
        self.nodes.push(AdjNode::new(u));
        true
    }

    pub fn add_nodes<I>(&mut self, it: I) where I: IntoIterator<Item = N> {
        for u in it {
            self.add_node(u);
        }
    }

    /// Appends an edge from `u` to `v`, adding both endpoints if necessary.
    pub fn add_edge(&mut self, u: N, v: N, weight: Weight) {
        let iu = self.ensure(u);
        self.ensure(v.clone());
        tracing::trace!(from = ?self.nodes[iu].id, to = ?v, weight, "add edge");
        self.nodes[iu].edges.push(Edge::new(v, weight));
        self.m += 1;
    }

    pub fn add_edges<I>(&mut self, it: I) where I: IntoIterator<Item = (N, N, Weight)> {
        for (u, v, w) in it {
            self.add_edge(u, v, w);
        }
    }

    /// Removes every edge from `u` to `v` and returns how many were removed.
    pub fn remove_edge(&mut self, u: &N, v: &N) -> usize {
        let Some(iu) = self.index_of(u) else {
            return 0
        };
        let edges = &mut self.nodes[iu].edges;
        let before = edges.len();
        edges.retain(|e| e.target != *v);
        let removed = before - edges.len();
        self.m -= removed;
        removed
    }

    /// Removes `u` together with all edges leaving or entering it. Returns `false`
    /// if `u` was not contained in the graph.
    pub fn delete_node(&mut self, u: &N) -> bool {
        let Some(iu) = self.indices.remove(u) else {
            return false
        };
        tracing::trace!(node = ?u, "delete node");

        let node = self.nodes.remove(iu);
        self.m -= node.edges.len();

        for other in self.nodes.iter_mut() {
            let before = other.edges.len();
            other.edges.retain(|e| e.target != *u);
            self.m -= before - other.edges.len();
        }

        // Nodes after the removed one moved one slot to the front
        for node in &self.nodes[iu..] {
            if let Some(i) = self.indices.get_mut(&node.id) {
                *i -= 1;
            }
        }
        debug_assert_eq!(self.indices.len(), self.nodes.len());
        debug_assert_eq!(self.m, self.nodes.iter().map(|n| n.edges.len()).sum::<usize>());

        true
    }

    /*
        Index-based access for the algorithms
    */
    pub(crate) fn index_of(&self, u: &N) -> Option<usize> {
        self.indices.get(u).copied()
    }

    /// Index of a node that is known to be contained, such as the target of a stored edge.
    pub(crate) fn index(&self, u: &N) -> usize {
        self.indices[u]
    }

    pub(crate) fn id(&self, i: usize) -> &N {
        &self.nodes[i].id
    }

    pub(crate) fn edges_at(&self, i: usize) -> &[Edge<N>] {
        &self.nodes[i].edges
    }

    /// Node indices in canonical order.
    pub(crate) fn ordered_indices(&self) -> Vec<usize> {
        self.nodes().into_iter().map(|u| self.index(u)).collect()
    }

    fn ensure(&mut self, u: N) -> usize {
        if let Some(i) = self.index_of(&u) {
            return i
        }
        self.add_node(u);
        self.nodes.len() - 1
    }
}

impl<N: NodeId> FromIterator<(N, N, Weight)> for WeightedDigraph<N> {
    fn from_iter<T: IntoIterator<Item = (N, N, Weight)>>(iter: T) -> Self {
        let mut res = WeightedDigraph::new();
        res.add_edges(iter);
        res
    }
}

impl<N: NodeId> Extend<(N, N, Weight)> for WeightedDigraph<N> {
    fn extend<T: IntoIterator<Item = (N, N, Weight)>>(&mut self, iter: T) {
        self.add_edges(iter);
    }
}

/// Renders one line per node in canonical order. Nodes with outgoing edges are written as
/// `u -> v (w), x (y)`, all others as just their identity.
impl<N: NodeId + Display> Display for WeightedDigraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self.ordered_indices().into_iter().map(|i| {
            let node = &self.nodes[i];
            if node.edges.is_empty() {
                node.id.to_string()
            } else {
                let targets = node.edges.iter().map(|e| format!("{} ({})", e.target, e.weight)).join(", ");
                format!("{} -> {}", node.id, targets)
            }
        });
        write!(f, "{}", lines.format("\n"))
    }
}

impl WeightedDigraph<u32> {
    /// Generates a directed path on `n` nodes where every arc has weight `weight`.
    pub fn path(n: u32, weight: Weight) -> Self {
        let mut res = WeightedDigraph::with_capacity(n as usize);
        res.add_nodes(0..n);
        for u in 1..n {
            res.add_edge(u-1, u, weight);
        }
        res
    }

    /// Generates a directed cycle on `n` nodes where every arc has weight `weight`.
    pub fn cycle(n: u32, weight: Weight) -> Self {
        let mut res = WeightedDigraph::with_capacity(n as usize);
        res.add_nodes(0..n);
        for u in 0..n {
            res.add_edge(u, (u+1) % n, weight);
        }
        res
    }

    /// Generates a directed grid with `rows` rows and `cols` columns. Arcs go from
    /// left to right / top to bottom and node `row*cols + col` sits at `(row, col)`.
    /// The weight of every arc is given by `weight(u, v)`.
    ///
    /// # Panics
    ///
    /// Panics if `rows*cols` does not fit into a `u32`, as the node ids would overflow.
    pub fn grid<F>(rows: u32, cols: u32, mut weight: F) -> Self where F: FnMut(u32, u32) -> Weight {
        let Some(n) = rows.checked_mul(cols) else {
            panic!("a {rows}x{cols} grid has more nodes than u32 ids");
        };
        let mut res = WeightedDigraph::with_capacity(n as usize);
        res.add_nodes(0..n);

        // rows = 3, cols = 4
        // 0 -> 1 -> 2 -> 3
        // |    |    |    |
        // 4 -> 5 -> 6 -> 7
        // |    |    |    |
        // 8 -> 9 -> 10 -> 11
        for y in 0..rows {
            for x in 0..cols {
                let u = y * cols + x;
                if x + 1 < cols {
                    res.add_edge(u, u + 1, weight(u, u + 1));
                }
                if y + 1 < rows {
                    res.add_edge(u, u + cols, weight(u, u + cols));
                }
            }
        }

        res
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
