//! A weighted directed graph library with traversals, cycle detection, topological
//! sorting and shortest-path search.
//!
//! ```rust
//! use weightgraph::graph::*;
//!
//! let mut graph = WeightedDigraph::new();
//! graph.add_edge("A", "B", 1);
//! graph.add_edge("A", "C", 1);
//! graph.add_edge("B", "D", 1);
//! graph.add_edge("B", "E", 1);
//! graph.add_edge("C", "F", 1);
//! graph.add_edge("E", "F", 1);
//!
//! let bfs: Vec<_> = graph.bfs(&"A").unwrap().cloned().collect();
//! let dfs: Vec<_> = graph.dfs(&"A").unwrap().cloned().collect();
//! assert_eq!(bfs, vec!["A", "B", "C", "D", "E", "F"]);
//! assert_eq!(dfs, vec!["A", "B", "D", "E", "F", "C"]);
//!
//! assert!(!graph.has_cycle());
//! let order = graph.topological_sort().unwrap();
//! assert_eq!(order.first(), Some(&"A"));
//! ```
//!
//! None of the types synchronise internally; wrap a graph in a lock if several threads
//! need to modify it.
#![allow(non_snake_case)]

pub mod algorithms;
pub mod datastructures;
pub mod error;
pub mod graph;
pub mod iterators;

pub use error::GraphError;
pub use graph::{Edge, NodeId, Weight, WeightedDigraph};
