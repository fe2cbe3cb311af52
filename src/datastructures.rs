//! Auxiliary data structures used by the graph algorithms.
pub mod heap;
