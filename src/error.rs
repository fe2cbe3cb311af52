use std::fmt::Debug;

use thiserror::Error;

/// Errors returned by the traversal, ordering and search operations of
/// [WeightedDigraph](crate::graph::WeightedDigraph).
///
/// The offending node identities are carried along so callers can report them.
/// An empty [Heap](crate::datastructures::heap::Heap) is not an error, `pop` and
/// `peek` simply return `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError<N: Debug> {
    /// A start or end node is not contained in the graph.
    #[error("node {0:?} is not contained in the graph")]
    NotFound(N),

    /// Both nodes exist but no directed path leads from `from` to `to`.
    #[error("no path from {from:?} to {to:?}")]
    Unreachable {
        /// Start of the failed search
        from: N,
        /// Target of the failed search
        to: N,
    },

    /// A topological ordering was requested for a graph containing a cycle.
    #[error("graph contains a cycle, no topological order exists")]
    Cycle,
}

pub type Result<T, N> = std::result::Result<T, GraphError<N>>;


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
