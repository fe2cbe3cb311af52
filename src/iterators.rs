use std::collections::VecDeque;

use crate::error::{GraphError, Result};
use crate::graph::*;

/*
    Breadth-first traversal. Nodes are marked as visited when they are
    enqueued, so every node enters the queue at most once.
*/
pub struct Bfs<'a, N: NodeId> {
    G: &'a WeightedDigraph<N>,
    visited: Vec<bool>,
    queue: VecDeque<usize>,
}

impl<'a, N: NodeId> Bfs<'a, N> {
    fn new(G: &'a WeightedDigraph<N>, start: usize) -> Self {
        let mut visited = vec![false; G.num_nodes()];
        visited[start] = true;
        Bfs { G, visited, queue: VecDeque::from(vec![start]) }
    }
}

impl<'a, N: NodeId> Iterator for Bfs<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;
        for e in self.G.edges_at(u) {
            let v = self.G.index(&e.target);
            if !self.visited[v] {
                self.visited[v] = true;
                self.queue.push_back(v);
            }
        }

        Some(self.G.id(u))
    }
}

/*
    Depth-first traversal with an explicit stack. Neighbours are pushed in
    reverse edge order so they are popped in edge order, and nodes are only
    marked as visited when popped. A node can therefore sit on the stack
    several times; later copies are skipped.
*/
pub struct Dfs<'a, N: NodeId> {
    G: &'a WeightedDigraph<N>,
    visited: Vec<bool>,
    stack: Vec<usize>,
}

impl<'a, N: NodeId> Dfs<'a, N> {
    fn new(G: &'a WeightedDigraph<N>, start: usize) -> Self {
        Dfs { G, visited: vec![false; G.num_nodes()], stack: vec![start] }
    }
}

impl<'a, N: NodeId> Iterator for Dfs<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(u) = self.stack.pop() {
            if self.visited[u] {
                continue
            }
            self.visited[u] = true;

            for e in self.G.edges_at(u).iter().rev() {
                let v = self.G.index(&e.target);
                if !self.visited[v] {
                    self.stack.push(v);
                }
            }

            return Some(self.G.id(u))
        }

        None
    }
}

impl<N: NodeId> WeightedDigraph<N> {
    /// Returns a breadth-first iterator over all nodes reachable from `start`.
    /// Outgoing edges are explored in insertion order.
    ///
    /// ```rust
    /// use weightgraph::graph::WeightedDigraph;
    ///
    /// let graph = WeightedDigraph::path(4, 1);
    /// let order: Vec<u32> = graph.bfs(&1).unwrap().cloned().collect();
    /// assert_eq!(order, vec![1, 2, 3]);
    /// ```
    pub fn bfs(&self, start: &N) -> Result<Bfs<'_, N>, N> {
        let start = self.index_of(start).ok_or_else(|| GraphError::NotFound(start.clone()))?;
        Ok(Bfs::new(self, start))
    }

    /// Returns a depth-first iterator over all nodes reachable from `start`, visiting
    /// them in the same order as a recursive traversal which follows edges in
    /// insertion order.
    pub fn dfs(&self, start: &N) -> Result<Dfs<'_, N>, N> {
        let start = self.index_of(start).ok_or_else(|| GraphError::NotFound(start.clone()))?;
        Ok(Dfs::new(self, start))
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
