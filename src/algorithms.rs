//! Structural algorithms on [WeightedDigraph]: cycle detection, topological
//! ordering and weakly connected components. Shortest-path searches live in
//! [paths].
use union_find_rs::prelude::*;

use crate::error::{GraphError, Result};
use crate::graph::*;

pub mod paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

impl<N: NodeId> WeightedDigraph<N> {
    /// Returns whether the graph contains a directed cycle, including self-loops.
    ///
    /// Runs a depth-first search from every unvisited node in [canonical order](WeightedDigraph::nodes)
    /// and reports a cycle as soon as an edge leads back into a node whose search is still in progress.
    pub fn has_cycle(&self) -> bool {
        let mut states = vec![VisitState::Unvisited; self.num_nodes()];
        for root in self.ordered_indices() {
            if states[root] == VisitState::Unvisited && self.back_edge_from(root, &mut states) {
                tracing::debug!(root = ?self.id(root), "cycle found");
                return true
            }
        }
        false
    }

    fn back_edge_from(&self, root: usize, states: &mut [VisitState]) -> bool {
        // Each stack entry holds a node and the position of the next edge to explore
        let mut stack = vec![(root, 0)];
        states[root] = VisitState::InProgress;

        while let Some((u, next)) = stack.last_mut() {
            let u = *u;
            let Some(e) = self.edges_at(u).get(*next) else {
                states[u] = VisitState::Done;
                stack.pop();
                continue
            };
            *next += 1;

            let v = self.index(&e.target);
            match states[v] {
                VisitState::InProgress => return true,
                VisitState::Unvisited => {
                    states[v] = VisitState::InProgress;
                    stack.push((v, 0));
                }
                VisitState::Done => {}
            }
        }

        false
    }

    /// Returns the nodes in an order where every edge points forward, or [GraphError::Cycle]
    /// if no such order exists.
    ///
    /// The order is the reversed depth-first post-order, with searches started from the
    /// unvisited nodes in [canonical order](WeightedDigraph::nodes). It is a valid but not
    /// necessarily the only topological order.
    pub fn topological_sort(&self) -> Result<Vec<N>, N> {
        if self.has_cycle() {
            return Err(GraphError::Cycle)
        }

        let mut visited = vec![false; self.num_nodes()];
        let mut post_order = Vec::with_capacity(self.num_nodes());
        for root in self.ordered_indices() {
            if visited[root] {
                continue
            }
            visited[root] = true;

            let mut stack = vec![(root, 0)];
            while let Some((u, next)) = stack.last_mut() {
                let u = *u;
                let Some(e) = self.edges_at(u).get(*next) else {
                    // All descendants of u are finished
                    post_order.push(u);
                    stack.pop();
                    continue
                };
                *next += 1;

                let v = self.index(&e.target);
                if !visited[v] {
                    visited[v] = true;
                    stack.push((v, 0));
                }
            }
        }

        Ok(post_order.into_iter().rev().map(|i| self.id(i).clone()).collect())
    }

    /// Returns the weakly connected components of the graph, that is the components when
    /// edge directions are ignored. Members of each component and the components themselves
    /// follow the [canonical order](WeightedDigraph::nodes).
    #[allow(unused_must_use)]
    pub fn components(&self) -> Vec<Vec<&N>> {
        let mut dsets: DisjointSets<usize> = DisjointSets::new();

        for u in 0..self.num_nodes() {
            dsets.make_set(u);
        }

        for u in 0..self.num_nodes() {
            for e in self.edges_at(u) {
                // Linking two members of the same set trips an assertion inside
                // union-find-rs, so only distinct roots are joined. Every index
                // has a set, hence neither lookup nor union can fail.
                let v = self.index(&e.target);
                let (Ok(ru), Ok(rv)) = (dsets.find_set(&u), dsets.find_set(&v)) else {
                    continue
                };
                if ru != rv {
                    dsets.union(&ru, &rv);
                }
            }
        }

        let mut rank = vec![0; self.num_nodes()];
        for (r, u) in self.ordered_indices().into_iter().enumerate() {
            rank[u] = r;
        }

        let mut comps: Vec<Vec<usize>> = dsets.into_iter()
                .map(|comp| {
                    let mut comp: Vec<usize> = comp.into_iter().collect();
                    comp.sort_unstable_by_key(|&u| rank[u]);
                    comp
                })
                .collect();
        comps.sort_unstable_by_key(|comp| rank[comp[0]]);

        comps.into_iter()
             .map(|comp| comp.into_iter().map(|u| self.id(u)).collect())
             .collect()
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
