//! Single-pair shortest paths over non-negative edge weights.
//!
//! Both searches keep their tentative distances in a [Heap] and tolerate stale
//! entries instead of updating priorities in place: whenever a node's distance
//! improves, a fresh entry is pushed and the outdated one stays behind.
//!
//! ```rust
//! use weightgraph::graph::*;
//!
//! let mut graph = WeightedDigraph::new();
//! graph.add_edge('A', 'B', 1);
//! graph.add_edge('A', 'C', 4);
//! graph.add_edge('B', 'C', 1);
//! graph.add_edge('B', 'D', 5);
//! graph.add_edge('C', 'D', 2);
//!
//! let (path, weight) = graph.dijkstra(&'A', &'D').unwrap();
//! assert_eq!(path, vec!['A', 'B', 'C', 'D']);
//! assert_eq!(weight, 4);
//! ```
//!
//! Negative weights are not rejected, but the results are meaningless if the graph
//! contains any.
use crate::datastructures::heap::Heap;
use crate::error::{GraphError, Result};
use crate::graph::*;

/// A queued node together with its priority at the time it was pushed.
#[derive(Debug, Clone, Copy)]
struct Entry {
    node: usize,
    priority: Weight,
}

impl Entry {
    fn new(node: usize, priority: Weight) -> Self {
        Entry { node, priority }
    }
}

fn min_priority(a: &Entry, b: &Entry) -> bool {
    a.priority < b.priority
}

impl<N: NodeId> WeightedDigraph<N> {
    /// Computes a lightest path from `start` to `end` and returns it together with its weight.
    ///
    /// Fails with [GraphError::NotFound] if either node is missing and with
    /// [GraphError::Unreachable] if no path exists. All edge weights must be non-negative.
    /// Paths whose total weight overflows a [Weight] are ignored.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn dijkstra(&self, start: &N, end: &N) -> Result<(Vec<N>, Weight), N> {
        let (s, t) = self.endpoints(start, end)?;

        let mut dist: Vec<Option<Weight>> = vec![None; self.num_nodes()];
        let mut pred: Vec<Option<usize>> = vec![None; self.num_nodes()];
        let mut queue = Heap::new(min_priority);

        dist[s] = Some(0);
        queue.push(Entry::new(s, 0));

        while let Some(Entry { node: u, priority }) = queue.pop() {
            let Some(du) = dist[u] else {
                continue
            };
            if priority > du {
                // Stale, u has been settled with a smaller distance
                continue
            }
            if u == t {
                break
            }

            for e in self.edges_at(u) {
                // A path whose weight does not fit into a Weight is never recorded
                let Some(candidate) = du.checked_add(e.weight) else {
                    continue
                };
                let v = self.index(&e.target);
                if dist[v].map_or(true, |dv| candidate < dv) {
                    tracing::trace!(node = ?e.target, distance = candidate, "relaxed");
                    dist[v] = Some(candidate);
                    pred[v] = Some(u);
                    queue.push(Entry::new(v, candidate));
                }
            }
        }

        let Some(weight) = dist[t] else {
            tracing::debug!("unreachable");
            return Err(GraphError::Unreachable { from: start.clone(), to: end.clone() })
        };

        let path = self.trace_path(&pred, s, t);
        tracing::debug!(weight, hops = path.len() - 1, "path found");
        Ok((path, weight))
    }

    /// Computes a path from `start` to `end` guided by `heuristic(node, end)`, an estimate
    /// of the remaining distance to `end`, and returns it together with its weight.
    ///
    /// The search stops as soon as `end` is taken from the queue and never re-expands
    /// nodes. The result is therefore only guaranteed to be a lightest path if the heuristic
    /// is admissible (never overestimates) and consistent; this is not checked. With a
    /// heuristic that is constantly zero the search behaves like [WeightedDigraph::dijkstra].
    ///
    /// Fails like [WeightedDigraph::dijkstra].
    #[tracing::instrument(level = "debug", skip(self, heuristic))]
    pub fn a_star<H>(&self, start: &N, end: &N, mut heuristic: H) -> Result<(Vec<N>, Weight), N>
            where H: FnMut(&N, &N) -> Weight {
        let (s, t) = self.endpoints(start, end)?;

        // Cost of the best known path from `start`
        let mut score: Vec<Option<Weight>> = vec![None; self.num_nodes()];
        let mut pred: Vec<Option<usize>> = vec![None; self.num_nodes()];
        let mut queue = Heap::new(min_priority);

        score[s] = Some(0);
        queue.push(Entry::new(s, heuristic(start, end)));

        while let Some(Entry { node: u, .. }) = queue.pop() {
            let Some(gu) = score[u] else {
                continue
            };
            if u == t {
                let path = self.trace_path(&pred, s, t);
                tracing::debug!(weight = gu, hops = path.len() - 1, "path found");
                return Ok((path, gu))
            }

            for e in self.edges_at(u) {
                let Some(candidate) = gu.checked_add(e.weight) else {
                    continue
                };
                let v = self.index(&e.target);
                if score[v].map_or(true, |gv| candidate < gv) {
                    let estimate = candidate.saturating_add(heuristic(&e.target, end));
                    tracing::trace!(node = ?e.target, cost = candidate, estimate, "relaxed");
                    score[v] = Some(candidate);
                    pred[v] = Some(u);
                    queue.push(Entry::new(v, estimate));
                }
            }
        }

        tracing::debug!("unreachable");
        Err(GraphError::Unreachable { from: start.clone(), to: end.clone() })
    }

    fn endpoints(&self, start: &N, end: &N) -> Result<(usize, usize), N> {
        let s = self.index_of(start).ok_or_else(|| GraphError::NotFound(start.clone()))?;
        let t = self.index_of(end).ok_or_else(|| GraphError::NotFound(end.clone()))?;
        Ok((s, t))
    }

    /// Follows predecessors back from `end` and returns the path from `start` to `end`.
    fn trace_path(&self, pred: &[Option<usize>], start: usize, end: usize) -> Vec<N> {
        let mut path = vec![end];
        let mut u = end;

        // With negative weights the predecessors can form a cycle, the length bound
        // keeps the walk finite.
        while u != start && path.len() <= self.num_nodes() {
            match pred[u] {
                Some(p) => {
                    path.push(p);
                    u = p;
                }
                None => break
            }
        }

        path.into_iter().rev().map(|i| self.id(i).clone()).collect()
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####

#[cfg(test)]
mod test {
    use super::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    /*
       A --1-- B
       |     / |
       4   1   5
       | /     |
       C --2-- D
    */
    fn square() -> WeightedDigraph<&'static str> {
        vec![("A", "B", 1), ("A", "C", 4), ("B", "C", 1), ("B", "D", 5), ("C", "D", 2)]
            .into_iter().collect()
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    struct Coord {
        x: i64,
        y: i64,
    }
    impl NodeId for Coord {}

    fn at(x: i64, y: i64) -> Coord {
        Coord { x, y }
    }

    fn manhattan(a: &Coord, b: &Coord) -> Weight {
        (a.x - b.x).abs() + (a.y - b.y).abs()
    }

    // Squared distance, overestimates on purpose
    fn euclidean_squared(a: &Coord, b: &Coord) -> Weight {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        dx*dx + dy*dy
    }

    fn chebyshev(a: &Coord, b: &Coord) -> Weight {
        (a.x - b.x).abs().max((a.y - b.y).abs())
    }

    /// Lightest path weights from `s` by repeated relaxation of all edges.
    fn brute_force(G: &WeightedDigraph<u32>, s: u32) -> Vec<Option<Weight>> {
        let mut dist = vec![None; G.num_nodes()];
        dist[s as usize] = Some(0);
        for _ in 0..G.num_nodes() {
            for (u, e) in G.edges() {
                if let Some(du) = dist[*u as usize] {
                    let dv = &mut dist[e.target as usize];
                    if dv.map_or(true, |dv| du + e.weight < dv) {
                        *dv = Some(du + e.weight);
                    }
                }
            }
        }
        dist
    }

    fn path_weight(G: &WeightedDigraph<u32>, path: &[u32]) -> Weight {
        path.windows(2).map(|p| {
            G.neighbours(&p[0]).unwrap().iter()
             .filter(|e| e.target == p[1])
             .map(|e| e.weight)
             .min().unwrap()
        }).sum()
    }

    #[test]
    fn dijkstra_missing_nodes() {
        let G: WeightedDigraph<&str> = WeightedDigraph::new();
        assert_eq!(G.dijkstra(&"start", &"end"), Err(GraphError::NotFound("start")));

        let G = square();
        assert_eq!(G.dijkstra(&"A", &"Z"), Err(GraphError::NotFound("Z")));
        assert_eq!(G.dijkstra(&"Y", &"Z"), Err(GraphError::NotFound("Y")));
    }

    #[test]
    fn dijkstra_square() {
        let G = square();
        assert_eq!(G.dijkstra(&"A", &"B").unwrap(), (vec!["A", "B"], 1));
        assert_eq!(G.dijkstra(&"A", &"C").unwrap(), (vec!["A", "B", "C"], 2));
        assert_eq!(G.dijkstra(&"A", &"D").unwrap(), (vec!["A", "B", "C", "D"], 4));
        assert_eq!(G.dijkstra(&"C", &"C").unwrap(), (vec!["C"], 0));
    }

    #[test]
    fn dijkstra_unreachable() {
        let mut G = square();
        G.add_node("Z");
        assert_eq!(G.dijkstra(&"A", &"Z"), Err(GraphError::Unreachable { from: "A", to: "Z" }));

        // Edges are directed
        assert_eq!(G.dijkstra(&"D", &"A"), Err(GraphError::Unreachable { from: "D", to: "A" }));
    }

    #[test]
    fn dijkstra_parallel_edges() {
        let mut G = WeightedDigraph::new();
        G.add_edge(0, 1, 7);
        G.add_edge(0, 1, 2);
        G.add_edge(1, 2, 1);
        assert_eq!(G.dijkstra(&0, &2).unwrap(), (vec![0, 1, 2], 3));
    }

    #[test]
    fn dijkstra_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..40 {
            let n: u32 = rng.gen_range(2..30);
            let mut G = WeightedDigraph::new();
            G.add_nodes(0..n);
            for _ in 0..rng.gen_range(0..4*n) {
                let u = rng.gen_range(0..n);
                let v = rng.gen_range(0..n);
                G.add_edge(u, v, rng.gen_range(0..20));
            }

            let s = rng.gen_range(0..n);
            let dist = brute_force(&G, s);
            for t in 0..n {
                match (G.dijkstra(&s, &t), dist[t as usize]) {
                    (Ok((path, weight)), Some(d)) => {
                        assert_eq!(weight, d);
                        assert_eq!(path.first(), Some(&s));
                        assert_eq!(path.last(), Some(&t));
                        assert_eq!(path_weight(&G, &path), d);
                    }
                    (Err(GraphError::Unreachable { .. }), None) => {}
                    (res, d) => panic!("dijkstra returned {res:?}, expected {d:?}"),
                }
            }
        }
    }

    #[test]
    fn a_star_missing_nodes() {
        let origin = at(0, 0);
        let G: WeightedDigraph<Coord> = WeightedDigraph::new();
        assert_eq!(G.a_star(&origin, &at(1, 1), manhattan), Err(GraphError::NotFound(origin)));

        let mut G = WeightedDigraph::new();
        G.add_node(origin);
        assert_eq!(G.a_star(&origin, &at(1, 1), manhattan), Err(GraphError::NotFound(at(1, 1))));
    }

    #[test]
    fn a_star_unreachable() {
        let mut G = WeightedDigraph::new();
        G.add_node(at(0, 0));
        G.add_node(at(2, 2));
        assert_eq!(G.a_star(&at(0, 0), &at(2, 2), manhattan),
                   Err(GraphError::Unreachable { from: at(0, 0), to: at(2, 2) }));
    }

    #[test]
    fn a_star_manhattan() {
        let (a, b, c) = (at(0, 0), at(1, 0), at(1, 1));
        let mut G = WeightedDigraph::new();
        G.add_edge(a, b, 1);
        G.add_edge(b, c, 1);
        G.add_edge(a, c, 10);
        assert_eq!(G.a_star(&a, &c, manhattan).unwrap(), (vec![a, b, c], 2));
        assert_eq!(G.a_star(&a, &a, manhattan).unwrap(), (vec![a], 0));
    }

    #[test]
    fn a_star_valley() {
        let (a, b, c) = (at(0, 2), at(1, 2), at(2, 2));
        let (d, e, f) = (at(0, 0), at(1, 0), at(2, 0));
        let mut G = WeightedDigraph::new();
        // Direct but expensive
        G.add_edge(a, b, 100);
        G.add_edge(b, c, 1);
        // Cheap detour
        G.add_edge(a, d, 1);
        G.add_edge(d, e, 1);
        G.add_edge(e, f, 1);
        G.add_edge(f, c, 1);
        assert_eq!(G.a_star(&a, &c, euclidean_squared).unwrap(), (vec![a, d, e, f, c], 4));
    }

    #[test]
    fn a_star_diagonal() {
        let (a, b, c, d) = (at(0, 2), at(0, 0), at(2, 2), at(2, 0));
        let mut G = WeightedDigraph::new();
        G.add_edge(a, b, 1);
        G.add_edge(b, d, 1);
        G.add_edge(a, c, 10);
        G.add_edge(c, d, 1);
        G.add_edge(a, d, 1);
        assert_eq!(G.a_star(&a, &d, chebyshev).unwrap(), (vec![a, d], 1));
    }

    #[test]
    fn a_star_returns_first_pop_of_end() {
        // The heuristic wildly overestimates at 1, so the expensive direct
        // edge reaches the end first and is returned as is.
        let mut G = WeightedDigraph::new();
        G.add_edge(0, 1, 1);
        G.add_edge(1, 2, 1);
        G.add_edge(0, 2, 10);
        let h = |u: &u32, _: &u32| if *u == 1 { 100 } else { 0 };
        assert_eq!(G.a_star(&0, &2, h).unwrap(), (vec![0, 2], 10));
        assert_eq!(G.dijkstra(&0, &2).unwrap(), (vec![0, 1, 2], 2));
    }

    #[test]
    fn a_star_zero_heuristic_matches_dijkstra() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for size in [2, 5, 10, 25] {
            let G = WeightedDigraph::grid(size, size, |_, _| rng.gen_range(1..=10));
            let (s, t) = (0, size*size - 1);
            let expected = G.dijkstra(&s, &t).unwrap();
            assert_eq!(G.a_star(&s, &t, |_, _| 0).unwrap(), expected);
            assert_eq!(expected.0.len() as u32, 2*size - 1);

            // Manhattan distance on the grid is admissible for weights >= 1
            let coords = |u: &u32| ((u / size) as Weight, (u % size) as Weight);
            let manhattan = |u: &u32, v: &u32| {
                let ((ux, uy), (vx, vy)) = (coords(u), coords(v));
                (ux - vx).abs() + (uy - vy).abs()
            };
            assert_eq!(G.a_star(&s, &t, manhattan).unwrap().1, expected.1);
        }
    }

    #[test]
    fn searches_ignore_overflowing_paths() {
        let mut G = WeightedDigraph::new();
        G.add_edge(0, 1, Weight::MAX);
        G.add_edge(1, 2, 1);
        assert_eq!(G.dijkstra(&0, &1).unwrap(), (vec![0, 1], Weight::MAX));
        assert_eq!(G.dijkstra(&0, &2), Err(GraphError::Unreachable { from: 0, to: 2 }));
        assert_eq!(G.a_star(&0, &2, |_, _| 0), Err(GraphError::Unreachable { from: 0, to: 2 }));

        // A representable detour is still found
        G.add_edge(0, 3, 5);
        G.add_edge(3, 2, 5);
        assert_eq!(G.dijkstra(&0, &2).unwrap(), (vec![0, 3, 2], 10));
        assert_eq!(G.a_star(&0, &2, |_, _| 0).unwrap(), (vec![0, 3, 2], 10));
    }

    #[test]
    fn a_star_huge_heuristic() {
        let G = WeightedDigraph::path(4, 3);
        let (path, weight) = G.a_star(&0, &3, |_, _| Weight::MAX).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3]);
        assert_eq!(weight, 9);
    }
}
