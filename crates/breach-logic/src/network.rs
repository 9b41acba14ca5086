//! Weighted network: the graph engine with real-valued symmetric edges.
//!
//! A missing edge is stored as `f64::INFINITY`; `0.0` is a valid, free edge.
//! Adds shortest path by total weight (Dijkstra) and a minimum spanning tree
//! (Prim). Vertex handling and index stability are shared with
//! [`Graph`](crate::graph::Graph) through [`Engine`].

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::engine::Engine;
use crate::matrix::EdgeValue;
use crate::traversal::{self, Adjacency};

/// Heap entry ordered by weight, then by discovery sequence.
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    weight: f64,
    seq: u64,
    index: usize,
    from: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

pub type Network<T> = Engine<T, f64>;

impl<T: PartialEq> Engine<T, f64> {
    /// Weight of the edge between two indices, `None` when there is none.
    pub fn edge_weight(&self, index1: usize, index2: usize) -> Option<f64> {
        let w = self.cell(index1, index2);
        w.is_present().then_some(w)
    }

    /// Weighted edge; no-op if either vertex is absent.
    pub fn add_edge(&mut self, vertex1: &T, vertex2: &T, weight: f64) {
        self.set_edge(vertex1, vertex2, weight);
    }

    /// Edge with weight `0.0`.
    pub fn add_unweighted_edge(&mut self, vertex1: &T, vertex2: &T) {
        self.add_edge(vertex1, vertex2, 0.0);
    }

    pub fn add_edge_at(&mut self, index1: usize, index2: usize, weight: f64) {
        self.set_cell(index1, index2, weight);
    }

    /// Resets both directions to "absent" (infinity).
    pub fn remove_edge(&mut self, vertex1: &T, vertex2: &T) {
        self.set_edge(vertex1, vertex2, f64::ABSENT);
    }

    pub fn remove_edge_at(&mut self, index1: usize, index2: usize) {
        self.set_cell(index1, index2, f64::ABSENT);
    }

    /// Least-weight path from `start` to `target` as indices, both ends
    /// included. Equal-weight ties go to the vertex discovered first.
    ///
    /// Empty when either index is invalid, `start == target`, or the target
    /// is unreachable.
    pub fn shortest_path_indices(&self, start: usize, target: usize) -> Vec<usize> {
        if !self.index_is_valid(start) || !self.index_is_valid(target) || start == target {
            return Vec::new();
        }
        let n = self.size();
        let mut path_weight = vec![f64::INFINITY; n];
        let mut predecessor: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;

        path_weight[start] = 0.0;
        heap.push(Reverse(HeapEntry { weight: 0.0, seq, index: start, from: start }));

        while let Some(Reverse(entry)) = heap.pop() {
            // Stale entry: a cheaper route already settled this vertex.
            if visited[entry.index] {
                continue;
            }
            visited[entry.index] = true;
            if entry.index == target {
                break;
            }
            for i in self.adjacent_indices(entry.index) {
                if visited[i] {
                    continue;
                }
                let candidate = path_weight[entry.index] + self.cell(entry.index, i);
                if candidate < path_weight[i] {
                    path_weight[i] = candidate;
                    predecessor[i] = Some(entry.index);
                    seq += 1;
                    heap.push(Reverse(HeapEntry {
                        weight: candidate,
                        seq,
                        index: i,
                        from: entry.index,
                    }));
                }
            }
        }

        if !visited[target] {
            return Vec::new();
        }
        traversal::unwind(&predecessor, start, target)
    }

    pub fn shortest_path(&self, start: &T, target: &T) -> Vec<&T> {
        match (self.index_of(start), self.index_of(target)) {
            (Some(s), Some(t)) => self.resolve(&self.shortest_path_indices(s, t)),
            _ => Vec::new(),
        }
    }

    /// Total weight of the least-weight path, `f64::INFINITY` when there is
    /// no path (including `start == target` and unknown vertices).
    pub fn shortest_path_weight_at(&self, start: usize, target: usize) -> f64 {
        let path = self.shortest_path_indices(start, target);
        if path.is_empty() {
            return f64::INFINITY;
        }
        path.windows(2)
            .map(|pair| self.cell(pair[0], pair[1]))
            .sum()
    }

    pub fn shortest_path_weight(&self, start: &T, target: &T) -> f64 {
        match (self.index_of(start), self.index_of(target)) {
            (Some(s), Some(t)) => self.shortest_path_weight_at(s, t),
            _ => f64::INFINITY,
        }
    }

}

impl<T: PartialEq + Clone> Engine<T, f64> {
    /// Minimum spanning tree by Prim's algorithm, grown from vertex 0.
    ///
    /// The result holds every vertex at its original index and only the
    /// tree edges, with their weights. Empty when this network is empty or
    /// disconnected.
    pub fn minimum_spanning_tree(&self) -> Network<T> {
        if !self.is_connected() {
            return Network::new();
        }
        let mut tree = self.vertices_only();

        let n = self.size();
        let mut visited = vec![false; n];
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;
        let mut added = 1;

        let mut frontier = |heap: &mut BinaryHeap<Reverse<HeapEntry>>, visited: &[bool], from: usize| {
            for i in self.adjacent_indices(from) {
                if !visited[i] {
                    seq += 1;
                    heap.push(Reverse(HeapEntry {
                        weight: self.cell(from, i),
                        seq,
                        index: i,
                        from,
                    }));
                }
            }
        };

        visited[0] = true;
        frontier(&mut heap, &visited, 0);

        while added < n {
            let Some(Reverse(edge)) = heap.pop() else {
                break;
            };
            // Both ends already in the tree: not a crossing edge any more.
            if visited[edge.index] {
                continue;
            }
            visited[edge.index] = true;
            added += 1;
            tree.add_edge_at(edge.from, edge.index, edge.weight);
            frontier(&mut heap, &visited, edge.index);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sample() -> Network<char> {
        //   a --1-- b --1-- c
        //    \             /
        //     ----- 5 -----
        //   c --0-- d
        let mut net = Network::new();
        for v in ['a', 'b', 'c', 'd'] {
            net.add_vertex(v);
        }
        net.add_edge(&'a', &'b', 1.0);
        net.add_edge(&'b', &'c', 1.0);
        net.add_edge(&'a', &'c', 5.0);
        net.add_unweighted_edge(&'c', &'d');
        net
    }

    /// Minimum total weight over every simple path, by exhaustive DFS.
    fn brute_force(net: &Network<usize>, start: usize, target: usize) -> f64 {
        fn walk(net: &Network<usize>, at: usize, target: usize, seen: &mut Vec<bool>, acc: f64, best: &mut f64) {
            if at == target {
                *best = best.min(acc);
                return;
            }
            for next in net.neighbor_indices(at) {
                if !seen[next] {
                    seen[next] = true;
                    let w = net.edge_weight(at, next).unwrap_or(f64::INFINITY);
                    walk(net, next, target, seen, acc + w, best);
                    seen[next] = false;
                }
            }
        }
        let mut seen = vec![false; net.size()];
        seen[start] = true;
        let mut best = f64::INFINITY;
        walk(net, start, target, &mut seen, 0.0, &mut best);
        best
    }

    #[test]
    fn test_shortest_path_prefers_lighter_route() {
        let net = sample();
        assert_eq!(net.shortest_path(&'a', &'c'), vec![&'a', &'b', &'c']);
        assert_eq!(net.shortest_path_weight(&'a', &'c'), 2.0);
        // Zero-weight edge is a real edge.
        assert_eq!(net.shortest_path_weight(&'a', &'d'), 2.0);
        assert_eq!(net.shortest_path(&'a', &'d').len(), 4);
    }

    #[test]
    fn test_unreachable_and_invalid() {
        let mut net = sample();
        net.add_vertex('z');
        assert!(net.shortest_path(&'a', &'z').is_empty());
        assert_eq!(net.shortest_path_weight(&'a', &'z'), f64::INFINITY);
        assert!(net.shortest_path_indices(0, 99).is_empty());
        assert_eq!(net.shortest_path_weight(&'a', &'q'), f64::INFINITY);
        assert!(net.shortest_path(&'a', &'a').is_empty());
    }

    #[test]
    fn test_equal_weight_tie_goes_to_first_discovered() {
        // a-b-d and a-c-d both weigh 2; b is discovered before c.
        let mut net = Network::new();
        for v in ['a', 'b', 'c', 'd'] {
            net.add_vertex(v);
        }
        net.add_edge(&'a', &'b', 1.0);
        net.add_edge(&'a', &'c', 1.0);
        net.add_edge(&'b', &'d', 1.0);
        net.add_edge(&'c', &'d', 1.0);
        assert_eq!(net.shortest_path(&'a', &'d'), vec![&'a', &'b', &'d']);
    }

    #[test]
    fn test_remove_edge_keeps_symmetry() {
        let mut net = sample();
        net.remove_edge(&'a', &'b');
        assert_eq!(net.edge_weight(0, 1), None);
        assert_eq!(net.edge_weight(1, 0), None);
        assert_eq!(net.shortest_path_weight(&'a', &'c'), 5.0);
        assert_eq!(net.shortest_path_weight(&'b', &'a'), 6.0);
    }

    #[test]
    fn test_shortest_path_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let n = rng.gen_range(2..=6);
            let mut net = Network::new();
            for i in 0..n {
                net.add_vertex(i);
            }
            for i in 0..n {
                for j in i + 1..n {
                    if rng.gen_bool(0.5) {
                        let w = f64::from(rng.gen_range(0..10u8));
                        net.add_edge(&i, &j, w);
                    }
                }
            }
            for s in 0..n {
                for t in 0..n {
                    if s == t {
                        continue;
                    }
                    let expected = brute_force(&net, s, t);
                    assert_eq!(net.shortest_path_weight(&s, &t), expected, "{s} -> {t}");
                    let path = net.shortest_path_indices(s, t);
                    if expected.is_finite() {
                        assert_eq!(path.first(), Some(&s));
                        assert_eq!(path.last(), Some(&t));
                    } else {
                        assert!(path.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn test_minimum_spanning_tree() {
        let net = sample();
        let mst = net.minimum_spanning_tree();
        assert_eq!(mst.size(), 4);
        assert!(mst.is_connected());
        assert_eq!(mst.edge_weight(0, 2), None);
        let total: f64 = (0..4)
            .flat_map(|i| (i + 1..4).map(move |j| (i, j)))
            .filter_map(|(i, j)| mst.edge_weight(i, j))
            .sum();
        assert_eq!(total, 2.0);
    }

    #[test]
    fn test_minimum_spanning_tree_of_disconnected_is_empty() {
        let mut net = sample();
        net.add_vertex('z');
        assert!(net.minimum_spanning_tree().is_empty());
        assert!(Network::<char>::new().minimum_spanning_tree().is_empty());
    }

    #[test]
    fn test_remove_vertex_preserves_weights() {
        let mut net = sample();
        net.remove_vertex(&'b');
        assert_eq!(net.index_of(&'c'), Some(1));
        assert_eq!(net.edge_weight(0, 1), Some(5.0));
        assert_eq!(net.edge_weight(1, 2), Some(0.0));
        assert_eq!(net.neighbors(&'a'), vec![&'c']);
    }
}
