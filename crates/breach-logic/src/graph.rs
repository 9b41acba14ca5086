//! Unweighted graph: the engine with boolean edges.
//!
//! Shares its vertex handling and traversals with the network through
//! [`Engine`]; see there for the index stability rules.

use crate::engine::Engine;
use crate::traversal::{self, Adjacency};

pub type Graph<T> = Engine<T, bool>;

impl<T: PartialEq> Engine<T, bool> {
    pub fn has_edge(&self, index1: usize, index2: usize) -> bool {
        self.cell(index1, index2)
    }

    /// No-op if either vertex is absent.
    pub fn add_edge(&mut self, vertex1: &T, vertex2: &T) {
        self.set_edge(vertex1, vertex2, true);
    }

    pub fn add_edge_at(&mut self, index1: usize, index2: usize) {
        self.set_cell(index1, index2, true);
    }

    pub fn remove_edge(&mut self, vertex1: &T, vertex2: &T) {
        self.set_edge(vertex1, vertex2, false);
    }

    pub fn remove_edge_at(&mut self, index1: usize, index2: usize) {
        self.set_cell(index1, index2, false);
    }

    /// Fewest-hop path as indices; see [`traversal::bfs_path`].
    pub fn shortest_path_indices(&self, start: usize, target: usize) -> Vec<usize> {
        traversal::bfs_path(self, start, target)
    }

    pub fn shortest_path(&self, start: &T, target: &T) -> Vec<&T> {
        match (self.index_of(start), self.index_of(target)) {
            (Some(s), Some(t)) => self.resolve(&self.shortest_path_indices(s, t)),
            _ => Vec::new(),
        }
    }

    /// Hop count of the fewest-hop path, 0 when there is none.
    pub fn shortest_path_length(&self, start: &T, target: &T) -> usize {
        self.shortest_path(start, target).len().saturating_sub(1)
    }
}

impl<T: PartialEq + Clone> Engine<T, bool> {
    /// Spanning tree grown from vertex 0, keeping every vertex at its current
    /// index. Empty when this graph is empty or disconnected.
    pub fn spanning_tree(&self) -> Graph<T> {
        if !self.is_connected() {
            return Graph::new();
        }
        let mut tree = self.vertices_only();

        let n = self.size();
        let mut visited = vec![false; n];
        let mut pending: Vec<(usize, usize)> = Vec::new();
        visited[0] = true;
        for i in self.adjacent_indices(0) {
            visited[i] = true;
            pending.push((0, i));
        }
        while let Some((from, to)) = pending.pop() {
            tree.add_edge_at(from, to);
            for i in self.adjacent_indices(to) {
                if !visited[i] {
                    visited[i] = true;
                    pending.push((to, i));
                }
            }
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn cycle4() -> Graph<&'static str> {
        let mut g = Graph::new();
        for v in ["a", "b", "c", "d"] {
            g.add_vertex(v);
        }
        g.add_edge(&"a", &"b");
        g.add_edge(&"b", &"c");
        g.add_edge(&"c", &"d");
        g.add_edge(&"d", &"a");
        g
    }

    #[test]
    fn test_add_edge_is_symmetric() {
        let g = cycle4();
        assert!(g.neighbors(&"a").contains(&&"b"));
        assert!(g.neighbors(&"b").contains(&&"a"));
        assert_eq!(g.neighbors(&"a"), vec![&"b", &"d"]);
    }

    #[test]
    fn test_random_edges_are_symmetric() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let n = rng.gen_range(2..12);
            let mut g = Graph::new();
            for i in 0..n {
                g.add_vertex(i);
            }
            for _ in 0..n * 2 {
                let (a, b) = (rng.gen_range(0..n), rng.gen_range(0..n));
                g.add_edge(&a, &b);
                assert!(g.neighbors(&a).contains(&&b));
                assert!(g.neighbors(&b).contains(&&a));
            }
        }
    }

    #[test]
    fn test_edge_with_unknown_vertex_is_noop() {
        let mut g = cycle4();
        g.add_edge(&"a", &"zz");
        g.remove_edge(&"zz", &"a");
        assert_eq!(g.neighbors(&"a").len(), 2);
        assert!(g.neighbors(&"zz").is_empty());
    }

    #[test]
    fn test_remove_edge() {
        let mut g = cycle4();
        g.remove_edge(&"a", &"b");
        assert!(!g.neighbors(&"a").contains(&&"b"));
        assert!(!g.neighbors(&"b").contains(&&"a"));
        assert!(g.is_connected());
    }

    #[test]
    fn test_connected_cycle_and_disconnected_split() {
        assert!(cycle4().is_connected());

        let mut split = Graph::new();
        for v in ["a", "b", "c", "d"] {
            split.add_vertex(v);
        }
        split.add_edge(&"a", &"b");
        split.add_edge(&"c", &"d");
        assert!(!split.is_connected());
        // BFS from a single vertex misses the other half.
        assert_eq!(split.bfs(&"c").len(), 2);
    }

    #[test]
    fn test_dfs_and_bfs_orders() {
        let g = cycle4();
        assert_eq!(g.dfs(&"a"), vec![&"a", &"b", &"c", &"d"]);
        assert_eq!(g.bfs(&"a"), vec![&"a", &"b", &"d", &"c"]);
        assert!(g.dfs_from(10).is_empty());
        assert!(g.bfs(&"zz").is_empty());
    }

    #[test]
    fn test_remove_vertex_shifts_indices() {
        let mut g = Graph::new();
        for v in ["a", "b", "c", "d", "e"] {
            g.add_vertex(v);
        }
        g.add_edge(&"a", &"c");
        g.add_edge(&"c", &"e");
        g.add_edge(&"b", &"d");
        g.add_edge(&"d", &"e");

        let before: Vec<_> = ["c", "d", "e"].iter().map(|v| g.index_of(v).unwrap()).collect();
        g.remove_vertex(&"b");
        let after: Vec<_> = ["c", "d", "e"].iter().map(|v| g.index_of(v).unwrap()).collect();
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(*a, b - 1);
        }
        assert_eq!(g.index_of(&"a"), Some(0));

        // Surviving edges are intact and no ghost edge replaced b-d.
        assert_eq!(g.neighbors(&"c"), vec![&"a", &"e"]);
        assert_eq!(g.neighbors(&"d"), vec![&"e"]);
        assert_eq!(g.neighbors(&"e"), vec![&"c", &"d"]);
        assert_eq!(g.size(), 4);
    }

    #[test]
    fn test_growth_past_default_capacity() {
        let mut g = Graph::new();
        for i in 0..25 {
            g.add_vertex(i);
        }
        for i in 0..24 {
            g.add_edge(&i, &(i + 1));
        }
        assert!(g.is_connected());
        assert_eq!(g.shortest_path_length(&0, &24), 24);
    }

    #[test]
    fn test_shortest_path() {
        let g = cycle4();
        assert_eq!(g.shortest_path(&"a", &"c").len(), 3);
        assert_eq!(g.shortest_path_length(&"a", &"d"), 1);
        assert!(g.shortest_path(&"a", &"a").is_empty());
        assert_eq!(g.shortest_path_length(&"a", &"zz"), 0);
    }

    #[test]
    fn test_spanning_tree() {
        let g = cycle4();
        let tree = g.spanning_tree();
        assert_eq!(tree.size(), 4);
        assert!(tree.is_connected());
        let edges: usize = (0..4).map(|i| tree.adjacent_indices(i).len()).sum::<usize>() / 2;
        assert_eq!(edges, 3);

        let mut split = Graph::new();
        split.add_vertex(1);
        split.add_vertex(2);
        assert!(split.spanning_tree().is_empty());
    }
}
