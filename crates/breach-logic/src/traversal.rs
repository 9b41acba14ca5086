//! Index-level traversals shared by [`Graph`](crate::graph::Graph) and
//! [`Network`](crate::network::Network).
//!
//! Every function here takes vertex indices and returns vertex indices in
//! visit order. An invalid start index yields an empty result, never a panic.

use std::collections::VecDeque;

/// Read-only adjacency view over densely indexed vertices `0..vertex_count()`.
pub trait Adjacency {
    fn vertex_count(&self) -> usize;
    fn is_adjacent(&self, from: usize, to: usize) -> bool;

    fn index_is_valid(&self, index: usize) -> bool {
        index < self.vertex_count()
    }

    /// Indices adjacent to `index`, ascending.
    fn adjacent_indices(&self, index: usize) -> Vec<usize> {
        if !self.index_is_valid(index) {
            return Vec::new();
        }
        (0..self.vertex_count())
            .filter(|&i| self.is_adjacent(index, i))
            .collect()
    }
}

/// Depth-first visit order. At the top of the stack the first unvisited
/// neighbour in index order is pushed; when none is left the top is popped.
pub fn dfs_order<A: Adjacency + ?Sized>(graph: &A, start: usize) -> Vec<usize> {
    if !graph.index_is_valid(start) {
        return Vec::new();
    }
    let n = graph.vertex_count();
    let mut visited = vec![false; n];
    let mut stack = vec![start];
    let mut order = vec![start];
    visited[start] = true;

    while let Some(&top) = stack.last() {
        match (0..n).find(|&i| !visited[i] && graph.is_adjacent(top, i)) {
            Some(next) => {
                visited[next] = true;
                stack.push(next);
                order.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
    order
}

/// Breadth-first visit order, neighbours enqueued in index order.
pub fn bfs_order<A: Adjacency + ?Sized>(graph: &A, start: usize) -> Vec<usize> {
    if !graph.index_is_valid(start) {
        return Vec::new();
    }
    let n = graph.vertex_count();
    let mut visited = vec![false; n];
    let mut queue = VecDeque::from([start]);
    let mut order = Vec::with_capacity(n);
    visited[start] = true;

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for i in 0..n {
            if !visited[i] && graph.is_adjacent(current, i) {
                visited[i] = true;
                queue.push_back(i);
            }
        }
    }
    order
}

/// True iff a BFS from index 0 reaches every vertex. An empty graph is not
/// connected.
pub fn is_connected<A: Adjacency + ?Sized>(graph: &A) -> bool {
    let n = graph.vertex_count();
    n > 0 && bfs_order(graph, 0).len() == n
}

/// Fewest-hop path from `start` to `target`, both ends included.
///
/// Empty when either index is invalid, when `start == target`, or when the
/// target cannot be reached.
pub fn bfs_path<A: Adjacency + ?Sized>(graph: &A, start: usize, target: usize) -> Vec<usize> {
    if !graph.index_is_valid(start) || !graph.index_is_valid(target) || start == target {
        return Vec::new();
    }
    let n = graph.vertex_count();
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut queue = VecDeque::from([start]);
    visited[start] = true;

    while let Some(current) = queue.pop_front() {
        if current == target {
            break;
        }
        for i in 0..n {
            if !visited[i] && graph.is_adjacent(current, i) {
                visited[i] = true;
                predecessor[i] = Some(current);
                queue.push_back(i);
            }
        }
    }
    if !visited[target] {
        return Vec::new();
    }
    unwind(&predecessor, start, target)
}

/// Walk a predecessor table back from `target` to `start` and return the
/// path in forward order.
pub(crate) fn unwind(predecessor: &[Option<usize>], start: usize, target: usize) -> Vec<usize> {
    let mut path = vec![target];
    let mut step = target;
    while step != start {
        match predecessor[step] {
            Some(prev) => {
                path.push(prev);
                step = prev;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plain adjacency-list fixture so traversal is tested apart from storage.
    struct Lists(Vec<Vec<usize>>);

    impl Adjacency for Lists {
        fn vertex_count(&self) -> usize {
            self.0.len()
        }
        fn is_adjacent(&self, from: usize, to: usize) -> bool {
            self.0.get(from).is_some_and(|l| l.contains(&to))
        }
    }

    fn tree() -> Lists {
        //     0
        //    / \
        //   1   2
        //  / \
        // 3   4
        Lists(vec![vec![1, 2], vec![0, 3, 4], vec![0], vec![1], vec![1]])
    }

    #[test]
    fn test_dfs_visit_order() {
        assert_eq!(dfs_order(&tree(), 0), vec![0, 1, 3, 4, 2]);
    }

    #[test]
    fn test_bfs_visit_order() {
        assert_eq!(bfs_order(&tree(), 0), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_invalid_start_is_empty() {
        assert!(dfs_order(&tree(), 9).is_empty());
        assert!(bfs_order(&tree(), 9).is_empty());
        assert!(bfs_path(&tree(), 9, 0).is_empty());
    }

    #[test]
    fn test_bfs_path() {
        assert_eq!(bfs_path(&tree(), 3, 2), vec![3, 1, 0, 2]);
        assert!(bfs_path(&tree(), 2, 2).is_empty());
    }

    #[test]
    fn test_is_connected() {
        assert!(is_connected(&tree()));
        let split = Lists(vec![vec![1], vec![0], vec![3], vec![2]]);
        assert!(!is_connected(&split));
        assert!(!is_connected(&Lists(vec![])));
    }
}
