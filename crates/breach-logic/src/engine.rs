//! The vertex list and adjacency matrix both engines are built on.
//!
//! [`Graph`](crate::graph::Graph) is `Engine<T, bool>` and
//! [`Network`](crate::network::Network) is `Engine<T, f64>`. Everything that
//! does not depend on what an edge carries lives here; edge writes and path
//! searches are added per edge type in their own modules.
//!
//! Vertices are compared by value and addressed by their position in the
//! vertex list. Indices are dense (`0..size()`) and are **not stable across
//! removal**: removing a vertex decrements every index above it, so callers
//! must not cache indices across a `remove_vertex*` call.
//!
//! `add_vertex` does not check for duplicates. When uniqueness matters the
//! caller must check [`Engine::contains`] first.

use crate::matrix::{AdjacencyMatrix, EdgeValue};
use crate::traversal::{self, Adjacency};

#[derive(Debug, Clone)]
pub struct Engine<T, E> {
    vertices: Vec<T>,
    matrix: AdjacencyMatrix<E>,
}

impl<T, E: EdgeValue> Default for Engine<T, E> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            matrix: AdjacencyMatrix::new(),
        }
    }
}

impl<T, E: EdgeValue> Adjacency for Engine<T, E> {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn is_adjacent(&self, from: usize, to: usize) -> bool {
        self.matrix.get(from, to).is_present()
    }
}

impl<T: PartialEq, E: EdgeValue> Engine<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[T] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<&T> {
        self.vertices.get(index)
    }

    /// Position of the first vertex equal to `vertex` (linear scan).
    pub fn index_of(&self, vertex: &T) -> Option<usize> {
        self.vertices.iter().position(|v| v == vertex)
    }

    pub fn contains(&self, vertex: &T) -> bool {
        self.index_of(vertex).is_some()
    }

    pub fn add_vertex(&mut self, vertex: T) {
        self.vertices.push(vertex);
        self.matrix.push();
        debug_assert_eq!(self.vertices.len(), self.matrix.len());
    }

    pub fn remove_vertex(&mut self, vertex: &T) {
        if let Some(index) = self.index_of(vertex) {
            self.remove_vertex_at(index);
        }
    }

    pub fn remove_vertex_at(&mut self, index: usize) {
        if !self.index_is_valid(index) {
            return;
        }
        self.vertices.remove(index);
        self.matrix.remove(index);
        debug_assert_eq!(self.vertices.len(), self.matrix.len());
    }

    pub fn neighbor_indices(&self, index: usize) -> Vec<usize> {
        self.adjacent_indices(index)
    }

    /// Vertices adjacent to `vertex`, in index order. Empty when absent.
    pub fn neighbors(&self, vertex: &T) -> Vec<&T> {
        match self.index_of(vertex) {
            Some(index) => self.resolve(&self.adjacent_indices(index)),
            None => Vec::new(),
        }
    }

    pub fn dfs_from(&self, start: usize) -> Vec<&T> {
        self.resolve(&traversal::dfs_order(self, start))
    }

    pub fn dfs(&self, start: &T) -> Vec<&T> {
        self.index_of(start)
            .map_or_else(Vec::new, |index| self.dfs_from(index))
    }

    pub fn bfs_from(&self, start: usize) -> Vec<&T> {
        self.resolve(&traversal::bfs_order(self, start))
    }

    pub fn bfs(&self, start: &T) -> Vec<&T> {
        self.index_of(start)
            .map_or_else(Vec::new, |index| self.bfs_from(index))
    }

    pub fn is_connected(&self) -> bool {
        traversal::is_connected(self)
    }

    pub(crate) fn cell(&self, index1: usize, index2: usize) -> E {
        self.matrix.get(index1, index2)
    }

    /// Write the edge between two indices in both directions.
    pub(crate) fn set_cell(&mut self, index1: usize, index2: usize, value: E) {
        self.matrix.set_symmetric(index1, index2, value);
    }

    /// Write the edge between two vertices; no-op if either is absent.
    pub(crate) fn set_edge(&mut self, vertex1: &T, vertex2: &T, value: E) {
        if let (Some(i), Some(j)) = (self.index_of(vertex1), self.index_of(vertex2)) {
            self.set_cell(i, j, value);
        }
    }

    pub(crate) fn resolve(&self, indices: &[usize]) -> Vec<&T> {
        indices.iter().map(|&i| &self.vertices[i]).collect()
    }
}

impl<T: PartialEq + Clone, E: EdgeValue> Engine<T, E> {
    /// Same vertices at the same indices, no edges.
    pub(crate) fn vertices_only(&self) -> Self {
        let mut copy = Self::new();
        for v in &self.vertices {
            copy.add_vertex(v.clone());
        }
        copy
    }
}
