//! Square adjacency storage shared by the graph and network engines.
//!
//! The matrix tracks a `capacity` separately from the number of live
//! vertices. When full it grows by a fixed increment and the live block is
//! copied into the new allocation. Removing a vertex shifts every later row
//! up and every later column left, so indices above the removed one drop by
//! exactly one.

/// Slots added to the matrix each time it runs out of room.
pub const CAPACITY_INCREMENT: usize = 10;

/// A cell value with a marker meaning "no edge here".
pub trait EdgeValue: Copy + PartialEq {
    const ABSENT: Self;

    fn is_present(self) -> bool {
        self != Self::ABSENT
    }
}

impl EdgeValue for bool {
    const ABSENT: bool = false;
}

/// Weights: anything below infinity, zero included, is an edge.
impl EdgeValue for f64 {
    const ABSENT: f64 = f64::INFINITY;

    fn is_present(self) -> bool {
        self < f64::INFINITY
    }
}

/// Row-major square matrix whose unused cells hold [`EdgeValue::ABSENT`].
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix<E> {
    cells: Vec<E>,
    capacity: usize,
    len: usize,
}

impl<E: EdgeValue> Default for AdjacencyMatrix<E> {
    fn default() -> Self {
        Self::with_capacity(CAPACITY_INCREMENT)
    }
}

impl<E: EdgeValue> AdjacencyMatrix<E> {
    /// Empty matrix with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: vec![E::ABSENT; capacity * capacity],
            capacity,
            len: 0,
        }
    }

    /// Number of live rows (and columns).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cell value, or `ABSENT` when either index is outside the live block.
    pub fn get(&self, row: usize, col: usize) -> E {
        if row < self.len && col < self.len {
            self.cells[row * self.capacity + col]
        } else {
            E::ABSENT
        }
    }

    /// Write both `[i][j]` and `[j][i]`. Ignored when either index is not live.
    pub fn set_symmetric(&mut self, i: usize, j: usize, value: E) {
        if i >= self.len || j >= self.len {
            return;
        }
        let cap = self.capacity;
        self.cells[i * cap + j] = value;
        self.cells[j * cap + i] = value;
        debug_assert!(self.is_symmetric(), "adjacency matrix lost symmetry");
    }

    /// Append one live row/column filled with `ABSENT`, growing if full.
    pub fn push(&mut self) {
        if self.len == self.capacity {
            self.grow();
        }
        let n = self.len;
        let cap = self.capacity;
        for i in 0..=n {
            self.cells[n * cap + i] = E::ABSENT;
            self.cells[i * cap + n] = E::ABSENT;
        }
        self.len += 1;
    }

    /// Drop row and column `index`, shifting the rest into place.
    /// No-op on an index outside the live block.
    pub fn remove(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        let cap = self.capacity;
        let n = self.len;

        // Rows up.
        for i in index..n - 1 {
            for j in 0..n {
                self.cells[i * cap + j] = self.cells[(i + 1) * cap + j];
            }
        }
        // Columns left.
        for j in index..n - 1 {
            for i in 0..n - 1 {
                self.cells[i * cap + j] = self.cells[i * cap + j + 1];
            }
        }
        // Clear the vacated row and column so a later push starts clean.
        for k in 0..n {
            self.cells[(n - 1) * cap + k] = E::ABSENT;
            self.cells[k * cap + (n - 1)] = E::ABSENT;
        }
        self.len -= 1;
        debug_assert!(self.is_symmetric(), "adjacency matrix lost symmetry");
    }

    /// True when every live cell mirrors its transpose.
    pub fn is_symmetric(&self) -> bool {
        (0..self.len).all(|i| (i + 1..self.len).all(|j| self.get(i, j) == self.get(j, i)))
    }

    fn grow(&mut self) {
        let new_cap = self.capacity + CAPACITY_INCREMENT;
        let mut cells = vec![E::ABSENT; new_cap * new_cap];
        for i in 0..self.len {
            for j in 0..self.len {
                cells[i * new_cap + j] = self.cells[i * self.capacity + j];
            }
        }
        self.cells = cells;
        self.capacity = new_cap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl EdgeValue for u8 {
        const ABSENT: u8 = 0;
    }

    #[test]
    fn test_push_and_grow() {
        let mut m = AdjacencyMatrix::<bool>::new();
        for _ in 0..CAPACITY_INCREMENT {
            m.push();
        }
        assert_eq!(m.capacity(), CAPACITY_INCREMENT);
        m.set_symmetric(0, 9, true);
        m.push();
        assert_eq!(m.len(), CAPACITY_INCREMENT + 1);
        assert_eq!(m.capacity(), 2 * CAPACITY_INCREMENT);
        // Existing edges survive the reallocation.
        assert!(m.get(0, 9));
        assert!(m.get(9, 0));
        assert!(!m.get(10, 0));
    }

    #[test]
    fn test_set_symmetric_ignores_dead_cells() {
        let mut m = AdjacencyMatrix::<f64>::new();
        m.push();
        m.set_symmetric(0, 3, 1.0);
        assert_eq!(m.get(0, 3), f64::INFINITY);
        assert!(!m.get(0, 3).is_present());
    }

    #[test]
    fn test_zero_weight_is_present() {
        assert!(0.0f64.is_present());
        assert!(!f64::INFINITY.is_present());
        assert!(true.is_present());
        assert!(!false.is_present());
    }

    #[test]
    fn test_remove_shifts_rows_and_columns() {
        let mut m = AdjacencyMatrix::<u8>::new();
        for _ in 0..4 {
            m.push();
        }
        m.set_symmetric(0, 1, 1);
        m.set_symmetric(1, 2, 2);
        m.set_symmetric(2, 3, 3);
        m.set_symmetric(0, 3, 4);
        m.remove(1);
        assert_eq!(m.len(), 3);
        // Old 2-3 is now 1-2, old 0-3 is now 0-2.
        assert_eq!(m.get(1, 2), 3);
        assert_eq!(m.get(0, 2), 4);
        assert_eq!(m.get(0, 1), 0);
        assert!(m.is_symmetric());
        // Re-adding a vertex must not resurrect the old last column.
        m.push();
        assert_eq!(m.get(3, 2), 0);
        assert_eq!(m.get(2, 3), 0);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut m = AdjacencyMatrix::<bool>::new();
        m.push();
        m.remove(5);
        assert_eq!(m.len(), 1);
    }
}
