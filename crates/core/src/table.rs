//! Dense, strongly keyed percentage tables — the join shape shared by
//! cohort matrices and category-sliced curves.

use serde::Serialize;

/// A dense row-major table of `f64` cells with typed row and column keys.
///
/// Every cell exists from construction (initialized to the zero identity),
/// so callers never fill sparse gaps after the fact.
#[derive(Debug, Clone, Serialize)]
pub struct Table<R, C> {
    row_keys: Vec<R>,
    column_keys: Vec<C>,
    cells: Vec<f64>,
}

impl<R, C> Table<R, C> {
    /// Build a zero-filled table over the given axes.
    pub fn zeroed(row_keys: Vec<R>, column_keys: Vec<C>) -> Self {
        let cells = vec![0.0; row_keys.len() * column_keys.len()];
        Self {
            row_keys,
            column_keys,
            cells,
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_keys.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_keys.len()
    }

    pub fn row_keys(&self) -> &[R] {
        &self.row_keys
    }

    pub fn column_keys(&self) -> &[C] {
        &self.column_keys
    }

    /// Cell at `(row, column)`. Panics on out-of-range indexes, as slice
    /// indexing would.
    pub fn get(&self, row: usize, column: usize) -> f64 {
        assert!(row < self.row_count() && column < self.column_count());
        self.cells[row * self.column_count() + column]
    }

    pub fn set(&mut self, row: usize, column: usize, value: f64) {
        assert!(row < self.row_count() && column < self.column_count());
        let width = self.column_count();
        self.cells[row * width + column] = value;
    }

    /// One full row of cells, in column-key order.
    pub fn row(&self, row: usize) -> &[f64] {
        let width = self.column_count();
        &self.cells[row * width..(row + 1) * width]
    }
}
