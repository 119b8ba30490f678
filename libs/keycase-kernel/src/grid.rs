//! Sparse `(col, row)` container for per-cell keyboard data.
//!
//! Cells are looked up explicitly; reading an unpopulated cell is an error
//! rather than a silent default.

use std::collections::BTreeMap;

use crate::error::{KernelError, KernelResult};

/// A sparse grid keyed by `(col, row)`.
///
/// # Example
///
/// ```rust
/// use keycase_kernel::{Grid2D, Transform};
///
/// let mut placements = Grid2D::new();
/// placements.insert((0, 0), Transform::identity());
/// placements.insert((1, 0), Transform::identity().translate(19.0, 0.0, 0.0));
/// assert!(placements.get((1, 0)).is_ok());
/// assert!(placements.get((2, 0)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D<T> {
    cells: BTreeMap<(usize, usize), T>,
}

impl<T> Default for Grid2D<T> {
    fn default() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }
}

impl<T> Grid2D<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a cell, returning the previous value if any.
    pub fn insert(&mut self, key: (usize, usize), value: T) -> Option<T> {
        self.cells.insert(key, value)
    }

    /// Reads a populated cell.
    ///
    /// # Errors
    ///
    /// `KeyNotPresent` when nothing was stored at `key`.
    pub fn get(&self, key: (usize, usize)) -> KernelResult<&T> {
        self.cells.get(&key).ok_or(KernelError::KeyNotPresent {
            col: key.0,
            row: key.1,
        })
    }

    /// Mutable access to a populated cell.
    pub fn get_mut(&mut self, key: (usize, usize)) -> KernelResult<&mut T> {
        self.cells.get_mut(&key).ok_or(KernelError::KeyNotPresent {
            col: key.0,
            row: key.1,
        })
    }

    pub fn contains(&self, key: (usize, usize)) -> bool {
        self.cells.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Populated cells, column by column, rows ascending within a column.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        self.cells.iter().map(|(k, v)| (*k, v))
    }

    /// Populated rows of one column, ascending.
    pub fn column(&self, col: usize) -> impl Iterator<Item = (usize, &T)> {
        self.cells
            .range((col, 0)..=(col, usize::MAX))
            .map(|(k, v)| (k.1, v))
    }

    /// Distinct populated column indices, ascending.
    pub fn columns(&self) -> Vec<usize> {
        let mut cols: Vec<usize> = self.cells.keys().map(|k| k.0).collect();
        cols.dedup();
        cols
    }

    /// Applies `f` to every cell, keeping the layout.
    pub fn map<U>(&self, mut f: impl FnMut((usize, usize), &T) -> U) -> Grid2D<U> {
        Grid2D {
            cells: self.cells.iter().map(|(k, v)| (*k, f(*k, v))).collect(),
        }
    }

    /// Fallible variant of [`Grid2D::map`]; stops at the first error.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut((usize, usize), &T) -> Result<U, E>,
    ) -> Result<Grid2D<U>, E> {
        let mut cells = BTreeMap::new();
        for (k, v) in &self.cells {
            cells.insert(*k, f(*k, v)?);
        }
        Ok(Grid2D { cells })
    }
}

impl<T> FromIterator<((usize, usize), T)> for Grid2D<T> {
    fn from_iter<I: IntoIterator<Item = ((usize, usize), T)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
