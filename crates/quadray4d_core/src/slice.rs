//! Hyperplane slices
//!
//! Fixing the (c, d) pair of the 4D grid leaves a dense 2D plane indexed by
//! (a, b). The renderer marches rays through this plane, so it is materialized
//! once per (c, d) and cached by the owning [`SparseGrid4D`].

use std::ops::Index;

use crate::cell::CellType;
use crate::grid::SparseGrid4D;

/// Dense 2D cross-section of the grid at fixed integer (c, d)
#[derive(Clone, Debug, PartialEq)]
pub struct HyperplaneSlice {
    size: usize,
    c: i32,
    d: i32,
    /// Row-major: `cells[a * size + b]`
    cells: Vec<CellType>,
}

impl HyperplaneSlice {
    /// Read every (a, b) of the plane at `(c, d)` from the grid
    pub fn from_grid(grid: &SparseGrid4D, c: i32, d: i32) -> Self {
        let size = grid.size() as usize;
        let mut cells = Vec::with_capacity(size * size);
        for a in 0..size as i32 {
            for b in 0..size as i32 {
                cells.push(grid.get_cell(a, b, c, d));
            }
        }
        Self { size, c, d, cells }
    }

    /// Cells per axis
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The fixed c coordinate
    #[inline]
    pub fn c(&self) -> i32 {
        self.c
    }

    /// The fixed d coordinate
    #[inline]
    pub fn d(&self) -> i32 {
        self.d
    }

    /// Cell at (a, b), `Boundary` outside the plane
    #[inline]
    pub fn get(&self, a: i32, b: i32) -> CellType {
        if a < 0 || b < 0 || a as usize >= self.size || b as usize >= self.size {
            return CellType::Boundary;
        }
        self.cells[a as usize * self.size + b as usize]
    }

    /// Iterate over rows of constant a
    pub fn rows(&self) -> impl Iterator<Item = &[CellType]> + '_ {
        // chunks panics on zero, and an empty plane has no rows anyway
        self.cells.chunks(self.size.max(1))
    }

    /// Number of cells equal to `cell`
    pub fn count(&self, cell: CellType) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// Number of cells that are not floor
    pub fn non_floor_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_floor()).count()
    }
}

impl Index<usize> for HyperplaneSlice {
    type Output = [CellType];

    /// Row `a` of the plane
    fn index(&self, a: usize) -> &[CellType] {
        let start = a * self.size;
        &self.cells[start..start + self.size]
    }
}
