//! GridBuilder - Declarative grid construction
//!
//! Provides a fluent API for laying out walls and open space. Level generators
//! and tests use it on top of [`SparseGrid4D::set_cell`].

use crate::cell::{CellType, WallKind};
use crate::grid::{GridConfig, SparseGrid4D};

/// Builder for constructing grids
///
/// # Example
/// ```
/// use quadray4d_core::{CellType, GridBuilder, WallKind};
///
/// let grid = GridBuilder::new(8)
///     .with_boundary_walls(WallKind::Stone)
///     .set(3, 3, 3, 3, CellType::Exit)
///     .build();
/// assert!(grid.is_solid(0.5, 3.5, 3.5, 3.5));
/// ```
pub struct GridBuilder {
    grid: SparseGrid4D,
}

impl GridBuilder {
    /// Start from an all-floor grid of the given size
    pub fn new(size: u16) -> Self {
        Self {
            grid: SparseGrid4D::new(size),
        }
    }

    /// Start from an all-floor grid built from a config
    pub fn with_config(config: GridConfig) -> Self {
        Self {
            grid: SparseGrid4D::with_config(config),
        }
    }

    /// Wall in every cell with a coordinate at 0 or size-1
    pub fn with_boundary_walls(mut self, kind: WallKind) -> Self {
        let last = self.grid.size() as i32 - 1;
        if last < 0 {
            return self;
        }
        self.for_each_cell([0; 4], [last; 4], |grid, [a, b, c, d]| {
            let on_edge = [a, b, c, d].iter().any(|v| *v == 0 || *v == last);
            if on_edge {
                grid.set_cell(a, b, c, d, CellType::Wall(kind));
            }
        });
        self
    }

    /// Fill the inclusive box `min..=max` with `cell`
    pub fn fill_box(mut self, min: [i32; 4], max: [i32; 4], cell: CellType) -> Self {
        self.for_each_cell(min, max, |grid, [a, b, c, d]| grid.set_cell(a, b, c, d, cell));
        self
    }

    /// Reset the inclusive box `min..=max` to floor
    pub fn carve_box(self, min: [i32; 4], max: [i32; 4]) -> Self {
        self.fill_box(min, max, CellType::Floor)
    }

    /// Set a single cell
    pub fn set(mut self, a: i32, b: i32, c: i32, d: i32, cell: CellType) -> Self {
        self.grid.set_cell(a, b, c, d, cell);
        self
    }

    /// Finish building
    pub fn build(self) -> SparseGrid4D {
        log::debug!("Built grid of size {} with {} stored cells", self.grid.size(), self.grid.stored_cells());
        self.grid
    }

    /// Visit every cell of an inclusive box, clamped to the grid
    fn for_each_cell<F>(&mut self, min: [i32; 4], max: [i32; 4], mut f: F)
    where
        F: FnMut(&mut SparseGrid4D, [i32; 4]),
    {
        let last = self.grid.size() as i32 - 1;
        let lo = min.map(|v| v.max(0));
        let hi = max.map(|v| v.min(last));
        for a in lo[0]..=hi[0] {
            for b in lo[1]..=hi[1] {
                for c in lo[2]..=hi[2] {
                    for d in lo[3]..=hi[3] {
                        f(&mut self.grid, [a, b, c, d]);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_walls() {
        let grid = GridBuilder::new(4).with_boundary_walls(WallKind::Brick).build();
        // Interior is 2⁴ cells, everything else is wall
        assert_eq!(grid.stored_cells(), 4usize.pow(4) - 2usize.pow(4));
        assert_eq!(grid.get_cell(0, 1, 1, 1), CellType::Wall(WallKind::Brick));
        assert_eq!(grid.get_cell(1, 2, 1, 2), CellType::Floor);
    }

    #[test]
    fn test_fill_and_carve() {
        let grid = GridBuilder::new(6)
            .fill_box([0; 4], [5; 4], CellType::WALL)
            .carve_box([1, 1, 1, 1], [2, 2, 1, 1])
            .build();
        assert_eq!(grid.stored_cells(), 6usize.pow(4) - 4);
        assert!(!grid.is_solid(1.5, 2.5, 1.5, 1.5));
        assert!(grid.is_solid(3.5, 2.5, 1.5, 1.5));
    }

    #[test]
    fn test_box_is_clamped_to_grid() {
        let grid = GridBuilder::new(3)
            .fill_box([-5, -5, 0, 0], [10, 0, 0, 0], CellType::WALL)
            .build();
        assert_eq!(grid.stored_cells(), 3);
    }

    #[test]
    fn test_set() {
        let grid = GridBuilder::new(3).set(1, 1, 1, 1, CellType::Exit).build();
        assert_eq!(grid.get_cell(1, 1, 1, 1), CellType::Exit);
    }
}
