//! Sparse 4D world grid
//!
//! A `size⁴` lattice stored as a hash map from a packed 64-bit key to the cell
//! type. Only non-floor cells are stored. Reads outside `[0, size)` on any axis
//! return [`CellType::Boundary`], so movement and raycasting fail closed at the
//! edges of the world.
//!
//! The grid owns the cache of hyperplane slices built by
//! [`SparseGrid4D::get_slice`]. Every write through [`SparseGrid4D::set_cell`]
//! clears that cache before returning.

use hashbrown::HashMap;
use quadray4d_math::Quadray;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::cell::CellType;
use crate::directions::axis_neighbors;
use crate::slice::HyperplaneSlice;

/// Configuration for a grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Cells per axis
    pub size: u16,
    /// Number of (c, d) slices kept before the cache is cleared
    pub slice_cache_capacity: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 16,
            slice_cache_capacity: 16,
        }
    }
}

impl GridConfig {
    /// Create a config with the given size and the default cache capacity
    pub fn new(size: u16) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

/// Pack four in-bounds coordinates into one key, 16 bits per axis
#[inline]
fn pack_key(a: i32, b: i32, c: i32, d: i32) -> u64 {
    (a as u16 as u64)
        | ((b as u16 as u64) << 16)
        | ((c as u16 as u64) << 32)
        | ((d as u16 as u64) << 48)
}

/// Inverse of [`pack_key`]
#[inline]
fn unpack_key(key: u64) -> [i32; 4] {
    [
        (key & 0xFFFF) as i32,
        ((key >> 16) & 0xFFFF) as i32,
        ((key >> 32) & 0xFFFF) as i32,
        ((key >> 48) & 0xFFFF) as i32,
    ]
}

type SliceCache = HashMap<(i32, i32), Arc<HyperplaneSlice>>;

/// Sparse `size⁴` grid of cells
pub struct SparseGrid4D {
    size: u16,
    cells: HashMap<u64, CellType>,
    slices: Mutex<SliceCache>,
    slice_cache_capacity: usize,
}

impl SparseGrid4D {
    /// Create an all-floor grid with `size` cells per axis
    pub fn new(size: u16) -> Self {
        Self::with_config(GridConfig::new(size))
    }

    /// Create an all-floor grid from a config
    pub fn with_config(config: GridConfig) -> Self {
        Self {
            size: config.size,
            cells: HashMap::new(),
            slices: Mutex::new(HashMap::new()),
            slice_cache_capacity: config.slice_cache_capacity.max(1),
        }
    }

    /// Cells per axis
    #[inline]
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Number of explicitly stored (non-floor) cells
    #[inline]
    pub fn stored_cells(&self) -> usize {
        self.cells.len()
    }

    /// Whether every coordinate lies in `[0, size)`
    #[inline]
    pub fn in_bounds(&self, a: i32, b: i32, c: i32, d: i32) -> bool {
        let size = self.size as i32;
        (0..size).contains(&a)
            && (0..size).contains(&b)
            && (0..size).contains(&c)
            && (0..size).contains(&d)
    }

    /// Cell at integer coordinates, `Boundary` outside the grid
    #[inline]
    pub fn get_cell(&self, a: i32, b: i32, c: i32, d: i32) -> CellType {
        if !self.in_bounds(a, b, c, d) {
            return CellType::Boundary;
        }
        self.cells
            .get(&pack_key(a, b, c, d))
            .copied()
            .unwrap_or_default()
    }

    /// Cell containing a (possibly fractional) point
    pub fn cell_at(&self, p: Quadray) -> CellType {
        let f = p.floor();
        self.get_cell(f.a as i32, f.b as i32, f.c as i32, f.d as i32)
    }

    /// Write a cell
    ///
    /// Writing `Floor` removes the entry. Writes outside the grid are ignored.
    /// Any in-bounds write invalidates every cached slice.
    pub fn set_cell(&mut self, a: i32, b: i32, c: i32, d: i32, cell: CellType) {
        if !self.in_bounds(a, b, c, d) {
            log::trace!("Ignoring out-of-bounds write at ({}, {}, {}, {})", a, b, c, d);
            return;
        }
        let key = pack_key(a, b, c, d);
        if cell.is_floor() {
            self.cells.remove(&key);
        } else {
            self.cells.insert(key, cell);
        }
        self.invalidate_slices();
    }

    /// Whether the cell containing the point is solid
    ///
    /// Each component is floored first; anything outside the grid is solid.
    #[inline]
    pub fn is_solid(&self, a: f64, b: f64, c: f64, d: f64) -> bool {
        debug_assert!(
            a.is_finite() && b.is_finite() && c.is_finite() && d.is_finite(),
            "non-finite solidity query ({}, {}, {}, {})",
            a, b, c, d
        );
        self.get_cell(
            a.floor() as i32,
            b.floor() as i32,
            c.floor() as i32,
            d.floor() as i32,
        )
        .is_solid()
    }

    /// [`is_solid`](Self::is_solid) for a Quadray point
    #[inline]
    pub fn is_solid_at(&self, p: Quadray) -> bool {
        self.is_solid(p.a, p.b, p.c, p.d)
    }

    /// Reset every cell to floor
    pub fn clear(&mut self) {
        self.cells.clear();
        self.invalidate_slices();
    }

    /// Iterate over stored (non-floor) cells in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = ([i32; 4], CellType)> + '_ {
        self.cells.iter().map(|(key, cell)| (unpack_key(*key), *cell))
    }

    /// In-bounds axis neighbours of a cell
    pub fn bounded_neighbors(&self, cell: [i32; 4]) -> impl Iterator<Item = [i32; 4]> + '_ {
        axis_neighbors(cell).filter(move |n| self.in_bounds(n[0], n[1], n[2], n[3]))
    }

    /// Number of the 8 axis neighbours that are solid (edges count as solid)
    pub fn count_solid_neighbors(&self, cell: [i32; 4]) -> usize {
        axis_neighbors(cell)
            .filter(|n| self.get_cell(n[0], n[1], n[2], n[3]).is_solid())
            .count()
    }

    /// The 2D plane at fixed `(⌊c⌋, ⌊d⌋)`, indexed `[a][b]`
    ///
    /// Repeated calls for the same floored pair with no write in between
    /// return the same cached instance.
    pub fn get_slice(&self, c: f64, d: f64) -> Arc<HyperplaneSlice> {
        debug_assert!(c.is_finite() && d.is_finite(), "non-finite slice ({}, {})", c, d);
        let key = (c.floor() as i32, d.floor() as i32);

        let mut cache = self.lock_slices();
        if let Some(slice) = cache.get(&key) {
            return Arc::clone(slice);
        }

        let slice = Arc::new(HyperplaneSlice::from_grid(self, key.0, key.1));
        if cache.len() >= self.slice_cache_capacity {
            log::debug!("Slice cache full ({} entries), clearing", cache.len());
            cache.clear();
        }
        cache.insert(key, Arc::clone(&slice));
        log::debug!("Built slice c={} d={} ({} non-floor cells)", key.0, key.1, slice.non_floor_count());
        slice
    }

    /// Number of slices currently cached
    pub fn cached_slices(&self) -> usize {
        self.lock_slices().len()
    }

    fn invalidate_slices(&mut self) {
        // The cache only holds derived data, so a poisoned lock is safe to reuse
        let cache = match self.slices.get_mut() {
            Ok(cache) => cache,
            Err(poisoned) => poisoned.into_inner(),
        };
        cache.clear();
    }

    fn lock_slices(&self) -> MutexGuard<'_, SliceCache> {
        self.slices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clone for SparseGrid4D {
    /// Clones the cells; the clone starts with an empty slice cache
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            cells: self.cells.clone(),
            slices: Mutex::new(HashMap::new()),
            slice_cache_capacity: self.slice_cache_capacity,
        }
    }
}

impl fmt::Debug for SparseGrid4D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseGrid4D")
            .field("size", &self.size)
            .field("stored_cells", &self.cells.len())
            .field("cached_slices", &self.cached_slices())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::WallKind;

    #[test]
    fn test_key_packing_round_trip() {
        let key = pack_key(1, 65535, 0, 300);
        assert_eq!(unpack_key(key), [1, 65535, 0, 300]);
        assert_ne!(pack_key(1, 0, 0, 0), pack_key(0, 1, 0, 0));
    }

    #[test]
    fn test_new_grid_is_floor() {
        let grid = SparseGrid4D::new(8);
        assert_eq!(grid.size(), 8);
        assert_eq!(grid.get_cell(1, 1, 1, 1), CellType::Floor);
        assert_eq!(grid.stored_cells(), 0);
    }

    #[test]
    fn test_set_then_get() {
        let mut grid = SparseGrid4D::new(8);
        grid.set_cell(1, 1, 1, 1, CellType::WALL);
        assert_eq!(grid.get_cell(1, 1, 1, 1), CellType::WALL);
        assert!(grid.is_solid(1.0, 1.0, 1.0, 1.0));
        assert!(grid.is_solid(1.9, 1.2, 1.5, 1.99));
        assert!(!grid.is_solid(2.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_setting_floor_removes_entry() {
        let mut grid = SparseGrid4D::new(8);
        grid.set_cell(2, 3, 4, 5, CellType::Wall(WallKind::Brick));
        assert_eq!(grid.stored_cells(), 1);
        grid.set_cell(2, 3, 4, 5, CellType::Floor);
        assert_eq!(grid.stored_cells(), 0);
        assert_eq!(grid.get_cell(2, 3, 4, 5), CellType::Floor);
    }

    #[test]
    fn test_out_of_bounds_is_solid() {
        let grid = SparseGrid4D::new(4);
        assert_eq!(grid.get_cell(-1, 0, 0, 0), CellType::Boundary);
        assert_eq!(grid.get_cell(0, 4, 0, 0), CellType::Boundary);
        assert_eq!(grid.get_cell(0, 0, i32::MAX, 0), CellType::Boundary);
        assert_eq!(grid.get_cell(0, 0, 0, i32::MIN), CellType::Boundary);
        assert!(grid.is_solid(-0.01, 0.0, 0.0, 0.0));
        assert!(grid.is_solid(0.0, 0.0, 0.0, 4.0));
        assert!(!grid.is_solid(3.99, 3.99, 3.99, 3.99));
    }

    #[test]
    fn test_out_of_bounds_write_ignored() {
        let mut grid = SparseGrid4D::new(4);
        grid.set_cell(4, 0, 0, 0, CellType::WALL);
        grid.set_cell(-1, 0, 0, 0, CellType::WALL);
        assert_eq!(grid.stored_cells(), 0);
        // 4 would alias to a valid key if bounds were not checked
        assert_eq!(grid.get_cell(0, 0, 0, 0), CellType::Floor);
    }

    #[test]
    fn test_door_is_not_solid() {
        let mut grid = SparseGrid4D::new(4);
        grid.set_cell(1, 1, 1, 1, CellType::Door);
        grid.set_cell(2, 1, 1, 1, CellType::Exit);
        assert!(!grid.is_solid(1.5, 1.5, 1.5, 1.5));
        assert!(!grid.is_solid(2.5, 1.5, 1.5, 1.5));
    }

    #[test]
    fn test_cell_at_floors_point() {
        let mut grid = SparseGrid4D::new(4);
        grid.set_cell(1, 2, 3, 0, CellType::Exit);
        assert_eq!(grid.cell_at(Quadray::new(1.7, 2.2, 3.9, 0.1)), CellType::Exit);
        assert!(!grid.is_solid_at(Quadray::new(1.7, 2.2, 3.9, 0.1)));
    }

    #[test]
    fn test_iter_and_clear() {
        let mut grid = SparseGrid4D::new(8);
        grid.set_cell(0, 1, 2, 3, CellType::WALL);
        grid.set_cell(7, 6, 5, 4, CellType::Door);
        let mut stored: Vec<_> = grid.iter().collect();
        stored.sort_by_key(|(c, _)| *c);
        assert_eq!(
            stored,
            vec![([0, 1, 2, 3], CellType::WALL), ([7, 6, 5, 4], CellType::Door)]
        );
        grid.clear();
        assert_eq!(grid.stored_cells(), 0);
    }

    #[test]
    fn test_neighbors() {
        let mut grid = SparseGrid4D::new(4);
        assert_eq!(grid.bounded_neighbors([0, 0, 0, 0]).count(), 4);
        assert_eq!(grid.bounded_neighbors([1, 1, 1, 1]).count(), 8);

        // Corner cell: four neighbours lie outside the grid
        assert_eq!(grid.count_solid_neighbors([0, 0, 0, 0]), 4);
        grid.set_cell(1, 0, 0, 0, CellType::WALL);
        assert_eq!(grid.count_solid_neighbors([0, 0, 0, 0]), 5);
        assert_eq!(grid.count_solid_neighbors([1, 1, 1, 1]), 0);
    }

    #[test]
    fn test_slice_is_cached_until_write() {
        let mut grid = SparseGrid4D::new(8);
        let first = grid.get_slice(1.0, 1.0);
        let second = grid.get_slice(1.4, 1.9);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(grid.cached_slices(), 1);

        grid.set_cell(5, 5, 5, 5, CellType::WALL);
        assert_eq!(grid.cached_slices(), 0);
        let third = grid.get_slice(1.0, 1.0);
        assert!(!Arc::ptr_eq(&first, &third));
    }

    #[test]
    fn test_slice_reflects_write() {
        let mut grid = SparseGrid4D::new(8);
        assert_eq!(grid.get_slice(1.0, 1.0)[1][1], CellType::Floor);
        grid.set_cell(1, 1, 1, 1, CellType::WALL);
        assert_eq!(grid.get_slice(1.0, 1.0)[1][1], CellType::WALL);
        assert_eq!(grid.get_slice(2.0, 1.0)[1][1], CellType::Floor);
    }

    #[test]
    fn test_slice_cache_capacity() {
        let grid = SparseGrid4D::with_config(GridConfig {
            size: 4,
            slice_cache_capacity: 2,
        });
        grid.get_slice(0.0, 0.0);
        grid.get_slice(1.0, 0.0);
        assert_eq!(grid.cached_slices(), 2);
        grid.get_slice(2.0, 0.0);
        assert_eq!(grid.cached_slices(), 1);
    }

    #[test]
    fn test_clone_has_fresh_cache() {
        let mut grid = SparseGrid4D::new(4);
        grid.set_cell(1, 1, 1, 1, CellType::WALL);
        grid.get_slice(1.0, 1.0);
        let copy = grid.clone();
        assert_eq!(copy.cached_slices(), 0);
        assert_eq!(copy.get_cell(1, 1, 1, 1), CellType::WALL);
    }
}
