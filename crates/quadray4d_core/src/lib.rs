//! Core world types for the quadray4d engine
//!
//! This crate provides the sparse 4D world and the queries run against it:
//!
//! - [`CellType`] - Contents of one lattice cell, with [`WallKind`] and [`CellFlags`]
//! - [`SparseGrid4D`] - Hash-backed `size⁴` grid with fail-closed bounds
//! - [`HyperplaneSlice`] - Dense (a, b) plane at fixed (c, d), cached by the grid
//! - [`LineOfSight`] - Sampled 4D visibility between two points
//! - [`GridBuilder`] - Fluent construction of walls and open space
//! - [`directions`] - The 8-direction IVM adjacency and the 12 closest-packing offsets

mod cell;
mod grid;
mod slice;
mod sight;
mod builder;
pub mod directions;

pub use cell::{CellFlags, CellType, WallKind};
pub use grid::{GridConfig, SparseGrid4D};
pub use slice::HyperplaneSlice;
pub use sight::{has_line_of_sight, LineOfSight, DEFAULT_SAMPLES_PER_UNIT};
pub use builder::GridBuilder;

// Re-export commonly used types from quadray4d_math for convenience
pub use quadray4d_math::Quadray;
