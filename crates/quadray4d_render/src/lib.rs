//! Hyperplane raycasting for quadray4d
//!
//! Renders a 4D grid the way a 2.5D raycaster renders a map: the viewer's
//! (c, d) picks a hyperplane slice and rays march through its (a, b) cells.
//!
//! - [`Raycaster`] - DDA marcher returning a [`RayHit`] per ray
//! - [`Camera`] - One ray per screen column, fisheye-free
//! - [`ColumnSample`] - POD form of a hit, for handing a frame to a drawer

mod raycaster;
pub mod camera;

pub use raycaster::{RayHit, Raycaster, Side, MIN_PERP_DISTANCE};
pub use camera::{frame_bytes, frame_samples, projected_height, Camera, ColumnSample, DEFAULT_FOV};
