//! Grid movement for quadray4d
//!
//! This crate moves entities through a [`SparseGrid4D`](quadray4d_core::SparseGrid4D):
//! - Per-axis sliding collision in the (a, b) plane
//! - Point-checked movement across (c, d) hyperplanes
//! - A generational entity registry stepped once per tick

pub mod collision;
pub mod entity;
pub mod world;

// Re-export commonly used types
pub use collision::{CollisionResolver, MoveOutcome, DEFAULT_COLLISION_RADIUS, DEFAULT_MAX_SUBSTEP};
pub use entity::{Entity4D, EntityKey};
pub use world::EntityWorld;
