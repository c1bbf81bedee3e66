//! Quadray Mathematics Library
//!
//! This crate provides the tetrahedral coordinate types for the quadray4d engine.
//!
//! ## Core Types
//!
//! - [`Quadray`] - 4D tetrahedral coordinate with a, b, c, d components
//! - [`Vec3`] - Cartesian 3D vector used by the Quadray conversions
//!
//! ## Synergetics
//!
//! - [`synergetics`] - Fuller's constants, angle and metric helpers, and the
//!   geometric verification suite

mod quadray;
mod vec3;
pub mod synergetics;

pub use quadray::Quadray;
pub use vec3::Vec3;
pub use synergetics::{angle_between, euclidean_4d, manhattan_4d, Jitterbug, JitterbugPhase, VerificationReport};
