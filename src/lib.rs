//! quadray4d - 4D tetrahedral grid engine
//!
//! Application layer over the engine crates: configuration, scene
//! construction and the per-tick systems run by the headless binary.

pub mod config;
pub mod scene;
pub mod systems;
