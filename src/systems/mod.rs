//! Application systems
//!
//! Each system owns one per-frame concern and works on a [`Scene`](crate::scene::Scene).

mod perception;
mod render;
mod simulation;

pub use perception::PerceptionSystem;
pub use render::{FrameStats, RenderSystem};
pub use simulation::{SimulationResult, SimulationSystem};
