//! Scene construction utilities
//!
//! A scene is a grid, the entities moving through it, and the camera that
//! views it.

mod scene_builder;

pub use scene_builder::{demo_scene, Scene, SceneBuilder};
