//! Fixed-step simulation system
//!
//! Each tick:
//! - Moves every entity by `velocity * tick_seconds` through the collision resolver
//! - Syncs the camera to the player
//! - Turns the camera to face the player's in-plane heading

use quadray4d_math::Quadray;

use crate::config::SimulationConfig;
use crate::scene::Scene;

/// Result of a simulation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationResult {
    /// Ticks run by this call
    pub ticks: u32,
    /// Total simulated seconds since the system was created
    pub elapsed: f64,
    /// Entities left with no velocity after the run
    pub stalled: usize,
}

/// Runs the scene forward in fixed ticks
pub struct SimulationSystem {
    tick_seconds: f64,
    elapsed: f64,
}

impl SimulationSystem {
    /// Create a simulation system with a fixed tick length in seconds
    pub fn new(tick_seconds: f64) -> Self {
        Self {
            tick_seconds,
            elapsed: 0.0,
        }
    }

    /// Create a simulation system from configuration
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.tick_seconds)
    }

    /// Simulated seconds so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Run one tick
    pub fn update(&mut self, scene: &mut Scene) {
        scene.world.step(&scene.grid, self.tick_seconds);
        self.elapsed += self.tick_seconds;

        scene.sync_camera();
        if let Some(velocity) = scene.player.and_then(|key| scene.world.get(key)).map(|e| e.velocity) {
            if velocity.a != 0.0 || velocity.b != 0.0 {
                scene.camera.angle = velocity.b.atan2(velocity.a).rem_euclid(std::f64::consts::TAU);
            }
        }
    }

    /// Run `ticks` ticks
    pub fn run(&mut self, scene: &mut Scene, ticks: u32) -> SimulationResult {
        for _ in 0..ticks {
            self.update(scene);
        }

        let stalled = scene
            .world
            .iter()
            .filter(|(_, e)| e.velocity == Quadray::ORIGIN)
            .count();
        log::debug!(
            "simulated {} ticks ({:.2}s total), {} of {} entities stalled",
            ticks,
            self.elapsed,
            stalled,
            scene.world.entity_count()
        );

        SimulationResult {
            ticks,
            elapsed: self.elapsed,
            stalled,
        }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}
