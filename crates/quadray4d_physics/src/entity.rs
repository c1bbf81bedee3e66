//! Moving entities

use quadray4d_math::Quadray;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Key to an entity in the entity world
    ///
    /// Uses generational indexing, so a key to a removed entity returns None
    /// instead of pointing at whatever reused its slot.
    pub struct EntityKey;
}

/// A point-like entity moving through the grid
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity4D {
    /// Position in lattice coordinates
    pub position: Quadray,
    /// Velocity in lattice units per second
    pub velocity: Quadray,
}

impl Entity4D {
    /// Create a stationary entity
    pub fn new(position: Quadray) -> Self {
        Self {
            position,
            velocity: Quadray::ORIGIN,
        }
    }

    /// Builder method to set velocity
    pub fn with_velocity(mut self, velocity: Quadray) -> Self {
        self.velocity = velocity;
        self
    }

    /// Integer lattice cell containing the entity
    pub fn cell(&self) -> [i32; 4] {
        let f = self.position.floor();
        [f.a as i32, f.b as i32, f.c as i32, f.d as i32]
    }

    /// Distance to another entity
    pub fn distance_to(&self, other: &Entity4D) -> f64 {
        Quadray::distance(self.position, other.position)
    }
}
