//! Grid collision for moving entities
//!
//! In-plane movement (a, b) treats an entity as a point with a small radius and
//! resolves each axis on its own, so an entity pressed diagonally against a
//! wall keeps sliding along the free axis. Movement across hyperplanes (c, d)
//! is a plain single-point check per axis.
//!
//! Rejected axes leave the coordinate unchanged; nothing here fails.

use bitflags::bitflags;
use quadray4d_core::SparseGrid4D;
use serde::{Deserialize, Serialize};

use crate::entity::Entity4D;

/// Default collision radius in lattice units
pub const DEFAULT_COLLISION_RADIUS: f64 = 0.2;

/// Default longest in-plane step taken per collision test
pub const DEFAULT_MAX_SUBSTEP: f64 = 0.5;

bitflags! {
    /// Axes on which a requested move was rejected
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MoveOutcome: u8 {
        const A_BLOCKED = 1 << 0;
        const B_BLOCKED = 1 << 1;
        const C_BLOCKED = 1 << 2;
        const D_BLOCKED = 1 << 3;
    }
}

impl MoveOutcome {
    /// True when every requested axis moved
    pub fn is_clear(&self) -> bool {
        self.is_empty()
    }
}

/// The in-plane axis being resolved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlaneAxis {
    A,
    B,
}

/// Per-axis sliding movement against a [`SparseGrid4D`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionResolver {
    /// Collision radius applied to in-plane movement
    pub radius: f64,
    /// Longest in-plane step tested at once; larger moves are subdivided
    pub max_substep: f64,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self {
            radius: DEFAULT_COLLISION_RADIUS,
            max_substep: DEFAULT_MAX_SUBSTEP,
        }
    }
}

impl CollisionResolver {
    /// Create a resolver with the given radius and the default substep
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Builder method to set the longest step tested at once
    pub fn with_max_substep(mut self, max_substep: f64) -> Self {
        self.max_substep = max_substep;
        self
    }

    /// Move within the current (c, d) plane
    ///
    /// The a displacement is tried first, then the b displacement from the
    /// possibly updated a. Each axis is accepted only if its candidate centre,
    /// its forward point (`candidate ± radius` in the direction of travel) and
    /// the two points offset `±radius` on the other axis at the candidate
    /// coordinate are all free.
    pub fn move_entity(&self, grid: &SparseGrid4D, entity: &mut Entity4D, da: f64, db: f64) -> MoveOutcome {
        debug_assert!(da.is_finite() && db.is_finite(), "non-finite move ({}, {})", da, db);
        let mut outcome = MoveOutcome::empty();
        if !self.slide_axis(grid, entity, PlaneAxis::A, da) {
            outcome |= MoveOutcome::A_BLOCKED;
        }
        if !self.slide_axis(grid, entity, PlaneAxis::B, db) {
            outcome |= MoveOutcome::B_BLOCKED;
        }
        outcome
    }

    /// Move across hyperplanes
    ///
    /// Single-point checks at the candidate c, then the candidate d. No radius,
    /// no sliding and no subdivision.
    pub fn move_entity_cd(&self, grid: &SparseGrid4D, entity: &mut Entity4D, dc: f64, dd: f64) -> MoveOutcome {
        debug_assert!(dc.is_finite() && dd.is_finite(), "non-finite move ({}, {})", dc, dd);
        let mut outcome = MoveOutcome::empty();
        let p = entity.position;

        if dc != 0.0 {
            if grid.is_solid(p.a, p.b, p.c + dc, p.d) {
                outcome |= MoveOutcome::C_BLOCKED;
            } else {
                entity.position.c += dc;
            }
        }

        let p = entity.position;
        if dd != 0.0 {
            if grid.is_solid(p.a, p.b, p.c, p.d + dd) {
                outcome |= MoveOutcome::D_BLOCKED;
            } else {
                entity.position.d += dd;
            }
        }
        outcome
    }

    /// Advance one axis in substeps, stopping at the first rejected substep
    ///
    /// Returns false if any part of the displacement was rejected.
    fn slide_axis(&self, grid: &SparseGrid4D, entity: &mut Entity4D, axis: PlaneAxis, delta: f64) -> bool {
        if delta == 0.0 {
            return true;
        }
        let substep = if self.max_substep > 0.0 { self.max_substep } else { DEFAULT_MAX_SUBSTEP };
        let count = (delta.abs() / substep).ceil().max(1.0) as u32;
        let step = delta / count as f64;

        for _ in 0..count {
            if !self.try_step(grid, entity, axis, step) {
                return false;
            }
        }
        true
    }

    /// Try a single in-plane step along one axis
    fn try_step(&self, grid: &SparseGrid4D, entity: &mut Entity4D, axis: PlaneAxis, step: f64) -> bool {
        let p = entity.position;
        let r = self.radius;
        let forward = step.signum() * r;

        let free = match axis {
            PlaneAxis::A => {
                let na = p.a + step;
                let forward_point = na + forward;
                !grid.is_solid(na, p.b, p.c, p.d)
                    && !grid.is_solid(forward_point, p.b, p.c, p.d)
                    && !grid.is_solid(na, p.b + r, p.c, p.d)
                    && !grid.is_solid(na, p.b - r, p.c, p.d)
            }
            PlaneAxis::B => {
                let nb = p.b + step;
                let forward_point = nb + forward;
                !grid.is_solid(p.a, nb, p.c, p.d)
                    && !grid.is_solid(p.a, forward_point, p.c, p.d)
                    && !grid.is_solid(p.a + r, nb, p.c, p.d)
                    && !grid.is_solid(p.a - r, nb, p.c, p.d)
            }
        };

        if free {
            match axis {
                PlaneAxis::A => entity.position.a += step,
                PlaneAxis::B => entity.position.b += step,
            }
        }
        free
    }
}
