//! 4D line-of-sight queries
//!
//! A segment between two points is sampled at a fixed density along its raw
//! 4D Euclidean length and every interior sample is tested against the full
//! grid (not a slice). Endpoints are not tested.
//!
//! Sampling can step over a one-cell-wide diagonal wall between two lattice
//! points when the wall is thinner than the sample spacing. Raising
//! `samples_per_unit` narrows that window at a proportional cost.

use quadray4d_math::{euclidean_4d, Quadray};
use serde::{Deserialize, Serialize};

use crate::grid::SparseGrid4D;

/// Default sample density along the segment
pub const DEFAULT_SAMPLES_PER_UNIT: f64 = 2.0;

/// Sampled line-of-sight test
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineOfSight {
    /// Samples per unit of 4D Euclidean distance
    pub samples_per_unit: f64,
}

impl Default for LineOfSight {
    fn default() -> Self {
        Self {
            samples_per_unit: DEFAULT_SAMPLES_PER_UNIT,
        }
    }
}

impl LineOfSight {
    /// Create a query with the given sample density
    pub fn new(samples_per_unit: f64) -> Self {
        debug_assert!(
            samples_per_unit.is_finite() && samples_per_unit > 0.0,
            "invalid sample density {}",
            samples_per_unit
        );
        Self { samples_per_unit }
    }

    /// Number of segments the p1-p2 path is split into
    pub fn step_count(&self, p1: Quadray, p2: Quadray) -> u32 {
        (euclidean_4d(p1, p2) * self.samples_per_unit).ceil() as u32
    }

    /// Whether no solid cell lies strictly between the two points
    ///
    /// Coincident points always see each other.
    pub fn has_line_of_sight(&self, grid: &SparseGrid4D, p1: Quadray, p2: Quadray) -> bool {
        debug_assert!(p1.is_finite() && p2.is_finite(), "non-finite endpoints {:?} {:?}", p1, p2);
        let steps = self.step_count(p1, p2);
        (1..steps).all(|i| {
            let t = i as f64 / steps as f64;
            !grid.is_solid_at(p1.lerp(p2, t))
        })
    }

    /// First interior sample that is solid, if any
    pub fn first_obstruction(&self, grid: &SparseGrid4D, p1: Quadray, p2: Quadray) -> Option<Quadray> {
        let steps = self.step_count(p1, p2);
        (1..steps)
            .map(|i| p1.lerp(p2, i as f64 / steps as f64))
            .find(|p| grid.is_solid_at(*p))
    }
}

/// [`LineOfSight::has_line_of_sight`] at the default density
pub fn has_line_of_sight(grid: &SparseGrid4D, p1: Quadray, p2: Quadray) -> bool {
    LineOfSight::default().has_line_of_sight(grid, p1, p2)
}
