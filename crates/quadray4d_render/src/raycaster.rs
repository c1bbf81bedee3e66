//! DDA raycasting over a hyperplane slice
//!
//! Rays march cell by cell through the (a, b) plane, always crossing the
//! nearer of the next a-boundary and the next b-boundary. A ray stops at the
//! first non-floor cell, at the edge of the plane (reported as a `Boundary`
//! hit), or after `max_steps` crossings.

use quadray4d_core::{CellType, HyperplaneSlice};

/// Smallest distance reported, so perspective division never divides by zero
pub const MIN_PERP_DISTANCE: f64 = 0.01;

/// Which axis boundary the ray crossed last
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Crossed a boundary of constant a
    A,
    /// Crossed a boundary of constant b
    B,
}

/// Result of one cast
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Perpendicular distance to the struck face, at least [`MIN_PERP_DISTANCE`]
    pub distance: f64,
    /// Face orientation, used for shading and texture side selection
    pub side: Side,
    /// Cell that stopped the ray; `Floor` when the step budget ran out
    pub cell: CellType,
    /// (a, b) index of the final cell
    pub map: (i32, i32),
    /// Cells crossed, never more than the step budget
    pub steps: u32,
    /// Fractional position of the hit along the struck face, in [0, 1]
    pub wall_u: f64,
}

impl RayHit {
    /// False when the ray ran out of steps without striking anything
    #[inline]
    pub fn is_hit(&self) -> bool {
        !self.cell.is_floor()
    }
}

/// Grid DDA marcher
pub struct Raycaster;

impl Raycaster {
    /// Cast from `origin` (a, b) at `angle` radians, measured from the +a axis
    ///
    /// The direction is unit length, so the reported distance is the distance
    /// along the ray to the struck face.
    pub fn cast(origin: (f64, f64), angle: f64, slice: &HyperplaneSlice, max_steps: u32) -> RayHit {
        Self::cast_dir(origin, (angle.cos(), angle.sin()), slice, max_steps)
    }

    /// Cast along an arbitrary direction vector
    ///
    /// With a camera-plane direction (`forward + plane * x`) the distance is
    /// measured perpendicular to the camera plane, which removes fisheye
    /// distortion without a cosine correction.
    pub fn cast_dir(origin: (f64, f64), dir: (f64, f64), slice: &HyperplaneSlice, max_steps: u32) -> RayHit {
        let (pos_a, pos_b) = origin;
        let (dir_a, dir_b) = dir;
        debug_assert!(
            pos_a.is_finite() && pos_b.is_finite() && dir_a.is_finite() && dir_b.is_finite(),
            "non-finite ray {:?} {:?}",
            origin,
            dir
        );

        // Far-off origins saturate; the clamped index still reads as outside the plane
        let mut map_a = pos_a.floor() as i32;
        let mut map_b = pos_b.floor() as i32;

        let delta_a = if dir_a == 0.0 { f64::INFINITY } else { (1.0 / dir_a).abs() };
        let delta_b = if dir_b == 0.0 { f64::INFINITY } else { (1.0 / dir_b).abs() };

        let (step_a, mut side_dist_a) = Self::initial_side_dist(pos_a, map_a, dir_a, delta_a);
        let (step_b, mut side_dist_b) = Self::initial_side_dist(pos_b, map_b, dir_b, delta_b);

        let mut side = Side::A;
        for steps in 1..=max_steps {
            if side_dist_a < side_dist_b {
                side_dist_a += delta_a;
                map_a = map_a.saturating_add(step_a);
                side = Side::A;
            } else {
                side_dist_b += delta_b;
                map_b = map_b.saturating_add(step_b);
                side = Side::B;
            }

            let cell = slice.get(map_a, map_b);
            if !cell.is_floor() {
                let raw = match side {
                    Side::A => side_dist_a - delta_a,
                    Side::B => side_dist_b - delta_b,
                };
                // A zero direction vector leaves both side distances infinite
                let raw = if raw.is_finite() { raw } else { 0.0 };
                let distance = raw.max(MIN_PERP_DISTANCE);
                let along = match side {
                    Side::A => pos_b + raw * dir_b,
                    Side::B => pos_a + raw * dir_a,
                };
                return RayHit {
                    distance,
                    side,
                    cell,
                    map: (map_a, map_b),
                    steps,
                    wall_u: along - along.floor(),
                };
            }
        }

        RayHit {
            distance: (max_steps as f64).max(MIN_PERP_DISTANCE),
            side,
            cell: CellType::Floor,
            map: (map_a, map_b),
            steps: max_steps,
            wall_u: 0.0,
        }
    }

    /// Step sign and distance to the first boundary on one axis
    fn initial_side_dist(pos: f64, map: i32, dir: f64, delta: f64) -> (i32, f64) {
        if dir == 0.0 {
            (1, f64::INFINITY)
        } else if dir < 0.0 {
            (-1, (pos - map as f64) * delta)
        } else {
            (1, (map as f64 + 1.0 - pos) * delta)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadray4d_core::{GridBuilder, SparseGrid4D, WallKind};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const EPSILON: f64 = 1e-9;

    fn walled_slice(size: u16) -> std::sync::Arc<HyperplaneSlice> {
        GridBuilder::new(size)
            .with_boundary_walls(WallKind::Stone)
            .build()
            .get_slice(1.0, 1.0)
    }

    #[test]
    fn test_hits_wall_along_a() {
        let slice = walled_slice(8);
        // From the centre of cell (3, 3) straight along +a: wall face at a = 7
        let hit = Raycaster::cast((3.5, 3.5), 0.0, &slice, 64);
        assert!(hit.is_hit());
        assert_eq!(hit.side, Side::A);
        assert_eq!(hit.map, (7, 3));
        assert_eq!(hit.cell, CellType::Wall(WallKind::Stone));
        assert!((hit.distance - 3.5).abs() < EPSILON);
        assert!((hit.wall_u - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_hits_wall_along_negative_b() {
        let slice = walled_slice(8);
        let hit = Raycaster::cast((3.5, 3.25), -FRAC_PI_2, &slice, 64);
        assert_eq!(hit.side, Side::B);
        assert_eq!(hit.map, (3, 0));
        assert!((hit.distance - 2.25).abs() < 1e-6);
    }

    #[test]
    fn test_diagonal_ray() {
        let slice = walled_slice(8);
        let hit = Raycaster::cast((1.5, 1.5), FRAC_PI_4, &slice, 64);
        assert!(hit.is_hit());
        assert!(hit.map.0 == 7 || hit.map.1 == 7);
        // Perpendicular-to-face crossing along a unit ray: 5.5 * √2 to the far corner
        assert!((hit.distance - 5.5 * std::f64::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_stops_at_interior_wall_and_door() {
        let grid = GridBuilder::new(8).set(5, 2, 0, 0, CellType::Door).build();
        let slice = grid.get_slice(0.0, 0.0);
        let hit = Raycaster::cast((1.5, 2.5), 0.0, &slice, 64);
        assert_eq!(hit.cell, CellType::Door);
        assert_eq!(hit.map, (5, 2));
        assert!((hit.distance - 3.5).abs() < EPSILON);
    }

    #[test]
    fn test_open_plane_hits_boundary() {
        let grid = SparseGrid4D::new(6);
        let slice = grid.get_slice(0.0, 0.0);
        let hit = Raycaster::cast((2.5, 2.5), PI, &slice, 64);
        assert_eq!(hit.cell, CellType::Boundary);
        assert_eq!(hit.map, (-1, 2));
        assert!((hit.distance - 2.5).abs() < EPSILON);
    }

    #[test]
    fn test_step_budget_exhausted() {
        let grid = SparseGrid4D::new(32);
        let slice = grid.get_slice(0.0, 0.0);
        let hit = Raycaster::cast((0.5, 0.5), 0.0, &slice, 4);
        assert!(!hit.is_hit());
        assert_eq!(hit.steps, 4);
        assert_eq!(hit.distance, 4.0);
    }

    #[test]
    fn test_adjacent_wall_distance_is_clamped() {
        let grid = GridBuilder::new(4).set(2, 1, 0, 0, CellType::WALL).build();
        let slice = grid.get_slice(0.0, 0.0);
        // Origin a hair's breadth in front of the wall face
        let hit = Raycaster::cast((2.0 - 1e-9, 1.5), 0.0, &slice, 16);
        assert_eq!(hit.map, (2, 1));
        assert_eq!(hit.distance, MIN_PERP_DISTANCE);
    }

    #[test]
    fn test_far_outside_origin_reports_boundary() {
        let slice = walled_slice(8);
        let hit = Raycaster::cast((3.0e9, 0.5), 0.0, &slice, 8);
        assert_eq!(hit.cell, CellType::Boundary);
        assert_eq!(hit.steps, 1);
        assert_eq!(hit.map.0, i32::MAX);

        let hit = Raycaster::cast((-3.0e9, 0.5), PI, &slice, 8);
        assert_eq!(hit.cell, CellType::Boundary);
        assert_eq!(hit.map.0, i32::MIN);
        assert!(hit.distance.is_finite());
    }

    #[test]
    fn test_zero_direction_terminates() {
        let slice = walled_slice(8);
        let hit = Raycaster::cast_dir((3.5, 3.5), (0.0, 0.0), &slice, 100);
        assert!(hit.steps <= 100);
        assert!(hit.is_hit());
    }

    #[test]
    fn test_camera_plane_direction_gives_perpendicular_distance() {
        let slice = walled_slice(8);
        // Non-unit direction (1, 0.5): the perpendicular distance to the a = 7 face is still 3.5
        let hit = Raycaster::cast_dir((3.5, 3.5), (1.0, 0.5), &slice, 64);
        assert_eq!(hit.side, Side::A);
        assert!((hit.distance - 3.5).abs() < EPSILON);
    }
}
