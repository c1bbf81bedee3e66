//! Column camera over the hyperplane the viewer stands in
//!
//! The camera looks across the (a, b) plane at its own (c, d). A frame is one
//! ray per screen column, cast along `forward + plane * x` where `plane` is
//! perpendicular to `forward` and scaled by the half field of view.

use std::f64::consts::TAU;

use bytemuck::{Pod, Zeroable};
use quadray4d_core::SparseGrid4D;
use quadray4d_math::Quadray;

use crate::raycaster::{RayHit, Raycaster, Side, MIN_PERP_DISTANCE};

/// Default horizontal field of view (60 degrees)
pub const DEFAULT_FOV: f64 = std::f64::consts::FRAC_PI_3;

/// Viewer in the 4D grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Eye position; (c, d) selects the hyperplane being viewed
    pub position: Quadray,
    /// Heading in the (a, b) plane, radians from +a, kept in [0, 2π)
    pub angle: f64,
    /// Horizontal field of view in radians
    pub fov: f64,
}

impl Camera {
    /// Create a camera with the default field of view
    pub fn new(position: Quadray, angle: f64) -> Self {
        Self {
            position,
            angle: angle.rem_euclid(TAU),
            fov: DEFAULT_FOV,
        }
    }

    /// Builder method to set the field of view in radians
    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }

    /// Unit heading vector in the (a, b) plane
    pub fn forward(&self) -> (f64, f64) {
        (self.angle.cos(), self.angle.sin())
    }

    /// Camera plane vector, perpendicular to `forward` with length tan(fov/2)
    pub fn plane(&self) -> (f64, f64) {
        let half = (self.fov * 0.5).tan();
        (-self.angle.sin() * half, self.angle.cos() * half)
    }

    /// Turn by `delta` radians
    pub fn rotate(&mut self, delta: f64) {
        self.angle = (self.angle + delta).rem_euclid(TAU);
    }

    /// Ray direction for one screen column
    pub fn column_direction(&self, column: u32, width: u32) -> (f64, f64) {
        let (fa, fb) = self.forward();
        let (pa, pb) = self.plane();
        let x = 2.0 * (column as f64 + 0.5) / width as f64 - 1.0;
        (fa + pa * x, fb + pb * x)
    }

    /// Cast one ray per column against the camera's hyperplane
    ///
    /// The slice is fetched once per frame. Distances are perpendicular to
    /// the camera plane, so a flat wall faced head-on reports one distance
    /// across every column.
    pub fn cast_columns(&self, grid: &SparseGrid4D, width: u32, max_steps: u32) -> Vec<RayHit> {
        let slice = grid.get_slice(self.position.c, self.position.d);
        let origin = (self.position.a, self.position.b);

        let hits: Vec<RayHit> = (0..width)
            .map(|column| Raycaster::cast_dir(origin, self.column_direction(column, width), &slice, max_steps))
            .collect();

        log::trace!(
            "cast {} columns in plane ({}, {}), {} misses",
            width,
            slice.c(),
            slice.d(),
            hits.iter().filter(|h| !h.is_hit()).count()
        );
        hits
    }
}

/// On-screen wall height for a hit at `distance`
#[inline]
pub fn projected_height(distance: f64, screen_height: u32) -> f64 {
    screen_height as f64 / distance.max(MIN_PERP_DISTANCE)
}

/// One column of a frame, laid out for a byte-level hand-off to a drawer
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ColumnSample {
    /// Perpendicular distance to the struck face
    pub distance: f32,
    /// Texture coordinate along the face
    pub wall_u: f32,
    /// 0 for an a-face, 1 for a b-face
    pub side: u32,
    /// Ordinal of the struck cell type
    pub cell: u32,
}

impl From<&RayHit> for ColumnSample {
    fn from(hit: &RayHit) -> Self {
        Self {
            distance: hit.distance as f32,
            wall_u: hit.wall_u as f32,
            side: match hit.side {
                Side::A => 0,
                Side::B => 1,
            },
            cell: hit.cell.ordinal() as u32,
        }
    }
}

/// Pack a frame's hits into samples
pub fn frame_samples(hits: &[RayHit]) -> Vec<ColumnSample> {
    hits.iter().map(ColumnSample::from).collect()
}

/// View samples as raw bytes
pub fn frame_bytes(samples: &[ColumnSample]) -> &[u8] {
    bytemuck::cast_slice(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadray4d_core::{CellType, GridBuilder, WallKind};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn room() -> SparseGrid4D {
        GridBuilder::new(8).with_boundary_walls(WallKind::Stone).build()
    }

    #[test]
    fn test_rotate_wraps() {
        let mut cam = Camera::new(Quadray::new(3.5, 3.5, 3.5, 3.5), 0.0);
        cam.rotate(-FRAC_PI_2);
        assert!((cam.angle - 3.0 * FRAC_PI_2).abs() < 1e-12);
        cam.rotate(PI);
        assert!((cam.angle - FRAC_PI_2).abs() < 1e-12);
        assert!(cam.angle >= 0.0 && cam.angle < TAU);
    }

    #[test]
    fn test_plane_is_perpendicular() {
        let cam = Camera::new(Quadray::ORIGIN, 1.1);
        let (fa, fb) = cam.forward();
        let (pa, pb) = cam.plane();
        assert!((fa * pa + fb * pb).abs() < 1e-12);
        let len = (pa * pa + pb * pb).sqrt();
        assert!((len - (DEFAULT_FOV * 0.5).tan()).abs() < 1e-12);
    }

    #[test]
    fn test_every_column_hits_in_enclosed_room() {
        let grid = room();
        let cam = Camera::new(Quadray::new(3.5, 3.5, 3.5, 3.5), 0.7);
        let hits = cam.cast_columns(&grid, 64, 64);
        assert_eq!(hits.len(), 64);
        assert!(hits.iter().all(|h| h.is_hit()));
        assert!(hits.iter().all(|h| h.distance >= MIN_PERP_DISTANCE));
    }

    #[test]
    fn test_flat_wall_has_no_fisheye() {
        let grid = room();
        let cam = Camera::new(Quadray::new(3.5, 3.5, 3.5, 3.5), 0.0);
        for hit in cam.cast_columns(&grid, 32, 64) {
            assert_eq!(hit.side, Side::A);
            assert_eq!(hit.map.0, 7);
            assert!((hit.distance - 3.5).abs() < 1e-9, "distance {}", hit.distance);
        }
    }

    #[test]
    fn test_centre_column_looks_forward() {
        let cam = Camera::new(Quadray::ORIGIN, 0.0);
        assert_eq!(cam.column_direction(1, 3), (1.0, 0.0));
    }

    #[test]
    fn test_column_sample_bytes() {
        let grid = GridBuilder::new(8).set(5, 3, 3, 3, CellType::Door).build();
        let cam = Camera::new(Quadray::new(3.5, 3.5, 3.5, 3.5), 0.0);
        let hits = cam.cast_columns(&grid, 3, 64);
        let samples = frame_samples(&hits);
        assert_eq!(samples[1].cell, CellType::Door.ordinal() as u32);
        assert_eq!(samples[1].side, 0);
        assert!((samples[1].distance - 1.5).abs() < 1e-6);
        assert_eq!(frame_bytes(&samples).len(), 3 * std::mem::size_of::<ColumnSample>());
        assert_eq!(std::mem::size_of::<ColumnSample>(), 16);
    }

    #[test]
    fn test_projected_height() {
        assert_eq!(projected_height(2.0, 480), 240.0);
        assert_eq!(projected_height(0.0, 480), 480.0 / MIN_PERP_DISTANCE);
    }
}
