//! Raycast rendering system
//!
//! Casts one frame from the scene camera and keeps the packed column samples
//! for whatever draws them.

use quadray4d_core::{CellType, WallKind};
use quadray4d_render::{frame_bytes, frame_samples, projected_height, ColumnSample};

use crate::config::RenderingConfig;
use crate::scene::Scene;

/// Summary of one cast frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Columns cast
    pub columns: u32,
    /// Columns whose ray struck something within the step budget
    pub hits: u32,
    /// Columns that ended on a door
    pub doors: u32,
    /// Columns that ended on an exit
    pub exits: u32,
    /// Closest hit distance, if anything was hit
    pub nearest: Option<f64>,
    /// Tallest projected wall in pixels
    pub tallest: f64,
}

/// Casts frames from the scene camera
pub struct RenderSystem {
    config: RenderingConfig,
    samples: Vec<ColumnSample>,
}

impl RenderSystem {
    /// Create a render system from configuration
    pub fn new(config: RenderingConfig) -> Self {
        Self {
            samples: Vec::with_capacity(config.screen_width as usize),
            config,
        }
    }

    /// Cast one frame and keep its samples
    pub fn render(&mut self, scene: &Scene) -> FrameStats {
        let hits = scene
            .camera
            .cast_columns(&scene.grid, self.config.screen_width, self.config.max_steps);

        let mut stats = FrameStats {
            columns: self.config.screen_width,
            hits: 0,
            doors: 0,
            exits: 0,
            nearest: None,
            tallest: 0.0,
        };
        for hit in hits.iter().filter(|h| h.is_hit()) {
            stats.hits += 1;
            match hit.cell {
                CellType::Door => stats.doors += 1,
                CellType::Exit => stats.exits += 1,
                CellType::Floor | CellType::Wall(_) | CellType::Boundary => {}
            }
            stats.nearest = Some(stats.nearest.map_or(hit.distance, |n| n.min(hit.distance)));
            stats.tallest = stats.tallest.max(projected_height(hit.distance, self.config.screen_height));
        }

        self.samples = frame_samples(&hits);
        stats
    }

    /// Samples of the last frame
    pub fn samples(&self) -> &[ColumnSample] {
        &self.samples
    }

    /// Last frame as raw bytes
    pub fn frame_bytes(&self) -> &[u8] {
        frame_bytes(&self.samples)
    }

    /// Text map of the camera's hyperplane, one line per a, `@` at the camera
    pub fn plane_map(&self, scene: &Scene) -> String {
        let slice = scene.grid.get_slice(scene.camera.position.c, scene.camera.position.d);
        let eye = (
            scene.camera.position.a.floor() as i32,
            scene.camera.position.b.floor() as i32,
        );

        let mut map = String::with_capacity(slice.size() * (slice.size() + 1));
        for (a, row) in slice.rows().enumerate() {
            for (b, cell) in row.iter().enumerate() {
                if (a as i32, b as i32) == eye {
                    map.push('@');
                } else {
                    map.push(glyph(*cell));
                }
            }
            map.push('\n');
        }
        map
    }
}

fn glyph(cell: CellType) -> char {
    match cell {
        CellType::Floor => '.',
        CellType::Exit => 'E',
        CellType::Door => '+',
        CellType::Boundary => '#',
        CellType::Wall(WallKind::Stone) => '#',
        CellType::Wall(WallKind::Brick) => '=',
        CellType::Wall(WallKind::Metal) => 'M',
        CellType::Wall(WallKind::Crystal) => '*',
        CellType::Wall(WallKind::Destructible) => '%',
    }
}
