//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for laying out walls and placing entities in a 4D
//! grid.

use std::f64::consts::FRAC_PI_4;

use quadray4d_core::{CellType, GridBuilder, GridConfig, Quadray, SparseGrid4D, WallKind};
use quadray4d_physics::{CollisionResolver, Entity4D, EntityKey, EntityWorld};
use quadray4d_render::Camera;

use crate::config::AppConfig;

/// A grid, its entities and the camera viewing it
pub struct Scene {
    /// World cells
    pub grid: SparseGrid4D,
    /// Moving entities
    pub world: EntityWorld,
    /// Viewer; follows the player when there is one
    pub camera: Camera,
    /// Entity the camera follows
    pub player: Option<EntityKey>,
}

impl Scene {
    /// Current player position, if a player exists
    pub fn player_position(&self) -> Option<Quadray> {
        self.player
            .and_then(|key| self.world.get(key))
            .map(|e| e.position)
    }

    /// Move the camera to the player
    pub fn sync_camera(&mut self) {
        if let Some(pos) = self.player_position() {
            self.camera.position = pos;
        }
    }
}

/// Builder for constructing scenes
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new(16)
///     .with_boundary_walls(WallKind::Stone)
///     .add_wall_box([8, 1, 1, 1], [8, 14, 14, 14], WallKind::Brick)
///     .add_door([8, 8, 1, 1])
///     .add_player(Quadray::new(1.5, 1.5, 1.5, 1.5), 0.0, Quadray::ORIGIN)
///     .build();
/// ```
pub struct SceneBuilder {
    grid: GridBuilder,
    world: EntityWorld,
    center: f64,
    camera: Option<Camera>,
    player: Option<EntityKey>,
    fov: Option<f64>,
}

impl SceneBuilder {
    /// Create a builder for an empty grid with `size` cells per axis
    pub fn new(size: u16) -> Self {
        Self::with_config(GridConfig::new(size))
    }

    /// Create a builder with a custom grid configuration
    pub fn with_config(config: GridConfig) -> Self {
        Self {
            center: config.size as f64 * 0.5,
            grid: GridBuilder::with_config(config),
            world: EntityWorld::new(),
            camera: None,
            player: None,
            fov: None,
        }
    }

    /// Use `resolver` for every entity in the scene
    pub fn with_resolver(mut self, resolver: CollisionResolver) -> Self {
        self.world.resolver = resolver;
        self
    }

    /// Set the camera's field of view in radians
    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = Some(fov);
        self
    }

    /// Wall in every cell on the outer shell of the grid
    pub fn with_boundary_walls(mut self, kind: WallKind) -> Self {
        self.grid = self.grid.with_boundary_walls(kind);
        self
    }

    /// Fill an inclusive box with walls
    pub fn add_wall_box(mut self, min: [i32; 4], max: [i32; 4], kind: WallKind) -> Self {
        self.grid = self.grid.fill_box(min, max, CellType::Wall(kind));
        self
    }

    /// Clear an inclusive box back to floor
    pub fn carve(mut self, min: [i32; 4], max: [i32; 4]) -> Self {
        self.grid = self.grid.carve_box(min, max);
        self
    }

    /// Place a door
    pub fn add_door(mut self, cell: [i32; 4]) -> Self {
        let [a, b, c, d] = cell;
        self.grid = self.grid.set(a, b, c, d, CellType::Door);
        self
    }

    /// Place an exit
    pub fn add_exit(mut self, cell: [i32; 4]) -> Self {
        let [a, b, c, d] = cell;
        self.grid = self.grid.set(a, b, c, d, CellType::Exit);
        self
    }

    /// Add the player, which the camera follows
    pub fn add_player(mut self, position: Quadray, angle: f64, velocity: Quadray) -> Self {
        let key = self.world.add_entity(Entity4D::new(position).with_velocity(velocity));
        self.player = Some(key);
        self.camera = Some(Camera::new(position, angle));
        self
    }

    /// Add a non-player entity
    pub fn add_entity(mut self, entity: Entity4D) -> Self {
        self.world.add_entity(entity);
        self
    }

    /// Get the player's starting position (if a player was added)
    pub fn player_start(&self) -> Option<Quadray> {
        self.player
            .and_then(|key| self.world.get(key))
            .map(|e| e.position)
    }

    /// Build the scene
    ///
    /// Without a player the camera sits at the grid centre facing +a.
    pub fn build(self) -> Scene {
        let center = self.center;
        let mut camera = self
            .camera
            .unwrap_or_else(|| Camera::new(Quadray::new(center, center, center, center), 0.0));
        if let Some(fov) = self.fov {
            camera.fov = fov;
        }

        Scene {
            grid: self.grid.build(),
            world: self.world,
            camera,
            player: self.player,
        }
    }
}

/// The level run by the headless binary
///
/// A walled grid split along a by a brick slab with a door through it, a
/// metal hyperplane wall at c = size/2 on the low-a side, a crystal pillar,
/// an exit, the player and two wanderers.
pub fn demo_scene(config: &AppConfig) -> Scene {
    let size = config.grid.size;
    let speed = config.physics.move_speed;
    let builder = SceneBuilder::with_config(config.grid.to_grid_config())
        .with_resolver(config.physics.to_resolver())
        .with_fov(config.rendering.fov_radians())
        .with_boundary_walls(WallKind::Stone);

    if size < 8 {
        log::warn!("grid size {} too small for the demo layout, using an empty room", size);
        return builder
            .add_player(Quadray::new(1.5, 1.5, 1.5, 1.5), FRAC_PI_4, Quadray::ORIGIN)
            .build();
    }

    let max = size as i32 - 1;
    let mid = size as i32 / 2;
    let inner = max - 1;

    builder
        .add_wall_box([mid, 1, 1, 1], [mid, inner, inner, inner], WallKind::Brick)
        .add_wall_box([1, 1, mid, 1], [mid - 1, inner, mid, inner], WallKind::Metal)
        .add_wall_box([mid / 2, mid / 2 + 2, 1, 1], [mid / 2, mid / 2 + 2, inner, inner], WallKind::Crystal)
        .add_door([mid, mid, 1, 1])
        .add_exit([inner, inner, 1, 1])
        .add_player(
            Quadray::new(1.5, 1.5, 1.5, 1.5),
            FRAC_PI_4,
            Quadray::new(speed, speed * 0.5, 0.0, 0.0),
        )
        .add_entity(
            Entity4D::new(Quadray::new(2.5, 5.5, 2.5, 3.5)).with_velocity(Quadray::new(0.0, speed, speed * 0.5, 0.0)),
        )
        .add_entity(
            Entity4D::new(Quadray::new(mid as f64 + 2.5, 2.5, mid as f64 + 1.5, 2.5))
                .with_velocity(Quadray::new(-speed, 0.0, 0.0, speed * 0.5)),
        )
        .build()
}
