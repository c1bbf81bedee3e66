//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`Q4D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use quadray4d_core::{GridConfig, LineOfSight};
use quadray4d_physics::CollisionResolver;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// World grid configuration
    #[serde(default)]
    pub grid: GridSettings,
    /// Movement and collision configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Line-of-sight configuration
    #[serde(default)]
    pub perception: PerceptionConfig,
    /// Raycast rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Headless simulation configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`Q4D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // Q4D_GRID__SIZE=32 -> grid.size = 32
        figment = figment.merge(Env::prefixed("Q4D_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.size == 0 {
            return Err(ConfigError::invalid("grid.size must be at least 1"));
        }
        if !(self.physics.collision_radius >= 0.0 && self.physics.collision_radius < 0.5) {
            return Err(ConfigError::invalid("physics.collision_radius must be in [0, 0.5)"));
        }
        if !(self.physics.max_substep > 0.0) {
            return Err(ConfigError::invalid("physics.max_substep must be positive"));
        }
        if !(self.perception.samples_per_unit > 0.0) {
            return Err(ConfigError::invalid("perception.samples_per_unit must be positive"));
        }
        if !(self.rendering.fov_degrees > 0.0 && self.rendering.fov_degrees < 180.0) {
            return Err(ConfigError::invalid("rendering.fov_degrees must be in (0, 180)"));
        }
        if self.rendering.screen_width == 0 || self.rendering.screen_height == 0 {
            return Err(ConfigError::invalid("rendering screen dimensions must be non-zero"));
        }
        Ok(())
    }
}

/// World grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Cells per axis
    pub size: u16,
    /// Hyperplane slices kept before the cache is flushed
    pub slice_cache_capacity: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: 16,
            slice_cache_capacity: 16,
        }
    }
}

impl GridSettings {
    /// Convert to the grid's own configuration
    pub fn to_grid_config(&self) -> GridConfig {
        GridConfig {
            size: self.size,
            slice_cache_capacity: self.slice_cache_capacity,
        }
    }
}

/// Movement and collision configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Entity collision radius in cells
    pub collision_radius: f64,
    /// Largest in-plane step taken in one collision check
    pub max_substep: f64,
    /// Entity speed in cells per second
    pub move_speed: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            collision_radius: 0.2,
            max_substep: 0.5,
            move_speed: 3.0,
        }
    }
}

impl PhysicsConfig {
    /// Convert to a collision resolver
    pub fn to_resolver(&self) -> CollisionResolver {
        CollisionResolver::new(self.collision_radius).with_max_substep(self.max_substep)
    }
}

/// Line-of-sight configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerceptionConfig {
    /// Sample points per unit of 4D distance
    pub samples_per_unit: f64,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self { samples_per_unit: 2.0 }
    }
}

impl PerceptionConfig {
    /// Convert to a line-of-sight query
    pub fn to_line_of_sight(&self) -> LineOfSight {
        LineOfSight::new(self.samples_per_unit)
    }
}

/// Raycast rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Columns per frame
    pub screen_width: u32,
    /// Screen height used for wall projection
    pub screen_height: u32,
    /// Horizontal field of view in degrees
    pub fov_degrees: f64,
    /// DDA step budget per ray (the draw distance)
    pub max_steps: u32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            screen_width: 320,
            screen_height: 200,
            fov_degrees: 60.0,
            max_steps: 64,
        }
    }
}

impl RenderingConfig {
    /// Field of view in radians
    pub fn fov_radians(&self) -> f64 {
        self.fov_degrees.to_radians()
    }
}

/// Headless simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Ticks to run before the frame is cast
    pub ticks: u32,
    /// Seconds of simulated time per tick
    pub tick_seconds: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 120,
            tick_seconds: 1.0 / 60.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level used when `RUST_LOG` is unset (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: &str) -> Self {
        ConfigError {
            message: message.to_string(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
