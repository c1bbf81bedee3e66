//! quadray4d - headless demo
//!
//! Loads configuration, checks the lattice geometry, then simulates the demo
//! level and casts a frame from the player's viewpoint.

use quadray4d::config::AppConfig;
use quadray4d::scene::demo_scene;
use quadray4d::systems::{PerceptionSystem, RenderSystem, SimulationSystem};
use quadray4d_math::synergetics::verify_geometric_identities;
use quadray4d_math::Jitterbug;

/// Tolerance for the startup geometry checks
const VERIFY_TOLERANCE: f64 = 0.01;

fn main() {
    let loaded = AppConfig::load();

    // Initialize logging, RUST_LOG wins over the configured level
    let level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting quadray4d");

    let report = verify_geometric_identities(VERIFY_TOLERANCE);
    if !report.all_passed() {
        log::warn!("Geometry checks failed: {}", report);
    }
    for phase in Jitterbug::phases() {
        log::debug!("Jitterbug {}: {:.4} deg, volume {:.4}", phase.name, phase.angle, phase.volume);
    }

    let mut scene = demo_scene(&config);
    log::info!(
        "Built {}^4 grid with {} stored cells and {} entities",
        scene.grid.size(),
        scene.grid.stored_cells(),
        scene.world.entity_count()
    );

    let mut simulation = SimulationSystem::from_config(&config.simulation);
    let result = simulation.run(&mut scene, config.simulation.ticks);
    log::info!(
        "Simulated {} ticks ({:.2}s), {} entities stalled",
        result.ticks,
        result.elapsed,
        result.stalled
    );
    if let Some(pos) = scene.player_position() {
        log::info!("Player at {} (cartesian {:?})", pos, pos.to_cartesian());
    }

    let perception = PerceptionSystem::from_config(&config.perception);
    let visible = perception.visible_from_player(&scene);
    log::info!("Player sees {} of {} other entities", visible.len(), scene.world.entity_count().saturating_sub(1));
    for (key, blocked_at) in perception.hidden_from_player(&scene) {
        log::debug!("{:?} hidden behind {}", key, blocked_at.floor());
    }

    let mut render = RenderSystem::new(config.rendering.clone());
    log::debug!("Camera plane:\n{}", render.plane_map(&scene));
    let frame = render.render(&scene);
    log::info!(
        "Cast {} columns: {} hits, {} doors, {} exits, nearest {:?}, {} bytes",
        frame.columns,
        frame.hits,
        frame.doors,
        frame.exits,
        frame.nearest,
        render.frame_bytes().len()
    );
}
