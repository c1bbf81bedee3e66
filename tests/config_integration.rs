//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::path::PathBuf;

use quadray4d::config::AppConfig;
use serial_test::serial;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quadray4d-config-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_default_file_loads() {
    std::env::remove_var("Q4D_GRID__SIZE");
    let config = AppConfig::load().unwrap();
    assert!(config.grid.size > 0);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("Q4D_GRID__SIZE", "32");
    std::env::set_var("Q4D_DEBUG__LOG_LEVEL", "trace");
    let config = AppConfig::load();
    std::env::remove_var("Q4D_GRID__SIZE");
    std::env::remove_var("Q4D_DEBUG__LOG_LEVEL");

    let config = config.unwrap();
    assert_eq!(config.grid.size, 32);
    assert_eq!(config.debug.log_level, "trace");
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = scratch_dir("user");
    std::fs::write(dir.join("default.toml"), "[grid]\nsize = 12\nslice_cache_capacity = 8\n").unwrap();
    std::fs::write(dir.join("user.toml"), "[grid]\nsize = 20\nslice_cache_capacity = 8\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.grid.size, 20);
    assert_eq!(config.grid.slice_cache_capacity, 8);
    // Sections missing from both files fall back to defaults
    assert_eq!(config.rendering.max_steps, 64);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let dir = std::env::temp_dir().join("quadray4d-config-does-not-exist");
    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.grid.size, 16);
    assert_eq!(config.physics.max_substep, 0.5);
}

#[test]
#[serial]
fn test_invalid_env_value_is_rejected() {
    std::env::set_var("Q4D_PHYSICS__COLLISION_RADIUS", "0.9");
    let result = AppConfig::load();
    std::env::remove_var("Q4D_PHYSICS__COLLISION_RADIUS");

    let err = result.unwrap_err();
    assert!(err.to_string().contains("collision_radius"));
}

#[test]
#[serial]
fn test_malformed_file_is_an_error() {
    let dir = scratch_dir("malformed");
    std::fs::write(dir.join("default.toml"), "[grid]\nsize = \"big\"\n").unwrap();

    assert!(AppConfig::load_from(&dir).is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}
