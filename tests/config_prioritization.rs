//! Tests for configuration prioritization.
//!
//! This module tests that parameter values are resolved correctly
//! according to the priority hierarchy:
//! 1. CLI arguments (highest priority, resolved in the batch module)
//! 2. Environment variables (GRIDSWEEP_*)
//! 3. Config file
//! 4. Default values (lowest priority)
//!
//! # Note on Test Execution
//!
//! Tests that modify environment variables use `clear_gridsweep_env_vars()`
//! at the start to ensure a clean state. However, since environment
//! variables are process-global, these tests may interfere with each other
//! when run in parallel. If you encounter test failures, run with
//! `--test-threads=1`:
//!
//! ```bash
//! cargo test --test config_prioritization -- --test-threads=1
//! ```
//!
//! # Environment Variable Format
//!
//! Environment variables use double underscore (`__`) to separate the
//! section from the field name. For example:
//! - `GRIDSWEEP_SETTLING_TIME` → `settling_time`
//! - `GRIDSWEEP_THROTTLE__START` → `throttle.start`

use gridsweep::core::config::{ParamsConfig, create_figment_from_file};
use std::path::PathBuf;
use tempfile::TempDir;

const MINIMAL_CONFIG: &str = "\
throttle: {start: 0.0, stop: 0.2, step: 0.1}
brake: {start: 0.0, stop: 0.1, step: 0.05}
target_speed: {values: [10, 20]}
";

/// Creates a config file in a fresh temp dir and returns both
fn create_config_file(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("params.yaml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Clears all GRIDSWEEP_* environment variables
fn clear_gridsweep_env_vars() {
    let vars_to_clear: Vec<String> = std::env::vars()
        .filter(|(k, _)| k.starts_with("GRIDSWEEP_"))
        .map(|(k, _)| k)
        .collect();
    for var in vars_to_clear {
        unsafe {
            std::env::remove_var(&var);
        }
    }
}

#[test]
fn test_default_values() {
    clear_gridsweep_env_vars();

    let (_dir, config_path) = create_config_file(MINIMAL_CONFIG);
    let figment = create_figment_from_file(&config_path).expect("Failed to create figment");
    let config = ParamsConfig::from_figment(&figment).expect("Failed to load config");

    assert_eq!(
        config.settling_time, 5.0,
        "Default settling_time should be 5.0"
    );
    assert_eq!(
        config.output_root,
        PathBuf::from("./test_results"),
        "Default output_root should be ./test_results"
    );
}

#[test]
fn test_config_file_values() {
    clear_gridsweep_env_vars();

    let content = format!("{MINIMAL_CONFIG}settling_time: 2.5\noutput_root: /data/runs\n");
    let (_dir, config_path) = create_config_file(&content);
    let figment = create_figment_from_file(&config_path).expect("Failed to create figment");
    let config = ParamsConfig::from_figment(&figment).expect("Failed to load config");

    assert_eq!(config.settling_time, 2.5);
    assert_eq!(config.output_root, PathBuf::from("/data/runs"));
    assert_eq!(config.throttle.start, 0.0);
    assert_eq!(config.throttle.stop, 0.2);
    assert_eq!(config.throttle.step, 0.1);
    assert_eq!(config.target_speed.values, vec![10.0, 20.0]);
}

#[test]
fn test_env_overrides_config_file() {
    clear_gridsweep_env_vars();

    let content = format!("{MINIMAL_CONFIG}settling_time: 2.5\n");
    let (_dir, config_path) = create_config_file(&content);

    unsafe {
        std::env::set_var("GRIDSWEEP_SETTLING_TIME", "0.5");
    }

    let figment = create_figment_from_file(&config_path).expect("Failed to create figment");
    let config = ParamsConfig::from_figment(&figment).expect("Failed to load config");

    unsafe {
        std::env::remove_var("GRIDSWEEP_SETTLING_TIME");
    }

    assert_eq!(
        config.settling_time, 0.5,
        "Environment variable should beat the config file"
    );
}

#[test]
fn test_nested_env_override() {
    clear_gridsweep_env_vars();

    let (_dir, config_path) = create_config_file(MINIMAL_CONFIG);

    unsafe {
        std::env::set_var("GRIDSWEEP_THROTTLE__START", "0.1");
    }

    let figment = create_figment_from_file(&config_path).expect("Failed to create figment");
    let config = ParamsConfig::from_figment(&figment).expect("Failed to load config");

    unsafe {
        std::env::remove_var("GRIDSWEEP_THROTTLE__START");
    }

    assert_eq!(config.throttle.start, 0.1);
    assert_eq!(config.throttle.stop, 0.2, "Unset keys keep file values");
}

#[test]
fn test_missing_config_file_is_an_error() {
    clear_gridsweep_env_vars();

    let temp_dir = TempDir::new().unwrap();
    let result = create_figment_from_file(&temp_dir.path().join("missing.yaml"));
    assert!(result.is_err());
}

#[test]
fn test_missing_required_key_is_an_error() {
    clear_gridsweep_env_vars();

    let (_dir, config_path) = create_config_file("throttle: {start: 0.0, stop: 0.2, step: 0.1}\n");
    let figment = create_figment_from_file(&config_path).expect("Failed to create figment");
    assert!(
        ParamsConfig::from_figment(&figment).is_err(),
        "brake and target_speed are required"
    );
}
