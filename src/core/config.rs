//! Configuration loading for gridsweep.
//!
//! Values are resolved in priority order: CLI arguments, then `GRIDSWEEP_*`
//! environment variables, then the YAML parameter file, then defaults.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::core::{Result, error::SweepErrorKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub collector_path: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            collector_path: None,
            verbose: false,
        }
    }
}

/// One numeric sweep axis, inclusive of both endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

/// Target speeds are an explicit list, not a range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedAxis {
    pub values: Vec<f64>,
}

/// The parameter file contents. Loaded once per invocation, immutable after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsConfig {
    pub throttle: AxisRange,
    pub brake: AxisRange,
    pub target_speed: SpeedAxis,

    #[serde(default = "default_settling_time")]
    pub settling_time: f64,

    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
}

fn default_settling_time() -> f64 {
    5.0
}

fn default_output_root() -> PathBuf {
    PathBuf::from("./test_results")
}

/// Build the figment for a parameter file, layering `GRIDSWEEP_*` environment
/// variables on top. Nested keys use a double underscore, e.g.
/// `GRIDSWEEP_THROTTLE__START`.
pub fn create_figment_from_file(path: &Path) -> Result<Figment> {
    if !path.exists() {
        return Err(SweepErrorKind::ConfigFileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    Ok(Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed("GRIDSWEEP_").split("__")))
}

impl ParamsConfig {
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }
}
