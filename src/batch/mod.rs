pub mod grid;
pub mod runner;

use std::path::PathBuf;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::core::error::SweepErrorKind;
use crate::core::{CollectorExecutor, GlobalConfig, Result, config};

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub config: PathBuf,
    pub name: String,
    pub settling: Option<f64>,
    pub outroot: Option<PathBuf>,
}

pub async fn run(
    global_config: GlobalConfig,
    batch_config: BatchConfig,
    running: &Arc<AtomicBool>,
) -> Result<()> {
    tracing::info!("Starting batch with config: {:?}", batch_config);

    let figment = config::create_figment_from_file(&batch_config.config)?;
    let params = config::ParamsConfig::from_figment(&figment)?;

    let collector = CollectorExecutor::discover(global_config.collector_path)?;
    tracing::info!("Using collector at: {}", collector.executable_path().display());

    // CLI overrides win over the config file
    let settling = batch_config.settling.unwrap_or(params.settling_time);
    let outroot = batch_config
        .outroot
        .clone()
        .unwrap_or_else(|| params.output_root.clone());

    if batch_config.name.contains(std::path::is_separator) {
        tracing::warn!(
            "Batch name '{}' contains a path separator; output will escape {}",
            batch_config.name,
            outroot.display()
        );
    }

    let batch_dir = outroot.join(&batch_config.name);
    std::fs::create_dir_all(&batch_dir)?;
    tracing::info!("Output root directory: {}", batch_dir.display());

    let points = grid::build_grid(&params)?;
    if points.is_empty() {
        return Err(SweepErrorKind::EmptyGrid.into());
    }

    let batch_runner = runner::BatchRunner::new(settling, batch_dir, collector);
    let total = batch_runner.run_all(&points, running).await?;

    if running.load(Ordering::SeqCst) {
        tracing::info!(
            "Batch '{}' completed: {total} tests run successfully.",
            batch_config.name
        );
    }

    Ok(())
}
