//! Main binary entrypoint for the gridsweep batch runner.
//!
//! Parses CLI arguments, sets up logging, and hands off to the batch runner.

mod batch;
mod core;
mod textformat;

use crate::batch::BatchConfig;
use crate::core::{GlobalConfig, Result};
use clap::Parser;
use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

#[derive(Parser)]
#[command(name = "gridsweep")]
#[command(about = "Batch-run a data collector over a grid of throttle/speed/brake settings")]
struct Cli {
    /// Path to the YAML parameter file
    #[arg(long, short, default_value = "params.yaml")]
    config: PathBuf,

    /// Unique name for this test batch (used to create the output folder)
    #[arg(long, short)]
    name: String,

    /// Override the settling_time (seconds) from the config file
    #[arg(long, short)]
    settling: Option<f64>,

    /// Override the output_root directory from the config file
    #[arg(long, short)]
    outroot: Option<PathBuf>,

    #[arg(long)]
    collector_path: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse input
    let cli = Cli::parse();

    // Toggle the tracing level. Diagnostics go to stderr, where indicatif
    // already draws, so stdout stays clean.
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    let global_config = GlobalConfig {
        collector_path: cli.collector_path,
        verbose: cli.verbose,
    };

    let batch_config = BatchConfig {
        config: cli.config,
        name: cli.name,
        settling: cli.settling,
        outroot: cli.outroot,
    };

    // Listen to CTRL+C
    let running = Arc::new(AtomicBool::new(true));
    let shutdown_task = {
        let r = running.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for CTRL+C: {e}");
            }
            tracing::info!("Received CTRL+C. Initiating graceful shutdown...");
            r.store(false, Ordering::SeqCst);
        })
    };

    let result = batch::run(global_config, batch_config, &running).await;

    // Await shutdown if needed
    let interrupted = !running.load(Ordering::SeqCst);
    if interrupted {
        let _ = shutdown_task.await;
        tracing::info!("Shutdown complete");
    } else {
        drop(shutdown_task);
    }

    // A failed batch exits with a distinct non-zero status
    if let Err(e) = result {
        tracing::error!("{e}");

        std::process::exit(1);
    }

    Ok(())
}
