//! Sequential execution of the grid against the external collector.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;
use tokio::time::Instant;

use crate::batch::grid::GridPoint;
use crate::core::collector::CollectorRunSpec;
use crate::core::{CollectorExecutor, Result, format_duration, utils};

pub struct BatchRunner {
    settling: f64,
    batch_dir: PathBuf,
    collector: CollectorExecutor,
}

/// Runs the grid points, keeps a progress bar updated and returns the count.
impl BatchRunner {
    pub fn new(settling: f64, batch_dir: PathBuf, collector: CollectorExecutor) -> Self {
        Self {
            settling,
            batch_dir,
            collector,
        }
    }

    /// Run every grid point in order, one collector process at a time,
    /// settling between consecutive runs but not after the last.
    ///
    /// The first collector failure aborts the remaining grid. Returns the
    /// number of points that ran successfully.
    pub async fn run_all(&self, points: &[GridPoint], running: &Arc<AtomicBool>) -> Result<usize> {
        let total = points.len();
        let start_time = Instant::now();

        let progress = ProgressBar::new(total as u64);
        progress.set_style(
            ProgressStyle::with_template(
                "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )?
            .progress_chars("=="),
        );
        progress.enable_steady_tick(Duration::from_millis(100));

        let mut executed = 0;

        for (idx, point) in points.iter().enumerate() {
            if !running.load(Ordering::SeqCst) {
                tracing::info!("Shutdown requested. Aborting remaining grid points.");
                break;
            }

            let tag = point.tag();
            progress.set_position(idx as u64);

            let eta_message = if idx > 0 {
                let elapsed = start_time.elapsed();
                let avg_time_per_point = elapsed / idx as u32;
                let remaining = total - idx;
                let estimated_remaining = avg_time_per_point * remaining as u32;

                format!("{tag} [ETA: {}]", format_duration(estimated_remaining))
            } else {
                tag.clone()
            };
            progress.set_message(eta_message);

            // Reused as-is when a prior partial run left it behind
            let outdir = self.batch_dir.join(&tag);
            fs::create_dir_all(&outdir)?;

            tracing::info!(
                "[{}/{total}] Testing {tag} -> results in {}",
                idx + 1,
                outdir.display()
            );

            let run_output = self
                .collector
                .run(CollectorRunSpec {
                    throttle: point.throttle,
                    speed: point.speed,
                    brake: point.brake,
                    outdir: &outdir,
                })
                .await?;

            if !run_output.stdout.is_empty() {
                tracing::debug!("Collector stdout:\n{}", run_output.stdout);
            }
            if !run_output.stderr.is_empty() {
                tracing::debug!("Collector stderr:\n{}", run_output.stderr);
            }

            executed += 1;

            match utils::dir_size(&outdir) {
                Ok(bytes) => tracing::info!("PASSED: {tag} ({bytes} bytes collected)"),
                Err(_) => tracing::info!("PASSED: {tag}"),
            }

            // No settling after the final point
            if idx + 1 < total && self.settling > 0.0 {
                tracing::debug!("Waiting {}s before next test", self.settling);
                tokio::time::sleep(Duration::from_secs_f64(self.settling)).await;
            }
        }

        if !running.load(Ordering::SeqCst) {
            progress.finish_with_message("Batch interrupted");
        } else {
            progress.finish_with_message("Batch complete!");
        }

        Ok(executed)
    }
}
