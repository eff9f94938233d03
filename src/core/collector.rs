//! The wrapper for the external data-collector binary.

use std::{
    env,
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::process::Command;

use crate::core::{
    Result,
    error::{SweepError, SweepErrorKind},
    utils::is_executable,
};

/// Executable name searched in the working directory and on PATH when no
/// explicit path is given.
const COLLECTOR_BINARY: &str = "run_data_collector";

pub struct CollectorExecutor {
    executable_path: PathBuf,
}

/// Arguments for one collector invocation.
pub struct CollectorRunSpec<'a> {
    pub throttle: f64,
    pub speed: f64,
    pub brake: f64,
    pub outdir: &'a Path,
}

pub struct CollectorOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CollectorExecutor {
    pub fn new(executable_path: PathBuf) -> Self {
        Self { executable_path }
    }

    /// Find the binary and create a CollectorExecutor with that path
    pub fn discover(explicit_path: Option<PathBuf>) -> Result<Self> {
        let path = Self::find_executable(explicit_path)?;
        Ok(Self::new(path))
    }

    /// Find the binary
    pub fn find_executable(explicit_path: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = explicit_path {
            if path.exists() && path.is_file() {
                tracing::info!("Using explicit collector path: {}", path.display());
                return Ok(path);
            } else {
                let hint = if !is_executable(&path) {
                    Some("Make sure this is the path to the executable itself.")
                } else {
                    None
                };

                return Err(
                    SweepError::from(SweepErrorKind::CollectorNotFoundAtPath { path })
                        .with_hint(hint),
                );
            }
        }

        // Working directory first, then PATH
        let local = Path::new(".").join(COLLECTOR_BINARY);
        if local.exists() && is_executable(&local) {
            tracing::debug!("Found collector at: {}", local.display());
            return Ok(local);
        }

        if let Some(paths) = env::var_os("PATH") {
            for dir in env::split_paths(&paths) {
                let candidate = dir.join(COLLECTOR_BINARY);
                if candidate.exists() && is_executable(&candidate) {
                    tracing::debug!("Found collector at: {}", candidate.display());
                    return Ok(candidate);
                }
            }
        }

        Err(SweepErrorKind::CollectorNotFound.into())
    }

    /// Getter for the executable_path
    pub fn executable_path(&self) -> &Path {
        &self.executable_path
    }

    /// Public API for creating a command
    pub fn create_command(&self) -> Command {
        Command::new(&self.executable_path)
    }

    /// Run the collector for one grid point, blocking until it exits.
    ///
    /// stdout and stderr are captured; a non-zero exit status logs the
    /// captured error stream and fails the call. No timeout is applied.
    pub async fn run(&self, spec: CollectorRunSpec<'_>) -> Result<CollectorOutput> {
        let mut cmd = self.create_command();

        cmd.args([
            "--throttle",
            &spec.throttle.to_string(),
            "--speed",
            &spec.speed.to_string(),
            "--brake",
            &spec.brake.to_string(),
        ]);
        cmd.arg("--outdir");
        cmd.arg(spec.outdir);

        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let child = cmd.spawn()?;
        let output = child.wait_with_output().await?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::error!("Collector failed:\n{stderr}");
            tracing::debug!("Collector stdout:\n{stdout}");

            return Err(SweepErrorKind::CollectorProcessFailed {
                code: output.status.code().unwrap_or(-1),
            }
            .into());
        }

        Ok(CollectorOutput { stdout, stderr })
    }
}
