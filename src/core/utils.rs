//! Utility functions for gridsweep.

use std::{fs, path::Path, time::Duration};

use crate::core::Result;

/// Helper function to turn a Duration into a nicely formatted string
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();

    if total_secs < 60 {
        format!("{total_secs}s")
    } else if total_secs < 3600 {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{mins}m{secs}s")
    } else {
        let hours = total_secs / 3600;
        let mins = (total_secs % 3600) / 60;
        format!("{hours}h{mins}m")
    }
}

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Check if a file is an executable.
pub fn is_executable(path: &Path) -> bool {
    // On unix, check the 'execute' permission bit
    #[cfg(unix)]
    {
        fs::metadata(path).is_ok_and(|metadata| {
            metadata.is_file() && (metadata.permissions().mode() & 0o111 != 0)
        })
    }

    #[cfg(windows)]
    {
        path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("exe"))
    }

    // Fallback for other operating systems.
    #[cfg(not(any(unix, windows)))]
    {
        path.is_file()
    }
}

/// Total size in bytes of every regular file under `path`, recursively.
///
/// Entry file types are read without following symlinks, so links and other
/// non-regular entries contribute nothing. An empty directory sums to 0.
pub fn dir_size(path: impl AsRef<Path>) -> Result<u64> {
    let mut total = 0;

    for entry in fs::read_dir(path.as_ref())? {
        let entry = entry?;
        let file_type = entry.file_type()?;

        if file_type.is_file() {
            total += entry.metadata()?.len();
        } else if file_type.is_dir() {
            total += dir_size(entry.path())?;
        }
    }

    Ok(total)
}
