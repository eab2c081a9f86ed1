//! Utility functions for serverless-openapi

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Expand `~` and resolve a relative path against `base_dir`
pub fn resolve_path(base_dir: &Path, raw: &str) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(raw).as_ref());
    if expanded.is_absolute() {
        expanded
    } else {
        base_dir.join(expanded)
    }
}

/// Directory holding `path`, or `.` for bare file names
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Ensure the directory that will hold `path` exists
pub fn ensure_parent_directory(path: &Path) -> Result<()> {
    let parent = parent_dir(path);
    if !parent.exists() {
        fs::create_dir_all(&parent)?;
    } else if !parent.is_dir() {
        return Err(anyhow!("Path exists but is not a directory: {:?}", parent));
    }
    Ok(())
}

/// Format duration as human readable string
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs > 0 {
        format!("{secs}.{millis:03}s")
    } else {
        format!("{millis}ms")
    }
}
