use directories::{BaseDirs, ProjectDirs};
use eyre::{eyre, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

static DATA_DIR_OVERRIDE: Lazy<RwLock<Option<PathBuf>>> = Lazy::new(|| RwLock::new(None));

/// Override the data directory for the current process.
/// Subsequent calls replace the previous override.
pub fn set_data_dir<P: AsRef<Path>>(path: P) {
    *DATA_DIR_OVERRIDE.write() = Some(path.as_ref().to_path_buf());
}

/// Clear any previously configured override.
pub fn clear_data_dir_override() {
    DATA_DIR_OVERRIDE.write().take();
}

/// Resolve the directory holding run history and other per-user state.
/// Priority: explicit override -> platform standard -> ~/.local/share/wave
pub fn data_dir() -> Result<PathBuf> {
    if let Some(path) = DATA_DIR_OVERRIDE.read().clone() {
        return Ok(path);
    }

    if let Some(proj) = ProjectDirs::from("com", "Wave", "Wave") {
        return Ok(proj.data_dir().to_path_buf());
    }

    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().join(".local").join("share").join("wave"));
    }

    Err(eyre!(
        "unable to determine data directory for wave (no override and no platform default)"
    ))
}
