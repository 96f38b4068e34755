//! Data directory resolution.
//!
//! All stores live as flat files under `~/.moodrs`. `MOODRS_HOME` overrides
//! the home directory, which is how tests point the whole app at a tempdir.

use std::path::PathBuf;

/// Resolve the data directory (`~/.moodrs`), honoring `MOODRS_HOME`.
pub fn data_dir() -> anyhow::Result<PathBuf> {
    let home = resolve_home_dir()?;
    Ok(home.join(".moodrs"))
}

/// Resolve the data directory and make sure it exists on disk.
pub fn ensure_data_dir() -> anyhow::Result<PathBuf> {
    let dir = data_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn resolve_home_dir() -> anyhow::Result<PathBuf> {
    if let Ok(path) = std::env::var("MOODRS_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))
}
