//! Shared JSON persistence helpers for the file-backed stores.
//!
//! Reads are defensive: a missing or unparseable file yields the default
//! value so no read path ever surfaces an error to the caller. Writes are
//! atomic (temp file + rename), so a crash mid-write cannot leave a
//! truncated store behind.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read a JSON file into `T`, or `T::default()` when the file is missing or
/// does not parse. Unparseable content is logged and left on disk; only the
/// next successful write replaces it.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return T::default(),
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("ignoring unreadable store file {}: {}", path.display(), err);
            T::default()
        }
    }
}

/// Read a JSON file into `Some(T)`, or `None` when missing or unparseable.
pub fn load_optional<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("ignoring unreadable store file {}: {}", path.display(), err);
            None
        }
    }
}

/// Serialize `value` as pretty JSON and atomically replace `path`.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("invalid store path"))?;
    std::fs::create_dir_all(dir)?;
    let raw = serde_json::to_string_pretty(value)?;
    let temp = tempfile::NamedTempFile::new_in(dir)?;
    std::fs::write(temp.path(), raw)?;
    temp.persist(path)?;
    Ok(())
}

/// Delete a store file; a file that is already gone is not an error.
pub fn remove_file(path: &Path) -> anyhow::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Current instant as an ISO-8601 UTC timestamp (`2024-03-10T09:00:00.000Z`).
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
