//! Snapshot save/load functionality.
//!
//! Stores one encoded snapshot per player name in a directory on disk.

use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{
    error::{PlayerError, PlayerResult},
    host::WorldRegistry,
    player::OfflinePlayer,
    settings::SnapshotSettings,
    snapshot::PlayerSnapshot,
};

/// Directory of encoded snapshots, one file per player.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    extension: String,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn from_settings(settings: &SnapshotSettings) -> Self {
        Self::new(settings.store_dir.clone(), settings.file_extension.clone())
    }

    /// Path of the file a player's snapshot is stored in.
    pub fn path_for(&self, name: &str) -> PlayerResult<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{}", self.extension)))
    }

    /// Writes a snapshot, replacing any earlier one for the same player.
    ///
    /// The bytes go to a uniquely named temporary file in the same directory
    /// and are renamed into place, so a reader never sees a half-written
    /// snapshot. The temporary file is deleted if any step fails.
    pub fn save(&self, snapshot: &PlayerSnapshot) -> PlayerResult<PathBuf> {
        let path = self.path_for(snapshot.name())?;
        let bytes = snapshot.to_bytes()?;

        fs::create_dir_all(&self.dir).map_err(|e| io_error("create", &self.dir, e))?;
        let mut tmp =
            NamedTempFile::new_in(&self.dir).map_err(|e| io_error("create temp file in", &self.dir, e))?;
        tmp.write_all(&bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| io_error("write", tmp.path(), e))?;
        tmp.persist(&path).map_err(|e| io_error("rename", &path, e.error))?;

        info!(player = snapshot.name(), bytes = bytes.len(), "snapshot saved to {}", path.display());
        Ok(path)
    }

    /// Loads a player's snapshot; `None` if none was saved.
    pub fn load(&self, name: &str, worlds: &dyn WorldRegistry) -> PlayerResult<Option<PlayerSnapshot>> {
        let path = self.path_for(name)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(player = name, "no stored snapshot");
                return Ok(None);
            }
            Err(e) => return Err(io_error("read", &path, e)),
        };

        let snapshot = PlayerSnapshot::from_bytes(&bytes, worlds)?;
        info!(player = name, "snapshot loaded from {}", path.display());
        Ok(Some(snapshot))
    }

    /// Deletes a player's snapshot. Returns whether one existed.
    pub fn remove(&self, name: &str) -> PlayerResult<bool> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(player = name, "snapshot removed");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error("remove", &path, e)),
        }
    }

    /// Names of all stored players, sorted.
    pub fn list(&self) -> PlayerResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("list", &self.dir, e)),
        };

        // The extension may itself contain dots, so match the whole suffix.
        let suffix = format!(".{}", self.extension);
        let mut names = Vec::new();
        for entry in entries {
            let file_name = entry.map_err(|e| io_error("list", &self.dir, e))?.file_name();
            let Some(name) = file_name.to_str().and_then(|f| f.strip_suffix(suffix.as_str())) else {
                continue;
            };
            if validate_name(name).is_ok() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Player names become file names, so anything path-like is refused.
fn validate_name(name: &str) -> PlayerResult<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(PlayerError::InvalidName(name.to_string()))
    }
}

fn io_error(action: &str, path: &Path, err: std::io::Error) -> PlayerError {
    PlayerError::Store(format!("{action} {}: {err}", path.display()))
}
