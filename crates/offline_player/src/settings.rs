//! RON settings for the snapshot store and player resolution.
//!
//! A settings file is a RON map from section name to section body. Keys that a
//! file leaves out keep their defaults, and a missing file means all defaults:
//!
//! ```ron
//! {
//!     "snapshots": {
//!         "store_dir": "world/offline_players",
//!         "fallback_to_proxy": false,
//!     },
//! }
//! ```

use std::{collections::HashMap, fs, io::ErrorKind, path::Path, path::PathBuf};

use ron::value::{Map as RonMap, Value as RonValue};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{PlayerError, PlayerResult};

/// A section of the settings file.
pub trait Settings: Default + Serialize + DeserializeOwned {
    const SECTION: &'static str;

    /// Reads this section from RON text, filling in defaults for missing keys.
    fn from_ron_str(text: &str) -> PlayerResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut sections: HashMap<String, RonValue> =
            ron::from_str(text).map_err(|e| settings_error(Self::SECTION, e))?;
        let Some(delta) = sections.remove(Self::SECTION) else {
            return Ok(Self::default());
        };

        let defaults = to_ron_value(&Self::default())?;
        let merged = match (defaults, delta) {
            (RonValue::Map(defaults), RonValue::Map(delta)) => RonValue::Map(merge_maps(&defaults, &delta)),
            (_, other) => other,
        };
        merged
            .into_rust()
            .map_err(|e| settings_error(Self::SECTION, e))
    }

    /// Reads this section from a file; a file that does not exist yields defaults.
    fn load(path: &Path) -> PlayerResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_ron_str(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(PlayerError::Store(format!(
                "read settings {}: {e}",
                path.display()
            ))),
        }
    }
}

fn settings_error(section: &str, err: impl std::fmt::Display) -> PlayerError {
    PlayerError::DeserializeStructureFailed(format!("settings section `{section}`: {err}"))
}

fn to_ron_value<T: Serialize>(value: &T) -> PlayerResult<RonValue> {
    let text = ron::to_string(value).map_err(|e| PlayerError::SerializeStructureFailed(e.to_string()))?;
    ron::from_str(&text).map_err(|e| PlayerError::SerializeStructureFailed(e.to_string()))
}

/// Merge default + delta recursively (maps only).
fn merge_maps(default: &RonMap, delta: &RonMap) -> RonMap {
    let mut merged = default.clone();
    for (key, delta_value) in delta.iter() {
        let value = match (merged.get(key), delta_value) {
            (Some(RonValue::Map(default_map)), RonValue::Map(delta_map)) => {
                RonValue::Map(merge_maps(default_map, delta_map))
            }
            _ => delta_value.clone(),
        };
        merged.insert(key.clone(), value);
    }
    merged
}

/// Where snapshots are stored and how players are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSettings {
    /// Directory holding one encoded snapshot per player.
    pub store_dir: PathBuf,
    /// File extension of stored snapshots, without the dot.
    pub file_extension: String,
    /// Answer from the snapshot's proxy when the live player lookup fails.
    pub fallback_to_proxy: bool,
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("offline_players"),
            file_extension: "dat".into(),
            fallback_to_proxy: true,
        }
    }
}

impl Settings for SnapshotSettings {
    const SECTION: &'static str = "snapshots";
}
