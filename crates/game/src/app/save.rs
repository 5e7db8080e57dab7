//! JSON save file. Sections and fields that are missing fall back to
//! defaults so older or hand-edited saves still load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::{player_spawn, DEFAULT_SPEED_INDEX, SAVE_FILE};
use super::player::Inventory;
use super::settings::Settings;

pub(crate) const SAVE_VERSION: u32 = 1;

pub(crate) type SaveResult<T> = Result<T, SaveError>;

#[derive(Debug, Error)]
pub(crate) enum SaveError {
    #[error("create save dir '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write save '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read save '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("encode save json: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("parse save json{}: {source}", format_json_path(.path))]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported save_version {found} (expected {expected})")]
    UnsupportedVersion { expected: u32, found: u32 },
}

fn format_json_path(path: &str) -> String {
    if path.is_empty() || path == "." {
        String::new()
    } else {
        format!(" at {path}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SaveGame {
    pub save_version: u32,
    pub player: SavedPlayer,
    pub worlds: SavedWorlds,
    pub current_biome: String,
    pub portals: SavedPortals,
    pub settings: Settings,
    pub day_time: f32,
}

impl Default for SaveGame {
    fn default() -> Self {
        Self {
            save_version: SAVE_VERSION,
            player: SavedPlayer::default(),
            worlds: SavedWorlds::default(),
            current_biome: "desert".to_string(),
            portals: SavedPortals::default(),
            settings: Settings::default(),
            day_time: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SavedPlayer {
    pub pos: [f32; 2],
    pub speed_index: usize,
    pub inventory: Inventory,
}

impl Default for SavedPlayer {
    fn default() -> Self {
        let spawn = player_spawn();
        Self {
            pos: [spawn.x, spawn.y],
            speed_index: DEFAULT_SPEED_INDEX,
            inventory: Inventory::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SavedWorlds {
    pub desert: Option<SavedWorld>,
    pub forest: Option<SavedWorld>,
}

/// Only the seed, biome and remaining pickups are stored; background and
/// rocks are regenerated from `(seed, biome)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SavedWorld {
    pub seed: Option<u64>,
    pub biome: Option<String>,
    pub pickups: Vec<SavedPickup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SavedPickup {
    #[serde(rename = "type")]
    pub kind: String,
    pub pos: [f32; 2],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SavedPortals {
    #[serde(rename = "true")]
    pub true_portal: Option<[f32; 2]>,
    pub fake: Option<[f32; 2]>,
}

pub(crate) fn save_file_path(save_dir: &Path) -> PathBuf {
    save_dir.join(SAVE_FILE)
}

pub(crate) fn write_save(path: &Path, save: &SaveGame) -> SaveResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SaveError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(save).map_err(SaveError::Encode)?;
    fs::write(path, json).map_err(|source| SaveError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read_save(path: &Path) -> SaveResult<SaveGame> {
    let raw = fs::read_to_string(path).map_err(|source| SaveError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let save = parse_save_json(&raw)?;
    if save.save_version != SAVE_VERSION {
        return Err(SaveError::UnsupportedVersion {
            expected: SAVE_VERSION,
            found: save.save_version,
        });
    }
    Ok(save)
}

pub(crate) fn parse_save_json(raw: &str) -> SaveResult<SaveGame> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, SaveGame>(&mut deserializer).map_err(|error| {
        let path = error.path().to_string();
        SaveError::Parse {
            path,
            source: error.into_inner(),
        }
    })
}
