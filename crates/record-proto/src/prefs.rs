//! Persisted user preferences: the ordered favorites list and the volume.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_VOLUME: u8 = 80;
pub const MAX_VOLUME: u8 = 100;

/// What the browser needs from the preference layer.
pub trait PreferenceStore {
    fn is_favorite(&self, station_id: i64) -> bool;

    /// Add the station to the end of the favorites list, or remove it if it
    /// is already there. Persists immediately.
    fn toggle_favorite(&mut self, station_id: i64);

    /// Favorites in the order they were added.
    fn favorites(&self) -> &[i64];

    fn volume(&self) -> u8;

    fn set_volume(&mut self, volume: i32);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    favorites: Vec<i64>,
    #[serde(default = "default_volume")]
    volume: u8,
    #[serde(skip)]
    path: Option<PathBuf>,
    #[serde(skip)]
    save_error: Option<String>,
}

fn default_volume() -> u8 {
    DEFAULT_VOLUME
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            favorites: Vec::new(),
            volume: DEFAULT_VOLUME,
            path: None,
            save_error: None,
        }
    }
}

impl Preferences {
    /// Preferences that are never written to disk.
    pub fn in_memory(favorites: Vec<i64>) -> Self {
        Self {
            favorites,
            ..Self::default()
        }
    }

    /// Load from `path`. A missing or unreadable file yields defaults bound
    /// to the same path, so the first save creates it.
    pub fn load(path: &Path) -> Self {
        let mut prefs = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Preferences>(&content) {
                Ok(p) => p,
                Err(e) => {
                    warn!("preferences: ignoring unreadable {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                debug!("preferences: no file at {}, using defaults", path.display());
                Self::default()
            }
        };
        prefs.volume = prefs.volume.min(MAX_VOLUME);
        prefs.path = Some(path.to_path_buf());
        prefs
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The last failed background save, cleared on read.
    pub fn take_save_error(&mut self) -> Option<String> {
        self.save_error.take()
    }
}

impl PreferenceStore for Preferences {
    fn is_favorite(&self, station_id: i64) -> bool {
        self.favorites.contains(&station_id)
    }

    fn toggle_favorite(&mut self, station_id: i64) {
        if self.is_favorite(station_id) {
            self.favorites.retain(|&id| id != station_id);
        } else {
            self.favorites.push(station_id);
        }
        if let Err(e) = self.save() {
            warn!("preferences: failed to save favorites: {:#}", e);
            self.save_error = Some(format!("{:#}", e));
        }
    }

    fn favorites(&self) -> &[i64] {
        &self.favorites
    }

    fn volume(&self) -> u8 {
        self.volume
    }

    fn set_volume(&mut self, volume: i32) {
        self.volume = volume.clamp(0, MAX_VOLUME as i32) as u8;
    }
}
