//! Game settings and preferences
//!
//! Persisted as JSON next to the binary, separately from any level data.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ui::MenuAction;

/// Window resolutions offered in the settings menu
pub const RESOLUTIONS: [(u32, u32); 3] = [(1920, 1080), (1280, 720), (800, 600)];

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window size in pixels
    pub resolution: (u32, u32),

    // === Audio ===
    /// Master volume (0 - 100)
    pub master_volume: f32,
    /// Music volume (0 - 100)
    pub music_volume: f32,

    // === HUD ===
    /// Draw collision boxes and hook geometry
    pub show_debug_overlay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: RESOLUTIONS[0],
            master_volume: 50.0,
            music_volume: 50.0,
            show_debug_overlay: false,
        }
    }
}

impl Settings {
    /// Index of the current resolution in `RESOLUTIONS`; a custom size reads
    /// as the first entry
    pub fn resolution_index(&self) -> usize {
        RESOLUTIONS
            .iter()
            .position(|r| *r == self.resolution)
            .unwrap_or(0)
    }

    pub fn set_resolution_index(&mut self, index: usize) {
        match RESOLUTIONS.get(index) {
            Some(res) => self.resolution = *res,
            None => log::warn!("Resolution index {index} out of range, keeping {:?}", self.resolution),
        }
    }

    /// Fold a menu change into the settings. Returns true if anything changed.
    pub fn apply(&mut self, action: &MenuAction) -> bool {
        match *action {
            MenuAction::VolumeChanged(volume) => {
                self.music_volume = volume.clamp(0.0, 100.0);
                true
            }
            MenuAction::ResolutionChanged(index) => {
                let before = self.resolution;
                self.set_resolution_index(index);
                before != self.resolution
            }
            MenuAction::Play | MenuAction::OpenSettings | MenuAction::Exit | MenuAction::Back => false,
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read settings {}: {e}", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Self>(&json) {
            Ok(mut settings) => {
                settings.master_volume = settings.master_volume.clamp(0.0, 100.0);
                settings.music_volume = settings.music_volume.clamp(0.0, 100.0);
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Settings file {} is invalid ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
