//! Game settings and preferences
//!
//! Stored as a JSON file next to the preference store. Missing fields fall
//! back to their defaults so older files keep loading.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_STAR_COUNT;
use crate::error::Result;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Loop ===
    /// Frame rate cap; 0 runs unthrottled
    pub target_fps: u32,
    /// Upper clamp on the measured frame delta, in seconds
    pub max_frame_dt: f32,
    /// Fixed RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,

    // === Visual Effects ===
    /// Background stars per screen
    pub star_count: usize,
    /// Draw the starfield
    pub starfield: bool,
    /// Ship exhaust trail
    pub trails: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_frame_dt: 0.1,
            seed: None,

            star_count: DEFAULT_STAR_COUNT,
            starfield: true,
            trails: true,
        }
    }
}

impl Settings {
    /// Time budget for one frame, if capped
    pub fn frame_budget(&self) -> Option<Duration> {
        (self.target_fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(self.target_fps)))
    }

    /// Delta clamp that is always usable
    pub fn effective_max_frame_dt(&self) -> f32 {
        if self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0 {
            self.max_frame_dt
        } else {
            Self::default().max_frame_dt
        }
    }

    /// Read settings from `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Read settings from `path`, or use defaults if it is missing or unreadable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Ignoring settings at {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Write settings to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
