//! Best-score persistence
//!
//! The best score lives under a namespaced key in a flat JSON preference
//! file. Other keys in the file are preserved on save.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::Result;

/// Preference key for the best score
pub const HIGH_SCORE_KEY: &str = "space_explorer.high_score";

/// Best score seen so far, bound to its preference file
#[derive(Debug, Clone)]
pub struct HighScores {
    path: PathBuf,
    best: u32,
}

impl HighScores {
    /// Open the preference file at `path`. A missing file means no score yet.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let prefs = read_prefs(&path)?;
        let best = prefs
            .get(HIGH_SCORE_KEY)
            .and_then(Value::as_u64)
            .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
            .unwrap_or(0);
        log::info!("Loaded high score {}", best);
        Ok(Self { path, best })
    }

    /// Like `load`, but an unreadable file starts from zero
    pub fn load_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::load(path.clone()).unwrap_or_else(|e| {
            log::warn!("Ignoring preferences at {}: {}", path.display(), e);
            Self { path, best: 0 }
        })
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if a score beats the stored best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Take `score` as the new best if it qualifies. Returns whether it did.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Write the best score back, keeping unrelated preferences
    pub fn save(&self) -> Result<()> {
        let mut prefs = read_prefs(&self.path)?;
        prefs.insert(HIGH_SCORE_KEY.to_owned(), Value::from(self.best));
        fs::write(&self.path, serde_json::to_string_pretty(&prefs)?)?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}

fn read_prefs(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let json = fs::read_to_string(path)?;
    if json.trim().is_empty() {
        return Ok(Map::new());
    }
    Ok(serde_json::from_str(&json)?)
}
