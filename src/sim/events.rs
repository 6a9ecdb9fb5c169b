//! Notifications from the simulation to the surrounding UI

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

/// Something the UI may want to reflect (HUD, vibration, high score)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u32),
    /// Lives were set outright (restart)
    LifeChanged(u8),
    LifeLost(u8),
    LifeGained(u8),
    GameOver { final_score: u32 },
}

/// Receives session events synchronously on the loop thread.
///
/// Every method defaults to a no-op so listeners only implement what they
/// care about. Implementations that touch UI state must hand the event over
/// to their own thread.
pub trait SessionListener: Send {
    fn on_score_changed(&mut self, _score: u32) {}

    fn on_life_changed(&mut self, _lives: u8) {}

    fn on_life_lost(&mut self, _lives: u8) {}

    fn on_life_gained(&mut self, _lives: u8) {}

    fn on_game_over(&mut self, _final_score: u32) {}

    /// Route an event to the matching callback
    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::ScoreChanged(score) => self.on_score_changed(score),
            GameEvent::LifeChanged(lives) => self.on_life_changed(lives),
            GameEvent::LifeLost(lives) => self.on_life_lost(lives),
            GameEvent::LifeGained(lives) => self.on_life_gained(lives),
            GameEvent::GameOver { final_score } => self.on_game_over(final_score),
        }
    }
}

/// Forward everything over a channel; the receiving side marshals it.
///
/// A hung-up receiver is not an error for the simulation.
impl SessionListener for Sender<GameEvent> {
    fn dispatch(&mut self, event: GameEvent) {
        let _ = self.send(event);
    }
}
