//! Game session: state machine, control surface and listener dispatch

use glam::Vec2;

use super::events::{GameEvent, SessionListener};
use super::state::{GamePhase, GameState};
use super::tick::{TickInput, tick};
use crate::consts::MAX_LIVES;

/// One run of the game plus whoever listens to it.
///
/// The session is moved onto the loop thread and mutated only there.
pub struct Session {
    state: GameState,
    listener: Option<Box<dyn SessionListener>>,
    /// Scratch buffer reused across frames
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(state: GameState, listener: Option<Box<dyn SessionListener>>) -> Self {
        Self {
            state,
            listener,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Advance one frame and notify the listener of what happened
    pub fn update(&mut self, dt: f32, input: &TickInput) {
        tick(&mut self.state, input, dt, &mut self.events);
        self.flush_events();
    }

    /// Playing -> Paused. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        self.state.phase = GamePhase::Paused;
        log::debug!("Session paused");
        true
    }

    /// Paused -> Playing. Returns whether the phase changed.
    pub fn resume(&mut self) -> bool {
        if self.state.phase != GamePhase::Paused {
            return false;
        }
        self.state.phase = GamePhase::Playing;
        log::debug!("Session resumed");
        true
    }

    /// Start a fresh run from any phase
    pub fn restart(&mut self) {
        self.state.reset();
        log::info!("Session restarted");
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::LifeChanged(MAX_LIVES));
        self.flush_events();
    }

    /// New surface size in pixels
    pub fn resize(&mut self, width: f32, height: f32) {
        let screen = Vec2::new(width, height);
        if screen == self.state.screen {
            return;
        }
        log::debug!("Screen resized to {}x{}", width, height);
        self.state.resize(screen);
    }

    fn flush_events(&mut self) {
        match self.listener.as_mut() {
            Some(listener) => {
                for event in self.events.drain(..) {
                    listener.dispatch(event);
                }
            }
            None => self.events.clear(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.state.phase)
            .field("score", &self.state.score)
            .field("lives", &self.state.lives)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}
