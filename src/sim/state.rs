//! Game state and session-level types
//!
//! Everything a frame reads or writes lives in `GameState`; the loop thread
//! owns it outright and the renderer only ever borrows it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::bonus::Bonus;
use super::particles::{Explosion, Star, generate_stars};
use super::ship::Ship;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen by request, shown with an overlay
    Paused,
    /// Lives ran out
    GameOver,
}

/// Accumulators for spawning and difficulty (seconds)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub asteroid: f32,
    pub bonus: f32,
    /// Total time survived in this run
    pub difficulty: f32,
}

impl SpawnTimers {
    /// Seconds between asteroids; shrinks with time, floored at half a second
    pub fn asteroid_interval(&self) -> f32 {
        (ASTEROID_BASE_INTERVAL - self.difficulty * ASTEROID_INTERVAL_DECAY)
            .max(ASTEROID_MIN_INTERVAL)
    }

    /// Multiplier derived from survival time. Only scales passive score.
    pub fn speed_multiplier(&self) -> f32 {
        1.0 + self.difficulty * SPEED_GROWTH
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    /// 0..=MAX_LIVES
    pub lives: u8,
    /// Screen size in pixels; zero until the surface reports a size
    pub screen: Vec2,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub bonuses: Vec<Bonus>,
    pub explosions: Vec<Explosion>,
    /// Decorative background
    pub stars: Vec<Star>,
    pub timers: SpawnTimers,
    pub speed_multiplier: f32,
    /// Stars to scatter on every resize
    pub star_count: usize,
    /// Frames simulated while playing
    pub frame: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed and screen size
    pub fn new(seed: u64, screen: Vec2) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Playing,
            score: 0,
            lives: MAX_LIVES,
            screen: Vec2::ZERO,
            ship: Ship::default(),
            asteroids: Vec::new(),
            bonuses: Vec::new(),
            explosions: Vec::new(),
            stars: Vec::new(),
            timers: SpawnTimers::default(),
            speed_multiplier: 1.0,
            star_count: DEFAULT_STAR_COUNT,
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.resize(screen);
        state
    }

    /// Use a different starfield density (takes effect immediately)
    pub fn with_star_count(mut self, count: usize) -> Self {
        self.star_count = count;
        self.stars = generate_stars(&mut self.rng, self.screen, count);
        self
    }

    /// True once the screen has a usable size
    pub fn has_screen(&self) -> bool {
        self.screen.x > 0.0 && self.screen.y > 0.0
    }

    /// Apply a new screen size: recenter the ship and rescatter the stars
    pub fn resize(&mut self, screen: Vec2) {
        self.screen = screen.max(Vec2::ZERO);
        self.ship.place_at_start(self.screen);
        self.stars = generate_stars(&mut self.rng, self.screen, self.star_count);
    }

    /// Back to a fresh run on the same screen
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = MAX_LIVES;
        self.timers = SpawnTimers::default();
        self.speed_multiplier = 1.0;
        self.frame = 0;
        self.asteroids.clear();
        self.bonuses.clear();
        self.explosions.clear();
        self.ship.clear_trail();
        self.ship.place_at_start(self.screen);
    }

    /// Entities on screen, for diagnostics
    pub fn entity_count(&self) -> usize {
        self.asteroids.len() + self.bonuses.len() + self.explosions.len()
    }

    /// Direct RNG access (spawning helpers, tests)
    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}
