//! Space Explorer - a vertically scrolling asteroid-dodging arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, spawning, game session)
//! - `renderer`: Frame building and software rasterization
//! - `game_loop`: Background thread driving update + render
//! - `input`: Pointer state shared between input context and loop thread
//! - `settings`: Runtime configuration
//! - `highscores`: Front-end owned high score preference

pub mod error;
pub mod game_loop;
pub mod highscores;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use game_loop::{GameLoop, LoopCommand};
pub use highscores::HighScores;
pub use input::{InputHandle, PointerState};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Maximum (and starting) number of lives
    pub const MAX_LIVES: u8 = 3;

    /// Spaceship defaults
    pub const SHIP_WIDTH: f32 = 80.0;
    pub const SHIP_HEIGHT: f32 = 100.0;
    /// Gap between the ship's bottom edge and the bottom of the screen
    pub const SHIP_BOTTOM_MARGIN: f32 = 100.0;
    /// Horizontal speed while steering (pixels/s)
    pub const SHIP_SPEED: f32 = 500.0;
    /// Pointer must be this far from the ship center before it steers
    pub const STEER_DEAD_ZONE: f32 = 20.0;

    /// Trail particles
    pub const TRAIL_INTERVAL: f32 = 0.05;
    pub const TRAIL_FALL_SPEED: f32 = 200.0;
    pub const TRAIL_FADE_RATE: f32 = 400.0;
    pub const TRAIL_SPREAD: f32 = 10.0;

    /// Asteroid spawn ranges
    pub const ASTEROID_MIN_SIZE: f32 = 30.0;
    pub const ASTEROID_MAX_SIZE: f32 = 70.0;
    pub const ASTEROID_MIN_SPEED: f32 = 100.0;
    pub const ASTEROID_MAX_SPEED: f32 = 300.0;
    pub const ASTEROID_MAX_DRIFT: f32 = 50.0;
    /// Degrees per second
    pub const ASTEROID_MAX_SPIN: f32 = 90.0;
    pub const ASTEROID_MIN_VERTICES: usize = 6;
    pub const ASTEROID_MAX_VERTICES: usize = 10; // exclusive

    /// Bonus defaults
    pub const BONUS_SIZE: f32 = 40.0;
    pub const BONUS_FALL_SPEED: f32 = 150.0;
    pub const BONUS_MAX_DRIFT: f32 = 25.0;
    pub const BONUS_PULSE_RATE: f32 = 3.0;

    /// Explosions
    pub const EXPLOSION_DURATION: f32 = 0.5;
    pub const EXPLOSION_MAX_SPEED: f32 = 200.0;
    pub const EXPLOSION_FADE_RATE: f32 = 500.0;
    pub const ASTEROID_EXPLOSION_PARTICLES: usize = 15;
    pub const BONUS_EXPLOSION_PARTICLES: usize = 8;

    /// Spawn timing (seconds)
    pub const ASTEROID_BASE_INTERVAL: f32 = 2.0;
    pub const ASTEROID_INTERVAL_DECAY: f32 = 0.1;
    pub const ASTEROID_MIN_INTERVAL: f32 = 0.5;
    pub const BONUS_INTERVAL: f32 = 8.0;

    /// Difficulty and passive score
    pub const SPEED_GROWTH: f32 = 0.05;
    pub const PASSIVE_SCORE_RATE: f32 = 10.0;

    /// Background stars
    pub const DEFAULT_STAR_COUNT: usize = 100;
    pub const STAR_TWINKLE_RATE: f32 = 2.0;
    /// Wrapped stars re-enter here
    pub const STAR_RESPAWN_Y: f32 = -10.0;
}

/// Color from a `0xRRGGBB` literal with the given alpha (0-1)
#[inline]
pub const fn rgb(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}
