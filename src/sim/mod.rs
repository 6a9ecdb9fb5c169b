//! Simulation module
//!
//! All gameplay logic lives here:
//! - Variable timestep, driven by the caller's measured frame delta
//! - Seeded RNG owned by the game state
//! - Predicate-based removal only (no index juggling mid-iteration)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod bonus;
pub mod collision;
pub mod entity;
pub mod events;
pub mod particles;
pub mod session;
pub mod ship;
pub mod state;
pub mod tick;

pub use asteroid::Asteroid;
pub use bonus::{Bonus, BonusKind};
pub use collision::Aabb;
pub use entity::{Body, Entity, sanitize_dt};
pub use events::{GameEvent, SessionListener};
pub use particles::{Explosion, ExplosionKind, Particle, Star};
pub use session::Session;
pub use ship::{Ship, Steer};
pub use state::{GamePhase, GameState, SpawnTimers};
pub use tick::{TickInput, tick};

use rand::Rng;

/// Uniform sample in `[min, max)`; degenerate ranges return `min`
#[inline]
pub(crate) fn random_in(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}
