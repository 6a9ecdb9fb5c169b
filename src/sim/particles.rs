//! Visual particle effects: ship trail, explosions and background stars
//!
//! None of these affect gameplay; they exist so the renderer has something
//! to draw. They still advance only while the session is playing.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use super::random_in;
use crate::consts::*;
use crate::rgb;

/// Orange burst when an asteroid hits the ship
pub const ASTEROID_EXPLOSION_COLOR: [f32; 4] = rgb(0xFFA500, 1.0);
/// Yellow burst when a bonus is collected
pub const BONUS_EXPLOSION_COLOR: [f32; 4] = rgb(0xFFFF00, 1.0);
/// Engine exhaust
pub const TRAIL_COLOR: [f32; 4] = rgb(0xFFA500, 1.0);

/// A single fading dot.
///
/// `body.pos` is the dot's center; `body.size` is left at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub body: Body,
    pub radius: f32,
    /// 0-255, may go negative before the owner discards the particle
    pub alpha: f32,
    /// Alpha lost per second
    pub fade_rate: f32,
    /// RGB (alpha channel ignored, see `alpha`)
    pub color: [f32; 4],
}

impl Particle {
    pub fn new(center: Vec2, vel: Vec2, radius: f32, fade_rate: f32, color: [f32; 4]) -> Self {
        Self {
            body: Body::new(center, Vec2::ZERO).with_velocity(vel),
            radius,
            alpha: 255.0,
            fade_rate,
            color,
        }
    }

    /// Alpha clamped into 0-1 for drawing
    pub fn opacity(&self) -> f32 {
        (self.alpha / 255.0).clamp(0.0, 1.0)
    }
}

impl Entity for Particle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
        self.alpha -= self.fade_rate * dt;
        if self.alpha <= 0.0 {
            self.body.active = false;
        }
    }
}

/// Which event produced an explosion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    Asteroid,
    Bonus,
}

impl ExplosionKind {
    pub fn particle_count(self) -> usize {
        match self {
            ExplosionKind::Asteroid => ASTEROID_EXPLOSION_PARTICLES,
            ExplosionKind::Bonus => BONUS_EXPLOSION_PARTICLES,
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            ExplosionKind::Asteroid => ASTEROID_EXPLOSION_COLOR,
            ExplosionKind::Bonus => BONUS_EXPLOSION_COLOR,
        }
    }
}

/// A burst of particles with a fixed lifetime.
///
/// The burst is retired when its timer passes `EXPLOSION_DURATION`, whether
/// or not its particles have finished fading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub origin: Vec2,
    pub kind: ExplosionKind,
    pub timer: f32,
    pub active: bool,
    pub particles: Vec<Particle>,
}

impl Explosion {
    pub fn new(origin: Vec2, kind: ExplosionKind, rng: &mut impl Rng) -> Self {
        let particles = (0..kind.particle_count())
            .map(|_| {
                let vel = Vec2::new(
                    random_in(rng, -EXPLOSION_MAX_SPEED, EXPLOSION_MAX_SPEED),
                    random_in(rng, -EXPLOSION_MAX_SPEED, EXPLOSION_MAX_SPEED),
                );
                let radius = random_in(rng, 2.0, 8.0);
                Particle::new(origin, vel, radius, EXPLOSION_FADE_RATE, kind.color())
            })
            .collect();

        Self {
            origin,
            kind,
            timer: 0.0,
            active: true,
            particles,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer > EXPLOSION_DURATION {
            self.active = false;
            return;
        }
        for particle in &mut self.particles {
            particle.update(dt);
        }
    }
}

/// Scrolling background star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Twinkle phase, 0-1
    pub alpha: f32,
}

impl Star {
    /// Scatter a star anywhere on screen
    pub fn random(rng: &mut impl Rng, screen: Vec2) -> Self {
        Self {
            pos: Vec2::new(rng.random::<f32>() * screen.x, rng.random::<f32>() * screen.y),
            radius: random_in(rng, 1.0, 4.0),
            speed: random_in(rng, 25.0, 75.0),
            alpha: rng.random::<f32>(),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
        self.alpha = (self.alpha + dt * STAR_TWINKLE_RATE) % 1.0;
    }

    /// Send a star that fell off the bottom back to the top
    pub fn wrap(&mut self, rng: &mut impl Rng, screen: Vec2) {
        if self.pos.y > screen.y {
            self.pos.y = STAR_RESPAWN_Y;
            self.pos.x = rng.random::<f32>() * screen.x;
        }
    }
}

/// Build a starfield for the given screen
pub fn generate_stars(rng: &mut impl Rng, screen: Vec2, count: usize) -> Vec<Star> {
    (0..count).map(|_| Star::random(rng, screen)).collect()
}
