//! Falling asteroids

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use super::random_in;
use crate::consts::*;
use crate::rgb;

/// Asteroid body colors (greys and warm greys)
pub const ASTEROID_COLORS: [[f32; 4]; 4] = [
    rgb(0x6B7280, 1.0),
    rgb(0x78716C, 1.0),
    rgb(0xA8A29E, 1.0),
    rgb(0x57534E, 1.0),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Body,
    /// Diameter; the bounding box is `size × size`
    pub size: f32,
    /// Current rotation in degrees, unbounded
    pub rotation: f32,
    /// Degrees per second
    pub rotation_speed: f32,
    /// Outline relative to the asteroid center, before rotation
    pub outline: Vec<Vec2>,
    pub color: [f32; 4],
}

impl Asteroid {
    /// Build an asteroid with the given size and velocity and a random outline
    pub fn new(pos: Vec2, size: f32, vel: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(size)).with_velocity(vel),
            size,
            rotation: 0.0,
            rotation_speed: random_in(rng, -ASTEROID_MAX_SPIN, ASTEROID_MAX_SPIN),
            outline: generate_outline(size, rng),
            color: ASTEROID_COLORS[rng.random_range(0..ASTEROID_COLORS.len())],
        }
    }

    /// Spawn above the top edge at a random column.
    ///
    /// The asteroid starts with its bottom edge on the top of the screen so the
    /// off-screen sweep doesn't discard it before it has fallen into view.
    pub fn spawn(rng: &mut impl Rng, screen_width: f32) -> Self {
        let size = random_in(rng, ASTEROID_MIN_SIZE, ASTEROID_MAX_SIZE);
        let x = rng.random::<f32>() * screen_width;
        let vel = Vec2::new(
            random_in(rng, -ASTEROID_MAX_DRIFT, ASTEROID_MAX_DRIFT),
            random_in(rng, ASTEROID_MIN_SPEED, ASTEROID_MAX_SPEED),
        );
        Self::new(Vec2::new(x, -size), size, vel, rng)
    }

    /// Outline points rotated by the current rotation, relative to the center
    pub fn rotated_outline(&self) -> impl Iterator<Item = Vec2> + '_ {
        let rot = Vec2::from_angle(self.rotation.to_radians());
        self.outline.iter().map(move |p| rot.rotate(*p))
    }
}

impl Entity for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
        self.rotation += self.rotation_speed * dt;
    }
}

/// Lumpy polygon: evenly spaced angles, radius jittered to 70-100%
fn generate_outline(size: f32, rng: &mut impl Rng) -> Vec<Vec2> {
    let count = rng.random_range(ASTEROID_MIN_VERTICES..ASTEROID_MAX_VERTICES);
    (0..count)
        .map(|i| {
            let angle = (i as f32 * 360.0 / count as f32).to_radians();
            let radius = size / 2.0 * (0.7 + rng.random::<f32>() * 0.3);
            Vec2::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}
