//! Shared entity state and the uniform update interface

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Kinematic state every entity carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner (pixels)
    pub pos: Vec2,
    /// Width and height (pixels)
    pub size: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    /// Inactive entities are skipped by collision and dropped by the tick
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            active: true,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Straight-line motion for one frame
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Capability set shared by ships, asteroids, bonuses and particles.
///
/// Drawing lives on the renderer side (`renderer::Draw`) so the simulation
/// stays free of presentation types.
pub trait Entity {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// Advance by `dt` seconds. `dt` is already clamped to be non-negative.
    fn update(&mut self, dt: f32);

    fn bounds(&self) -> Aabb {
        self.body().bounds()
    }

    fn is_active(&self) -> bool {
        self.body().active
    }

    /// Bounding boxes overlap and both entities are still active
    fn intersects(&self, other: &dyn Entity) -> bool {
        self.is_active() && other.is_active() && self.bounds().intersects(&other.bounds())
    }

    fn is_off_screen(&self, screen_width: f32, screen_height: f32) -> bool {
        self.bounds().is_outside_screen(screen_width, screen_height)
    }
}

/// Clamp a frame delta: negative or non-finite deltas never move anything
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 { dt } else { 0.0 }
}
