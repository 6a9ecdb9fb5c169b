//! The player's ship

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use super::particles::{Particle, TRAIL_COLOR};
use super::random_in;
use crate::consts::*;

/// Steering decision for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
    Stop,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    /// Exhaust particles, oldest first
    pub trail: Vec<Particle>,
    trail_timer: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            body: Body::new(Vec2::ZERO, Vec2::new(SHIP_WIDTH, SHIP_HEIGHT)),
            trail: Vec::new(),
            trail_timer: 0.0,
        }
    }
}

impl Ship {
    /// Park the ship at bottom-center of the screen
    pub fn place_at_start(&mut self, screen: Vec2) {
        self.body.pos = Vec2::new(
            (screen.x - self.body.size.x) / 2.0,
            screen.y - self.body.size.y - SHIP_BOTTOM_MARGIN,
        );
        self.body.vel = Vec2::ZERO;
    }

    /// Decide which way to go for a pointer held at `pointer_x`
    pub fn steer_toward(&self, pointer_x: f32) -> Steer {
        let center = self.body.center().x;
        if pointer_x < center - STEER_DEAD_ZONE {
            Steer::Left
        } else if pointer_x > center + STEER_DEAD_ZONE {
            Steer::Right
        } else {
            Steer::Stop
        }
    }

    /// Set horizontal velocity. No inertia: stopping is instantaneous.
    pub fn steer(&mut self, steer: Steer) {
        self.body.vel.x = match steer {
            Steer::Left => -SHIP_SPEED,
            Steer::Right => SHIP_SPEED,
            Steer::Stop => 0.0,
        };
    }

    /// Keep the hull inside `[0, screen_width - width]`
    pub fn clamp_to_screen(&mut self, screen_width: f32) {
        let max_x = (screen_width - self.body.size.x).max(0.0);
        self.body.pos.x = self.body.pos.x.clamp(0.0, max_x);
    }

    /// Advance the exhaust: emit on the timer, age and drop faded particles
    pub fn update_trail(&mut self, dt: f32, rng: &mut impl Rng) {
        self.trail_timer += dt;
        if self.trail_timer > TRAIL_INTERVAL {
            let origin = Vec2::new(
                self.body.pos.x
                    + self.body.size.x / 2.0
                    + random_in(rng, -TRAIL_SPREAD, TRAIL_SPREAD),
                self.body.pos.y + self.body.size.y,
            );
            let radius = random_in(rng, 2.0, 8.0);
            self.trail.push(Particle::new(
                origin,
                Vec2::new(0.0, TRAIL_FALL_SPEED),
                radius,
                TRAIL_FADE_RATE,
                TRAIL_COLOR,
            ));
            self.trail_timer = 0.0;
        }

        self.trail.retain_mut(|p| {
            p.update(dt);
            p.is_active()
        });
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
        self.trail_timer = 0.0;
    }
}

impl Entity for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
    }
}
