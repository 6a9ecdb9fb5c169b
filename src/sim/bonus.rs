//! Collectible bonuses

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use super::random_in;
use crate::consts::*;
use crate::rgb;

/// Bonus types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    /// Yellow star, +100 score
    Score,
    /// Red heart, +1 life
    Life,
    /// Cyan shield, +50 score
    Shield,
}

impl BonusKind {
    pub const ALL: [BonusKind; 3] = [BonusKind::Score, BonusKind::Life, BonusKind::Shield];

    /// Reward handed out on collection (points, or lives for `Life`)
    pub fn value(self) -> u32 {
        match self {
            BonusKind::Score => 100,
            BonusKind::Life => 1,
            BonusKind::Shield => 50,
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            BonusKind::Score => rgb(0xFDE047, 1.0),
            BonusKind::Life => rgb(0xEF4444, 1.0),
            BonusKind::Shield => rgb(0x06B6D4, 1.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub body: Body,
    pub kind: BonusKind,
    /// Drives the visual pulse only
    pub pulse_phase: f32,
    collected: bool,
}

impl Bonus {
    pub fn new(pos: Vec2, kind: BonusKind, drift: f32) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(BONUS_SIZE))
                .with_velocity(Vec2::new(drift, BONUS_FALL_SPEED)),
            kind,
            pulse_phase: 0.0,
            collected: false,
        }
    }

    /// Spawn just above the top edge at a random column
    pub fn spawn(rng: &mut impl Rng, screen_width: f32) -> Self {
        let x = rng.random::<f32>() * (screen_width - BONUS_SIZE).max(0.0);
        let drift = random_in(rng, -BONUS_MAX_DRIFT, BONUS_MAX_DRIFT);
        let kind = BonusKind::ALL[rng.random_range(0..BonusKind::ALL.len())];
        Self::new(Vec2::new(x, -BONUS_SIZE), kind, drift)
    }

    /// Visual scale factor in [0.8, 1.2]
    pub fn pulse_scale(&self) -> f32 {
        1.0 + self.pulse_phase.sin() * 0.2
    }

    /// Take the reward. Only the first call pays out; later calls return 0.
    pub fn collect(&mut self) -> u32 {
        if self.collected {
            return 0;
        }
        self.collected = true;
        self.body.active = false;
        self.kind.value()
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }
}

impl Entity for Bonus {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
        self.pulse_phase += dt * BONUS_PULSE_RATE;
    }
}
