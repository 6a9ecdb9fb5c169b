//! Axis-aligned bounding box collision
//!
//! Every entity collides as a rectangle built from its position (top-left
//! corner) and size. Screen coordinates: x grows right, y grows down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle `[min.x, max.x] × [min.y, max.y]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build from a top-left corner and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// True iff the two boxes share a region of non-zero area.
    ///
    /// Edges that only touch do not count as overlapping.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// True when the box lies entirely past one of the screen edges.
    ///
    /// Each edge is tested on its own and the results OR'd together. A box
    /// whose edge sits exactly on a screen edge is still on screen.
    pub fn is_outside_screen(&self, screen_width: f32, screen_height: f32) -> bool {
        self.max.x < 0.0
            || self.min.x > screen_width
            || self.max.y < 0.0
            || self.min.y > screen_height
    }
}
