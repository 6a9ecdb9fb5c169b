//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (screen pixels) and straight-alpha color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::rgb;

    /// Vertical background gradient: dark, deep blue, dark
    pub const BACKGROUND_EDGE: [f32; 4] = rgb(0x0D1421, 1.0);
    pub const BACKGROUND_MID: [f32; 4] = rgb(0x1E3A8A, 1.0);
    pub const STAR: [f32; 4] = rgb(0xFFFFFF, 1.0);
    pub const SHIP_HULL: [f32; 4] = rgb(0x7C3AED, 1.0);
    pub const SHIP_COCKPIT: [f32; 4] = rgb(0x06B6D4, 1.0);
    pub const SHIP_ENGINE: [f32; 4] = rgb(0xEF4444, 1.0);
    /// White at alpha 100/255
    pub const ASTEROID_OUTLINE: [f32; 4] = rgb(0xFFFFFF, 100.0 / 255.0);
    /// Black at alpha 150/255
    pub const OVERLAY_DIM: [f32; 4] = rgb(0x000000, 150.0 / 255.0);
}

/// Same color with a different alpha
#[inline]
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}
