//! CPU-side rendering
//!
//! The renderer turns a `GameState` into a `Frame`: a triangle list in screen
//! pixels plus the HUD numbers and the overlay caption. Presenting the frame
//! is up to a `DrawSurface`.

pub mod draw;
pub mod raster;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use draw::Draw;
pub use raster::Canvas;
pub use surface::{DrawSurface, MemorySurface, SurfaceError};
pub use vertex::Vertex;

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};
use vertex::colors;

/// Numbers shown on top of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub score: u32,
    pub lives: u8,
}

/// Caption drawn over the dimmed playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Paused,
    GameOver { final_score: u32 },
}

impl Overlay {
    pub fn title(&self) -> &'static str {
        match self {
            Overlay::Paused => "PAUSED",
            Overlay::GameOver { .. } => "GAME OVER",
        }
    }
}

/// One rendered frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Screen size in pixels
    pub size: Vec2,
    /// Triangle list, back to front, straight alpha
    pub vertices: Vec<Vertex>,
    pub hud: Hud,
    pub overlay: Option<Overlay>,
}

impl Frame {
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Vertex data as raw bytes, the way a buffer upload takes it
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Builds frames from game state
#[derive(Debug, Clone)]
pub struct Renderer {
    trails: bool,
    starfield: bool,
    /// Vertex count of the previous frame, used to size the next buffer
    last_len: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            trails: true,
            starfield: true,
            last_len: 0,
        }
    }
}

impl Renderer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            trails: settings.trails,
            starfield: settings.starfield,
            ..Self::default()
        }
    }

    pub fn render(&mut self, state: &GameState) -> Frame {
        let mut out = Vec::with_capacity(self.last_len);
        let screen = state.screen;

        // Background
        shapes::vertical_gradient(
            &mut out,
            Vec2::ZERO,
            screen,
            colors::BACKGROUND_EDGE,
            colors::BACKGROUND_MID,
            colors::BACKGROUND_EDGE,
        );

        if self.starfield {
            for star in &state.stars {
                star.draw(&mut out);
            }
        }

        if self.trails {
            state.ship.draw(&mut out);
        } else {
            draw::ship_hull(&state.ship, &mut out);
        }

        for asteroid in &state.asteroids {
            asteroid.draw(&mut out);
        }
        for bonus in &state.bonuses {
            bonus.draw(&mut out);
        }
        for explosion in &state.explosions {
            explosion.draw(&mut out);
        }

        let overlay = match state.phase {
            GamePhase::Playing => None,
            GamePhase::Paused => Some(Overlay::Paused),
            GamePhase::GameOver => Some(Overlay::GameOver {
                final_score: state.score,
            }),
        };
        if overlay.is_some() {
            shapes::rect(&mut out, Vec2::ZERO, screen, colors::OVERLAY_DIM);
        }

        self.last_len = out.len();
        Frame {
            size: screen,
            vertices: out,
            hud: Hud {
                score: state.score,
                lives: state.lives,
            },
            overlay,
        }
    }
}
