//! Pointer state shared between the input context and the loop thread
//!
//! The UI writes the latest pointer position and press state whenever an
//! event arrives; the loop thread samples it once at the start of a frame.

use std::sync::{Arc, Mutex, PoisonError};

use crate::sim::TickInput;

/// Last known pointer state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Horizontal position in screen pixels
    pub x: f32,
    pub pressed: bool,
}

impl From<PointerState> for TickInput {
    fn from(pointer: PointerState) -> Self {
        TickInput {
            pointer_x: pointer.pressed.then_some(pointer.x),
        }
    }
}

/// Cloneable handle to the shared pointer state
#[derive(Debug, Clone, Default)]
pub struct InputHandle {
    shared: Arc<Mutex<PointerState>>,
}

impl InputHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down at `x`
    pub fn press(&self, x: f32) {
        self.with(|p| {
            p.x = x;
            p.pressed = true;
        });
    }

    /// Pointer moved; the press state is unchanged
    pub fn move_to(&self, x: f32) {
        self.with(|p| p.x = x);
    }

    /// Pointer went up
    pub fn release(&self) {
        self.with(|p| p.pressed = false);
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> PointerState {
        *self.lock()
    }

    fn with(&self, f: impl FnOnce(&mut PointerState)) {
        f(&mut self.lock());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PointerState> {
        // A writer can't leave the plain-data struct half-updated
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
