//! Presentation targets
//!
//! The loop thread owns its surface and polls it for a size every frame. A
//! surface that reports no size (not created yet, or minimized) makes the
//! loop skip the frame entirely.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use super::Frame;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface is no longer available")]
    Lost,
    #[error("surface I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Somewhere frames can be shown
pub trait DrawSurface: Send {
    /// Current size in pixels, or `None` while there is nothing to draw on
    fn size(&self) -> Option<(u32, u32)>;

    fn present(&mut self, frame: &Frame) -> Result<(), SurfaceError>;
}

#[derive(Debug, Default)]
struct Recorded {
    size: Option<(u32, u32)>,
    presented: u64,
    bytes_uploaded: u64,
    last: Option<Frame>,
    lost: bool,
}

/// In-memory surface for headless runs and tests.
///
/// Clones share the same storage, so one clone can be handed to the loop
/// while another observes what was presented.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    inner: Arc<Mutex<Recorded>>,
}

impl MemorySurface {
    pub fn new(width: u32, height: u32) -> Self {
        let surface = Self::default();
        surface.set_size(Some((width, height)));
        surface
    }

    pub fn set_size(&self, size: Option<(u32, u32)>) {
        self.lock().size = size;
    }

    /// Make every following `present` fail with `SurfaceError::Lost`
    pub fn set_lost(&self, lost: bool) {
        self.lock().lost = lost;
    }

    pub fn frames_presented(&self) -> u64 {
        self.lock().presented
    }

    /// Total vertex bytes taken by successful presents
    pub fn bytes_uploaded(&self) -> u64 {
        self.lock().bytes_uploaded
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.lock().last.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DrawSurface for MemorySurface {
    fn size(&self) -> Option<(u32, u32)> {
        self.lock().size
    }

    fn present(&mut self, frame: &Frame) -> Result<(), SurfaceError> {
        let mut inner = self.lock();
        if inner.lost {
            return Err(SurfaceError::Lost);
        }
        inner.presented += 1;
        inner.bytes_uploaded += frame.vertex_bytes().len() as u64;
        inner.last = Some(frame.clone());
        Ok(())
    }
}
