//! Background thread driving update + render
//!
//! The loop thread owns the session and the surface. Everything else talks
//! to it through a run flag, a command channel and the shared pointer state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::input::InputHandle;
use crate::renderer::{DrawSurface, Renderer};
use crate::settings::Settings;
use crate::sim::{Session, TickInput};

/// How long to wait before polling an unavailable surface again
const IDLE_WAIT: Duration = Duration::from_millis(16);

/// Control requests, applied at the start of the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCommand {
    Pause,
    Resume,
    Restart,
}

/// Handle to a running game loop.
///
/// Dropping the handle stops the loop and joins the thread.
pub struct GameLoop {
    running: Arc<AtomicBool>,
    commands: Sender<LoopCommand>,
    input: InputHandle,
    handle: Option<JoinHandle<Session>>,
}

impl GameLoop {
    /// Move `session` and `surface` onto a new loop thread and start it
    pub fn spawn<S>(session: Session, surface: S, settings: &Settings) -> Result<Self>
    where
        S: DrawSurface + 'static,
    {
        let listening = session.has_listener();
        let running = Arc::new(AtomicBool::new(true));
        let (commands, rx) = mpsc::channel();
        let input = InputHandle::new();

        let worker = Worker {
            session,
            surface,
            renderer: Renderer::new(settings),
            commands: rx,
            input: input.clone(),
            running: Arc::clone(&running),
            max_frame_dt: settings.effective_max_frame_dt(),
            frame_budget: settings.frame_budget(),
        };

        let handle = thread::Builder::new()
            .name("game-loop".into())
            .spawn(move || worker.run())
            .map_err(Error::Spawn)?;
        log::info!("Game loop started (listener attached: {})", listening);

        Ok(Self {
            running,
            commands,
            input,
            handle: Some(handle),
        })
    }

    pub fn pause(&self) {
        self.send(LoopCommand::Pause);
    }

    pub fn resume(&self) {
        self.send(LoopCommand::Resume);
    }

    pub fn restart(&self) {
        self.send(LoopCommand::Restart);
    }

    /// Pointer feed for the input context
    pub fn input(&self) -> InputHandle {
        self.input.clone()
    }

    /// True until `stop` is called or the loop thread exits
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
            && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the loop, wait for the thread and hand back the session.
    ///
    /// Returns `None` if the loop thread panicked.
    pub fn stop(mut self) -> Option<Session> {
        self.shutdown()
    }

    fn send(&self, command: LoopCommand) {
        if self.commands.send(command).is_err() {
            log::warn!("Game loop is gone, dropping {:?}", command);
        }
    }

    fn shutdown(&mut self) -> Option<Session> {
        self.running.store(false, Ordering::Release);
        let handle = self.handle.take()?;
        match handle.join() {
            Ok(session) => {
                log::info!("Game loop stopped");
                Some(session)
            }
            Err(_) => {
                log::error!("Game loop thread panicked");
                None
            }
        }
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// State owned by the loop thread
struct Worker<S> {
    session: Session,
    surface: S,
    renderer: Renderer,
    commands: Receiver<LoopCommand>,
    input: InputHandle,
    running: Arc<AtomicBool>,
    max_frame_dt: f32,
    frame_budget: Option<Duration>,
}

impl<S: DrawSurface> Worker<S> {
    fn run(mut self) -> Session {
        let mut last = Instant::now();

        while self.running.load(Ordering::Acquire) {
            let frame_start = Instant::now();
            self.apply_commands();

            let Some((width, height)) = self.surface.size().filter(|&(w, h)| w > 0 && h > 0)
            else {
                log::trace!("Surface unavailable, frame skipped");
                thread::sleep(IDLE_WAIT);
                // Time spent without a surface doesn't count as game time
                last = Instant::now();
                continue;
            };
            self.session.resize(width as f32, height as f32);

            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32().min(self.max_frame_dt);
            last = now;

            let input = TickInput::from(self.input.snapshot());
            self.session.update(dt, &input);

            let frame = self.renderer.render(self.session.state());
            if let Err(e) = self.surface.present(&frame) {
                log::warn!("Frame dropped: {}", e);
            }

            if let Some(budget) = self.frame_budget {
                let elapsed = frame_start.elapsed();
                if elapsed < budget {
                    thread::sleep(budget - elapsed);
                }
            }
        }

        self.session
    }

    fn apply_commands(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                LoopCommand::Pause => {
                    self.session.pause();
                }
                LoopCommand::Resume => {
                    self.session.resume();
                }
                LoopCommand::Restart => {
                    log::debug!(
                        "Restarting with {} entities live",
                        self.session.state().entity_count()
                    );
                    self.session.restart();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{MemorySurface, Overlay};
    use crate::sim::{GameEvent, GamePhase, GameState};
    use glam::Vec2;

    fn settings() -> Settings {
        Settings {
            target_fps: 250,
            ..Settings::default()
        }
    }

    /// Poll until `cond` holds or a generous timeout passes
    fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_presents_frames_and_stops() {
        let surface = MemorySurface::new(400, 800);
        let session = Session::new(GameState::new(1, Vec2::ZERO), None);
        let game = GameLoop::spawn(session, surface.clone(), &settings()).unwrap();

        assert!(wait_for(|| surface.frames_presented() >= 3));
        assert!(game.is_running());

        let session = game.stop().unwrap();
        assert_eq!(session.state().screen, Vec2::new(400.0, 800.0));
        assert!(session.state().frame >= 3);

        let presented = surface.frames_presented();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(surface.frames_presented(), presented);
    }

    #[test]
    fn test_unavailable_surface_skips_frames() {
        let surface = MemorySurface::default();
        let session = Session::new(GameState::new(1, Vec2::ZERO), None);
        let game = GameLoop::spawn(session, surface.clone(), &settings()).unwrap();

        thread::sleep(Duration::from_millis(50));
        assert_eq!(surface.frames_presented(), 0);

        surface.set_size(Some((0, 600)));
        thread::sleep(Duration::from_millis(50));
        assert_eq!(surface.frames_presented(), 0);

        surface.set_size(Some((300, 600)));
        assert!(wait_for(|| surface.frames_presented() > 0));

        let session = game.stop().unwrap();
        assert_eq!(session.state().screen, Vec2::new(300.0, 600.0));
    }

    #[test]
    fn test_pause_resume_restart_commands() {
        let surface = MemorySurface::new(400, 800);
        let (tx, rx) = mpsc::channel();
        let session = Session::new(GameState::new(1, Vec2::ZERO), Some(Box::new(tx)));
        let game = GameLoop::spawn(session, surface.clone(), &settings()).unwrap();

        game.pause();
        assert!(wait_for(|| {
            surface
                .last_frame()
                .is_some_and(|f| f.overlay == Some(Overlay::Paused))
        }));

        game.resume();
        assert!(wait_for(|| {
            surface.last_frame().is_some_and(|f| f.overlay.is_none())
        }));

        game.restart();
        assert!(wait_for(|| {
            rx.try_iter().any(|e| e == GameEvent::LifeChanged(3))
        }));

        let session = game.stop().unwrap();
        assert!(session.has_listener());
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.state().lives, 3);
    }

    #[test]
    fn test_pointer_steers_ship() {
        let surface = MemorySurface::new(400, 800);
        let session = Session::new(GameState::new(1, Vec2::ZERO), None);
        let game = GameLoop::spawn(session, surface.clone(), &settings()).unwrap();
        assert!(wait_for(|| surface.frames_presented() > 0));

        game.input().press(0.0);
        thread::sleep(Duration::from_millis(200));
        game.input().release();

        let session = game.stop().unwrap();
        assert!(session.state().ship.body.pos.x < 160.0);
    }

    #[test]
    fn test_surface_errors_do_not_stop_the_loop() {
        let surface = MemorySurface::new(400, 800);
        surface.set_lost(true);
        let session = Session::new(GameState::new(1, Vec2::ZERO), None);
        let game = GameLoop::spawn(session, surface.clone(), &settings()).unwrap();

        thread::sleep(Duration::from_millis(50));
        assert!(game.is_running());
        assert_eq!(surface.frames_presented(), 0);

        surface.set_lost(false);
        assert!(wait_for(|| surface.frames_presented() > 0));
    }
}
