//! Space Explorer terminal entry point
//!
//! Sets up the terminal, runs the game loop on its own thread and feeds it
//! keyboard and mouse input until the player quits.

mod terminal;

use std::collections::HashMap;
use std::io::{Write, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal as term,
};
use glam::Vec2;

use space_explorer::sim::{GameEvent, GameState, Session};
use space_explorer::{GameLoop, HighScores, InputHandle, Settings};
use terminal::{TerminalSurface, column_to_x};

/// How often the input side wakes up
const POLL: Duration = Duration::from_millis(16);

/// A steering key counts as held if it was seen this recently. Covers
/// terminals that only report presses (OS key repeat refreshes it).
const HOLD_WINDOW: Duration = Duration::from_millis(150);

fn data_path(name: &str) -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(name)
}

fn main() -> space_explorer::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_path(".space_explorer_settings.json"));
    let settings = Settings::load_or_default(&settings_path);
    let mut high_scores = HighScores::load_or_default(data_path(".space_explorer_prefs.json"));

    let mut out = stdout();
    term::enable_raw_mode()?;
    out.execute(term::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    let result = run(&settings, &mut high_scores);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(term::LeaveAlternateScreen);
    let _ = term::disable_raw_mode();
    let _ = out.flush();

    if high_scores.best() > 0 {
        println!("Best score: {}", high_scores.best());
    }
    result
}

fn run(settings: &Settings, high_scores: &mut HighScores) -> space_explorer::Result<()> {
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Starting with seed {}", seed);

    let (event_tx, event_rx) = mpsc::channel::<GameEvent>();
    let state = GameState::new(seed, Vec2::ZERO).with_star_count(settings.star_count);
    let session = Session::new(state, Some(Box::new(event_tx)));
    let game = GameLoop::spawn(session, TerminalSurface::default(), settings)?;
    let input = game.input();

    // Blocking terminal reads live on their own thread
    let (term_tx, term_rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if term_tx.send(ev).is_err() {
                break;
            }
        }
    });

    let mut keys = KeyHold::default();
    loop {
        let tick_start = Instant::now();

        while let Ok(ev) = term_rx.try_recv() {
            match ev {
                Event::Key(key) => {
                    if handle_key(&game, &mut keys, key) == Flow::Quit {
                        finish(game, &event_rx, high_scores);
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&input, &mut keys, mouse),
                _ => {}
            }
        }
        keys.steer(&input);

        for ev in event_rx.try_iter() {
            record_event(ev, high_scores);
        }

        if !game.is_running() {
            log::error!("Game loop exited unexpectedly");
            finish(game, &event_rx, high_scores);
            return Ok(());
        }

        let elapsed = tick_start.elapsed();
        if elapsed < POLL {
            thread::sleep(POLL - elapsed);
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_key(game: &GameLoop, keys: &mut KeyHold, key: KeyEvent) -> Flow {
    let KeyEvent {
        code,
        kind,
        modifiers,
        ..
    } = key;
    match kind {
        KeyEventKind::Press => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Flow::Quit,
            KeyCode::Char('p') | KeyCode::Char('P') => game.pause(),
            KeyCode::Char('c') | KeyCode::Char('C') => game.resume(),
            KeyCode::Char('r') | KeyCode::Char('R') => game.restart(),
            code => keys.press(code),
        },
        KeyEventKind::Repeat => keys.press(code),
        KeyEventKind::Release => keys.release(code),
    }
    Flow::Continue
}

fn handle_mouse(input: &InputHandle, keys: &mut KeyHold, mouse: MouseEvent) {
    let x = column_to_x(mouse.column);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            keys.clear();
            input.press(x);
        }
        MouseEventKind::Up(MouseButton::Left) => input.release(),
        MouseEventKind::Moved => input.move_to(x),
        _ => {}
    }
}

fn record_event(event: GameEvent, high_scores: &mut HighScores) {
    let GameEvent::GameOver { final_score } = event else {
        return;
    };
    if !high_scores.record(final_score) {
        return;
    }
    log::info!("New high score {}", final_score);
    if let Err(e) = high_scores.save() {
        log::warn!("Could not save high score: {}", e);
    }
}

/// Stop the loop and catch any game-over that raced the shutdown
fn finish(game: GameLoop, events: &mpsc::Receiver<GameEvent>, high_scores: &mut HighScores) {
    if game.stop().is_none() {
        log::error!("Game loop ended abnormally");
    }
    for ev in events.try_iter() {
        record_event(ev, high_scores);
    }
}

/// Keyboard steering: a held arrow key acts like a pointer pressed at that
/// edge of the screen
#[derive(Default)]
struct KeyHold {
    last_seen: HashMap<KeyCode, Instant>,
    steering: bool,
}

impl KeyHold {
    fn press(&mut self, code: KeyCode) {
        if direction(code).is_some() {
            self.last_seen.insert(code, Instant::now());
        }
    }

    fn release(&mut self, code: KeyCode) {
        self.last_seen.remove(&code);
    }

    fn clear(&mut self) {
        self.last_seen.clear();
        self.steering = false;
    }

    fn held(&self) -> Option<Direction> {
        let now = Instant::now();
        self.last_seen
            .iter()
            .filter(|(_, seen)| now.duration_since(**seen) <= HOLD_WINDOW)
            .max_by_key(|(_, seen)| **seen)
            .and_then(|(code, _)| direction(*code))
    }

    fn steer(&mut self, input: &InputHandle) {
        match self.held() {
            Some(Direction::Left) => {
                input.press(f32::NEG_INFINITY);
                self.steering = true;
            }
            Some(Direction::Right) => {
                input.press(f32::INFINITY);
                self.steering = true;
            }
            None if self.steering => {
                input.release();
                self.steering = false;
            }
            None => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

fn direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}
