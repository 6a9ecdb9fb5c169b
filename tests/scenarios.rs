use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use space_explorer::renderer::{MemorySurface, Overlay, Renderer};
use space_explorer::sim::*;
use space_explorer::{GameLoop, Settings};

const SCREEN: Vec2 = Vec2::new(400.0, 800.0);

fn state() -> GameState {
    GameState::new(2024, SCREEN)
}

#[test]
fn falling_asteroid_follows_velocity() {
    let mut rng = Pcg32::seed_from_u64(1);
    let mut asteroid = Asteroid::new(Vec2::new(100.0, -50.0), 60.0, Vec2::new(0.0, 200.0), &mut rng);

    asteroid.update(0.5);
    assert_eq!(asteroid.body.pos, Vec2::new(100.0, 50.0));

    asteroid.update(2.5);
    assert_eq!(asteroid.body.pos, Vec2::new(100.0, 550.0));
    assert!(!asteroid.is_off_screen(SCREEN.x, SCREEN.y));
}

#[test]
fn score_bonus_pays_out_and_explodes() {
    let mut state = state();
    let pos = state.ship.body.pos + Vec2::new(20.0, 20.0);
    let mut bonus = Bonus::new(pos, BonusKind::Score, 0.0);
    bonus.body.vel = Vec2::ZERO;
    state.bonuses.push(bonus);

    let mut events = Vec::new();
    tick(&mut state, &TickInput::default(), 0.01, &mut events);

    assert_eq!(state.score, 100);
    assert!(state.bonuses.is_empty());
    assert_eq!(state.explosions.len(), 1);
    let explosion = &state.explosions[0];
    assert_eq!(explosion.kind, ExplosionKind::Bonus);
    assert_eq!(explosion.origin, pos);
    assert_eq!(explosion.particles.len(), 8);
    assert!(events.contains(&GameEvent::ScoreChanged(100)));
}

#[test]
fn three_hits_end_the_game() {
    let (tx, rx) = mpsc::channel();
    let mut session = Session::new(state(), Some(Box::new(tx)));

    for expected in [2u8, 1, 0] {
        let state = session.state_mut();
        let pos = state.ship.body.pos + Vec2::new(10.0, 10.0);
        let asteroid = Asteroid::new(pos, 40.0, Vec2::ZERO, state.rng_mut());
        state.asteroids.push(asteroid);
        session.update(0.01, &TickInput::default());
        assert_eq!(session.state().lives, expected);
    }

    assert_eq!(session.phase(), GamePhase::GameOver);
    let events: Vec<_> = rx.try_iter().collect();
    let game_overs = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);
    assert_eq!(events.last(), Some(&GameEvent::GameOver { final_score: 0 }));

    // Frozen until restarted
    let frame = session.state().frame;
    session.update(0.5, &TickInput::default());
    assert_eq!(session.state().frame, frame);

    session.restart();
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.state().lives, 3);
}

#[test]
fn long_run_stays_consistent() {
    let mut state = state();
    let mut events = Vec::new();
    let mut renderer = Renderer::default();

    // Weave left and right for two simulated minutes
    for frame in 0..7200u32 {
        let input = if (frame / 120) % 2 == 0 {
            TickInput::pressed_at(0.0)
        } else {
            TickInput::pressed_at(SCREEN.x)
        };
        tick(&mut state, &input, 1.0 / 60.0, &mut events);

        assert!(state.lives <= 3);
        assert!(state.ship.body.pos.x >= 0.0);
        assert!(state.ship.body.pos.x + state.ship.body.size.x <= SCREEN.x);
        for asteroid in &state.asteroids {
            assert!(!asteroid.is_off_screen(SCREEN.x, SCREEN.y));
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    assert!(state.timers.asteroid_interval() >= 0.5);
    let frame = renderer.render(&state);
    assert_eq!(frame.vertices.len() % 3, 0);
}

#[test]
fn same_seed_same_run() {
    let run = || {
        let mut state = state();
        let mut events = Vec::new();
        for _ in 0..1200 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0, &mut events);
        }
        (state.score, state.lives, state.asteroids.len(), state.frame, events)
    };
    assert_eq!(run(), run());
}

#[test]
fn headless_loop_presents_playing_frames() {
    let surface = MemorySurface::new(400, 800);
    let session = Session::new(GameState::new(5, Vec2::ZERO), None);
    let settings = Settings {
        target_fps: 200,
        ..Settings::default()
    };
    let game = GameLoop::spawn(session, surface.clone(), &settings).unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while surface.frames_presented() < 5 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    assert!(surface.frames_presented() >= 5);

    let session = game.stop().unwrap();
    let last = surface.last_frame().unwrap();
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(last.overlay, None::<Overlay>);
    assert_eq!(last.size, SCREEN);
    assert_eq!(last.hud.lives, 3);
}
