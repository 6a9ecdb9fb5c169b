//! Per-frame simulation step
//!
//! Advances the game state by one measured frame delta in a fixed order:
//! input, ship, stars, asteroids, bonuses, explosions, spawning, difficulty,
//! passive score.

use super::asteroid::Asteroid;
use super::bonus::{Bonus, BonusKind};
use super::entity::{Entity, sanitize_dt};
use super::events::GameEvent;
use super::particles::{Explosion, ExplosionKind};
use super::ship::Steer;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input for a single frame, sampled once from the shared pointer state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Pointer x in screen pixels while pressed; `None` when released
    pub pointer_x: Option<f32>,
}

impl TickInput {
    pub fn pressed_at(x: f32) -> Self {
        Self { pointer_x: Some(x) }
    }
}

/// Advance the game state by `dt` seconds, appending notifications to `events`.
///
/// Does nothing unless the game is playing and the screen has a size.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Playing {
        return;
    }
    if !state.has_screen() {
        log::trace!("tick skipped: screen has no size yet");
        return;
    }

    let dt = sanitize_dt(dt);
    state.frame += 1;
    let screen = state.screen;

    // --- 1. INPUT ---
    let steer = match input.pointer_x {
        Some(x) => state.ship.steer_toward(x),
        None => Steer::Stop,
    };
    state.ship.steer(steer);

    // --- 2. SHIP ---
    state.ship.update(dt);
    state.ship.clamp_to_screen(screen.x);
    state.ship.update_trail(dt, &mut state.rng);

    // --- 3. BACKGROUND ---
    for star in &mut state.stars {
        star.update(dt);
        star.wrap(&mut state.rng, screen);
    }

    // --- 4. ASTEROIDS ---
    update_asteroids(state, dt, events);
    if state.phase == GamePhase::GameOver {
        // The final score has been reported; nothing else happens this frame
        return;
    }

    // --- 5. BONUSES ---
    update_bonuses(state, dt, events);

    // --- 6. EXPLOSIONS ---
    state.explosions.retain_mut(|explosion| {
        explosion.update(dt);
        explosion.active
    });

    // --- 7. SPAWNING ---
    spawn(state, dt);

    // --- 8. DIFFICULTY ---
    state.timers.difficulty += dt;
    state.speed_multiplier = state.timers.speed_multiplier();

    // --- 9. PASSIVE SCORE ---
    // Truncated per frame, so at high frame rates this rarely adds anything
    // until the multiplier has grown.
    let gain = (PASSIVE_SCORE_RATE * dt * state.speed_multiplier) as u32;
    state.score = state.score.saturating_add(gain);
    events.push(GameEvent::ScoreChanged(state.score));
}

/// Move asteroids, drop the ones that left the screen, resolve ship hits
fn update_asteroids(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let GameState {
        asteroids,
        ship,
        explosions,
        rng,
        lives,
        phase,
        score,
        screen,
        ..
    } = state;

    asteroids.retain_mut(|asteroid| {
        asteroid.update(dt);
        if asteroid.is_off_screen(screen.x, screen.y) {
            return false;
        }
        if !asteroid.intersects(&*ship) {
            return true;
        }

        explosions.push(Explosion::new(
            asteroid.body.pos,
            ExplosionKind::Asteroid,
            &mut *rng,
        ));

        // A second hit in the game-over frame still destroys the asteroid
        // but can't take lives below zero or end the game twice.
        if *phase == GamePhase::Playing && *lives > 0 {
            *lives -= 1;
            events.push(GameEvent::LifeLost(*lives));
            if *lives == 0 {
                *phase = GamePhase::GameOver;
                log::info!("Game over with score {}", score);
                events.push(GameEvent::GameOver {
                    final_score: *score,
                });
            }
        }
        false
    });
}

/// Move bonuses, drop the ones that left the screen, pay out collections
fn update_bonuses(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let GameState {
        bonuses,
        ship,
        explosions,
        rng,
        lives,
        score,
        screen,
        ..
    } = state;

    bonuses.retain_mut(|bonus| {
        bonus.update(dt);
        if bonus.is_off_screen(screen.x, screen.y) {
            return false;
        }
        if !bonus.intersects(&*ship) {
            return true;
        }

        let reward = bonus.collect();
        if reward > 0 {
            match bonus.kind {
                BonusKind::Life => {
                    *lives = lives.saturating_add(1).min(MAX_LIVES);
                    events.push(GameEvent::LifeGained(*lives));
                }
                BonusKind::Score | BonusKind::Shield => {
                    *score = score.saturating_add(reward);
                    events.push(GameEvent::ScoreChanged(*score));
                }
            }
        }

        explosions.push(Explosion::new(
            bonus.body.pos,
            ExplosionKind::Bonus,
            &mut *rng,
        ));
        false
    });
}

/// Accumulate spawn timers and add new entities when they run over
fn spawn(state: &mut GameState, dt: f32) {
    let screen_width = state.screen.x;

    state.timers.asteroid += dt;
    if state.timers.asteroid > state.timers.asteroid_interval() {
        state
            .asteroids
            .push(Asteroid::spawn(&mut state.rng, screen_width));
        state.timers.asteroid = 0.0;
    }

    state.timers.bonus += dt;
    if state.timers.bonus > BONUS_INTERVAL {
        state.bonuses.push(Bonus::spawn(&mut state.rng, screen_width));
        state.timers.bonus = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn playing_state() -> GameState {
        GameState::new(12345, Vec2::new(400.0, 800.0))
    }

    /// Motionless asteroid sitting on the ship's hull
    fn asteroid_on_ship(state: &mut GameState) -> Asteroid {
        let pos = state.ship.body.pos + Vec2::new(10.0, 10.0);
        let mut asteroid = Asteroid::new(pos, 40.0, Vec2::ZERO, state.rng_mut());
        asteroid.rotation_speed = 0.0;
        asteroid
    }

    fn bonus_on_ship(state: &GameState, kind: BonusKind) -> Bonus {
        let mut bonus = Bonus::new(state.ship.body.pos + Vec2::new(20.0, 20.0), kind, 0.0);
        bonus.body.vel = Vec2::ZERO;
        bonus
    }

    #[test]
    fn test_asteroid_hit_costs_one_life() {
        let mut state = playing_state();
        let a = asteroid_on_ship(&mut state);
        let hit_pos = a.body.pos;
        state.asteroids.push(a);

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), DT, &mut events);

        assert_eq!(state.lives, 2);
        assert!(state.asteroids.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].kind, ExplosionKind::Asteroid);
        assert_eq!(state.explosions[0].particles.len(), 15);
        assert_eq!(state.explosions[0].origin, hit_pos);
        assert!(events.contains(&GameEvent::LifeLost(2)));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_game_over_only_from_last_life() {
        let mut state = playing_state();
        state.lives = 1;
        state.score = 321;
        let a = asteroid_on_ship(&mut state);
        state.asteroids.push(a);

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), DT, &mut events);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            events,
            vec![
                GameEvent::LifeLost(0),
                GameEvent::GameOver { final_score: 321 }
            ]
        );
    }

    #[test]
    fn test_double_hit_in_final_frame() {
        let mut state = playing_state();
        state.lives = 1;
        let a = asteroid_on_ship(&mut state);
        let b = asteroid_on_ship(&mut state);
        state.asteroids.push(a);
        state.asteroids.push(b);

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), DT, &mut events);

        assert_eq!(state.lives, 0);
        assert!(state.asteroids.is_empty());
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_game_over_frozen() {
        let mut state = playing_state();
        state.phase = GamePhase::GameOver;
        let a = asteroid_on_ship(&mut state);
        state.asteroids.push(a);
        let before = state.asteroids[0].body.pos;

        let mut events = Vec::new();
        tick(&mut state, &TickInput::pressed_at(0.0), 1.0, &mut events);

        assert!(events.is_empty());
        assert_eq!(state.asteroids[0].body.pos, before);
        assert_eq!(state.lives, 3);
        assert_eq!(state.ship.body.pos, Vec2::new(160.0, 600.0));
    }

    #[test]
    fn test_paused_frozen() {
        let mut state = playing_state();
        state.phase = GamePhase::Paused;
        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), 0.5, &mut events);
        assert!(events.is_empty());
        assert_eq!(state.timers.difficulty, 0.0);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_life_bonus_capped() {
        let mut state = playing_state();
        state.bonuses.push(bonus_on_ship(&state, BonusKind::Life));

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), DT, &mut events);

        assert_eq!(state.lives, 3);
        assert!(state.bonuses.is_empty());
        assert!(events.contains(&GameEvent::LifeGained(3)));
    }

    #[test]
    fn test_life_bonus_restores_life() {
        let mut state = playing_state();
        state.lives = 2;
        state.bonuses.push(bonus_on_ship(&state, BonusKind::Life));

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), DT, &mut events);

        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_score_bonus_pays_out_once() {
        let mut state = playing_state();
        let bonus = bonus_on_ship(&state, BonusKind::Score);
        let at = bonus.body.pos;
        state.bonuses.push(bonus);

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), DT, &mut events);

        assert_eq!(state.score, 100);
        assert!(events.contains(&GameEvent::ScoreChanged(100)));
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].kind, ExplosionKind::Bonus);
        assert_eq!(state.explosions[0].particles.len(), 8);
        assert_eq!(state.explosions[0].origin, at);
    }

    #[test]
    fn test_shield_bonus_adds_fifty() {
        let mut state = playing_state();
        state.bonuses.push(bonus_on_ship(&state, BonusKind::Shield));
        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.score, 50);
    }

    #[test]
    fn test_off_screen_entities_removed_without_penalty() {
        let mut state = playing_state();
        let mut a = asteroid_on_ship(&mut state);
        a.body.pos = Vec2::new(100.0, 900.0);
        state.asteroids.push(a);
        let mut b = bonus_on_ship(&state, BonusKind::Score);
        b.body.pos = Vec2::new(-100.0, 100.0);
        state.bonuses.push(b);

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), DT, &mut events);

        assert!(state.asteroids.is_empty());
        assert!(state.bonuses.is_empty());
        assert!(state.explosions.is_empty());
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_explosions_expire() {
        let mut state = playing_state();
        let e = Explosion::new(Vec2::new(50.0, 50.0), ExplosionKind::Bonus, state.rng_mut());
        state.explosions.push(e);

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), 0.3, &mut events);
        assert_eq!(state.explosions.len(), 1);
        tick(&mut state, &TickInput::default(), 0.3, &mut events);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_asteroid_spawn_timer() {
        let mut state = playing_state();
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), 1.9, &mut events);
        assert!(state.asteroids.is_empty());

        tick(&mut state, &TickInput::default(), 0.2, &mut events);
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.timers.asteroid, 0.0);
        assert!(state.asteroids[0].body.pos.y < 0.0);
    }

    #[test]
    fn test_asteroid_interval_uses_difficulty() {
        let mut state = playing_state();
        state.timers.difficulty = 100.0;
        state.timers.asteroid = 0.45;

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), 0.1, &mut events);
        assert_eq!(state.asteroids.len(), 1);
    }

    #[test]
    fn test_bonus_spawn_timer() {
        let mut state = playing_state();
        state.timers.bonus = 7.95;

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), 0.1, &mut events);
        assert_eq!(state.bonuses.len(), 1);
        assert_eq!(state.timers.bonus, 0.0);
        assert_eq!(state.bonuses[0].body.pos.y, -BONUS_SIZE);
    }

    #[test]
    fn test_difficulty_and_passive_score() {
        let mut state = playing_state();
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), 1.0, &mut events);
        assert_eq!(state.timers.difficulty, 1.0);
        assert!((state.speed_multiplier - 1.05).abs() < 1e-6);
        // trunc(10 * 1.0 * 1.05)
        assert_eq!(state.score, 10);
        assert_eq!(events.last(), Some(&GameEvent::ScoreChanged(10)));
    }

    #[test]
    fn test_score_reported_every_frame() {
        let mut state = playing_state();
        let mut events = Vec::new();
        for _ in 0..5 {
            tick(&mut state, &TickInput::default(), DT, &mut events);
        }
        // 10 * (1/60) truncates to zero, but each frame still reports
        let reports = events
            .iter()
            .filter(|e| **e == GameEvent::ScoreChanged(0))
            .count();
        assert_eq!(reports, 5);
    }

    #[test]
    fn test_negative_dt_is_clamped() {
        let mut state = playing_state();
        let mut a = asteroid_on_ship(&mut state);
        a.body.pos = Vec2::new(10.0, 10.0);
        a.body.vel = Vec2::new(0.0, 100.0);
        state.asteroids.push(a);

        let mut events = Vec::new();
        tick(&mut state, &TickInput::pressed_at(0.0), -0.5, &mut events);
        assert_eq!(state.asteroids[0].body.pos, Vec2::new(10.0, 10.0));
        assert_eq!(state.ship.body.pos.x, 160.0);
        assert_eq!(state.timers.difficulty, 0.0);
    }

    #[test]
    fn test_infinite_dt_is_clamped() {
        let mut state = playing_state();
        let mut a = asteroid_on_ship(&mut state);
        a.body.pos = Vec2::new(10.0, 10.0);
        a.body.vel = Vec2::new(0.0, 100.0);
        state.asteroids.push(a);
        let score = state.score;

        let mut events = Vec::new();
        tick(&mut state, &TickInput::pressed_at(0.0), f32::INFINITY, &mut events);
        assert_eq!(state.asteroids[0].body.pos, Vec2::new(10.0, 10.0));
        assert_eq!(state.ship.body.pos.x, 160.0);
        assert_eq!(state.score, score);
        assert!(state.timers.difficulty.is_finite());
    }

    #[test]
    fn test_pointer_steers_ship() {
        let mut state = playing_state();
        let mut events = Vec::new();

        tick(&mut state, &TickInput::pressed_at(0.0), 0.1, &mut events);
        assert_eq!(state.ship.body.pos.x, 110.0);

        // Inside the dead zone around the center: stop
        let center = state.ship.body.center().x;
        tick(&mut state, &TickInput::pressed_at(center + 5.0), 0.1, &mut events);
        assert_eq!(state.ship.body.pos.x, 110.0);
        assert_eq!(state.ship.body.vel.x, 0.0);

        // Far right, long frame: clamped to the right edge
        tick(&mut state, &TickInput::pressed_at(399.0), 1.0, &mut events);
        assert_eq!(state.ship.body.pos.x, 320.0);

        // Released: stop
        tick(&mut state, &TickInput::default(), 0.1, &mut events);
        assert_eq!(state.ship.body.pos.x, 320.0);
    }

    #[test]
    fn test_zero_screen_skips_frame() {
        let mut state = GameState::new(1, Vec2::ZERO);
        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), 0.5, &mut events);
        assert!(events.is_empty());
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, Vec2::new(400.0, 800.0));
        let mut state2 = GameState::new(99999, Vec2::new(400.0, 800.0));
        let inputs = [
            TickInput::pressed_at(10.0),
            TickInput::default(),
            TickInput::pressed_at(390.0),
        ];

        let mut events1 = Vec::new();
        let mut events2 = Vec::new();
        for _ in 0..100 {
            for input in &inputs {
                tick(&mut state1, input, 0.05, &mut events1);
                tick(&mut state2, input, 0.05, &mut events2);
            }
        }

        assert_eq!(events1, events2);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.asteroids.len(), state2.asteroids.len());
        assert_eq!(state1.ship.body.pos, state2.ship.body.pos);
    }
}
