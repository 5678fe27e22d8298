//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{apply_contact_damage, remove_dead, separate_enemies};
use super::movement::pursuit_velocity;
use super::rules::MovementMode;
use super::spawn::spawn_tick;
use super::state::{GamePhase, GameState};

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState) {
    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    let dt = state.rules.tick_dt();

    if state.rules.movement == MovementMode::PerTick {
        state.player.prev_pos = state.player.pos;
        state.player.pos += state.player.vel * dt;
        for enemy in &mut state.enemies {
            enemy.prev_pos = enemy.pos;
            enemy.pos += enemy.vel * dt;
        }
    }

    spawn_tick(state);

    let dealt = apply_contact_damage(&mut state.player, &state.enemies);
    if dealt > 0 {
        log::trace!("Player took {} damage ({} left)", dealt, state.player.health);
    }
    if state.player.is_dead() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {:.1}s with {} kills",
            state.elapsed_secs(),
            state.kills
        );
        return;
    }

    state.kills += remove_dead(&mut state.enemies);

    let target = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.vel = pursuit_velocity(enemy.pos, target, enemy.speed);
    }
    separate_enemies(&mut state.enemies, state.rules.separation_step);
}

/// Frame scales for rulesets that move entities every frame
fn frame_scales(state: &GameState) -> Option<(f32, f32)> {
    if state.phase != GamePhase::Playing {
        return None;
    }
    match state.rules.movement {
        MovementMode::PerFrame {
            player_scale,
            enemy_scale,
        } => Some((player_scale, enemy_scale)),
        MovementMode::PerTick => None,
    }
}

/// Per-frame player movement, run before zoom and attack
///
/// The player velocity is consumed: it must be re-read from input each frame.
pub fn integrate_player_frame(state: &mut GameState, frame_dt: f32) {
    let Some((player_scale, _)) = frame_scales(state) else {
        return;
    };
    state.player.pos += state.player.vel * frame_dt * player_scale;
    state.player.vel = glam::Vec2::ZERO;
}

/// Per-frame enemy movement, run after the frame's ticks so enemies use the
/// pursuit velocity those ticks just set
pub fn integrate_enemies_frame(state: &mut GameState, frame_dt: f32) {
    let Some((_, enemy_scale)) = frame_scales(state) else {
        return;
    };
    for enemy in &mut state.enemies {
        enemy.pos += enemy.vel * frame_dt * enemy_scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rules::Ruleset;
    use glam::Vec2;

    #[test]
    fn test_tick_counts_and_pursues() {
        let mut state = GameState::new(Ruleset::shape_slayer(), 12345);
        state.spawn_enemy(Vec2::new(300.0, 0.0));
        tick(&mut state);
        assert_eq!(state.time_ticks, 1);
        let vel = state.enemies[0].vel;
        assert!((vel - Vec2::new(-24.0, 0.0)).length() < 1e-4);
        // Per-frame ruleset: the tick itself does not move anyone
        assert_eq!(state.enemies[0].pos, Vec2::new(300.0, 0.0));
    }

    #[test]
    fn test_per_tick_movement_snapshots_prev() {
        let mut state = GameState::new(Ruleset::slayfast(), 1);
        state.player.vel = Vec2::new(320.0, 0.0);
        state.spawn_enemy(Vec2::new(0.0, 500.0));
        state.enemies[0].vel = Vec2::new(0.0, -160.0);

        tick(&mut state);
        assert_eq!(state.player.prev_pos, Vec2::ZERO);
        assert!((state.player.pos - Vec2::new(20.0, 0.0)).length() < 1e-4);
        assert_eq!(state.enemies[0].prev_pos, Vec2::new(0.0, 500.0));
        assert!((state.enemies[0].pos - Vec2::new(0.0, 490.0)).length() < 1e-4);
    }

    #[test]
    fn test_contact_damage_and_game_over() {
        let mut state = GameState::new(Ruleset::shape_slayer(), 1);
        state.player.health = 2;
        state.spawn_enemy(Vec2::new(5.0, 0.0));
        state.spawn_enemy(Vec2::new(-5.0, 0.0));

        tick(&mut state);
        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Further ticks are ignored
        tick(&mut state);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.player.health, 0);
    }

    #[test]
    fn test_dead_enemies_removed_and_counted() {
        let mut state = GameState::new(Ruleset::shape_slayer(), 1);
        state.spawn_enemy(Vec2::new(400.0, 0.0));
        state.spawn_enemy(Vec2::new(-400.0, 0.0));
        state.enemies[0].health = 0;

        tick(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.kills, 1);
        assert_eq!(state.enemies[0].pos.x, -400.0);
    }

    #[test]
    fn test_paused_state_does_not_tick() {
        let mut state = GameState::new(Ruleset::shape_slayer(), 1);
        state.phase = GamePhase::Paused;
        tick(&mut state);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_per_frame_steps_move_player_and_enemies_separately() {
        let mut state = GameState::new(Ruleset::shape_slayer(), 1);
        state.player.vel = Vec2::new(32.0, 0.0);
        state.spawn_enemy(Vec2::new(100.0, 0.0));
        state.enemies[0].vel = Vec2::new(-24.0, 0.0);

        integrate_player_frame(&mut state, 0.01);
        // 32 * 0.01 * 20
        assert!((state.player.pos.x - 6.4).abs() < 1e-4);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.enemies[0].pos.x, 100.0);

        integrate_enemies_frame(&mut state, 0.01);
        // 100 - 24 * 0.01 * 10
        assert!((state.enemies[0].pos.x - 97.6).abs() < 1e-4);
    }

    #[test]
    fn test_per_frame_steps_noop_for_per_tick() {
        let mut state = GameState::new(Ruleset::slayfast(), 1);
        state.player.vel = Vec2::new(320.0, 0.0);
        state.spawn_enemy(Vec2::new(100.0, 0.0));
        state.enemies[0].vel = Vec2::new(-150.0, 0.0);
        integrate_player_frame(&mut state, 0.5);
        integrate_enemies_frame(&mut state, 0.5);
        assert_eq!(state.player.pos, Vec2::ZERO);
        assert_eq!(state.enemies[0].pos, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(Ruleset::shape_slayer(), 99999);
        let mut state2 = GameState::new(Ruleset::shape_slayer(), 99999);

        for _ in 0..1000 {
            tick(&mut state1);
            tick(&mut state2);
        }

        assert!(!state1.enemies.is_empty());
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.pos, b.pos);
        }
        assert_eq!(state1.player.health, state2.player.health);
    }
}
