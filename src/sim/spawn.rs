//! Enemy spawning
//!
//! Enemies appear on the edge of a rectangle twice the screen size centred
//! on the player, so they always enter from off-screen.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rules::{Ruleset, SpawnSchedule};
use super::state::GameState;

/// Spawn timer and escalation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Ticks since the last spawn
    pub timer_ticks: u32,
    pub interval_secs: f32,
    pub interval_ticks: u32,
    pub per_spawn: u32,
}

impl Spawner {
    pub fn new(rules: &Ruleset) -> Self {
        Self {
            timer_ticks: 0,
            interval_secs: rules.spawn_interval_secs,
            interval_ticks: rules.secs_to_ticks(rules.spawn_interval_secs),
            per_spawn: rules.enemies_per_spawn,
        }
    }

    /// Advance the timer one tick; returns how many enemies to spawn now
    pub fn step(&mut self, rules: &Ruleset) -> u32 {
        self.timer_ticks += 1;
        if self.timer_ticks < self.interval_ticks {
            return 0;
        }

        let count = self.per_spawn;
        self.timer_ticks = 0;

        if let SpawnSchedule::Escalating {
            decay,
            min_interval_secs,
        } = rules.spawn_schedule
        {
            self.per_spawn += 1;
            if self.interval_secs > min_interval_secs {
                self.interval_secs *= decay;
                self.interval_ticks = rules.secs_to_ticks(self.interval_secs);
            }
        }

        count
    }
}

/// Random point on the edge band of a `width` x `height` rectangle
///
/// One edge is picked at random. The coordinate across that edge lands
/// `border` units deep at most; the coordinate along it spans the full side
/// plus the border.
pub fn random_edge_position<R: Rng + ?Sized>(
    rng: &mut R,
    center: Vec2,
    width: f32,
    height: f32,
    border: f32,
) -> Vec2 {
    let mut x_shift = width / 2.0 + rng.random::<f32>() * border;
    let mut y_shift = height / 2.0 + rng.random::<f32>() * border;
    let horizontal_edge = rng.random_bool(0.5);
    let negative = rng.random_bool(0.5);

    if horizontal_edge {
        // Top or bottom edge
        x_shift = (rng.random::<f32>() - 0.5) * (width + border);
        if negative {
            y_shift = -y_shift;
        }
    } else {
        // Left or right edge
        y_shift = (rng.random::<f32>() - 0.5) * (height + border);
        if negative {
            x_shift = -x_shift;
        }
    }

    center + Vec2::new(x_shift, y_shift)
}

/// Run the spawner for one tick, adding enemies around the player
pub fn spawn_tick(state: &mut GameState) {
    let count = state.spawner.step(&state.rules);
    if count == 0 {
        return;
    }

    let width = state.screen.x * 2.0;
    let height = state.screen.y * 2.0;
    for _ in 0..count {
        let pos = random_edge_position(
            &mut state.rng,
            state.player.pos,
            width,
            height,
            state.rules.spawn_border,
        );
        state.spawn_enemy(pos);
    }

    log::debug!(
        "Spawned {} enemies at tick {} (next interval {} ticks, {} alive)",
        count,
        state.time_ticks,
        state.spawner.interval_ticks,
        state.enemies.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_edge_position_lies_in_band() {
        let mut rng = Pcg32::seed_from_u64(42);
        let center = Vec2::new(50.0, -20.0);
        let (w, h, border) = (1280.0, 900.0, 2.0);

        for _ in 0..500 {
            let p = random_edge_position(&mut rng, center, w, h, border) - center;
            let on_vertical_edge = p.x.abs() >= w / 2.0 && p.x.abs() <= w / 2.0 + border;
            let on_horizontal_edge = p.y.abs() >= h / 2.0 && p.y.abs() <= h / 2.0 + border;
            assert!(on_vertical_edge || on_horizontal_edge, "{p:?} not on edge band");
            assert!(p.x.abs() <= w / 2.0 + border);
            assert!(p.y.abs() <= h / 2.0 + border);
        }
    }

    #[test]
    fn test_edge_position_covers_all_sides() {
        let mut rng = Pcg32::seed_from_u64(7);
        let (mut left, mut right, mut top, mut bottom) = (false, false, false, false);
        for _ in 0..200 {
            let p = random_edge_position(&mut rng, Vec2::ZERO, 100.0, 100.0, 1.0);
            left |= p.x <= -50.0;
            right |= p.x >= 50.0;
            top |= p.y <= -50.0;
            bottom |= p.y >= 50.0;
        }
        assert!(left && right && top && bottom);
    }

    #[test]
    fn test_fixed_schedule() {
        let rules = Ruleset::slayfast();
        let mut spawner = Spawner::new(&rules);
        // 1.5 s at 16 Hz = 24 ticks
        assert_eq!(spawner.interval_ticks, 24);
        let spawned: u32 = (0..24).map(|_| spawner.step(&rules)).sum();
        assert_eq!(spawned, 2);
        let spawned: u32 = (0..24).map(|_| spawner.step(&rules)).sum();
        assert_eq!(spawned, 2);
        assert_eq!(spawner.interval_ticks, 24);
    }

    #[test]
    fn test_escalating_schedule() {
        let rules = Ruleset::shape_slayer();
        let mut spawner = Spawner::new(&rules);
        assert_eq!(spawner.interval_ticks, 128);

        for _ in 0..127 {
            assert_eq!(spawner.step(&rules), 0);
        }
        assert_eq!(spawner.step(&rules), 1);
        assert_eq!(spawner.per_spawn, 2);
        assert!((spawner.interval_secs - 3.8).abs() < 1e-5);
        assert_eq!(spawner.interval_ticks, 121);
    }

    #[test]
    fn test_escalation_stops_at_floor() {
        let rules = Ruleset::shape_slayer();
        let mut spawner = Spawner::new(&rules);
        for _ in 0..10_000 {
            spawner.step(&rules);
        }
        // Shrinks while above 1 s, so it ends just under the floor
        assert!(spawner.interval_secs <= 1.0);
        assert!(spawner.interval_secs > 0.95 * 0.95);
        assert_eq!(spawner.interval_ticks, rules.secs_to_ticks(spawner.interval_secs));
    }

    #[test]
    fn test_spawn_tick_places_enemies_off_screen() {
        let mut state = GameState::new(Ruleset::slayfast(), 3);
        for _ in 0..24 {
            spawn_tick(&mut state);
        }
        assert_eq!(state.enemies.len(), 2);
        for enemy in &state.enemies {
            let d = enemy.pos - state.player.pos;
            assert!(d.x.abs() >= state.screen.x || d.y.abs() >= state.screen.y);
            assert_eq!(enemy.prev_pos, enemy.pos);
            assert_eq!(enemy.health, state.rules.enemy.health);
        }
    }
}
