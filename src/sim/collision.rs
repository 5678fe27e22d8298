//! Circle collision checks and their responses
//!
//! Everything in the arena is a circle: player, enemies and the melee attack.

use glam::Vec2;

use super::state::{Enemy, Player};

/// Circle-vs-circle overlap test (touching counts as overlapping)
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a_pos.distance_squared(b_pos) <= reach * reach
}

/// Push overlapping enemies apart
///
/// Each overlapping pair moves `step` units away from each other along the
/// line between their centres. Centres that coincide separate along X.
/// Returns the number of overlapping pairs.
pub fn separate_enemies(enemies: &mut [Enemy], step: f32) -> usize {
    let mut pairs = 0;
    for i in 0..enemies.len() {
        for j in (i + 1)..enemies.len() {
            let (a, b) = (&enemies[i], &enemies[j]);
            if !circles_overlap(a.pos, a.size, b.pos, b.size) {
                continue;
            }
            let axis = (a.pos - b.pos).try_normalize().unwrap_or(Vec2::NEG_X);
            enemies[i].pos += axis * step;
            enemies[j].pos -= axis * step;
            pairs += 1;
        }
    }
    pairs
}

/// Apply contact damage from every enemy touching the player
///
/// Returns the total damage dealt this call.
pub fn apply_contact_damage(player: &mut Player, enemies: &[Enemy]) -> i32 {
    let damage: i32 = enemies
        .iter()
        .filter(|e| circles_overlap(player.pos, player.size, e.pos, e.size))
        .map(|e| e.damage)
        .sum();
    player.health -= damage;
    damage
}

/// Resolve a melee swing: every enemy inside the attack circle takes damage
///
/// Returns the number of enemies hit.
pub fn apply_attack(player: &Player, enemies: &mut [Enemy]) -> usize {
    let center = player.attack_center();
    let mut hits = 0;
    for enemy in enemies.iter_mut() {
        if circles_overlap(enemy.pos, enemy.size, center, player.attack_radius) {
            enemy.health -= player.damage;
            hits += 1;
        }
    }
    hits
}

/// Remove enemies at or below zero health, keeping spawn order
///
/// Returns how many were removed.
pub fn remove_dead(enemies: &mut Vec<Enemy>) -> u32 {
    let before = enemies.len();
    enemies.retain(|e| !e.is_dead());
    (before - enemies.len()) as u32
}
