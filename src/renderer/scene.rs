//! Builds the frame's triangle list from a session
//!
//! World shapes go through the camera; the health bar is drawn in screen
//! space on top.

use glam::Vec2;

use super::shapes::{circle, circle_segments, line, rect};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Camera, GameState, Session};

/// Draw-list for one frame, in screen pixels
pub fn build_scene(session: &Session, attack_flash: bool) -> Vec<Vertex> {
    let state = &session.state;
    let camera = &state.camera;
    let positions = session.render_positions();

    let mut vertices = Vec::with_capacity(4096);
    grid(&mut vertices, camera, state.screen);

    let player = &state.player;
    if attack_flash {
        let offset = player.attack_center() - player.pos;
        push_world_circle(
            &mut vertices,
            camera,
            positions.player + offset,
            player.attack_radius,
            colors::ATTACK,
        );
    }

    push_world_circle(&mut vertices, camera, positions.player, player.size, colors::PLAYER);
    push_world_circle(
        &mut vertices,
        camera,
        positions.player + player.direction * 10.0,
        player.size / 3.0,
        colors::PLAYER_EYE,
    );

    for (enemy, &pos) in state.enemies.iter().zip(&positions.enemies) {
        push_world_circle(&mut vertices, camera, pos, enemy.size, colors::ENEMY);
        push_world_circle(
            &mut vertices,
            camera,
            pos,
            (enemy.size - 8.0).max(0.0),
            colors::ENEMY_CORE,
        );
    }

    health_bar(&mut vertices, state);
    vertices
}

fn push_world_circle(
    vertices: &mut Vec<Vertex>,
    camera: &Camera,
    center: Vec2,
    radius: f32,
    color: [f32; 4],
) {
    let screen_radius = radius * camera.zoom;
    if screen_radius <= 0.0 {
        return;
    }
    let center = camera.world_to_screen(center);
    vertices.extend(circle(center, screen_radius, color, circle_segments(screen_radius)));
}

/// Background grid lines that fall inside the screen
fn grid(vertices: &mut Vec<Vertex>, camera: &Camera, screen: Vec2) {
    let half_extent = GRID_CELLS as f32 * GRID_SPACING / 2.0;
    let top_left = camera.screen_to_world(Vec2::ZERO);
    let bottom_right = camera.screen_to_world(screen);

    for i in 0..=GRID_CELLS {
        let coord = -half_extent + i as f32 * GRID_SPACING;

        if coord >= top_left.x && coord <= bottom_right.x {
            let from = camera.world_to_screen(Vec2::new(coord, -half_extent));
            let to = camera.world_to_screen(Vec2::new(coord, half_extent));
            vertices.extend(line(from, to, 1.0, colors::GRID));
        }
        if coord >= top_left.y && coord <= bottom_right.y {
            let from = camera.world_to_screen(Vec2::new(-half_extent, coord));
            let to = camera.world_to_screen(Vec2::new(half_extent, coord));
            vertices.extend(line(from, to, 1.0, colors::GRID));
        }
    }
}

fn health_bar(vertices: &mut Vec<Vertex>, state: &GameState) {
    let origin = Vec2::new(HEALTH_BAR_X, HEALTH_BAR_Y);
    vertices.extend(rect(
        origin,
        Vec2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT),
        colors::HEALTH_BACK,
    ));
    let fill = HEALTH_BAR_WIDTH * state.player.health_fraction();
    vertices.extend(rect(
        origin,
        Vec2::new(fill, HEALTH_BAR_HEIGHT),
        colors::HEALTH_FILL,
    ));
}

/// Health readout shown next to the bar
pub fn health_text(state: &GameState) -> String {
    format!("{}/{}", state.player.health.max(0), state.player.max_health)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn count_color(vertices: &[Vertex], color: [f32; 4]) -> usize {
        vertices.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_scene_draws_every_enemy() {
        let mut session = Session::new(&GameConfig::default(), 1);
        session.state.spawn_enemy(Vec2::new(100.0, 0.0));
        session.state.spawn_enemy(Vec2::new(-100.0, 50.0));

        let vertices = build_scene(&session, false);
        let enemy_verts = count_color(&vertices, colors::ENEMY);
        let per_enemy = circle_segments(32.0) as usize * 3;
        assert_eq!(enemy_verts, 2 * per_enemy);
        assert_eq!(count_color(&vertices, colors::ATTACK), 0);
    }

    #[test]
    fn test_attack_flash_adds_circle() {
        let session = Session::new(&GameConfig::default(), 1);
        let without = build_scene(&session, false).len();
        let with = build_scene(&session, true).len();
        assert!(with > without);
    }

    #[test]
    fn test_player_drawn_at_screen_centre() {
        let session = Session::new(&GameConfig::default(), 1);
        let vertices = build_scene(&session, false);
        let centre = session.state.screen / 2.0;
        let first_player = vertices
            .iter()
            .find(|v| v.color == colors::PLAYER)
            .expect("player drawn");
        assert_eq!(Vec2::from(first_player.position), centre);
    }

    #[test]
    fn test_health_bar_fill_tracks_health() {
        let mut session = Session::new(&GameConfig::default(), 1);
        session.state.player.health = 25;
        let vertices = build_scene(&session, false);
        let max_x = vertices
            .iter()
            .filter(|v| v.color == colors::HEALTH_FILL)
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_x, HEALTH_BAR_X + 128.0);

        session.state.player.health = -3;
        let vertices = build_scene(&session, false);
        assert_eq!(count_color(&vertices, colors::HEALTH_FILL), 0);
        assert_eq!(health_text(&session.state), "0/100");
    }
}
