//! Demo mode - an autopilot that plays the game
//!
//! Produces the same [`TickInput`] a human would: it starts and restarts the
//! session, backs away from the nearest enemy, and shoots it with the element
//! that beats it.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Enemy, GamePhase, SimulationState, TickInput};

/// Enemies closer than this make the autopilot retreat
const DANGER_RADIUS: f32 = 4.0 * TILE_SIZE;

/// Input for the next tick
pub fn autopilot(state: &SimulationState) -> TickInput {
    match state.phase {
        GamePhase::NotStarted => {
            return TickInput {
                start: true,
                ..Default::default()
            };
        }
        GamePhase::GameOver => return TickInput::default(),
        GamePhase::Active => {}
    }

    let me = state.player.center();
    let Some(target) = nearest_enemy(&state.enemies, me) else {
        return TickInput::default();
    };

    let mut input = TickInput {
        aim: Some(target.center()),
        fire: true,
        select: Some(target.element.countered_by()),
        ..Default::default()
    };

    let away = me - target.center();
    if away.length() < DANGER_RADIUS {
        // Dead zone keeps the player from jittering on one axis
        let dead = PLAYER_SPEED;
        input.left = away.x < -dead;
        input.right = away.x > dead;
        input.up = away.y < -dead;
        input.down = away.y > dead;
    }

    input
}

fn nearest_enemy(enemies: &[Enemy], from: Vec2) -> Option<&Enemy> {
    enemies.iter().min_by(|a, b| {
        a.center()
            .distance_squared(from)
            .partial_cmp(&b.center().distance_squared(from))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}
