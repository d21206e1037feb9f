//! Read-only frame data for the presentation layer

use glam::Vec2;
use serde::Serialize;

use super::element::Element;
use super::state::{GamePhase, SimulationState};
use crate::consts::MAX_HEALTH;

/// Something drawn at a position with an element tint
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub pos: Vec2,
    pub element: Element,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub tick: u64,
    pub remaining_secs: u64,
    pub health: u8,
    pub max_health: u8,
    pub player: Sprite,
    pub enemies: Vec<Sprite>,
    pub projectiles: Vec<Sprite>,
}

impl FrameSnapshot {
    pub fn capture(state: &SimulationState) -> Self {
        Self {
            phase: state.phase,
            tick: state.time_ticks,
            remaining_secs: state.remaining_secs,
            health: state.player.health,
            max_health: MAX_HEALTH,
            player: Sprite {
                pos: state.player.pos,
                element: state.player.element,
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| Sprite {
                    pos: e.pos,
                    element: e.element,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| Sprite {
                    pos: p.pos,
                    element: p.element,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
