//! Enemies: direct pursuit with neighbour separation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, move_with_collision};
use super::element::Element;
use crate::consts::*;

/// A hostile entity chasing the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner (world pixels)
    pub pos: Vec2,
    pub element: Element,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, element: Element) -> Self {
        Self { id, pos, element }
    }

    pub fn size() -> Vec2 {
        Vec2::splat(TILE_SIZE)
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, Self::size())
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Unit vector toward `target`, zero when already there
    pub fn pursuit(&self, target: Vec2) -> Vec2 {
        (target - self.pos).normalize_or_zero()
    }

    /// Push away from every other enemy inside `SEPARATION_RADIUS`
    ///
    /// Each neighbour contributes a unit vector pointing away from it, scaled
    /// by how deep inside the radius it sits. Coincident neighbours have no
    /// direction between them, so the lower id is pushed toward -X and the
    /// higher id toward +X.
    pub fn separation(&self, neighbors: &[Enemy]) -> Vec2 {
        neighbors
            .iter()
            .filter(|other| other.id != self.id)
            .fold(Vec2::ZERO, |acc, other| {
                let offset = self.pos - other.pos;
                let dist = offset.length();
                if dist >= SEPARATION_RADIUS {
                    return acc;
                }
                let closeness = 1.0 - dist / SEPARATION_RADIUS;
                let away = offset
                    .try_normalize()
                    .unwrap_or(if self.id < other.id { Vec2::NEG_X } else { Vec2::X });
                acc + away * closeness * SEPARATION_WEIGHT
            })
    }

    /// Steer toward the player while keeping clear of neighbours
    ///
    /// `neighbors` is a snapshot of the enemy set taken before anyone moved
    /// this tick, so the result does not depend on update order.
    pub fn move_towards_player(&mut self, player_pos: Vec2, obstacles: &[Rect], neighbors: &[Enemy]) {
        let steering = self.pursuit(player_pos) + self.separation(neighbors);
        let delta = steering.normalize_or_zero() * ENEMY_SPEED;
        self.pos = move_with_collision(self.pos, Self::size(), delta, obstacles);
    }
}
