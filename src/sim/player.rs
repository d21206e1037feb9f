//! The player character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, move_with_collision};
use super::element::Element;
use crate::consts::*;

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (world pixels)
    pub pos: Vec2,
    pub health: u8,
    pub alive: bool,
    /// Pending displacement from the last hit, decays every tick
    pub knockback: Vec2,
    /// Ticks left in the current invulnerability window
    pub invulnerable_ticks: u32,
    /// Element of the next projectile
    pub element: Element,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            health: MAX_HEALTH,
            alive: true,
            knockback: Vec2::ZERO,
            invulnerable_ticks: 0,
            element: Element::Fire,
        }
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

    /// Movement delta for the held direction keys
    ///
    /// Diagonals are not normalized, so diagonal movement is faster.
    pub fn input_delta(up: bool, down: bool, left: bool, right: bool) -> Vec2 {
        Vec2::new(crate::axis(left, right), crate::axis(up, down)) * PLAYER_SPEED
    }

    /// Move by `delta`, resolving each axis against the obstacles
    pub fn move_by(&mut self, delta: Vec2, obstacles: &[Rect]) {
        self.pos = move_with_collision(self.pos, Self::size(), delta, obstacles);
    }

    /// Advance per-tick timers
    pub fn update(&mut self) {
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
    }

    /// Displace by the pending knockback, then decay it
    pub fn apply_knockback(&mut self, obstacles: &[Rect]) {
        if self.knockback == Vec2::ZERO {
            return;
        }
        self.move_by(self.knockback, obstacles);
        self.knockback *= KNOCKBACK_DECAY;
        if self.knockback.length() < KNOCKBACK_EPSILON {
            self.knockback = Vec2::ZERO;
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    /// Take one point of damage from something at `source`
    ///
    /// Returns false without effect while invulnerable or already dead.
    pub fn take_damage(&mut self, source: Vec2) -> bool {
        if !self.alive || self.is_invulnerable() {
            return false;
        }

        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.alive = false;
        }

        let away = (self.center() - source).normalize_or(Vec2::NEG_Y);
        self.knockback = away * KNOCKBACK_STRENGTH;
        self.invulnerable_ticks = INVULNERABILITY_TICKS;
        true
    }
}
