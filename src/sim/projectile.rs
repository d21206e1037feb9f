//! Fire-and-forget elemental projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, collides_any};
use super::element::Element;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Center (world pixels)
    pub pos: Vec2,
    /// Per-tick displacement, fixed at creation
    pub vel: Vec2,
    pub element: Element,
}

impl Projectile {
    /// Aim from `origin` at `target`
    ///
    /// Returns `None` when the two points coincide and there is no direction
    /// to fly in.
    pub fn new(id: u32, origin: Vec2, target: Vec2, element: Element) -> Option<Self> {
        let dir = (target - origin).try_normalize()?;
        Some(Self {
            id,
            pos: origin,
            vel: dir * PROJECTILE_SPEED,
            element,
        })
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, Vec2::splat(PROJECTILE_SIZE))
    }

    /// Advance one tick along the launch direction
    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn hits_wall(&self, obstacles: &[Rect]) -> bool {
        collides_any(&self.rect(), obstacles)
    }
}
