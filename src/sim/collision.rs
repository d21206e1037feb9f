//! Axis-aligned collision against static obstacles
//!
//! Every moving entity resolves its motion through [`move_with_collision`]:
//! the X component is applied and tested first, then the Y component. A
//! blocked axis is reverted outright, with no sub-pixel correction, which lets
//! entities slide along walls instead of sticking on diagonal contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size with its top-left corner at `pos`
    pub fn at(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Rectangle of the given size centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::at(center - size * 0.5, size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict overlap test: rectangles that only share an edge do not collide
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Check whether `rect` overlaps any obstacle
pub fn collides_any(rect: &Rect, obstacles: &[Rect]) -> bool {
    obstacles.iter().any(|o| rect.intersects(o))
}

/// Move a box of `size` at `pos` by `delta`, resolving each axis separately
///
/// Returns the new top-left position. An axis whose move would overlap an
/// obstacle is left unchanged.
pub fn move_with_collision(pos: Vec2, size: Vec2, delta: Vec2, obstacles: &[Rect]) -> Vec2 {
    let mut next = pos;

    if delta.x != 0.0 {
        next.x += delta.x;
        if collides_any(&Rect::at(next, size), obstacles) {
            next.x = pos.x;
        }
    }

    if delta.y != 0.0 {
        next.y += delta.y;
        if collides_any(&Rect::at(next, size), obstacles) {
            next.y = pos.y;
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TILE: f32 = 16.0;

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, TILE, TILE);
        let b = Rect::new(TILE, 0.0, TILE, TILE);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));

        let c = Rect::new(TILE - 0.5, 0.0, TILE, TILE);
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_blocked_axis_is_reverted() {
        // Player at (0,0), wall covering (16,0)-(32,16)
        let walls = [Rect::new(16.0, 0.0, TILE, TILE)];
        let size = Vec2::splat(TILE);

        let next = move_with_collision(Vec2::ZERO, size, Vec2::new(16.0, 0.0), &walls);
        assert_eq!(next, Vec2::ZERO);
    }

    #[test]
    fn test_slides_along_wall() {
        // Wall to the right; diagonal move keeps the Y component
        let walls = [Rect::new(16.0, 0.0, TILE, 4.0 * TILE)];
        let size = Vec2::splat(TILE);

        let next = move_with_collision(Vec2::ZERO, size, Vec2::new(3.0, 3.0), &walls);
        assert_eq!(next, Vec2::new(0.0, 3.0));
    }

    #[test]
    fn test_unblocked_move_applies_both_axes() {
        let next = move_with_collision(Vec2::ZERO, Vec2::splat(TILE), Vec2::new(2.0, -1.0), &[]);
        assert_eq!(next, Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_center_and_centered_agree() {
        let r = Rect::centered(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        assert_eq!(r, Rect::new(8.0, 17.0, 4.0, 6.0));
        assert_eq!(r.center(), Vec2::new(10.0, 20.0));
    }

    fn wall_grid() -> impl Strategy<Value = Vec<Rect>> {
        prop::collection::vec((0u8..12, 0u8..12), 0..16).prop_map(|cells| {
            cells
                .into_iter()
                .map(|(c, r)| Rect::new(c as f32 * TILE, r as f32 * TILE, TILE, TILE))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_moved_box_never_enters_obstacle(
            walls in wall_grid(),
            start in (0.0f32..192.0, 0.0f32..192.0),
            moves in prop::collection::vec((-20.0f32..20.0, -20.0f32..20.0), 1..40),
        ) {
            let size = Vec2::splat(TILE);
            let mut pos = Vec2::new(start.0, start.1);
            prop_assume!(!collides_any(&Rect::at(pos, size), &walls));

            for (dx, dy) in moves {
                pos = move_with_collision(pos, size, Vec2::new(dx, dy), &walls);
                prop_assert!(!collides_any(&Rect::at(pos, size), &walls));
            }
        }
    }
}
