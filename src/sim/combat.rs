//! Projectile flight and elemental hit resolution
//!
//! Projectiles are processed in insertion order. Each one is consumed by the
//! first thing it touches: a wall, the edge of the map, or the first live enemy (in insertion
//! order, not the nearest) whose rectangle it overlaps. The enemy only dies
//! when the projectile's element beats its element.
//!
//! Removals are marked during the scan and compacted afterwards, so an enemy
//! killed by an earlier projectile is invisible to later ones in the same tick.

use super::collision::Rect;
use super::element::Element;
use super::enemy::Enemy;
use super::projectile::Projectile;

/// What happened to a projectile that was consumed this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    /// Hit a wall or flew off the map
    Blocked { projectile: u32 },
    /// Hit an enemy it is not effective against
    Resisted { projectile: u32, enemy: u32 },
    /// Hit an enemy it beats; the enemy is removed
    Defeated {
        projectile: u32,
        enemy: u32,
        element: Element,
    },
}

/// Whether a projectile of `attack` element kills an enemy of `target` element
#[inline]
pub fn is_effective(attack: Element, target: Element) -> bool {
    attack.beats() == target
}

/// Advance all projectiles one tick and resolve their hits
///
/// `bounds` is the playable area. A projectile that no longer overlaps it is
/// dropped, so layouts without a closed wall border cannot accumulate shots.
pub fn resolve_projectiles(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut Vec<Enemy>,
    obstacles: &[Rect],
    bounds: &Rect,
) -> Vec<CombatOutcome> {
    let mut outcomes = Vec::new();
    let mut projectile_spent = vec![false; projectiles.len()];
    let mut enemy_dead = vec![false; enemies.len()];

    for (pi, projectile) in projectiles.iter_mut().enumerate() {
        projectile.update();

        if projectile.hits_wall(obstacles) || !projectile.rect().intersects(bounds) {
            projectile_spent[pi] = true;
            outcomes.push(CombatOutcome::Blocked {
                projectile: projectile.id,
            });
            continue;
        }

        let rect = projectile.rect();
        let hit = enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !enemy_dead[*ei] && rect.intersects(&enemy.rect()));

        if let Some((ei, enemy)) = hit {
            projectile_spent[pi] = true;
            if is_effective(projectile.element, enemy.element) {
                enemy_dead[ei] = true;
                outcomes.push(CombatOutcome::Defeated {
                    projectile: projectile.id,
                    enemy: enemy.id,
                    element: enemy.element,
                });
            } else {
                outcomes.push(CombatOutcome::Resisted {
                    projectile: projectile.id,
                    enemy: enemy.id,
                });
            }
        }
    }

    let mut spent = projectile_spent.into_iter();
    projectiles.retain(|_| !spent.next().unwrap_or(false));
    let mut dead = enemy_dead.into_iter();
    enemies.retain(|_| !dead.next().unwrap_or(false));

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;

    fn field() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 400.0)
    }

    fn projectile_at(id: u32, center: Vec2, element: Element) -> Projectile {
        // Aimed straight down so one tick moves it PROJECTILE_SPEED along +Y
        let mut p = Projectile::new(id, center, center + Vec2::Y, element).unwrap();
        p.pos -= p.vel;
        p
    }

    #[test]
    fn test_effective_hit_removes_both() {
        let mut enemies = vec![
            Enemy::new(1, Vec2::new(200.0, 200.0), Element::Water),
            Enemy::new(2, Vec2::new(40.0, 40.0), Element::Air),
        ];
        let mut projectiles = vec![projectile_at(10, Vec2::new(48.0, 48.0), Element::Fire)];

        let outcomes = resolve_projectiles(&mut projectiles, &mut enemies, &[], &field());

        assert_eq!(
            outcomes,
            vec![CombatOutcome::Defeated {
                projectile: 10,
                enemy: 2,
                element: Element::Air
            }]
        );
        assert!(projectiles.is_empty());
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].id, 1);
    }

    #[test]
    fn test_ineffective_hit_consumes_projectile_only() {
        let mut enemies = vec![Enemy::new(1, Vec2::new(40.0, 40.0), Element::Water)];
        let mut projectiles = vec![projectile_at(10, Vec2::new(48.0, 48.0), Element::Fire)];

        let outcomes = resolve_projectiles(&mut projectiles, &mut enemies, &[], &field());

        assert_eq!(outcomes, vec![CombatOutcome::Resisted { projectile: 10, enemy: 1 }]);
        assert!(projectiles.is_empty());
        assert_eq!(enemies.len(), 1);
    }

    #[test]
    fn test_first_enemy_in_order_takes_the_hit() {
        // Both enemies overlap the projectile; the first one listed wins even
        // though the second is the one the projectile would beat.
        let mut enemies = vec![
            Enemy::new(1, Vec2::new(44.0, 44.0), Element::Water),
            Enemy::new(2, Vec2::new(40.0, 40.0), Element::Air),
        ];
        let mut projectiles = vec![projectile_at(10, Vec2::new(48.0, 48.0), Element::Fire)];

        let outcomes = resolve_projectiles(&mut projectiles, &mut enemies, &[], &field());

        assert_eq!(outcomes, vec![CombatOutcome::Resisted { projectile: 10, enemy: 1 }]);
        assert_eq!(enemies.len(), 2);
    }

    #[test]
    fn test_dead_enemy_not_hit_twice() {
        let mut enemies = vec![
            Enemy::new(1, Vec2::new(40.0, 40.0), Element::Air),
            Enemy::new(2, Vec2::new(42.0, 42.0), Element::Air),
        ];
        let mut projectiles = vec![
            projectile_at(10, Vec2::new(48.0, 48.0), Element::Fire),
            projectile_at(11, Vec2::new(49.0, 49.0), Element::Fire),
        ];

        let outcomes = resolve_projectiles(&mut projectiles, &mut enemies, &[], &field());

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], CombatOutcome::Defeated { enemy: 1, .. }));
        assert!(matches!(outcomes[1], CombatOutcome::Defeated { enemy: 2, .. }));
        assert!(enemies.is_empty());
        assert!(projectiles.is_empty());
    }

    #[test]
    fn test_wall_takes_priority_over_enemy() {
        let walls = [Rect::new(40.0, 40.0 + PROJECTILE_SPEED, TILE_SIZE, TILE_SIZE)];
        let mut enemies = vec![Enemy::new(1, Vec2::new(40.0, 40.0), Element::Air)];
        let mut projectiles = vec![projectile_at(10, Vec2::new(48.0, 48.0), Element::Fire)];

        let outcomes = resolve_projectiles(&mut projectiles, &mut enemies, &walls, &field());

        assert_eq!(outcomes, vec![CombatOutcome::Blocked { projectile: 10 }]);
        assert_eq!(enemies.len(), 1);
        assert!(projectiles.is_empty());
    }

    #[test]
    fn test_missing_projectile_keeps_flying() {
        let mut enemies = vec![Enemy::new(1, Vec2::new(300.0, 300.0), Element::Air)];
        let mut projectiles = vec![projectile_at(10, Vec2::new(48.0, 48.0), Element::Fire)];

        let outcomes = resolve_projectiles(&mut projectiles, &mut enemies, &[], &field());

        assert!(outcomes.is_empty());
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].pos, Vec2::new(48.0, 48.0));
    }

    #[test]
    fn test_projectile_leaving_the_map_is_dropped() {
        let mut enemies = Vec::new();
        // Rect spans 397..403 after the step, still overlapping the field
        let mut projectiles = vec![projectile_at(10, Vec2::new(200.0, 400.0), Element::Water)];
        assert!(resolve_projectiles(&mut projectiles, &mut enemies, &[], &field()).is_empty());
        assert_eq!(projectiles.len(), 1);

        // Next step puts it at 403..409, fully outside
        let outcomes = resolve_projectiles(&mut projectiles, &mut enemies, &[], &field());
        assert_eq!(outcomes, vec![CombatOutcome::Blocked { projectile: 10 }]);
        assert!(projectiles.is_empty());
    }

    #[test]
    fn test_effectiveness_matches_beats() {
        for attack in Element::ALL {
            for target in Element::ALL {
                assert_eq!(is_effective(attack, target), attack.beats() == target);
            }
        }
    }
}
