//! Rate-limited enemy spawning

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::element::Element;
use super::enemy::Enemy;
use super::map::TileMap;
use crate::consts::*;
use crate::tile_to_world;

/// Spawns at most one enemy per tick, gated by a cooldown and the population cap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnController {
    /// Ticks until the next spawn is allowed
    pub timer: u32,
}

impl SpawnController {
    pub fn new() -> Self {
        Self { timer: 0 }
    }

    /// Count down one tick, then try to spawn
    ///
    /// The timer is only reset when an enemy is actually produced. A full
    /// population or a failed position search leaves it at zero so the next
    /// tick tries again.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        enemies: &[Enemy],
        map: &TileMap,
        rng: &mut R,
        id: u32,
    ) -> Option<Enemy> {
        self.timer = self.timer.saturating_sub(1);

        if enemies.len() >= MAX_ENEMIES || self.timer > 0 {
            return None;
        }

        let Some(pos) = random_spawn_position(map, rng) else {
            log::warn!(
                "No spawnable tile found after {} draws, skipping spawn",
                SPAWN_RETRY_LIMIT
            );
            return None;
        };

        let element = Element::random(rng);
        self.timer = SPAWN_DELAY_TICKS;
        Some(Enemy::new(id, pos, element))
    }
}

/// Draw random tiles until one is spawnable, up to `SPAWN_RETRY_LIMIT` draws
pub fn random_spawn_position<R: Rng + ?Sized>(map: &TileMap, rng: &mut R) -> Option<Vec2> {
    (0..SPAWN_RETRY_LIMIT).find_map(|_| {
        let col = rng.random_range(0..map.width());
        let row = rng.random_range(0..map.height());
        map.is_spawnable(col, row).then(|| tile_to_world(col, row))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::{Rect, collides_any};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> TileMap {
        TileMap::default_arena().unwrap()
    }

    #[test]
    fn test_spawns_when_timer_elapsed() {
        let map = arena();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawner = SpawnController::new();

        let enemy = spawner.tick(&[], &map, &mut rng, 1).expect("spawn");
        assert_eq!(enemy.id, 1);
        assert_eq!(spawner.timer, SPAWN_DELAY_TICKS);
    }

    #[test]
    fn test_waits_for_delay() {
        let map = arena();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut spawner = SpawnController::new();
        let mut enemies = vec![spawner.tick(&[], &map, &mut rng, 1).unwrap()];

        for _ in 0..SPAWN_DELAY_TICKS - 1 {
            assert!(spawner.tick(&enemies, &map, &mut rng, 2).is_none());
        }
        enemies.push(spawner.tick(&enemies, &map, &mut rng, 2).expect("spawn after delay"));
        assert_eq!(enemies.len(), 2);
    }

    #[test]
    fn test_population_cap_blocks_spawn_without_resetting_timer() {
        let map = arena();
        let mut rng = Pcg32::seed_from_u64(3);
        let enemies: Vec<Enemy> = (0..MAX_ENEMIES as u32)
            .map(|id| Enemy::new(id, tile_to_world(1, 1), Element::Fire))
            .collect();

        let mut spawner = SpawnController { timer: 5 };
        assert!(spawner.tick(&enemies, &map, &mut rng, 99).is_none());
        assert_eq!(spawner.timer, 4);

        spawner.timer = 0;
        assert!(spawner.tick(&enemies, &map, &mut rng, 99).is_none());
        assert_eq!(spawner.timer, 0);
    }

    #[test]
    fn test_spawn_never_overlaps_walls() {
        let map = arena();
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..500 {
            let pos = random_spawn_position(&map, &mut rng).expect("arena has floor");
            let rect = Rect::at(pos, Enemy::size());
            assert!(!collides_any(&rect, map.walls()));
            let (col, row) = crate::world_to_tile(pos).unwrap();
            assert!(map.is_spawnable(col, row));
        }
    }

    /// Always yields zero, so every draw lands on tile (0, 0)
    #[derive(Default)]
    struct ZeroRng {
        words: usize,
    }

    impl rand::RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            self.words += 1;
            0
        }

        fn next_u64(&mut self) -> u64 {
            self.words += 1;
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            self.words += 1;
            dst.fill(0);
        }
    }

    #[test]
    fn test_exhausted_search_skips_and_retries() {
        let walled_corner = TileMap::parse(&["#....", ".....", ".....", ".....", "....."]).unwrap();
        let open = TileMap::parse(&["....."; 5]).unwrap();
        let mut rng = ZeroRng::default();
        let mut spawner = SpawnController::new();

        assert!(random_spawn_position(&walled_corner, &mut rng).is_none());
        assert!(rng.words >= 2 * SPAWN_RETRY_LIMIT as usize);

        for _ in 0..3 {
            assert!(spawner.tick(&[], &walled_corner, &mut rng, 1).is_none());
            assert_eq!(spawner.timer, 0);
        }

        // Timer stayed at zero, so the very next call spawns once a tile is free
        let enemy = spawner.tick(&[], &open, &mut rng, 1).expect("spawn on retry");
        assert_eq!(enemy.pos, Vec2::ZERO);
        assert_eq!(spawner.timer, SPAWN_DELAY_TICKS);
    }

    #[test]
    fn test_population_never_exceeds_cap() {
        let map = arena();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut spawner = SpawnController::new();
        let mut enemies = Vec::new();
        for id in 0..(SPAWN_DELAY_TICKS * (MAX_ENEMIES as u32 + 5)) {
            if let Some(e) = spawner.tick(&enemies, &map, &mut rng, id) {
                enemies.push(e);
            }
            assert!(enemies.len() <= MAX_ENEMIES);
        }
        assert_eq!(enemies.len(), MAX_ENEMIES);
    }
}
