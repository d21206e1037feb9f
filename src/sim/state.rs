//! Session state and core simulation types
//!
//! Everything a tick reads or writes lives in [`SimulationState`]; there is no
//! process-wide game instance.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::element::Element;
use super::enemy::Enemy;
use super::map::TileMap;
use super::player::Player;
use super::projectile::Projectile;
use super::spawn::SpawnController;
use crate::consts::*;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for any input
    NotStarted,
    /// Active gameplay
    Active,
    /// Run ended; waiting for restart or quit
    GameOver,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Player health reached zero
    Defeated,
    /// Countdown reached zero
    TimeUp,
}

/// Side effects of a tick, for audio and presentation collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Restarted,
    /// A projectile of this element was fired
    Shot(Element),
    /// The player lost a point of health
    PlayerHit { health: u8 },
    EnemySpawned { id: u32, element: Element },
    EnemyDefeated { id: u32, element: Element },
    /// A projectile hit something and was removed
    ProjectileSpent { id: u32 },
    GameOver(GameOverReason),
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Read-only after construction
    pub map: TileMap,
    pub player: Player,
    /// Active enemies, in spawn order
    pub enemies: Vec<Enemy>,
    /// Active projectiles, in firing order
    pub projectiles: Vec<Projectile>,
    pub spawner: SpawnController,
    /// Ticks until the player may fire again
    pub shoot_cooldown: u32,
    /// Active ticks simulated this session
    pub time_ticks: u64,
    /// Monotonic timestamp (ms) the countdown started from
    pub started_at_ms: u64,
    /// Whole seconds left on the countdown
    pub remaining_secs: u64,
    /// Set when the player asks to quit from the game over screen
    pub quit_requested: bool,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl SimulationState {
    /// Create a session on the title screen
    pub fn new(map: TileMap, seed: u64) -> Self {
        let player = Player::new(map.player_spawn());
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            map,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            spawner: SpawnController::new(),
            shoot_cooldown: 0,
            time_ticks: 0,
            started_at_ms: 0,
            remaining_secs: GAME_DURATION_SECS,
            quit_requested: false,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// ID the next call to `next_entity_id` will return
    pub fn peek_entity_id(&self) -> u32 {
        self.next_id
    }

    /// Leave the title screen; the countdown starts now
    pub fn start(&mut self, now_ms: u64) {
        self.started_at_ms = now_ms;
        self.remaining_secs = GAME_DURATION_SECS;
        self.phase = GamePhase::Active;
        self.push_event(GameEvent::Started);
        log::info!("Session started (seed {})", self.seed);
    }

    /// Put every entity and timer back to its starting value and resume play
    pub fn reset(&mut self, now_ms: u64) {
        self.player = Player::new(self.map.player_spawn());
        self.enemies.clear();
        self.projectiles.clear();
        self.spawner = SpawnController::new();
        self.shoot_cooldown = 0;
        self.time_ticks = 0;
        self.started_at_ms = now_ms;
        self.remaining_secs = GAME_DURATION_SECS;
        self.quit_requested = false;
        self.phase = GamePhase::Active;
        self.push_event(GameEvent::Restarted);
        log::info!("Session restarted");
    }

    /// Transition to game over (idempotent)
    pub fn end_game(&mut self, reason: GameOverReason) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.player.alive = false;
        self.push_event(GameEvent::GameOver(reason));
        log::info!(
            "Game over ({:?}) after {} ticks, {} enemies on the field",
            reason,
            self.time_ticks,
            self.enemies.len()
        );
    }

    /// Recompute the countdown from the monotonic clock
    ///
    /// Never increases, even if `now_ms` steps backwards.
    pub fn refresh_countdown(&mut self, now_ms: u64) -> u64 {
        let elapsed_secs = now_ms.saturating_sub(self.started_at_ms) / 1000;
        let remaining = GAME_DURATION_SECS.saturating_sub(elapsed_secs);
        self.remaining_secs = self.remaining_secs.min(remaining);
        self.remaining_secs
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pending events, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SimulationState {
        SimulationState::new(TileMap::default_arena().unwrap(), 42)
    }

    #[test]
    fn test_new_session_waits_on_title() {
        let s = state();
        assert_eq!(s.phase, GamePhase::NotStarted);
        assert_eq!(s.player.pos, s.map.player_spawn());
        assert_eq!(s.player.health, MAX_HEALTH);
        assert_eq!(s.remaining_secs, GAME_DURATION_SECS);
    }

    #[test]
    fn test_countdown_is_monotonic() {
        let mut s = state();
        s.start(10_000);
        assert_eq!(s.refresh_countdown(10_000), GAME_DURATION_SECS);
        assert_eq!(s.refresh_countdown(12_500), GAME_DURATION_SECS - 2);
        // Clock stepping backwards does not give time back
        assert_eq!(s.refresh_countdown(10_500), GAME_DURATION_SECS - 2);
        assert_eq!(s.refresh_countdown(10_000 + GAME_DURATION_SECS * 1000 + 5_000), 0);
    }

    #[test]
    fn test_end_game_is_one_shot() {
        let mut s = state();
        s.start(0);
        s.end_game(GameOverReason::TimeUp);
        s.end_game(GameOverReason::Defeated);
        let over: Vec<_> = s
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver(_)))
            .collect();
        assert_eq!(over, vec![GameEvent::GameOver(GameOverReason::TimeUp)]);
        assert!(!s.player.alive);
    }

    #[test]
    fn test_reset_restores_session() {
        let mut s = state();
        s.start(0);
        let id = s.next_entity_id();
        s.enemies.push(Enemy::new(id, s.map.player_spawn(), Element::Air));
        s.player.health = 1;
        s.shoot_cooldown = 7;
        s.end_game(GameOverReason::Defeated);

        s.reset(5_000);
        assert_eq!(s.phase, GamePhase::Active);
        assert!(s.enemies.is_empty());
        assert!(s.projectiles.is_empty());
        assert_eq!(s.player.health, MAX_HEALTH);
        assert!(s.player.alive);
        assert_eq!(s.shoot_cooldown, 0);
        assert_eq!(s.started_at_ms, 5_000);
        assert_eq!(s.remaining_secs, GAME_DURATION_SECS);
    }
}
