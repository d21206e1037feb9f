//! Fixed-rate simulation tick
//!
//! Core game loop that advances the session deterministically. The step
//! order inside an active tick is fixed:
//!
//! 1. player movement from held keys (then element selection and shooting)
//! 2. player timers and knockback
//! 3. player vs enemy contact damage
//! 4. enemy pursuit
//! 5. projectile flight and hit resolution
//! 6. spawn timer and spawn attempt

use glam::Vec2;

use super::combat::{CombatOutcome, resolve_projectiles};
use super::element::Element;
use super::player::Player;
use super::projectile::Projectile;
use super::state::{GameEvent, GameOverReason, GamePhase, SimulationState};
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in world coordinates
    pub aim: Option<Vec2>,
    /// Primary pointer button held
    pub fire: bool,
    /// Element picked with a number key this tick
    pub select: Option<Element>,
    /// Explicit start request (title screen)
    pub start: bool,
    /// Restart request (game over screen)
    pub restart: bool,
    /// Quit request (game over screen)
    pub quit: bool,
}

impl TickInput {
    /// Any input that should leave the title screen
    pub fn wants_start(&self) -> bool {
        self.start
            || self.up
            || self.down
            || self.left
            || self.right
            || self.fire
            || self.select.is_some()
    }

    fn movement(&self) -> Vec2 {
        Player::input_delta(self.up, self.down, self.left, self.right)
    }
}

/// Advance the session by one tick
///
/// `now_ms` is a monotonic timestamp; it only drives the session countdown.
/// Every other timer counts ticks.
pub fn tick(state: &mut SimulationState, input: &TickInput, now_ms: u64) {
    match state.phase {
        GamePhase::NotStarted => {
            if !input.wants_start() {
                return;
            }
            state.start(now_ms);
        }
        GamePhase::GameOver => {
            if input.quit {
                state.quit_requested = true;
                return;
            }
            if !input.restart {
                return;
            }
            state.reset(now_ms);
        }
        GamePhase::Active => {}
    }

    if state.refresh_countdown(now_ms) == 0 {
        state.end_game(GameOverReason::TimeUp);
        return;
    }

    state.time_ticks += 1;

    // 1. Player movement
    state.player.move_by(input.movement(), state.map.walls());
    handle_weapon(state, input);

    // 2. Player timers and knockback
    state.player.update();
    state.player.apply_knockback(state.map.walls());

    // 3. Contact damage, one attempt per overlapping enemy
    if state.player.alive {
        let player_rect = state.player.rect();
        let sources: Vec<Vec2> = state
            .enemies
            .iter()
            .filter(|e| player_rect.intersects(&e.rect()))
            .map(|e| e.center())
            .collect();

        for source in sources {
            if state.player.take_damage(source) {
                let health = state.player.health;
                state.push_event(GameEvent::PlayerHit { health });
                log::debug!("Player hit, health {}", health);
            }
            if !state.player.alive {
                state.end_game(GameOverReason::Defeated);
                break;
            }
        }
    }

    // 4. Enemy pursuit against a pre-move snapshot
    let target = state.player.pos;
    let snapshot = state.enemies.clone();
    for enemy in state.enemies.iter_mut() {
        enemy.move_towards_player(target, state.map.walls(), &snapshot);
    }

    // 5. Projectiles
    let bounds = state.map.bounds();
    let outcomes = resolve_projectiles(
        &mut state.projectiles,
        &mut state.enemies,
        state.map.walls(),
        &bounds,
    );
    for outcome in outcomes {
        match outcome {
            CombatOutcome::Blocked { projectile } | CombatOutcome::Resisted { projectile, .. } => {
                state.push_event(GameEvent::ProjectileSpent { id: projectile });
            }
            CombatOutcome::Defeated {
                projectile,
                enemy,
                element,
            } => {
                state.push_event(GameEvent::ProjectileSpent { id: projectile });
                state.push_event(GameEvent::EnemyDefeated { id: enemy, element });
                log::debug!("Enemy {} ({}) defeated", enemy, element.as_str());
            }
        }
    }

    // 6. Spawning
    let id = state.peek_entity_id();
    if let Some(enemy) = state
        .spawner
        .tick(&state.enemies, &state.map, &mut state.rng, id)
    {
        state.next_entity_id();
        state.push_event(GameEvent::EnemySpawned {
            id: enemy.id,
            element: enemy.element,
        });
        log::debug!(
            "Spawned {} enemy {} at ({}, {})",
            enemy.element.as_str(),
            enemy.id,
            enemy.pos.x,
            enemy.pos.y
        );
        state.enemies.push(enemy);
    }
}

/// Element switching and firing
fn handle_weapon(state: &mut SimulationState, input: &TickInput) {
    if let Some(element) = input.select {
        state.player.element = element;
    }

    state.shoot_cooldown = state.shoot_cooldown.saturating_sub(1);
    if !input.fire || state.shoot_cooldown > 0 {
        return;
    }
    let Some(target) = input.aim else {
        return;
    };

    let id = state.peek_entity_id();
    let element = state.player.element;
    if let Some(projectile) = Projectile::new(id, state.player.center(), target, element) {
        state.next_entity_id();
        state.projectiles.push(projectile);
        state.shoot_cooldown = SHOOT_COOLDOWN_TICKS;
        state.push_event(GameEvent::Shot(element));
    }
}
