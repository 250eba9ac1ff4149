//! Simulation State
//!
//! Everything one session owns, in a single aggregate. The tick function
//! takes it by `&mut`; nothing lives in globals, so independent instances
//! can run side by side.

use serde::{Serialize, Deserialize};

use crate::core::hash::{StateHash, StateHasher, compute_state_hash};
use crate::core::rng::DeterministicRng;
use crate::game::camera::Camera;
use crate::game::config::{CameraMode, SimConfig};
use crate::game::entity::{Behavior, Coin, Enemy, Player, Tree};
use crate::game::lifecycle::{phase, PlayerPhase, Session};

// =============================================================================
// WORLD
// =============================================================================

/// Streamed entities and the spawn horizon.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Hazards
    pub enemies: Vec<Enemy>,
    /// Collectibles
    pub coins: Vec<Coin>,
    /// Scenery
    pub trees: Vec<Tree>,
    /// World is generated up to this x
    pub next_spawn_x: f32,
    /// The previous slot held an enemy
    pub last_enemy: bool,
    next_entity_id: u32,
}

impl World {
    /// Empty world with the spawn horizon at `next_spawn_x`.
    pub fn new(next_spawn_x: f32) -> Self {
        Self {
            next_spawn_x,
            ..Self::default()
        }
    }

    /// Allocate an entity id. Ids are never reused within a session.
    pub fn alloc_id(&mut self) -> u32 {
        let id = self.next_entity_id;
        self.next_entity_id = self.next_entity_id.wrapping_add(1);
        id
    }

    /// Total live entities.
    pub fn entity_count(&self) -> usize {
        self.enemies.len() + self.coins.len() + self.trees.len()
    }

    /// Drop every entity and move the horizon to `next_spawn_x`.
    pub fn reset(&mut self, next_spawn_x: f32) {
        self.enemies.clear();
        self.coins.clear();
        self.trees.clear();
        self.next_spawn_x = next_spawn_x;
        self.last_enemy = false;
    }
}

// =============================================================================
// SIMULATION STATE
// =============================================================================

/// Complete state of one play session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Ticks simulated so far
    pub tick: u64,
    /// Seed the RNG started from
    pub rng_seed: u64,
    /// Spawn randomness
    pub rng: DeterministicRng,
    /// Scroll offset
    pub camera: Camera,
    /// The hero
    pub player: Player,
    /// Enemies, coins, trees and the spawn horizon
    pub world: World,
    /// Score, high score, game-over and heart-flash timers
    pub session: Session,
}

impl SimulationState {
    /// Fresh session. The world stays empty until the first tick streams it.
    pub fn new(rng_seed: u64, config: &SimConfig) -> Self {
        let camera = Camera::ORIGIN;
        let player = Player::spawn(
            camera.spawn_point(config),
            config.rules.hearts_max,
            &config.sprites,
        );
        let world = World::new(initial_horizon(&camera, &player, config));

        Self {
            tick: 0,
            rng_seed,
            rng: DeterministicRng::new(rng_seed),
            camera,
            player,
            world,
            session: Session::default(),
        }
    }

    /// Back to the starting conditions after game over.
    ///
    /// Lives, score, camera, player and world reset; the tick counter, RNG
    /// stream and high score carry on.
    pub fn restart(&mut self, config: &SimConfig) {
        self.camera = Camera::ORIGIN;
        self.player = Player::spawn(
            self.camera.spawn_point(config),
            config.rules.hearts_max,
            &config.sprites,
        );
        let horizon = initial_horizon(&self.camera, &self.player, config);
        self.world.reset(horizon);
        self.session.reset_run();
    }

    /// Current player phase.
    pub fn phase(&self) -> PlayerPhase {
        phase(&self.player, &self.session)
    }

    /// SHA-256 over everything that affects future ticks.
    ///
    /// Floats are hashed by bit pattern.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.rng_seed, |h| {
            let [s0, s1] = self.rng.state();
            h.update_u64(s0);
            h.update_u64(s1);
            h.update_f32(self.camera.x);

            hash_player(h, &self.player);

            h.update_u32(self.world.enemies.len() as u32);
            for enemy in &self.world.enemies {
                h.update_u32(enemy.id);
                h.update_str(&enemy.sprite);
                h.update_vec2(enemy.pos);
                match enemy.behavior {
                    Behavior::Static => h.update_u8(0),
                    Behavior::Horizontal { min_x, max_x, vx } => {
                        h.update_u8(1);
                        h.update_f32(min_x);
                        h.update_f32(max_x);
                        h.update_f32(vx);
                    }
                    Behavior::Vertical { min_y, max_y, vy } => {
                        h.update_u8(2);
                        h.update_f32(min_y);
                        h.update_f32(max_y);
                        h.update_f32(vy);
                    }
                }
            }

            h.update_u32(self.world.coins.len() as u32);
            for coin in &self.world.coins {
                h.update_u32(coin.id);
                h.update_vec2(coin.pos);
            }

            h.update_u32(self.world.trees.len() as u32);
            for tree in &self.world.trees {
                h.update_u32(tree.id);
                h.update_str(&tree.sprite);
                h.update_vec2(tree.pos);
            }

            h.update_f32(self.world.next_spawn_x);
            h.update_bool(self.world.last_enemy);

            h.update_u32(self.session.score);
            h.update_u32(self.session.high_score);
            h.update_u32(self.session.game_over.remaining());
            h.update_u8(self.session.heart_flash.index.unwrap_or(u8::MAX));
            h.update_u32(self.session.heart_flash.timer.remaining());
        })
    }
}

fn hash_player(h: &mut StateHasher, player: &Player) {
    h.update_vec2(player.pos);
    h.update_vec2(player.vel);
    h.update_str(player.pose.sprite_name());
    h.update_u32(player.walk_timer);
    h.update_u8(player.lives());
    h.update_u32(player.invulnerability.remaining());
    h.update_u32(player.coyote.remaining());
    h.update_u32(player.jump_buffer.remaining());
}

/// Spawn horizon on (re)start: a fixed distance past the right screen edge
/// in runner mode, past the player otherwise.
fn initial_horizon(camera: &Camera, player: &Player, config: &SimConfig) -> f32 {
    match config.camera.mode {
        CameraMode::Runner => camera.x + config.viewport.width + config.spawn.initial_offset,
        CameraMode::FreeFollow => player.pos.x + config.spawn.initial_offset,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let config = SimConfig::default();
        let state = SimulationState::new(42, &config);

        assert_eq!(state.tick, 0);
        assert_eq!(state.camera.x, 0.0);
        assert_eq!(state.player.lives(), 3);
        assert_eq!(state.player.pos.x, 320.0);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.world.next_spawn_x, 1580.0);
        assert_eq!(state.world.entity_count(), 0);
        assert_eq!(state.phase(), PlayerPhase::Normal);
    }

    #[test]
    fn test_legacy_initial_horizon() {
        let config = SimConfig::legacy();
        let state = SimulationState::new(1, &config);
        assert_eq!(state.player.pos.x, 120.0);
        assert_eq!(state.world.next_spawn_x, 420.0);
    }

    #[test]
    fn test_hash_determinism() {
        let config = SimConfig::default();
        let a = SimulationState::new(12345, &config);
        let b = SimulationState::new(12345, &config);
        assert_eq!(a.compute_hash(), b.compute_hash());

        let c = SimulationState::new(54321, &config);
        assert_ne!(a.compute_hash(), c.compute_hash());
    }

    #[test]
    fn test_hash_sees_entities() {
        let config = SimConfig::default();
        let mut state = SimulationState::new(7, &config);
        let before = state.compute_hash();

        let id = state.world.alloc_id();
        state.world.coins.push(Coin {
            id,
            pos: crate::core::vec2::Vec2::new(500.0, 620.0),
            size: config.sprites.size_of("coin"),
        });
        assert_ne!(state.compute_hash(), before);
    }

    #[test]
    fn test_restart_keeps_high_score_and_ids() {
        let config = SimConfig::default();
        let mut state = SimulationState::new(7, &config);
        state.camera.x = 5000.0;
        state.session.score = 12;
        state.session.high_score = 12;
        state.world.last_enemy = true;
        let first = state.world.alloc_id();

        state.restart(&config);

        assert_eq!(state.camera.x, 0.0);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.high_score, 12);
        assert_eq!(state.player.lives(), 3);
        assert!(!state.world.last_enemy);
        assert_eq!(state.world.next_spawn_x, 1580.0);
        assert!(state.world.alloc_id() > first);
    }

    #[test]
    fn test_state_serializes() {
        let config = SimConfig::default();
        let state = SimulationState::new(3, &config);
        let bytes = bincode::serialize(&state).unwrap();
        let back: SimulationState = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back.compute_hash(), state.compute_hash());
    }
}
