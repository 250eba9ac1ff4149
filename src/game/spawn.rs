//! World Streaming
//!
//! Procedural generation of the endless course. Each pass fills spawn slots
//! from the current spawn horizon up to a fixed look-ahead past the reference
//! x, then retires everything that scrolled far enough behind the camera.

use tracing::{trace, warn};

use crate::core::rng::RandomSource;
use crate::core::vec2::Vec2;
use crate::game::config::SimConfig;
use crate::game::entity::{Behavior, BehaviorKind, Bounds, Coin, Enemy, Tree};
use crate::game::sprite::COIN;
use crate::game::state::World;

/// What a spawn slot produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    /// An enemy with the given behavior
    Enemy(BehaviorKind),
    /// A coin
    Coin,
}

/// One generated slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnedSlot {
    /// Slot x
    pub x: f32,
    /// Enemy or coin
    pub kind: SlotKind,
    /// Whether a tree was added near the slot
    pub tree: bool,
}

/// Outcome of one streaming pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreamReport {
    /// Slots generated, in order
    pub slots: Vec<SpawnedSlot>,
    /// Entities retired behind the camera
    pub pruned: usize,
}

impl StreamReport {
    /// True if the pass changed nothing.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.pruned == 0
    }
}

// =============================================================================
// SPAWNERS
// =============================================================================

/// Place an enemy bottom-anchored on the ground at `x`.
///
/// The image is drawn from the configured list; its vertical offset comes
/// from the sprite catalog. Patrol parameters are drawn per behavior.
pub fn spawn_enemy(
    world: &mut World,
    x: f32,
    kind: BehaviorKind,
    config: &SimConfig,
    rng: &mut impl RandomSource,
) -> u32 {
    let spawn = &config.spawn;
    let sprite = rng.choose(&spawn.enemy_images).cloned().unwrap_or_default();
    let size = config.sprites.size_of(&sprite);
    let base_y = config.ground_y() + config.sprites.offset_y(&sprite);

    let behavior = match kind {
        BehaviorKind::Static => Behavior::Static,
        BehaviorKind::Horizontal => {
            let min_x = x - rng.next_int_range(spawn.patrol_reach_min, spawn.patrol_reach_max) as f32;
            let max_x = x + rng.next_int_range(spawn.patrol_reach_min, spawn.patrol_reach_max) as f32;
            let vx = patrol_speed(&spawn.patrol_speeds, rng);
            Behavior::Horizontal { min_x, max_x, vx }
        }
        BehaviorKind::Vertical => {
            let min_y = base_y - rng.next_int_range(spawn.hover_reach_min, spawn.hover_reach_max) as f32;
            let vy = patrol_speed(&spawn.patrol_speeds, rng);
            Behavior::Vertical { min_y, max_y: base_y, vy }
        }
    };

    let id = world.alloc_id();
    world.enemies.push(Enemy {
        id,
        sprite,
        pos: Vec2::new(x, base_y),
        size,
        behavior,
    });
    id
}

/// Place a coin centered at `x`, a fixed height above the screen bottom.
pub fn spawn_coin(world: &mut World, x: f32, config: &SimConfig) -> u32 {
    let id = world.alloc_id();
    world.coins.push(Coin {
        id,
        pos: Vec2::new(x, config.viewport.height - config.spawn.coin_height),
        size: config.sprites.size_of(COIN),
    });
    id
}

/// Place a decorative tree bottom-anchored at `x`.
pub fn spawn_tree(world: &mut World, x: f32, config: &SimConfig, rng: &mut impl RandomSource) -> u32 {
    let sprite = rng.choose(&config.spawn.tree_images).cloned().unwrap_or_default();
    let size = config.sprites.size_of(&sprite);
    let id = world.alloc_id();
    world.trees.push(Tree {
        id,
        sprite,
        pos: Vec2::new(x, config.viewport.height - config.spawn.tree_height),
        size,
    });
    id
}

fn patrol_speed(speeds: &[f32], rng: &mut impl RandomSource) -> f32 {
    rng.choose(speeds).copied().unwrap_or(1.0)
}

// =============================================================================
// STREAMER
// =============================================================================

/// Generate the world ahead of `reference_x` and retire entities behind
/// `cam_x`.
///
/// After the pass `next_spawn_x >= reference_x + viewport.width`. An enemy
/// slot is always followed by a coin slot. Calling again without moving the
/// camera changes nothing.
pub fn ensure_world_ahead(
    world: &mut World,
    reference_x: f32,
    cam_x: f32,
    config: &SimConfig,
    rng: &mut impl RandomSource,
) -> StreamReport {
    let spawn = &config.spawn;
    let width = config.viewport.width;
    let target_x = reference_x + (width * spawn.lookahead).trunc();
    let floor_x = reference_x + width;
    let horizon_before = world.next_spawn_x;

    // Skip over stale ground (e.g. right after a restart)
    if world.next_spawn_x < floor_x {
        world.next_spawn_x = floor_x;
    }

    let mut report = StreamReport::default();

    while world.next_spawn_x < target_x {
        let x = world.next_spawn_x;

        let kind = if !world.last_enemy && rng.chance(spawn.enemy_chance) {
            let behavior = rng
                .choose(&spawn.enemy_behaviors)
                .copied()
                .unwrap_or(BehaviorKind::Static);
            spawn_enemy(world, x, behavior, config, rng);
            world.last_enemy = true;
            SlotKind::Enemy(behavior)
        } else {
            spawn_coin(world, x, config);
            world.last_enemy = false;
            SlotKind::Coin
        };

        let tree = rng.chance(spawn.tree_chance);
        if tree {
            let offset = rng.next_int_range(spawn.tree_offset_min, spawn.tree_offset_max);
            spawn_tree(world, x + offset as f32, config, rng);
        }

        trace!("spawn slot at {:.0}: {:?}{}", x, kind, if tree { " + tree" } else { "" });
        report.slots.push(SpawnedSlot { x, kind, tree });

        let next_x = x + rng.next_int_range(spawn.gap_min, spawn.gap_max) as f32;
        if next_x <= x {
            // Gap is below f32 resolution this far out
            warn!("spawn horizon stalled at x={:.0}, stopping pass", x);
            break;
        }
        world.next_spawn_x = next_x;
    }

    report.pruned = prune_behind(world, cam_x, config);

    debug_assert!(world.next_spawn_x >= horizon_before, "spawn horizon moved backward");
    debug_assert!(world.next_spawn_x >= floor_x);

    report
}

/// Drop every entity whose right edge is more than `offscreen_clean`
/// behind the camera. Returns how many were removed.
pub fn prune_behind(world: &mut World, cam_x: f32, config: &SimConfig) -> usize {
    let left_limit = cam_x - config.spawn.offscreen_clean;
    let pruned = retain_ahead(&mut world.coins, left_limit)
        + retain_ahead(&mut world.enemies, left_limit)
        + retain_ahead(&mut world.trees, left_limit);
    if pruned > 0 {
        trace!("pruned {} entities behind x={:.0}", pruned, left_limit);
    }
    pruned
}

fn retain_ahead<T: Bounds>(items: &mut Vec<T>, left_limit: f32) -> usize {
    let before = items.len();
    items.retain(|item| item.rect().right() >= left_limit);
    before - items.len()
}

// =============================================================================
// TESTS
// =============================================================================
