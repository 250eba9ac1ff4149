//! Player and Enemy Kinematics
//!
//! Gravity, variable jump height, coyote time, jump buffering, the ground
//! clamp, patrol movement and the hero animation. All functions operate on
//! one entity at a time and never touch the RNG.

use crate::core::rect::Rect;
use crate::game::config::{CameraMode, PhysicsConfig, SimConfig, TimerTicks};
use crate::game::entity::{Behavior, Bounds, Enemy, Player, PlayerPose, WALK_FRAMES};
use crate::game::input::InputFrame;
use crate::game::sprite::SpriteCatalog;

/// Half-extent of the ground strip used by [`on_ground`].
const GROUND_STRIP_REACH: f32 = 1_000_000.0;

// =============================================================================
// HITBOX
// =============================================================================

/// Player collision rectangle.
///
/// A narrower, slightly shorter rectangle than the sprite: horizontally
/// centered and sharing its bottom edge. Edges snap to whole pixels.
pub fn hitbox(player: &Player, physics: &PhysicsConfig) -> Rect {
    let sprite = player.rect();
    let width = (sprite.width * physics.hitbox_width_ratio).trunc();
    let height = (sprite.height * physics.hitbox_height_ratio).trunc();
    let left = (sprite.center_x() - (width / 2.0).floor()).trunc();
    let top = (sprite.bottom() - height).trunc();
    Rect::new(left, top, width, height)
}

/// Thin probe rectangle under the hitbox's feet.
pub fn ground_probe(hitbox: &Rect, physics: &PhysicsConfig) -> Rect {
    Rect::new(
        hitbox.left + physics.probe_inset,
        hitbox.bottom() - 2.0,
        hitbox.width - 2.0 * physics.probe_inset,
        physics.probe_height,
    )
}

/// True if the player's feet touch the ground strip.
pub fn on_ground(player: &Player, config: &SimConfig) -> bool {
    let probe = ground_probe(&hitbox(player, &config.physics), &config.physics);
    let strip = Rect::new(
        -GROUND_STRIP_REACH,
        config.ground_y() - 2.0,
        2.0 * GROUND_STRIP_REACH,
        4.0,
    );
    probe.intersects(&strip)
}

// =============================================================================
// PLAYER
// =============================================================================

/// Free-follow horizontal control. Runner mode leaves x to the camera.
///
/// The sprite's left edge never crosses the world origin.
pub fn apply_horizontal_input(player: &mut Player, input: &InputFrame, config: &SimConfig) {
    if config.camera.mode != CameraMode::FreeFollow {
        return;
    }

    player.vel.x = input.horizontal() * config.physics.move_speed;
    player.pos.x += player.vel.x;

    let half_width = player.size.width / 2.0;
    if player.pos.x - half_width < 0.0 {
        player.pos.x = half_width;
        if player.vel.x < 0.0 {
            player.vel.x = 0.0;
        }
    }
}

/// Accumulate gravity up to terminal speed.
///
/// Releasing jump while still rising adds extra pull, cutting the hop short.
pub fn apply_gravity(player: &mut Player, jump_held: bool, physics: &PhysicsConfig) {
    player.vel.y = (player.vel.y + physics.gravity).min(physics.max_fall);
    if player.vel.y < 0.0 && !jump_held {
        player.vel.y += physics.extra_fall;
    }
}

/// Coyote and jump-buffer bookkeeping for one tick.
///
/// A jump fires iff both windows are open on the same tick; both are then
/// closed, so one press yields at most one jump. Returns true if it fired.
pub fn update_jump_assist(
    player: &mut Player,
    grounded: bool,
    jump_pressed: bool,
    timers: &TimerTicks,
    jump_velocity: f32,
) -> bool {
    if grounded {
        player.coyote.start(timers.coyote);
    } else {
        player.coyote.tick();
    }

    if jump_pressed {
        player.jump_buffer.start(timers.jump_buffer);
    }

    let jumped = player.jump_buffer.is_active() && player.coyote.is_active();
    if jumped {
        player.vel.y = jump_velocity;
        player.jump_buffer.clear();
        player.coyote.clear();
    }
    player.jump_buffer.tick();

    jumped
}

/// Integrate vertical velocity and land on the ground line.
pub fn integrate_vertical(player: &mut Player, ground_y: f32) {
    player.pos.y += player.vel.y;
    if player.vel.y >= 0.0 && player.bottom() >= ground_y {
        player.pos.y = ground_y;
        player.vel.y = 0.0;
    }
}

/// Pick the pose for this tick and advance the walk cycle.
///
/// Airborne: jump while rising, fall otherwise. Grounded: walk while moving
/// (always in runner mode), idle when standing still.
pub fn update_pose(
    player: &mut Player,
    grounded: bool,
    mode: CameraMode,
    walk_frame_ticks: u32,
    catalog: &SpriteCatalog,
) {
    let pose = if !grounded {
        if player.vel.y < 0.0 {
            PlayerPose::Jump
        } else {
            PlayerPose::Fall
        }
    } else if mode == CameraMode::Runner || player.vel.x != 0.0 {
        let mut frame = match player.pose {
            PlayerPose::Walk(frame) => frame,
            _ => 0,
        };
        player.walk_timer += 1;
        if player.walk_timer >= walk_frame_ticks {
            player.walk_timer = 0;
            frame = (frame + 1) % WALK_FRAMES.len() as u8;
        }
        PlayerPose::Walk(frame)
    } else {
        PlayerPose::Idle
    };

    player.set_pose(pose, catalog);
}

// =============================================================================
// ENEMIES
// =============================================================================

/// Move one enemy along its patrol axis.
///
/// Velocity flips sign once the enemy reaches the bound it is moving
/// toward. Horizontal patrols test sprite edges, vertical ones the anchor.
pub fn update_enemy(enemy: &mut Enemy) {
    match enemy.behavior {
        Behavior::Static => {}
        Behavior::Horizontal { min_x, max_x, ref mut vx } => {
            enemy.pos.x += *vx;
            let left = enemy.pos.x - enemy.size.width / 2.0;
            let right = left + enemy.size.width;
            if (*vx < 0.0 && left <= min_x) || (*vx > 0.0 && right >= max_x) {
                *vx = -*vx;
            }
        }
        Behavior::Vertical { min_y, max_y, ref mut vy } => {
            enemy.pos.y += *vy;
            if (*vy < 0.0 && enemy.pos.y <= min_y) || (*vy > 0.0 && enemy.pos.y >= max_y) {
                *vy = -*vy;
            }
        }
    }
}

/// Move every enemy.
pub fn update_enemies(enemies: &mut [Enemy]) {
    for enemy in enemies {
        update_enemy(enemy);
    }
}

// =============================================================================
// TESTS
// =============================================================================
