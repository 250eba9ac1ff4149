//! Simulation Tick
//!
//! One fixed-rate step of the whole game. Given the same state, input and
//! config, a tick always produces the same next state and events.

use tracing::{debug, warn};

use crate::game::collision::{first_enemy_hit, take_coin_hits};
use crate::game::config::SimConfig;
use crate::game::events::{DamageSource, GameEvent};
use crate::game::input::{InputFrame, InputRecording};
use crate::game::lifecycle::{collect_coin, take_damage};
use crate::game::physics::{
    apply_gravity, apply_horizontal_input, hitbox, integrate_vertical, on_ground,
    update_enemies, update_jump_assist, update_pose,
};
use crate::game::spawn::ensure_world_ahead;
use crate::game::state::SimulationState;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Whether the session restarted this tick
    pub restarted: bool,
}

/// Run one simulation tick.
///
/// # Order
///
/// While game over is active only the countdown runs. Otherwise:
/// camera, gravity, jump assist, vertical move, enemy hits, coin pickups,
/// enemy patrols, camera follow, world streaming, fall-out check, pose,
/// heart flash.
pub fn tick(state: &mut SimulationState, input: &InputFrame, config: &SimConfig) -> TickResult {
    let mut result = TickResult::default();

    state.tick += 1;
    let now = state.tick;
    let timers = config.timer_ticks();

    // Frozen until the countdown restarts the run
    if state.session.is_game_over() {
        if state.session.game_over.tick() {
            state.restart(config);
            result.events.push(GameEvent::restarted(now));
            result.restarted = true;
            debug!("Restarted at tick {} (high score {})", now, state.session.high_score);
        }
        return result;
    }

    state.player.invulnerability.tick();

    // 1. Camera / horizontal movement
    state.camera.step(&mut state.player, config);
    apply_horizontal_input(&mut state.player, input, config);

    // 2. Gravity and variable jump height
    apply_gravity(&mut state.player, input.jump_held(), &config.physics);

    // 3. Coyote time and jump buffer
    let grounded = on_ground(&state.player, config);
    if update_jump_assist(
        &mut state.player,
        grounded,
        input.jump_pressed(),
        &timers,
        config.physics.jump_velocity,
    ) {
        result.events.push(GameEvent::jumped(now, state.player.vel.y));
    }

    // 4. Vertical move and landing
    let ground_y = config.ground_y();
    integrate_vertical(&mut state.player, ground_y);

    // 5. Enemy contact (one hit per tick at most)
    if !state.player.is_invulnerable() {
        let hb = hitbox(&state.player, &config.physics);
        if let Some(enemy_id) = first_enemy_hit(&hb, &state.world.enemies) {
            take_damage(
                &mut state.player,
                &mut state.session,
                DamageSource::Enemy { enemy_id },
                ground_y,
                &timers,
                now,
                &mut result.events,
            );
        }
    }

    // 6. Coins (every overlapping coin)
    let hb = hitbox(&state.player, &config.physics);
    for coin in take_coin_hits(&hb, &mut state.world.coins) {
        collect_coin(&mut state.session, coin.id, &config.rules, now, &mut result.events);
    }

    // 7. Enemy patrols
    update_enemies(&mut state.world.enemies);

    // 8. Camera tracking and world streaming
    state.camera.follow(&mut state.player, config);
    let reference_x = state.camera.reference_x(&state.player, config);
    ensure_world_ahead(&mut state.world, reference_x, state.camera.x, config, &mut state.rng);

    // 9. Fell below the world
    if state.player.top() > config.viewport.height + config.physics.fall_out_margin {
        if !state.player.is_invulnerable() {
            take_damage(
                &mut state.player,
                &mut state.session,
                DamageSource::FellOut,
                ground_y,
                &timers,
                now,
                &mut result.events,
            );
        }
        if !state.session.is_game_over() {
            state.player.pos.y = ground_y;
            state.player.vel.y = 0.0;
        }
    }

    // 10. Animation and HUD timers
    let grounded = on_ground(&state.player, config);
    update_pose(
        &mut state.player,
        grounded,
        config.camera.mode,
        timers.walk_frame,
        &config.sprites,
    );
    state.session.heart_flash.tick();

    debug_assert!(state.player.lives() <= config.rules.hearts_max);

    result
}

/// Replay a session from recorded inputs.
///
/// Runs one tick per recorded frame. Returns the final state and every
/// event produced along the way.
pub fn replay(
    initial_state: SimulationState,
    recording: &InputRecording,
    config: &SimConfig,
) -> (SimulationState, Vec<GameEvent>) {
    let mut state = initial_state;
    let mut all_events = Vec::new();

    if state.rng_seed != recording.rng_seed {
        warn!(
            "Replaying recording seeded {} on state seeded {}",
            recording.rng_seed, state.rng_seed
        );
    }

    for (_, frame) in recording.replay_iter() {
        let result = tick(&mut state, &frame, config);
        all_events.extend(result.events);
    }

    (state, all_events)
}
