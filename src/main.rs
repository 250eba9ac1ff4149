//! Superkid Headless Simulator
//!
//! Runs a scripted session without a window, then replays the recorded
//! inputs and checks that both runs end in the same state.
//!
//! Usage: `superkid-sim [config.json]`

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use superkid::{
    DEFAULT_TICK_RATE, VERSION,
    game::{
        audio::{play_cues, CueError, SoundPlayer},
        events::GameEventData,
        input::{InputFrame, InputRecording, InputState},
        render::{RenderFrame, Renderer},
        state::SimulationState,
        tick::{replay, tick},
        config::SimConfig,
    },
};

/// Ticks in the demo session (one minute at the default rate).
const SESSION_TICKS: u64 = 3600;

fn main() -> Result<()> {
    let default_filter = if cfg!(feature = "debug-tracing") { "superkid=trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Superkid Runner v{}", VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => {
            info!("No config given, using defaults");
            SimConfig::default()
        }
    };
    info!(
        "Tick rate: {} Hz (default {}), camera {:?}",
        config.tick_rate, DEFAULT_TICK_RATE, config.camera.mode
    );

    demo_session(&config)
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    SimConfig::from_json_str(&json).with_context(|| format!("loading config {}", path.display()))
}

/// Keyboard stand-in: taps jump on a fixed rhythm and alternates direction.
struct ScriptedKeys {
    tick: u64,
    pending_press: bool,
}

impl ScriptedKeys {
    fn advance(&mut self, tick: u64) {
        self.tick = tick;
        if tick % 53 == 0 {
            self.pending_press = true;
        }
    }
}

impl InputState for ScriptedKeys {
    fn left_held(&self) -> bool {
        (self.tick / 240) % 4 == 3
    }

    fn right_held(&self) -> bool {
        (self.tick / 240) % 4 != 3
    }

    fn jump_held(&self) -> bool {
        self.tick % 53 < 14
    }

    fn take_jump_press(&mut self) -> bool {
        std::mem::take(&mut self.pending_press)
    }
}

/// Renderer that only reports what it would draw.
#[derive(Default)]
struct FrameLog {
    frames: u64,
    sprites: u64,
}

impl Renderer for FrameLog {
    fn render(&mut self, frame: &RenderFrame) {
        self.frames += 1;
        self.sprites += (frame.trees.len() + frame.coins.len() + frame.enemies.len()) as u64
            + frame.player.is_some() as u64;
    }
}

/// Sound backend that logs cues instead of playing them.
struct CueLog;

impl SoundPlayer for CueLog {
    fn coin_collected(&mut self) -> Result<(), CueError> {
        debug!("cue: coin");
        Ok(())
    }

    fn player_hit(&mut self) -> Result<(), CueError> {
        debug!("cue: hit");
        Ok(())
    }
}

fn demo_session(config: &SimConfig) -> Result<()> {
    info!("=== Starting Demo Session ===");

    let rng_seed = 12345u64;
    let mut state = SimulationState::new(rng_seed, config);
    let mut recording = InputRecording::new(rng_seed);
    let mut keys = ScriptedKeys { tick: 0, pending_press: false };
    let mut renderer = FrameLog::default();
    let mut sounds = CueLog;

    info!("RNG Seed: {}", rng_seed);
    info!("Running {} ticks...", SESSION_TICKS);

    let mut total_events = 0;
    for t in 0..SESSION_TICKS {
        keys.advance(t);
        let input = InputFrame::sample(&mut keys);
        recording.record(state.tick, input);

        let result = tick(&mut state, &input, config);
        total_events += result.events.len();
        play_cues(&result.events, &mut sounds);
        renderer.render(&RenderFrame::capture(&state, config));

        for event in &result.events {
            match &event.data {
                GameEventData::PlayerHit { source, lives_left } => {
                    info!("Tick {}: hit by {:?}, {} lives left", event.tick, source, lives_left);
                }
                GameEventData::GameOverStarted { final_score, .. } => {
                    info!("Tick {}: game over, score {}", event.tick, final_score);
                }
                GameEventData::Restarted => {
                    info!("Tick {}: restarted", event.tick);
                }
                _ => {}
            }
        }

        if t > 0 && t % 600 == 0 {
            info!(
                "Tick {}: cam_x {:.0}, score {}, best {}, {} entities",
                t,
                state.camera.x,
                state.session.score,
                state.session.high_score,
                state.world.entity_count()
            );
        }
    }

    info!("=== Session Results ===");
    let hash = state.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));
    info!("Score: {}, high score: {}", state.session.score, state.session.high_score);
    info!("Total events: {}", total_events);
    info!("Frames rendered: {} ({} sprites)", renderer.frames, renderer.sprites);

    let bytes = recording.to_bytes().context("encoding input recording")?;
    info!(
        "Recording: {} input changes, {} bytes",
        recording.delta_count(),
        bytes.len()
    );

    info!("=== Verifying Determinism ===");
    let decoded = InputRecording::from_bytes(&bytes).context("decoding input recording")?;
    let (replayed, _) = replay(SimulationState::new(rng_seed, config), &decoded, config);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }

    Ok(())
}
