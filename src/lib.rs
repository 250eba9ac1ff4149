//! # Superkid Runner
//!
//! Deterministic simulation core for a 2D side-scrolling arcade runner.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SUPERKID RUNNER                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rect.rs     - Axis-aligned rectangles                   │
//! │  ├── vec2.rs     - 2D vector                                 │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  ├── timer.rs    - Tick countdowns                           │
//! │  └── hash.rs     - State hashing for replay checks           │
//! │                                                              │
//! │  game/           - Gameplay simulation                       │
//! │  ├── config.rs   - Tuning and validation                     │
//! │  ├── entity.rs   - Player, enemies, coins, trees             │
//! │  ├── physics.rs  - Gravity, jump assist, patrols             │
//! │  ├── spawn.rs    - World streaming                           │
//! │  ├── lifecycle.rs- Lives, game over, scoring                 │
//! │  ├── tick.rs     - Simulation step and replay                │
//! │  ├── render.rs   - Render snapshot                           │
//! │  └── audio.rs    - Sound cue dispatch                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Given the same seed, config and input frames, the simulation produces
//! identical states and events:
//! - All state lives in one `SimulationState`, no globals
//! - No system time dependencies; timers count ticks
//! - All randomness from seeded Xorshift128+
//!
//! Drawing, audio and input polling stay outside, behind the `Renderer`,
//! `SoundPlayer` and `InputState` traits.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use core::rect::Rect;
pub use core::vec2::Vec2;
pub use core::rng::{DeterministicRng, RandomSource};
pub use game::config::SimConfig;
pub use game::input::{InputFrame, InputRecording};
pub use game::state::SimulationState;
pub use game::tick::{tick, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default simulation tick rate (Hz)
pub const DEFAULT_TICK_RATE: u32 = 60;
