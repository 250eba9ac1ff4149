//! Game Logic Module
//!
//! All gameplay simulation code. Deterministic for a given seed and input.
//!
//! ## Module Structure
//!
//! - `config`: Tuning, JSON loading, validation
//! - `sprite`: Image sizes and vertical offsets
//! - `entity`: Player, enemies, coins, trees
//! - `camera`: Runner and free-follow scrolling
//! - `input`: Input frames, recording and replay
//! - `physics`: Gravity, jump assist, patrols, hitbox
//! - `collision`: Enemy and coin overlap detection
//! - `spawn`: World streaming ahead of the camera
//! - `lifecycle`: Lives, invulnerability, game over, scoring
//! - `state`: Simulation state aggregate
//! - `tick`: One simulation step
//! - `events`: Game events for cues and replay checks
//! - `render`: Render snapshot and renderer trait
//! - `audio`: Sound cue dispatch

pub mod config;
pub mod sprite;
pub mod entity;
pub mod camera;
pub mod input;
pub mod physics;
pub mod collision;
pub mod spawn;
pub mod lifecycle;
pub mod state;
pub mod tick;
pub mod events;
pub mod render;
pub mod audio;

// Re-export key types
pub use config::{CameraMode, ConfigError, SimConfig};
pub use entity::{Behavior, BehaviorKind, Coin, Enemy, Player, PlayerPose, Tree};
pub use input::{InputFrame, InputRecording, InputState};
pub use lifecycle::PlayerPhase;
pub use state::{SimulationState, World};
pub use tick::{replay, tick, TickResult};
pub use events::{GameEvent, GameEventData};
pub use render::{RenderFrame, Renderer};
pub use audio::{play_cues, CueError, SoundPlayer};
