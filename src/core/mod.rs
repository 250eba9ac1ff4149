//! Core deterministic primitives.
//!
//! Geometry, randomness, countdowns and hashing. Nothing in here knows about
//! players, enemies or coins.

pub mod rect;
pub mod vec2;
pub mod rng;
pub mod timer;
pub mod hash;

// Re-export core types
pub use rect::Rect;
pub use vec2::Vec2;
pub use rng::{DeterministicRng, RandomSource};
pub use timer::{Countdown, ticks_for};
pub use hash::{StateHash, StateHasher, compute_state_hash};
