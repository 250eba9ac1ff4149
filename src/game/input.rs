//! Input Capture and Recording
//!
//! The simulation consumes one [`InputFrame`] per tick. Frames are sampled
//! from an [`InputState`] collaborator and can be recorded for replay.

use serde::{Serialize, Deserialize};

/// Keyboard (or gamepad) state as seen by the simulation.
///
/// `take_jump_press` is an edge event: it reports a press once and then
/// resets until the key is pressed again.
pub trait InputState {
    /// Left direction held.
    fn left_held(&self) -> bool;
    /// Right direction held.
    fn right_held(&self) -> bool;
    /// Jump key held (controls variable jump height).
    fn jump_held(&self) -> bool;
    /// Consume a pending jump press.
    fn take_jump_press(&mut self) -> bool;
}

// =============================================================================
// INPUT FRAME
// =============================================================================

/// Input state for a single tick.
///
/// Packed into one byte so recordings stay small.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFrame {
    /// Action flags (packed bits):
    /// - Bit 0: Left held
    /// - Bit 1: Right held
    /// - Bit 2: Jump held
    /// - Bit 3: Jump pressed this tick
    /// - Bit 4-7: Reserved
    pub flags: u8,
}

impl InputFrame {
    /// Left flag bit
    pub const FLAG_LEFT: u8 = 0x01;
    /// Right flag bit
    pub const FLAG_RIGHT: u8 = 0x02;
    /// Jump-held flag bit
    pub const FLAG_JUMP_HELD: u8 = 0x04;
    /// Jump-pressed flag bit
    pub const FLAG_JUMP_PRESSED: u8 = 0x08;

    /// No keys.
    pub const IDLE: Self = Self { flags: 0 };

    /// Frame with a fresh jump press (key also held).
    pub const fn jump() -> Self {
        Self { flags: Self::FLAG_JUMP_HELD | Self::FLAG_JUMP_PRESSED }
    }

    /// Frame with the jump key held but no new press.
    pub const fn hold_jump() -> Self {
        Self { flags: Self::FLAG_JUMP_HELD }
    }

    /// Sample a collaborator, consuming its pending jump press.
    pub fn sample(source: &mut impl InputState) -> Self {
        let mut frame = Self::IDLE;
        frame.set(Self::FLAG_LEFT, source.left_held());
        frame.set(Self::FLAG_RIGHT, source.right_held());
        frame.set(Self::FLAG_JUMP_HELD, source.jump_held());
        frame.set(Self::FLAG_JUMP_PRESSED, source.take_jump_press());
        frame
    }

    /// Left held.
    #[inline]
    pub fn left(&self) -> bool {
        self.flags & Self::FLAG_LEFT != 0
    }

    /// Right held.
    #[inline]
    pub fn right(&self) -> bool {
        self.flags & Self::FLAG_RIGHT != 0
    }

    /// Jump held.
    #[inline]
    pub fn jump_held(&self) -> bool {
        self.flags & Self::FLAG_JUMP_HELD != 0
    }

    /// Jump pressed this tick.
    #[inline]
    pub fn jump_pressed(&self) -> bool {
        self.flags & Self::FLAG_JUMP_PRESSED != 0
    }

    /// Horizontal direction: -1, 0 or +1.
    #[inline]
    pub fn horizontal(&self) -> f32 {
        (self.right() as i8 - self.left() as i8) as f32
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u8, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    /// Builder-style [`set`](Self::set).
    #[inline]
    pub fn with(mut self, flag: u8, on: bool) -> Self {
        self.set(flag, on);
        self
    }
}

// =============================================================================
// INPUT RECORDING
// =============================================================================

/// Recording encode/decode failures.
#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    /// Binary encoding failed
    #[error("binary encoding error: {0}")]
    Binary(#[from] bincode::Error),

    /// JSON encoding failed
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Delta-compressed entry: input from `tick` onward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Tick when this input state began
    pub tick: u64,
    /// The new input state
    pub frame: InputFrame,
}

/// Complete input log for one session.
///
/// Only ticks where the input changed are stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputRecording {
    /// RNG seed the session started with
    pub rng_seed: u64,

    /// Last recorded tick, `None` until the first `record`
    pub end_tick: Option<u64>,

    deltas: Vec<InputDelta>,

    #[serde(skip)]
    last_frame: InputFrame,
}

impl InputRecording {
    /// Empty recording for a session seeded with `rng_seed`.
    pub fn new(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            end_tick: None,
            deltas: Vec::with_capacity(256),
            last_frame: InputFrame::IDLE,
        }
    }

    /// Record input for a tick. Only stored if it changed.
    pub fn record(&mut self, tick: u64, frame: InputFrame) {
        self.end_tick = Some(tick);

        if frame != self.last_frame {
            self.deltas.push(InputDelta { tick, frame });
            self.last_frame = frame;
        }
    }

    /// Input in effect at `tick`.
    pub fn input_at(&self, tick: u64) -> InputFrame {
        let idx = self.deltas.partition_point(|d| d.tick <= tick);
        if idx == 0 {
            InputFrame::IDLE
        } else {
            self.deltas[idx - 1].frame
        }
    }

    /// Stored deltas.
    pub fn deltas(&self) -> &[InputDelta] {
        &self.deltas
    }

    /// Number of stored deltas.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// True if no tick was ever recorded.
    pub fn is_empty(&self) -> bool {
        self.end_tick.is_none()
    }

    /// Iterate `(tick, frame)` for every tick from 0 to `end_tick`.
    /// Yields nothing for an empty recording.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            current_tick: 0,
            delta_idx: 0,
            current_frame: InputFrame::IDLE,
        }
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordingError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from [`to_bytes`](Self::to_bytes) output.
    pub fn from_bytes(data: &[u8]) -> Result<Self, RecordingError> {
        let mut recording: Self = bincode::deserialize(data)?;
        recording.last_frame = recording.deltas.last().map_or(InputFrame::IDLE, |d| d.frame);
        Ok(recording)
    }

    /// Human-readable encoding.
    pub fn to_json(&self) -> Result<String, RecordingError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from [`to_json`](Self::to_json) output.
    pub fn from_json(s: &str) -> Result<Self, RecordingError> {
        let mut recording: Self = serde_json::from_str(s)?;
        recording.last_frame = recording.deltas.last().map_or(InputFrame::IDLE, |d| d.frame);
        Ok(recording)
    }
}

/// Iterator for replaying inputs tick-by-tick.
pub struct ReplayIterator<'a> {
    recording: &'a InputRecording,
    current_tick: u64,
    delta_idx: usize,
    current_frame: InputFrame,
}

impl<'a> Iterator for ReplayIterator<'a> {
    type Item = (u64, InputFrame);

    fn next(&mut self) -> Option<Self::Item> {
        let end_tick = self.recording.end_tick?;
        if self.current_tick > end_tick {
            return None;
        }

        while let Some(delta) = self.recording.deltas.get(self.delta_idx) {
            if delta.tick <= self.current_tick {
                self.current_frame = delta.frame;
                self.delta_idx += 1;
            } else {
                break;
            }
        }

        let result = (self.current_tick, self.current_frame);
        self.current_tick += 1;
        Some(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================
