//! Frame Countdowns
//!
//! Every gameplay timer is an integer countdown decremented once per tick.
//! Durations are configured in wall-clock units and converted to ticks at
//! the simulation rate, so changing the rate keeps gameplay feel intact.

use std::time::Duration;
use serde::{Serialize, Deserialize};

/// Convert a duration to a whole number of ticks at `tick_rate` Hz.
///
/// Rounds to the nearest tick. Saturates at `u32::MAX`.
#[inline]
pub fn ticks_for(duration: Duration, tick_rate: u32) -> u32 {
    let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    let ticks = millis.saturating_mul(u64::from(tick_rate)).saturating_add(500) / 1000;
    u32::try_from(ticks).unwrap_or(u32::MAX)
}

/// Integer countdown clamped at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    /// An expired countdown.
    pub const IDLE: Self = Self { remaining: 0 };

    /// Countdown starting at `ticks`.
    #[inline]
    pub const fn new(ticks: u32) -> Self {
        Self { remaining: ticks }
    }

    /// Restart at `ticks`.
    #[inline]
    pub fn start(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    /// Force to zero.
    #[inline]
    pub fn clear(&mut self) {
        self.remaining = 0;
    }

    /// Decrement by one tick.
    ///
    /// Returns true only on the tick the countdown reaches zero.
    #[inline]
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    /// Ticks remaining.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// True while ticks remain.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }
}
