//! 2D Vector
//!
//! Screen-space vector used for positions and velocities.
//! `x` grows to the right, `y` grows downward.

use std::fmt;
use serde::{Serialize, Deserialize};

/// 2D vector with `f32` components.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component (pixels)
    pub x: f32,
    /// Y component (pixels, downward positive)
    pub y: f32,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Raw bit pattern of both components, for hashing.
    #[inline]
    pub fn to_bits(self) -> (u32, u32) {
        (self.x.to_bits(), self.y.to_bits())
    }
}

impl fmt::Debug for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2({:.3}, {:.3})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bits_distinguishes_signed_zero() {
        assert_eq!(Vec2::new(1.5, -2.0).to_bits(), (1.5f32.to_bits(), (-2.0f32).to_bits()));
        assert_ne!(Vec2::new(0.0, 0.0).to_bits(), Vec2::new(-0.0, 0.0).to_bits());
        assert_eq!(Vec2::ZERO, Vec2::new(0.0, 0.0));
    }
}
