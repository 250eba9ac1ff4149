//! Entity Definitions
//!
//! The player, enemies, coins and decorative trees.
//!
//! Positions are sprite anchors in world pixels: bottom-center for the
//! player, enemies and trees, center for coins.

use serde::{Serialize, Deserialize};

use crate::core::rect::Rect;
use crate::core::timer::Countdown;
use crate::core::vec2::Vec2;
use crate::game::sprite::{SpriteCatalog, SpriteSize};

/// Anything with a world-space sprite rectangle.
pub trait Bounds {
    /// Full sprite rectangle in world coordinates.
    fn rect(&self) -> Rect;
}

// =============================================================================
// PLAYER
// =============================================================================

/// Walk cycle images, in order.
pub const WALK_FRAMES: [&str; 3] = ["hero_walk1", "hero_walk2", "hero_walk3"];

/// Named visual state of the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPose {
    /// Standing still on the ground
    #[default]
    Idle,
    /// Walking, frame index into [`WALK_FRAMES`]
    Walk(u8),
    /// Airborne, rising
    Jump,
    /// Airborne, descending
    Fall,
}

impl PlayerPose {
    /// Image name for this pose.
    pub fn sprite_name(self) -> &'static str {
        match self {
            PlayerPose::Idle => "hero_idle",
            PlayerPose::Walk(frame) => WALK_FRAMES[frame as usize % WALK_FRAMES.len()],
            PlayerPose::Jump => "hero_jump",
            PlayerPose::Fall => "hero_fall",
        }
    }
}

/// The player-controlled character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Bottom-center anchor
    pub pos: Vec2,
    /// Velocity per tick
    pub vel: Vec2,
    /// Size of the current pose's image
    pub size: SpriteSize,
    /// Current visual state
    pub pose: PlayerPose,
    /// Ticks since the walk frame last advanced
    pub walk_timer: u32,
    /// Remaining lives, changed only through damage and restart
    lives: u8,
    /// Damage grace period
    pub invulnerability: Countdown,
    /// Ticks left in which a jump still counts as grounded
    pub coyote: Countdown,
    /// Ticks left in which a jump press is remembered
    pub jump_buffer: Countdown,
}

impl Player {
    /// Fresh player at `pos` with full lives.
    pub fn spawn(pos: Vec2, lives: u8, catalog: &SpriteCatalog) -> Self {
        let pose = PlayerPose::Idle;
        Self {
            pos,
            vel: Vec2::ZERO,
            size: catalog.size_of(pose.sprite_name()),
            pose,
            walk_timer: 0,
            lives,
            invulnerability: Countdown::IDLE,
            coyote: Countdown::IDLE,
            jump_buffer: Countdown::IDLE,
        }
    }

    /// Remaining lives.
    #[inline]
    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// Remove one life. Returns the lives left.
    pub(crate) fn lose_life(&mut self) -> u8 {
        debug_assert!(self.lives > 0, "lose_life with no lives left");
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// True while the damage grace period runs.
    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability.is_active()
    }

    /// Switch pose, resizing to the pose's image.
    pub fn set_pose(&mut self, pose: PlayerPose, catalog: &SpriteCatalog) {
        if self.pose != pose {
            self.pose = pose;
            self.size = catalog.size_of(pose.sprite_name());
        }
    }

    /// Top edge of the sprite.
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.size.height
    }

    /// Bottom edge of the sprite.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y
    }
}

impl Bounds for Player {
    fn rect(&self) -> Rect {
        Rect::from_midbottom(self.pos, self.size.width, self.size.height)
    }
}

// =============================================================================
// ENEMY
// =============================================================================

/// Movement pattern without its parameters. Used for configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BehaviorKind {
    /// Does not move
    Static = 0,
    /// Patrols left and right
    Horizontal = 1,
    /// Bobs up and down
    Vertical = 2,
}

/// Movement pattern with its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Does not move
    Static,
    /// Sprite edges bounce between `min_x` and `max_x`
    Horizontal {
        /// Left patrol bound
        min_x: f32,
        /// Right patrol bound
        max_x: f32,
        /// Signed speed per tick
        vx: f32,
    },
    /// Anchor y bounces between `min_y` and `max_y`
    Vertical {
        /// Highest anchor y
        min_y: f32,
        /// Lowest anchor y
        max_y: f32,
        /// Signed speed per tick
        vy: f32,
    },
}

impl Behavior {
    /// Variant tag.
    pub fn kind(&self) -> BehaviorKind {
        match self {
            Behavior::Static => BehaviorKind::Static,
            Behavior::Horizontal { .. } => BehaviorKind::Horizontal,
            Behavior::Vertical { .. } => BehaviorKind::Vertical,
        }
    }

    /// Current velocity.
    pub fn velocity(&self) -> Vec2 {
        match *self {
            Behavior::Static => Vec2::ZERO,
            Behavior::Horizontal { vx, .. } => Vec2::new(vx, 0.0),
            Behavior::Vertical { vy, .. } => Vec2::new(0.0, vy),
        }
    }
}

/// A hazard. Touching one costs a life.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique id (monotonic counter)
    pub id: u32,
    /// Image name
    pub sprite: String,
    /// Bottom-center anchor
    pub pos: Vec2,
    /// Image size
    pub size: SpriteSize,
    /// Movement pattern
    pub behavior: Behavior,
}

impl Bounds for Enemy {
    fn rect(&self) -> Rect {
        Rect::from_midbottom(self.pos, self.size.width, self.size.height)
    }
}

// =============================================================================
// COIN / TREE
// =============================================================================

/// A collectible worth points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Unique id (monotonic counter)
    pub id: u32,
    /// Center
    pub pos: Vec2,
    /// Image size
    pub size: SpriteSize,
}

impl Bounds for Coin {
    fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size.width, self.size.height)
    }
}

/// Scenery. Never collides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Unique id (monotonic counter)
    pub id: u32,
    /// Image name
    pub sprite: String,
    /// Bottom-center anchor
    pub pos: Vec2,
    /// Image size
    pub size: SpriteSize,
}

impl Bounds for Tree {
    fn rect(&self) -> Rect {
        Rect::from_midbottom(self.pos, self.size.width, self.size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_sprite_names() {
        assert_eq!(PlayerPose::Idle.sprite_name(), "hero_idle");
        assert_eq!(PlayerPose::Walk(0).sprite_name(), "hero_walk1");
        assert_eq!(PlayerPose::Walk(2).sprite_name(), "hero_walk3");
        assert_eq!(PlayerPose::Walk(3).sprite_name(), "hero_walk1");
        assert_eq!(PlayerPose::Jump.sprite_name(), "hero_jump");
        assert_eq!(PlayerPose::Fall.sprite_name(), "hero_fall");
    }

    #[test]
    fn test_player_rect_is_bottom_anchored() {
        let catalog = SpriteCatalog::default();
        let player = Player::spawn(Vec2::new(320.0, 660.0), 3, &catalog);
        let rect = player.rect();
        assert_eq!(rect.bottom(), 660.0);
        assert_eq!(rect.center_x(), 320.0);
        assert_eq!(player.top(), 660.0 - player.size.height);
        assert_eq!(player.lives(), 3);
        assert!(!player.is_invulnerable());
    }

    #[test]
    fn test_lose_life() {
        let catalog = SpriteCatalog::default();
        let mut player = Player::spawn(Vec2::ZERO, 2, &catalog);
        assert_eq!(player.lose_life(), 1);
        assert_eq!(player.lose_life(), 0);
    }

    #[test]
    fn test_behavior_velocity() {
        assert_eq!(Behavior::Static.velocity(), Vec2::ZERO);
        let h = Behavior::Horizontal { min_x: 0.0, max_x: 10.0, vx: -2.0 };
        assert_eq!(h.velocity(), Vec2::new(-2.0, 0.0));
        assert_eq!(h.kind(), BehaviorKind::Horizontal);
        let v = Behavior::Vertical { min_y: 0.0, max_y: 10.0, vy: 1.0 };
        assert_eq!(v.velocity(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_coin_rect_is_centered() {
        let coin = Coin { id: 0, pos: Vec2::new(100.0, 620.0), size: SpriteSize::new(40.0, 40.0) };
        let rect = coin.rect();
        assert_eq!(rect.left, 80.0);
        assert_eq!(rect.top, 600.0);
        assert_eq!(rect.right(), 120.0);
    }
}
