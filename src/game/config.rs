//! Simulation Configuration
//!
//! Every tunable of the runner lives here. Sections deserialize with
//! defaults for missing fields, so a config file only needs the values it
//! changes.

use std::time::Duration;
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::core::timer::ticks_for;
use crate::game::entity::BehaviorKind;
use crate::game::sprite::{SpriteCatalog, GROUND_TILE};
use crate::DEFAULT_TICK_RATE;

/// Largest look-ahead span (`viewport.width * lookahead`) in pixels.
pub const MAX_LOOKAHEAD_SPAN: f32 = 100_000.0;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input is not valid config JSON
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Tick rate of zero
    #[error("tick rate must be positive")]
    ZeroTickRate,

    /// Viewport without area
    #[error("viewport must have positive size, got {width}x{height}")]
    EmptyViewport {
        /// Configured width
        width: f32,
        /// Configured height
        height: f32,
    },

    /// min > max, or a range that must be positive is not
    #[error("invalid range for {name}: [{min}, {max}]")]
    InvalidRange {
        /// Setting name
        name: &'static str,
        /// Configured lower bound
        min: i32,
        /// Configured upper bound
        max: i32,
    },

    /// Fraction outside its allowed interval
    #[error("{name} out of range: {value}")]
    InvalidFraction {
        /// Setting name
        name: &'static str,
        /// Configured value
        value: f32,
    },

    /// Streaming span too large to generate each tick
    #[error("look-ahead span {span} exceeds {max}")]
    SpanTooLarge {
        /// `viewport.width * lookahead`
        span: f32,
        /// Allowed maximum
        max: f32,
    },

    /// List that must have at least one element
    #[error("{0} must not be empty")]
    EmptyList(&'static str),

    /// Zero hearts
    #[error("hearts_max must be at least 1")]
    NoHearts,
}

/// Camera behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Camera scrolls at constant speed, player slaved to it
    #[default]
    Runner,
    /// Camera follows the player through a dead zone
    FreeFollow,
}

/// Visible area in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Ground sits this far above the bottom edge when no ground tile exists
    pub ground_margin: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            ground_margin: 60.0,
        }
    }
}

/// Per-tick kinematics constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Extra downward acceleration while rising with jump released
    pub extra_fall: f32,
    /// Terminal fall speed
    pub max_fall: f32,
    /// Vertical velocity set on jump (negative is up)
    pub jump_velocity: f32,
    /// Horizontal speed in free-follow mode
    pub move_speed: f32,
    /// Hitbox width as a fraction of sprite width
    pub hitbox_width_ratio: f32,
    /// Hitbox height as a fraction of sprite height
    pub hitbox_height_ratio: f32,
    /// Ground probe inset on each side of the hitbox
    pub probe_inset: f32,
    /// Ground probe height
    pub probe_height: f32,
    /// Player takes damage once its top passes `viewport.height + fall_out_margin`
    pub fall_out_margin: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            extra_fall: 1.2,
            max_fall: 22.0,
            jump_velocity: -40.0,
            move_speed: 6.0,
            hitbox_width_ratio: 0.44,
            hitbox_height_ratio: 0.86,
            probe_inset: 6.0,
            probe_height: 4.0,
            fall_out_margin: 60.0,
        }
    }
}

/// Camera tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Active mode
    pub mode: CameraMode,
    /// Runner scroll speed per tick
    pub run_speed: f32,
    /// Player screen x in runner mode, as a fraction of viewport width
    pub anchor_ratio: f32,
    /// Left dead-zone edge (fraction of viewport width)
    pub dead_zone_left: f32,
    /// Right dead-zone edge (fraction of viewport width)
    pub dead_zone_right: f32,
    /// Player start x in free-follow mode
    pub free_start_x: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mode: CameraMode::Runner,
            run_speed: 6.0,
            anchor_ratio: 0.25,
            dead_zone_left: 0.35,
            dead_zone_right: 0.65,
            free_start_x: 120.0,
        }
    }
}

/// World streaming tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Smallest gap between spawn slots
    pub gap_min: i32,
    /// Largest gap between spawn slots
    pub gap_max: i32,
    /// World is generated up to `reference_x + lookahead * viewport.width`
    pub lookahead: f32,
    /// Chance of an enemy when the previous slot was not one
    pub enemy_chance: f32,
    /// Chance of an extra decorative tree per slot
    pub tree_chance: f32,
    /// Tree placed this far (min) after its slot
    pub tree_offset_min: i32,
    /// Tree placed this far (max) after its slot
    pub tree_offset_max: i32,
    /// Slack behind the camera before entities are retired
    pub offscreen_clean: f32,
    /// First slot sits this far past the right viewport edge on (re)start
    pub initial_offset: f32,
    /// Behaviors new enemies draw from
    pub enemy_behaviors: Vec<BehaviorKind>,
    /// Enemy images new enemies draw from
    pub enemy_images: Vec<String>,
    /// Tree images
    pub tree_images: Vec<String>,
    /// Horizontal patrol reach on each side (min)
    pub patrol_reach_min: i32,
    /// Horizontal patrol reach on each side (max)
    pub patrol_reach_max: i32,
    /// Vertical patrol height (min)
    pub hover_reach_min: i32,
    /// Vertical patrol height (max)
    pub hover_reach_max: i32,
    /// Signed patrol speeds
    pub patrol_speeds: Vec<f32>,
    /// Coin center height above the viewport bottom
    pub coin_height: f32,
    /// Tree bottom height above the viewport bottom
    pub tree_height: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            gap_min: 250,
            gap_max: 420,
            lookahead: 1.5,
            enemy_chance: 0.5,
            tree_chance: 0.25,
            tree_offset_min: 100,
            tree_offset_max: 400,
            offscreen_clean: 200.0,
            initial_offset: 300.0,
            enemy_behaviors: vec![BehaviorKind::Static, BehaviorKind::Vertical],
            enemy_images: vec!["enemies/enemy_1".into(), "enemies/enemy_2".into()],
            tree_images: vec!["tree_1".into(), "tree_2".into()],
            patrol_reach_min: 60,
            patrol_reach_max: 120,
            hover_reach_min: 40,
            hover_reach_max: 120,
            patrol_speeds: vec![-2.0, -1.0, 1.0, 2.0],
            coin_height: 100.0,
            tree_height: 120.0,
        }
    }
}

/// Timer durations in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Grace period after taking damage
    pub invulnerability_ms: u32,
    /// How long the emptied heart flashes
    pub heart_flash_ms: u32,
    /// Frozen countdown before restart
    pub game_over_ms: u32,
    /// Coyote window
    pub coyote_ms: u32,
    /// Jump buffer window
    pub jump_buffer_ms: u32,
    /// Duration of one walk animation frame
    pub walk_frame_ms: u32,
    /// Heart blink half-period, in ticks
    pub heart_blink_ticks: u32,
    /// Player blink period while invulnerable, in ticks
    pub player_blink_ticks: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            invulnerability_ms: 1000,
            heart_flash_ms: 500,
            game_over_ms: 1000,
            coyote_ms: 100,
            jump_buffer_ms: 117,
            walk_frame_ms: 167,
            heart_blink_ticks: 4,
            player_blink_ticks: 10,
        }
    }
}

/// Timer lengths resolved to ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerTicks {
    /// Invulnerability after damage
    pub invulnerability: u32,
    /// Heart flash
    pub heart_flash: u32,
    /// Game-over freeze
    pub game_over: u32,
    /// Coyote window
    pub coyote: u32,
    /// Jump buffer window
    pub jump_buffer: u32,
    /// One walk frame (at least 1)
    pub walk_frame: u32,
}

impl TimerConfig {
    /// Convert every duration to ticks at `tick_rate`.
    pub fn resolve(&self, tick_rate: u32) -> TimerTicks {
        let t = |ms: u32| ticks_for(Duration::from_millis(ms as u64), tick_rate);
        TimerTicks {
            invulnerability: t(self.invulnerability_ms),
            heart_flash: t(self.heart_flash_ms),
            game_over: t(self.game_over_ms),
            coyote: t(self.coyote_ms),
            jump_buffer: t(self.jump_buffer_ms),
            walk_frame: t(self.walk_frame_ms).max(1),
        }
    }
}

/// Scoring and lives.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Lives at start and after restart
    pub hearts_max: u8,
    /// Points per coin
    pub coin_value: u32,
    /// Keep a session high score
    pub track_high_score: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hearts_max: 3,
            coin_value: 1,
            track_high_score: true,
        }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Logical ticks per second
    pub tick_rate: u32,
    /// Screen
    pub viewport: Viewport,
    /// Kinematics
    pub physics: PhysicsConfig,
    /// Camera
    pub camera: CameraConfig,
    /// Streaming
    pub spawn: SpawnConfig,
    /// Timers
    pub timers: TimerConfig,
    /// Lives and scoring
    pub rules: RulesConfig,
    /// Art metrics
    pub sprites: SpriteCatalog,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            viewport: Viewport::default(),
            physics: PhysicsConfig::default(),
            camera: CameraConfig::default(),
            spawn: SpawnConfig::default(),
            timers: TimerConfig::default(),
            rules: RulesConfig::default(),
            sprites: SpriteCatalog::default(),
        }
    }
}

impl SimConfig {
    /// The older tuning: weaker jump, free-follow camera, horizontal
    /// patrollers only, no high score.
    pub fn legacy() -> Self {
        let mut config = Self::default();
        config.physics.jump_velocity = -30.0;
        config.camera.mode = CameraMode::FreeFollow;
        config.spawn.enemy_behaviors = vec![BehaviorKind::Horizontal];
        config.rules.track_high_score = false;
        config
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        info!(
            "Loaded config: {} Hz, {:?} camera, jump {}",
            config.tick_rate, config.camera.mode, config.physics.jump_velocity
        );
        Ok(config)
    }

    /// Check every value the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        let viewport_ok = |v: f32| v.is_finite() && v > 0.0;
        if !viewport_ok(self.viewport.width) || !viewport_ok(self.viewport.height) {
            return Err(ConfigError::EmptyViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let spawn = &self.spawn;
        check_range("spawn gap", spawn.gap_min, spawn.gap_max, true)?;
        check_range("tree offset", spawn.tree_offset_min, spawn.tree_offset_max, false)?;
        check_range("patrol reach", spawn.patrol_reach_min, spawn.patrol_reach_max, false)?;
        check_range("hover reach", spawn.hover_reach_min, spawn.hover_reach_max, false)?;

        check_fraction("enemy_chance", spawn.enemy_chance, true)?;
        check_fraction("tree_chance", spawn.tree_chance, true)?;
        check_fraction("hitbox_width_ratio", self.physics.hitbox_width_ratio, false)?;
        check_fraction("hitbox_height_ratio", self.physics.hitbox_height_ratio, false)?;
        if !spawn.lookahead.is_finite() || spawn.lookahead < 1.0 {
            return Err(ConfigError::InvalidFraction { name: "lookahead", value: spawn.lookahead });
        }
        let span = self.viewport.width * spawn.lookahead;
        if span > MAX_LOOKAHEAD_SPAN {
            return Err(ConfigError::SpanTooLarge { span, max: MAX_LOOKAHEAD_SPAN });
        }

        if self.camera.mode == CameraMode::FreeFollow
            && self.camera.dead_zone_left >= self.camera.dead_zone_right
        {
            return Err(ConfigError::InvalidFraction {
                name: "dead_zone_left",
                value: self.camera.dead_zone_left,
            });
        }

        if spawn.enemy_behaviors.is_empty() {
            return Err(ConfigError::EmptyList("enemy_behaviors"));
        }
        if spawn.enemy_images.is_empty() {
            return Err(ConfigError::EmptyList("enemy_images"));
        }
        if spawn.tree_images.is_empty() {
            return Err(ConfigError::EmptyList("tree_images"));
        }
        if spawn.patrol_speeds.is_empty() {
            return Err(ConfigError::EmptyList("patrol_speeds"));
        }

        if self.rules.hearts_max == 0 {
            return Err(ConfigError::NoHearts);
        }

        Ok(())
    }

    /// Timer lengths at the configured rate.
    pub fn timer_ticks(&self) -> TimerTicks {
        self.timers.resolve(self.tick_rate)
    }

    /// Ground line. The bottom edge when a ground tile is available,
    /// otherwise `ground_margin` above it.
    pub fn ground_y(&self) -> f32 {
        if self.sprites.contains(GROUND_TILE) {
            self.viewport.height
        } else {
            self.viewport.height - self.viewport.ground_margin
        }
    }

    /// Player screen x in runner mode.
    pub fn anchor_x(&self) -> f32 {
        (self.viewport.width * self.camera.anchor_ratio).trunc()
    }
}

fn check_range(name: &'static str, min: i32, max: i32, positive: bool) -> Result<(), ConfigError> {
    if min > max || (positive && min <= 0) {
        return Err(ConfigError::InvalidRange { name, min, max });
    }
    Ok(())
}

fn check_fraction(name: &'static str, value: f32, allow_zero: bool) -> Result<(), ConfigError> {
    let ok = if allow_zero {
        (0.0..=1.0).contains(&value)
    } else {
        value > 0.0 && value <= 1.0
    };
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidFraction { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::sprite::SpriteSize;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        config.validate().unwrap();
        assert_eq!(config.ground_y(), 660.0);
        assert_eq!(config.anchor_x(), 320.0);
    }

    #[test]
    fn test_default_timer_ticks() {
        let ticks = SimConfig::default().timer_ticks();
        assert_eq!(ticks.invulnerability, 60);
        assert_eq!(ticks.heart_flash, 30);
        assert_eq!(ticks.game_over, 60);
        assert_eq!(ticks.coyote, 6);
        assert_eq!(ticks.jump_buffer, 7);
        assert_eq!(ticks.walk_frame, 10);
    }

    #[test]
    fn test_timers_scale_with_tick_rate() {
        let mut config = SimConfig::default();
        config.tick_rate = 120;
        let ticks = config.timer_ticks();
        assert_eq!(ticks.invulnerability, 120);
        assert_eq!(ticks.coyote, 12);
    }

    #[test]
    fn test_legacy_preset() {
        let config = SimConfig::legacy();
        config.validate().unwrap();
        assert_eq!(config.physics.jump_velocity, -30.0);
        assert_eq!(config.camera.mode, CameraMode::FreeFollow);
        assert_eq!(config.spawn.enemy_behaviors, vec![BehaviorKind::Horizontal]);
        assert!(!config.rules.track_high_score);
    }

    #[test]
    fn test_ground_tile_moves_ground() {
        let mut config = SimConfig::default();
        config.sprites.insert(GROUND_TILE, SpriteSize::new(64.0, 64.0), 0.0);
        assert_eq!(config.ground_y(), 720.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json_str(
            r#"{ "physics": { "jump_velocity": -35.0 }, "camera": { "mode": "free_follow" } }"#,
        )
        .unwrap();
        assert_eq!(config.physics.jump_velocity, -35.0);
        assert_eq!(config.physics.gravity, 1.0);
        assert_eq!(config.camera.mode, CameraMode::FreeFollow);
        assert_eq!(config.spawn.gap_min, 250);
    }

    #[test]
    fn test_invalid_json() {
        let err = SimConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = SimConfig::default();
        config.spawn.gap_min = 500;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { name: "spawn gap", .. })
        ));

        let mut config = SimConfig::default();
        config.tick_rate = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTickRate)));

        let mut config = SimConfig::default();
        config.spawn.enemy_behaviors.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyList("enemy_behaviors"))));

        let mut config = SimConfig::default();
        config.rules.hearts_max = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoHearts)));

        let mut config = SimConfig::default();
        config.physics.hitbox_width_ratio = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidFraction { .. })));

        // 1e39 overflows f32 to infinity
        let err = SimConfig::from_json_str(r#"{ "spawn": { "lookahead": 1e39 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFraction { name: "lookahead", .. }));

        let mut config = SimConfig::default();
        config.spawn.lookahead = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidFraction { .. })));

        let err = SimConfig::from_json_str(r#"{ "viewport": { "width": 2e10 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::SpanTooLarge { .. }));

        let err = SimConfig::from_json_str(r#"{ "viewport": { "height": 1e39 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyViewport { .. }));

        let mut config = SimConfig::default();
        config.spawn.lookahead = 200.0;
        assert!(matches!(config.validate(), Err(ConfigError::SpanTooLarge { .. })));
    }
}
