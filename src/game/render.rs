//! Render Snapshot
//!
//! Turns a [`SimulationState`] into screen-space draw commands plus HUD
//! values. Drawing itself happens behind the [`Renderer`] trait.

use serde::{Serialize, Deserialize};

use crate::core::rect::Rect;
use crate::game::config::SimConfig;
use crate::game::entity::Bounds;
use crate::game::lifecycle::Session;
use crate::game::sprite::COIN;
use crate::game::state::SimulationState;

/// Full heart image.
pub const HEART_FULL: &str = "heart_full";
/// Emptied heart image.
pub const HEART_EMPTY: &str = "heart_empty";

/// Something that draws frames.
pub trait Renderer {
    /// Draw one frame.
    fn render(&mut self, frame: &RenderFrame);
}

/// One image at a screen position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteDraw {
    /// Image name
    pub image: String,
    /// Destination in screen pixels
    pub rect: Rect,
}

/// One HUD heart slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartIcon {
    /// Full or emptied
    pub full: bool,
    /// Hidden during a blink phase
    pub visible: bool,
}

impl HeartIcon {
    /// Image name for this slot.
    pub fn image(&self) -> &'static str {
        if self.full { HEART_FULL } else { HEART_EMPTY }
    }
}

/// Heads-up display values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    /// Current score
    pub score: u32,
    /// Session best, when tracked
    pub high_score: Option<u32>,
    /// Lives left
    pub lives: u8,
    /// Heart slots, left to right
    pub hearts: Vec<HeartIcon>,
    /// Game-over freeze active
    pub game_over: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Scroll offset in world pixels
    pub camera_x: f32,
    /// Ground line in screen pixels
    pub ground_y: f32,
    /// Scenery, drawn first
    pub trees: Vec<SpriteDraw>,
    /// Coins
    pub coins: Vec<SpriteDraw>,
    /// Enemies
    pub enemies: Vec<SpriteDraw>,
    /// The hero, absent while blinked out
    pub player: Option<SpriteDraw>,
    /// HUD
    pub hud: Hud,
}

impl RenderFrame {
    /// Snapshot the entities overlapping the viewport.
    pub fn capture(state: &SimulationState, config: &SimConfig) -> Self {
        let cam_x = state.camera.x;
        let screen = Rect::new(0.0, 0.0, config.viewport.width, config.viewport.height);
        let on_screen = |image: &str, world: Rect| {
            let rect = world.shifted_x(cam_x);
            rect.intersects(&screen).then(|| SpriteDraw { image: image.to_string(), rect })
        };

        let trees = state.world.trees.iter()
            .filter_map(|t| on_screen(t.sprite.as_str(), t.rect()))
            .collect();
        let coins = state.world.coins.iter()
            .filter_map(|c| on_screen(COIN, c.rect()))
            .collect();
        let enemies = state.world.enemies.iter()
            .filter_map(|e| on_screen(e.sprite.as_str(), e.rect()))
            .collect();

        let player = player_visible(state, config).then(|| SpriteDraw {
            image: state.player.pose.sprite_name().to_string(),
            rect: state.player.rect().shifted_x(cam_x),
        });

        let lives = state.player.lives();
        let hearts = (0..config.rules.hearts_max)
            .map(|i| HeartIcon {
                full: i < lives,
                visible: heart_visible(i, &state.session, config.timers.heart_blink_ticks),
            })
            .collect();

        Self {
            camera_x: cam_x,
            ground_y: config.ground_y(),
            trees,
            coins,
            enemies,
            player,
            hud: Hud {
                score: state.session.score,
                high_score: config.rules.track_high_score.then_some(state.session.high_score),
                lives,
                hearts,
                game_over: state.session.is_game_over(),
            },
        }
    }
}

/// Player blink: shown for the first half of every blink period while
/// invulnerable, always shown during game over.
pub fn player_visible(state: &SimulationState, config: &SimConfig) -> bool {
    let period = config.timers.player_blink_ticks.max(1);
    let remaining = state.player.invulnerability.remaining();
    remaining % period < period / 2 || state.session.is_game_over()
}

/// Heart blink: every heart blinks during game over, the emptied heart
/// blinks while its flash runs. Hidden on even half-periods.
pub fn heart_visible(index: u8, session: &Session, half_period: u32) -> bool {
    let half_period = half_period.max(1);
    let hidden_phase = |remaining: u32| (remaining / half_period) % 2 == 0;

    if session.game_over.is_active() && hidden_phase(session.game_over.remaining()) {
        return false;
    }
    let flash = &session.heart_flash;
    if flash.index == Some(index) && hidden_phase(flash.timer.remaining()) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::input::InputFrame;
    use crate::game::tick::tick;

    struct Recorder {
        frames: Vec<RenderFrame>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, frame: &RenderFrame) {
            self.frames.push(frame.clone());
        }
    }

    #[test]
    fn test_capture_screen_space() {
        let mut config = SimConfig::default();
        config.spawn.enemy_chance = 0.0;
        let mut state = SimulationState::new(11, &config);
        for _ in 0..200 {
            tick(&mut state, &InputFrame::IDLE, &config);
        }

        let frame = RenderFrame::capture(&state, &config);
        assert_eq!(frame.camera_x, state.camera.x);

        let player = frame.player.as_ref().expect("player visible");
        assert_eq!(player.rect.center_x(), config.anchor_x());
        for draw in frame.coins.iter().chain(&frame.enemies).chain(&frame.trees) {
            assert!(draw.rect.right() > 0.0);
            assert!(draw.rect.left < config.viewport.width);
        }
        assert_eq!(frame.hud.hearts.len(), 3);
        assert_eq!(frame.hud.high_score, Some(state.session.high_score));
    }

    #[test]
    fn test_player_blinks_while_invulnerable() {
        let config = SimConfig::default();
        let mut state = SimulationState::new(1, &config);
        assert!(player_visible(&state, &config));

        state.player.invulnerability.start(57);
        assert!(!player_visible(&state, &config));
        state.player.invulnerability.start(54);
        assert!(player_visible(&state, &config));

        state.session.game_over.start(57);
        assert!(player_visible(&state, &config));
    }

    #[test]
    fn test_flashing_heart() {
        let mut session = Session::default();
        session.heart_flash.start(2, 30);

        // 30 / 4 = 7 (odd): shown; 28 / 4 = 7: shown; 27 / 4 = 6: hidden
        assert!(heart_visible(2, &session, 4));
        session.heart_flash.timer.start(27);
        assert!(!heart_visible(2, &session, 4));
        assert!(heart_visible(1, &session, 4));
    }

    #[test]
    fn test_game_over_blinks_every_heart() {
        let mut session = Session::default();
        session.game_over.start(3);
        assert!((0..3).all(|i| !heart_visible(i, &session, 4)));
        session.game_over.start(5);
        assert!((0..3).all(|i| heart_visible(i, &session, 4)));
    }

    #[test]
    fn test_renderer_receives_frames() {
        let config = SimConfig::legacy();
        let state = SimulationState::new(2, &config);
        let mut recorder = Recorder { frames: Vec::new() };

        recorder.render(&RenderFrame::capture(&state, &config));
        assert_eq!(recorder.frames.len(), 1);
        assert_eq!(recorder.frames[0].hud.high_score, None);
        assert_eq!(recorder.frames[0].hud.hearts[0].image(), HEART_FULL);
    }
}
