//! Camera
//!
//! Horizontal scroll offset. In runner mode the camera drives the player;
//! in free-follow mode the player drives the camera.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::game::config::{CameraMode, SimConfig};
use crate::game::entity::Player;

/// Horizontal scroll state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World x of the left viewport edge
    pub x: f32,
}

impl Camera {
    /// Camera at the world origin.
    pub const ORIGIN: Self = Self { x: 0.0 };

    /// Start-of-tick step.
    ///
    /// Runner mode scrolls forward and carries the player with it.
    /// Free-follow mode waits for [`follow`](Self::follow).
    pub fn step(&mut self, player: &mut Player, config: &SimConfig) {
        if config.camera.mode == CameraMode::Runner {
            self.x += config.camera.run_speed;
            player.pos.x = self.x + config.anchor_x();
        }
    }

    /// End-of-tick tracking.
    ///
    /// Runner mode pins the player at the anchor. Free-follow mode scrolls
    /// just enough to keep the player inside the dead zone, never left of
    /// the world origin.
    pub fn follow(&mut self, player: &mut Player, config: &SimConfig) {
        match config.camera.mode {
            CameraMode::Runner => {
                player.pos.x = self.x + config.anchor_x();
            }
            CameraMode::FreeFollow => {
                let width = config.viewport.width;
                let view_left = (width * config.camera.dead_zone_left).trunc();
                let view_right = (width * config.camera.dead_zone_right).trunc();
                let screen_x = player.pos.x - self.x;
                if screen_x > view_right {
                    self.x = player.pos.x - view_right;
                } else if screen_x < view_left {
                    self.x = (player.pos.x - view_left).max(0.0);
                }
            }
        }
    }

    /// X the world streamer generates ahead of.
    pub fn reference_x(&self, player: &Player, config: &SimConfig) -> f32 {
        match config.camera.mode {
            CameraMode::Runner => self.x,
            CameraMode::FreeFollow => player.pos.x,
        }
    }

    /// Player anchor on (re)start, standing on the bottom edge of the screen.
    pub fn spawn_point(&self, config: &SimConfig) -> Vec2 {
        let x = match config.camera.mode {
            CameraMode::Runner => self.x + config.anchor_x(),
            CameraMode::FreeFollow => config.camera.free_start_x,
        };
        Vec2::new(x, config.viewport.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, config: &SimConfig) -> Player {
        Player::spawn(Vec2::new(x, 660.0), 3, &config.sprites)
    }

    #[test]
    fn test_runner_scrolls_and_carries_player() {
        let config = SimConfig::default();
        let mut camera = Camera::ORIGIN;
        let mut player = player_at(0.0, &config);

        camera.step(&mut player, &config);
        assert_eq!(camera.x, 6.0);
        assert_eq!(player.pos.x, 326.0);

        for _ in 0..9 {
            camera.step(&mut player, &config);
        }
        assert_eq!(camera.x, 60.0);
        assert_eq!(camera.reference_x(&player, &config), 60.0);
    }

    #[test]
    fn test_free_follow_dead_zone() {
        let config = SimConfig::legacy();
        let mut camera = Camera::ORIGIN;

        // Inside the zone: no scroll
        let mut player = player_at(600.0, &config);
        camera.step(&mut player, &config);
        camera.follow(&mut player, &config);
        assert_eq!(camera.x, 0.0);

        // Past the right edge (0.65 * 1280 = 832)
        player.pos.x = 900.0;
        camera.follow(&mut player, &config);
        assert_eq!(camera.x, 68.0);

        // Back past the left edge (0.35 * 1280 = 448)
        player.pos.x = 500.0;
        camera.follow(&mut player, &config);
        assert_eq!(camera.x, 52.0);

        // Never left of the origin
        player.pos.x = 10.0;
        camera.follow(&mut player, &config);
        assert_eq!(camera.x, 0.0);
        assert_eq!(camera.reference_x(&player, &config), 10.0);
    }

    #[test]
    fn test_spawn_point() {
        let runner = SimConfig::default();
        assert_eq!(Camera::ORIGIN.spawn_point(&runner), Vec2::new(320.0, 720.0));

        let legacy = SimConfig::legacy();
        assert_eq!(Camera::ORIGIN.spawn_point(&legacy), Vec2::new(120.0, 720.0));
    }
}
