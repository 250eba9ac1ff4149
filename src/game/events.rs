//! Game Events
//!
//! Events generated during simulation. Sound cues and logging are driven
//! from these; replays compare them tick for tick.

use serde::{Serialize, Deserialize};

/// What hurt the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    /// Hitbox overlapped an enemy
    Enemy {
        /// Id of the enemy that was touched
        enemy_id: u32,
    },
    /// Fell below the world
    FellOut,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A buffered jump fired
    Jumped {
        /// Vertical velocity applied
        velocity: f32,
    },

    /// Player picked up a coin
    CoinCollected {
        /// Id of the removed coin
        coin_id: u32,
        /// Points awarded
        points: u32,
        /// Score after the pickup
        new_score: u32,
    },

    /// Score passed the previous session best
    NewHighScore {
        /// New session best
        high_score: u32,
    },

    /// Player lost a life
    PlayerHit {
        /// What caused the hit
        source: DamageSource,
        /// Lives after the hit
        lives_left: u8,
    },

    /// Last life lost, gameplay frozen for `countdown` ticks
    GameOverStarted {
        /// Ticks until restart
        countdown: u32,
        /// Score of the finished run
        final_score: u32,
    },

    /// Session reset after game over
    Restarted,
}

/// A game event with timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u64,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u64, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Create jumped event.
    pub fn jumped(tick: u64, velocity: f32) -> Self {
        Self::new(tick, GameEventData::Jumped { velocity })
    }

    /// Create coin collected event.
    pub fn coin_collected(tick: u64, coin_id: u32, points: u32, new_score: u32) -> Self {
        Self::new(
            tick,
            GameEventData::CoinCollected {
                coin_id,
                points,
                new_score,
            },
        )
    }

    /// Create new high score event.
    pub fn new_high_score(tick: u64, high_score: u32) -> Self {
        Self::new(tick, GameEventData::NewHighScore { high_score })
    }

    /// Create player hit event.
    pub fn player_hit(tick: u64, source: DamageSource, lives_left: u8) -> Self {
        Self::new(tick, GameEventData::PlayerHit { source, lives_left })
    }

    /// Create game over event.
    pub fn game_over_started(tick: u64, countdown: u32, final_score: u32) -> Self {
        Self::new(tick, GameEventData::GameOverStarted { countdown, final_score })
    }

    /// Create restarted event.
    pub fn restarted(tick: u64) -> Self {
        Self::new(tick, GameEventData::Restarted)
    }

    /// True for events that end a life.
    pub fn is_damage(&self) -> bool {
        matches!(self.data, GameEventData::PlayerHit { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let hit = GameEvent::player_hit(10, DamageSource::Enemy { enemy_id: 4 }, 2);
        assert_eq!(hit.tick, 10);
        assert!(hit.is_damage());
        assert!(!GameEvent::restarted(11).is_damage());

        let coin = GameEvent::coin_collected(3, 7, 1, 5);
        assert_eq!(
            coin.data,
            GameEventData::CoinCollected { coin_id: 7, points: 1, new_score: 5 }
        );
    }

    #[test]
    fn test_event_serializes() {
        let event = GameEvent::game_over_started(99, 60, 12);
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
