//! Sound Cues
//!
//! The simulation never plays audio. It reports events; [`play_cues`] maps
//! them to [`SoundPlayer`] calls and drops any playback failure.

use tracing::debug;

use crate::game::events::{GameEvent, GameEventData};

/// Playback failures reported by a sound backend.
#[derive(Debug, thiserror::Error)]
pub enum CueError {
    /// No output device
    #[error("audio device unavailable")]
    DeviceUnavailable,

    /// Sound asset not loaded
    #[error("missing sound cue: {0}")]
    Missing(&'static str),
}

/// Fire-and-forget sound backend.
pub trait SoundPlayer {
    /// A coin was picked up.
    fn coin_collected(&mut self) -> Result<(), CueError>;
    /// The player lost a life.
    fn player_hit(&mut self) -> Result<(), CueError>;
}

/// Backend that plays nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn coin_collected(&mut self) -> Result<(), CueError> {
        Ok(())
    }

    fn player_hit(&mut self) -> Result<(), CueError> {
        Ok(())
    }
}

/// Play the cue for each event. Returns how many cues failed.
pub fn play_cues(events: &[GameEvent], player: &mut impl SoundPlayer) -> usize {
    let mut failed = 0;
    for event in events {
        let outcome = match event.data {
            GameEventData::CoinCollected { .. } => player.coin_collected(),
            GameEventData::PlayerHit { .. } => player.player_hit(),
            _ => continue,
        };
        if let Err(e) = outcome {
            debug!("Sound cue for tick {} dropped: {}", event.tick, e);
            failed += 1;
        }
    }
    failed
}
