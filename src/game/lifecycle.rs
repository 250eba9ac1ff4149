//! Player State Machine
//!
//! Lives, invulnerability, game-over sequencing and scoring.
//!
//! ```text
//!   Normal ──damage──▶ Invulnerable ──timer──▶ Normal
//!     │                     │
//!     └────last life────────┴──▶ GameOver ──countdown──▶ (restart) Normal
//! ```

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::timer::Countdown;
use crate::game::config::{RulesConfig, TimerTicks};
use crate::game::entity::Player;
use crate::game::events::{DamageSource, GameEvent};

/// Derived player phase. Exactly one holds on any tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPhase {
    /// Can be hurt
    Normal,
    /// Grace period after damage
    Invulnerable,
    /// Frozen until the countdown restarts the session
    GameOver,
}

/// The emptied heart that is currently flashing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartFlash {
    /// Heart slot, if any
    pub index: Option<u8>,
    /// Remaining flash ticks
    pub timer: Countdown,
}

impl HeartFlash {
    /// Start flashing heart `index`.
    pub fn start(&mut self, index: u8, ticks: u32) {
        self.index = Some(index);
        self.timer.start(ticks);
    }

    /// Stop flashing.
    pub fn clear(&mut self) {
        self.index = None;
        self.timer.clear();
    }

    /// Advance one tick, forgetting the heart once the timer runs out.
    pub fn tick(&mut self) {
        if self.timer.tick() {
            self.index = None;
        }
    }
}

/// Per-session counters that outlive a single life.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Points this run
    pub score: u32,
    /// Best score since launch
    pub high_score: u32,
    /// Freeze before restart; active means game over
    pub game_over: Countdown,
    /// HUD heart flash
    pub heart_flash: HeartFlash,
}

impl Session {
    /// True while the game-over countdown runs.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over.is_active()
    }

    /// Clear per-run counters. The high score survives.
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.game_over.clear();
        self.heart_flash.clear();
    }
}

/// Current phase of the player.
pub fn phase(player: &Player, session: &Session) -> PlayerPhase {
    if session.is_game_over() {
        PlayerPhase::GameOver
    } else if player.is_invulnerable() {
        PlayerPhase::Invulnerable
    } else {
        PlayerPhase::Normal
    }
}

/// Apply one damage event.
///
/// No-op with no lives left or during game over. Otherwise removes a life,
/// starts invulnerability and flashes the emptied heart; losing the last
/// life starts the game-over countdown. Returns true if damage applied.
pub fn take_damage(
    player: &mut Player,
    session: &mut Session,
    source: DamageSource,
    ground_y: f32,
    timers: &TimerTicks,
    tick: u64,
    events: &mut Vec<GameEvent>,
) -> bool {
    if player.lives() == 0 || session.is_game_over() {
        return false;
    }

    let lives = player.lose_life();
    player.invulnerability.start(timers.invulnerability);
    session.heart_flash.start(lives, timers.heart_flash);
    events.push(GameEvent::player_hit(tick, source, lives));
    debug!("Player hit by {:?} at tick {}, {} lives left", source, tick, lives);

    if lives == 0 {
        session.heart_flash.clear();
        session.game_over.start(timers.game_over);
        events.push(GameEvent::game_over_started(tick, timers.game_over, session.score));
        debug!("Game over at tick {} with score {}", tick, session.score);
    } else if player.bottom() > ground_y {
        player.pos.y = ground_y;
    }

    true
}

/// Credit one collected coin and track the session best.
pub fn collect_coin(
    session: &mut Session,
    coin_id: u32,
    rules: &RulesConfig,
    tick: u64,
    events: &mut Vec<GameEvent>,
) {
    session.score += rules.coin_value;
    events.push(GameEvent::coin_collected(tick, coin_id, rules.coin_value, session.score));

    if rules.track_high_score && session.score > session.high_score {
        session.high_score = session.score;
        events.push(GameEvent::new_high_score(tick, session.high_score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::config::SimConfig;
    use crate::game::events::GameEventData;

    fn setup() -> (SimConfig, Player, Session) {
        let config = SimConfig::default();
        let player = Player::spawn(Vec2::new(320.0, 660.0), 3, &config.sprites);
        (config, player, Session::default())
    }

    fn hit(player: &mut Player, session: &mut Session, config: &SimConfig, events: &mut Vec<GameEvent>) -> bool {
        take_damage(player, session, DamageSource::FellOut, config.ground_y(), &config.timer_ticks(), 0, events)
    }

    #[test]
    fn test_damage_starts_invulnerability_and_flash() {
        let (config, mut player, mut session) = setup();
        let mut events = Vec::new();

        assert_eq!(phase(&player, &session), PlayerPhase::Normal);
        assert!(hit(&mut player, &mut session, &config, &mut events));

        assert_eq!(player.lives(), 2);
        assert_eq!(player.invulnerability.remaining(), 60);
        assert_eq!(session.heart_flash.index, Some(2));
        assert_eq!(session.heart_flash.timer.remaining(), 30);
        assert_eq!(phase(&player, &session), PlayerPhase::Invulnerable);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_damage());
    }

    #[test]
    fn test_last_life_starts_game_over() {
        let (config, mut player, mut session) = setup();
        let mut events = Vec::new();
        session.score = 9;

        for _ in 0..3 {
            hit(&mut player, &mut session, &config, &mut events);
        }

        assert_eq!(player.lives(), 0);
        assert_eq!(session.game_over.remaining(), 60);
        assert_eq!(session.heart_flash.index, None);
        assert_eq!(phase(&player, &session), PlayerPhase::GameOver);
        assert_eq!(
            events.last().map(|e| &e.data),
            Some(&GameEventData::GameOverStarted { countdown: 60, final_score: 9 })
        );
    }

    #[test]
    fn test_damage_is_noop_when_over() {
        let (config, mut player, mut session) = setup();
        let mut events = Vec::new();
        for _ in 0..3 {
            hit(&mut player, &mut session, &config, &mut events);
        }
        let snapshot = (player.clone(), session.clone(), events.len());

        for _ in 0..5 {
            assert!(!hit(&mut player, &mut session, &config, &mut events));
        }
        assert_eq!((player, session, events.len()), snapshot);
    }

    #[test]
    fn test_nonfatal_damage_recovers_to_ground() {
        let (config, mut player, mut session) = setup();
        let mut events = Vec::new();
        player.pos.y = 900.0;

        hit(&mut player, &mut session, &config, &mut events);
        assert_eq!(player.bottom(), 660.0);
    }

    #[test]
    fn test_heart_flash_expires() {
        let mut flash = HeartFlash::default();
        flash.start(1, 3);
        flash.tick();
        flash.tick();
        assert_eq!(flash.index, Some(1));
        flash.tick();
        assert_eq!(flash.index, None);
    }

    #[test]
    fn test_coin_scoring_and_high_score() {
        let (config, _, mut session) = setup();
        let mut events = Vec::new();
        session.high_score = 1;

        collect_coin(&mut session, 5, &config.rules, 0, &mut events);
        assert_eq!(session.score, 1);
        assert_eq!(session.high_score, 1);
        assert_eq!(events.len(), 1);

        collect_coin(&mut session, 6, &config.rules, 0, &mut events);
        assert_eq!(session.high_score, 2);
        assert_eq!(events[2].data, GameEventData::NewHighScore { high_score: 2 });

        session.reset_run();
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 2);
    }

    #[test]
    fn test_high_score_disabled() {
        let config = SimConfig::legacy();
        let mut session = Session::default();
        let mut events = Vec::new();
        collect_coin(&mut session, 1, &config.rules, 0, &mut events);
        assert_eq!(session.high_score, 0);
        assert_eq!(events.len(), 1);
    }
}
