//! Game session state (the TEA Model)

use fol_core::{GamePhase, GuessOutcome, Round, RoundId, StopReason, DEFAULT_ROUND_BONUS};

/// The single game session of a run.
///
/// Only [`crate::handler::update`] mutates it. Background work reports back
/// through messages tagged with the [`RoundId`] they were issued for.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub phase: GamePhase,

    /// Rounds started since the last stop
    pub level: u32,

    pub score: u32,

    /// Round on screen; `None` while loading or stopped
    pub round: Option<Round>,

    /// Score credited at the start of every round
    pub round_bonus: u32,

    /// Why the session last stopped
    pub last_stop: Option<StopReason>,

    /// Most recently evaluated guess
    pub last_guess: Option<GuessOutcome>,

    /// Total guesses evaluated this run
    pub guess_count: u64,

    /// Id of the round most recently requested while playing
    active_round_id: Option<RoundId>,

    /// Highest id issued so far
    last_issued_round_id: RoundId,

    quitting: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(DEFAULT_ROUND_BONUS)
    }
}

impl GameSession {
    pub fn new(round_bonus: u32) -> Self {
        Self {
            phase: GamePhase::Stopped,
            level: 0,
            score: 0,
            round: None,
            round_bonus,
            last_stop: None,
            last_guess: None,
            guess_count: 0,
            active_round_id: None,
            last_issued_round_id: 0,
            quitting: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase.is_playing()
    }

    /// True while a round has been requested but not yet delivered
    pub fn is_loading(&self) -> bool {
        self.is_playing() && self.round.is_none()
    }

    pub fn active_round_id(&self) -> Option<RoundId> {
        self.active_round_id
    }

    /// A result tagged `round_id` may only be applied while playing and only
    /// if it belongs to the most recently issued request.
    pub fn is_current(&self, round_id: RoundId) -> bool {
        self.is_playing() && self.active_round_id == Some(round_id)
    }

    /// Enter (or stay in) `Playing` and request a new round: bump the level,
    /// credit the bonus on top of the current score, and issue a fresh id.
    pub fn begin_round(&mut self) -> RoundId {
        if !self.is_playing() {
            self.level = 0;
            self.score = 0;
            self.last_stop = None;
        }

        self.phase = GamePhase::Playing;
        self.level += 1;
        self.score = self.score.saturating_add(self.round_bonus);
        self.round = None;

        self.last_issued_round_id += 1;
        self.active_round_id = Some(self.last_issued_round_id);
        self.last_issued_round_id
    }

    /// Return to `Stopped`, clearing round, level, and score.
    ///
    /// Returns `false` (and changes nothing) if already stopped.
    pub fn stop(&mut self, reason: StopReason) -> bool {
        if !self.is_playing() {
            return false;
        }

        self.phase = GamePhase::Stopped;
        self.level = 0;
        self.score = 0;
        self.round = None;
        self.active_round_id = None;
        self.last_stop = Some(reason);
        true
    }

    pub fn record_guess(&mut self, outcome: GuessOutcome) {
        self.last_guess = Some(outcome);
        self.guess_count += 1;
    }

    pub fn request_quit(&mut self) {
        self.quitting = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_stopped() {
        let session = GameSession::default();
        assert_eq!(session.phase, GamePhase::Stopped);
        assert_eq!(session.level, 0);
        assert_eq!(session.score, 0);
        assert!(session.round.is_none());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_begin_round_from_stopped() {
        let mut session = GameSession::default();
        let id = session.begin_round();

        assert_eq!(id, 1);
        assert!(session.is_playing());
        assert!(session.is_loading());
        assert_eq!(session.level, 1);
        assert_eq!(session.score, 200);
        assert!(session.is_current(id));
    }

    #[test]
    fn test_begin_round_while_playing_keeps_score() {
        let mut session = GameSession::default();
        session.begin_round();
        session.score = 130;

        let id = session.begin_round();
        assert_eq!(id, 2);
        assert_eq!(session.level, 2);
        assert_eq!(session.score, 330);
        assert!(!session.is_current(1));
        assert!(session.is_current(2));
    }

    #[test]
    fn test_stop_resets_and_is_idempotent() {
        let mut session = GameSession::default();
        let id = session.begin_round();

        assert!(session.stop(StopReason::UserStopped));
        assert_eq!(session.phase, GamePhase::Stopped);
        assert_eq!(session.level, 0);
        assert_eq!(session.score, 0);
        assert!(!session.is_current(id));
        assert_eq!(session.last_stop, Some(StopReason::UserStopped));

        assert!(!session.stop(StopReason::WrongGuess));
        assert_eq!(session.last_stop, Some(StopReason::UserStopped));
    }

    #[test]
    fn test_round_ids_keep_increasing_across_stops() {
        let mut session = GameSession::default();
        let first = session.begin_round();
        session.stop(StopReason::UserStopped);
        let second = session.begin_round();

        assert!(second > first);
        assert!(!session.is_current(first));
        assert_eq!(session.level, 1);
        assert_eq!(session.score, 200);
    }
}
