//! Game session handlers
//!
//! Results from background work carry the round id they were issued for and
//! are dropped unless that id is still current.

use crate::state::GameSession;
use fol_core::prelude::*;
use fol_core::{GuessOutcome, Round, RoundId, StopReason};

use super::{UpdateAction, UpdateResult};

/// Handle start: begin the first round unless already playing
pub fn handle_start(session: &mut GameSession) -> UpdateResult {
    if session.is_playing() {
        debug!("Start ignored: already playing (level {})", session.level);
        return UpdateResult::none();
    }

    next_round(session)
}

/// Handle stop. No-op when already stopped.
pub fn handle_stop(session: &mut GameSession, reason: StopReason) -> UpdateResult {
    if !session.stop(reason.clone()) {
        debug!("Stop ignored: already stopped");
        return UpdateResult::none();
    }

    info!("Game stopped: {}", reason);
    UpdateResult::action(UpdateAction::EndRound)
}

/// Handle a guess. Any of the repeated images advances to the next round;
/// the singleton ends the game.
pub fn handle_guess(session: &mut GameSession, index: usize) -> UpdateResult {
    if !session.is_playing() {
        warn!("Guess {} ignored: game is stopped", index);
        return UpdateResult::none();
    }

    let Some(round) = session.round.as_ref() else {
        warn!("Guess {} ignored: round still loading", index);
        return UpdateResult::none();
    };

    let Some(correct) = round.is_correct_guess(index) else {
        warn!("Guess {} ignored: round has {} slots", index, round.len());
        return UpdateResult::none();
    };

    session.record_guess(GuessOutcome { index, correct });

    if correct {
        info!("Correct guess at slot {} (level {})", index, session.level);
        next_round(session)
    } else {
        info!("Wrong guess at slot {} (level {})", index, session.level);
        handle_stop(session, StopReason::WrongGuess)
    }
}

/// Handle a finished round build
pub fn handle_round_built(
    session: &mut GameSession,
    round_id: RoundId,
    round: Round,
) -> UpdateResult {
    if !session.is_current(round_id) {
        debug!("Discarding stale round {}", round_id);
        return UpdateResult::none();
    }

    if session.round.is_some() {
        warn!("Round {} delivered twice, keeping the first", round_id);
        return UpdateResult::none();
    }

    session.round = Some(round);
    info!(
        "Round {} ready: level {}, score {}",
        round_id, session.level, session.score
    );

    UpdateResult::action(UpdateAction::StartScoreTimer {
        round_id,
        initial_score: session.score,
    })
}

/// Handle a failed round build: the session silently returns to stopped.
pub fn handle_round_failed(
    session: &mut GameSession,
    round_id: RoundId,
    error: RoundError,
) -> UpdateResult {
    if !session.is_current(round_id) {
        debug!("Discarding stale failure for round {}: {}", round_id, error);
        return UpdateResult::none();
    }

    error!("Round {} failed: {}", round_id, error);
    handle_stop(
        session,
        StopReason::RoundFailed {
            message: error.to_string(),
        },
    )
}

/// Handle a decay tick. A tick reaching zero ends the game.
pub fn handle_score_tick(session: &mut GameSession, round_id: RoundId, score: u32) -> UpdateResult {
    if !session.is_current(round_id) || session.round.is_none() {
        trace!("Discarding stale tick for round {}", round_id);
        return UpdateResult::none();
    }

    session.score = score;
    if score == 0 {
        return handle_stop(session, StopReason::ScoreExhausted);
    }
    UpdateResult::none()
}

/// Handle the timer's exhaustion report (a no-op once the zero tick stopped
/// the game)
pub fn handle_score_exhausted(session: &mut GameSession, round_id: RoundId) -> UpdateResult {
    if !session.is_current(round_id) {
        debug!("Discarding stale exhaustion for round {}", round_id);
        return UpdateResult::none();
    }

    session.score = 0;
    handle_stop(session, StopReason::ScoreExhausted)
}

fn next_round(session: &mut GameSession) -> UpdateResult {
    let round_id = session.begin_round();
    info!(
        "Requesting round {} (level {}, score {})",
        round_id, session.level, session.score
    );
    UpdateResult::action(UpdateAction::BeginRound { round_id })
}
