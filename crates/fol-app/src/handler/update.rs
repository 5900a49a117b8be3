//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::GameSession;
use fol_core::StopReason;

use super::{game, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(session: &mut GameSession, message: Message) -> UpdateResult {
    match message {
        Message::Start => game::handle_start(session),
        Message::Stop => game::handle_stop(session, StopReason::UserStopped),
        Message::Guess { index } => game::handle_guess(session, index),

        Message::RoundBuilt { round_id, round } => {
            game::handle_round_built(session, round_id, round)
        }
        Message::RoundFailed { round_id, error } => {
            game::handle_round_failed(session, round_id, error)
        }

        Message::ScoreTick { round_id, score } => {
            game::handle_score_tick(session, round_id, score)
        }
        Message::ScoreExhausted { round_id } => game::handle_score_exhausted(session, round_id),

        Message::Quit => {
            session.request_quit();
            game::handle_stop(session, StopReason::UserStopped)
        }
    }
}
