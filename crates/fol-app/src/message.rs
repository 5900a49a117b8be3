//! Message types for the game session (TEA pattern)

use fol_core::{Round, RoundError, RoundId};

/// All possible messages/actions in the game session
#[derive(Debug, Clone)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Player Messages
    // ─────────────────────────────────────────────────────────
    /// Start a game (ignored while already playing)
    Start,
    /// Stop the current game
    Stop,
    /// Player tapped the slot at `index`
    Guess { index: usize },

    // ─────────────────────────────────────────────────────────
    // Round Build Completion
    // ─────────────────────────────────────────────────────────
    /// Background round build succeeded
    RoundBuilt { round_id: RoundId, round: Round },
    /// Background round build failed
    RoundFailed { round_id: RoundId, error: RoundError },

    // ─────────────────────────────────────────────────────────
    // Score Timer
    // ─────────────────────────────────────────────────────────
    /// Decay tick reporting the new score
    ScoreTick { round_id: RoundId, score: u32 },
    /// Score reached zero
    ScoreExhausted { round_id: RoundId },

    /// Shut down (signal handler, stdin quit)
    Quit,
}
