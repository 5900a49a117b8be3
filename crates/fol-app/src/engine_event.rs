//! Domain events emitted by the Engine for presentation adapters
//!
//! Adapters subscribe via `Engine::subscribe()` instead of reading session
//! state directly. Events are broadcast after each message processing cycle,
//! so subscribers see a consistent view of state changes.

use fol_core::{GamePhase, GuessOutcome, Round, RoundId, StopReason};

/// Domain events emitted by the Engine for external consumers.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Session moved between stopped and playing
    PhaseChanged {
        old_phase: GamePhase,
        new_phase: GamePhase,
    },

    /// A new round was requested; show loading indicators
    RoundLoading { round_id: RoundId, level: u32 },

    /// The round is on screen and its score is decaying
    RoundReady {
        round_id: RoundId,
        level: u32,
        score: u32,
        round: Round,
    },

    /// Score changed (bonus credited, decay tick, or reset)
    ScoreChanged { score: u32 },

    /// A guess was evaluated
    GuessEvaluated { outcome: GuessOutcome },

    /// Session returned to stopped
    GameStopped { reason: StopReason },

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::PhaseChanged { .. } => "phase_changed",
            Self::RoundLoading { .. } => "round_loading",
            Self::RoundReady { .. } => "round_ready",
            Self::ScoreChanged { .. } => "score_changed",
            Self::GuessEvaluated { .. } => "guess_evaluated",
            Self::GameStopped { .. } => "game_stopped",
            Self::Shutdown => "shutdown",
        }
    }
}
