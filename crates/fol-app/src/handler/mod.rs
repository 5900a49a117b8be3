//! Handler module - TEA update function and game handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `game`: Start/stop/guess and background-result handlers

pub(crate) mod game;
pub(crate) mod update;


use crate::message::Message;
use fol_core::RoundId;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Cancel any running score timer and in-flight build, then build the
    /// round tagged `round_id` in the background.
    BeginRound { round_id: RoundId },

    /// Start decaying `initial_score` for the round now on screen
    StartScoreTimer {
        round_id: RoundId,
        initial_score: u32,
    },

    /// Cancel the score timer and any in-flight build
    EndRound,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
