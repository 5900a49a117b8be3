//! Headless mode - line commands in, JSON events out
//!
//! Commands are read from stdin, one per line. Game events are written to
//! stdout as NDJSON (newline-delimited JSON), one object per line, tagged by
//! an "event" field.
//!
//! # Example Output
//!
//! ```json
//! {"event":"phase_changed","old_phase":"stopped","new_phase":"playing","timestamp":1704700001000}
//! {"event":"round_loading","round_id":1,"level":1,"timestamp":1704700001001}
//! {"event":"score_changed","score":200,"timestamp":1704700001001}
//! {"event":"round_ready","round_id":1,"level":1,"score":200,"slots":[...],"timestamp":1704700001350}
//! ```

pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use fol_app::EngineEvent;
use fol_core::{GamePhase, ImageId, ImageKind, Round, RoundId, StopReason};

/// One slot of a round as shown to headless consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSummary {
    pub index: usize,
    /// Identity tag; three slots share one value
    pub image: ImageId,
    pub photo_id: Option<String>,
    pub url: String,
    pub kind: ImageKind,
    pub len: usize,
}

impl SlotSummary {
    fn from_round(round: &Round) -> Vec<Self> {
        round
            .slots()
            .iter()
            .enumerate()
            .map(|(index, slot)| Self {
                index,
                image: slot.id,
                photo_id: slot.descriptor.photo_id.clone(),
                url: slot.descriptor.url.to_string(),
                kind: slot.bytes.kind,
                len: slot.bytes.len(),
            })
            .collect()
    }
}

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    PhaseChanged {
        old_phase: GamePhase,
        new_phase: GamePhase,
        timestamp: i64,
    },

    RoundLoading {
        round_id: RoundId,
        level: u32,
        timestamp: i64,
    },

    RoundReady {
        round_id: RoundId,
        level: u32,
        score: u32,
        slots: Vec<SlotSummary>,
        timestamp: i64,
    },

    ScoreChanged { score: u32, timestamp: i64 },

    GuessEvaluated {
        index: usize,
        correct: bool,
        timestamp: i64,
    },

    GameStopped {
        reason: &'static str,
        detail: String,
        timestamp: i64,
    },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn phase_changed(old_phase: GamePhase, new_phase: GamePhase) -> Self {
        Self::PhaseChanged {
            old_phase,
            new_phase,
            timestamp: Self::now(),
        }
    }

    pub fn round_loading(round_id: RoundId, level: u32) -> Self {
        Self::RoundLoading {
            round_id,
            level,
            timestamp: Self::now(),
        }
    }

    pub fn round_ready(round_id: RoundId, level: u32, score: u32, round: &Round) -> Self {
        Self::RoundReady {
            round_id,
            level,
            score,
            slots: SlotSummary::from_round(round),
            timestamp: Self::now(),
        }
    }

    pub fn score_changed(score: u32) -> Self {
        Self::ScoreChanged {
            score,
            timestamp: Self::now(),
        }
    }

    pub fn guess_evaluated(index: usize, correct: bool) -> Self {
        Self::GuessEvaluated {
            index,
            correct,
            timestamp: Self::now(),
        }
    }

    pub fn game_stopped(reason: &StopReason) -> Self {
        let code = match reason {
            StopReason::UserStopped => "user_stopped",
            StopReason::WrongGuess => "wrong_guess",
            StopReason::ScoreExhausted => "score_exhausted",
            StopReason::RoundFailed { .. } => "round_failed",
        };
        Self::GameStopped {
            reason: code,
            detail: reason.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }

    /// Translate an engine event into the lines written for it.
    ///
    /// A failed round also reports a non-fatal error; shutdown writes nothing.
    pub fn from_engine_event(event: &EngineEvent) -> Vec<Self> {
        match event {
            EngineEvent::PhaseChanged {
                old_phase,
                new_phase,
            } => vec![Self::phase_changed(*old_phase, *new_phase)],
            EngineEvent::RoundLoading { round_id, level } => {
                vec![Self::round_loading(*round_id, *level)]
            }
            EngineEvent::RoundReady {
                round_id,
                level,
                score,
                round,
            } => vec![Self::round_ready(*round_id, *level, *score, round)],
            EngineEvent::ScoreChanged { score } => vec![Self::score_changed(*score)],
            EngineEvent::GuessEvaluated { outcome } => {
                vec![Self::guess_evaluated(outcome.index, outcome.correct)]
            }
            EngineEvent::GameStopped { reason } => {
                let mut events = vec![Self::game_stopped(reason)];
                if let StopReason::RoundFailed { message } = reason {
                    events.push(Self::error(message.clone(), false));
                }
                events
            }
            EngineEvent::Shutdown => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_core::{FetchedImage, GuessOutcome, ImageBytes, ImageDescriptor};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use url::Url;

    fn to_value(event: &HeadlessEvent) -> serde_json::Value {
        let json = serde_json::to_string(event).expect("serialization failed");
        serde_json::from_str(&json).expect("invalid JSON")
    }

    fn fetched(name: &str, kind: ImageKind) -> FetchedImage {
        let url = Url::parse(&format!("https://images.test/{}.jpg", name)).unwrap();
        FetchedImage {
            descriptor: ImageDescriptor::new(url).with_photo_id(name),
            bytes: ImageBytes::new(name.as_bytes().to_vec(), kind),
        }
    }

    #[test]
    fn test_phase_changed_serialization() {
        let value = to_value(&HeadlessEvent::phase_changed(
            GamePhase::Stopped,
            GamePhase::Playing,
        ));

        assert_eq!(value["event"], "phase_changed");
        assert_eq!(value["old_phase"], "stopped");
        assert_eq!(value["new_phase"], "playing");
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_round_ready_lists_slots() {
        let round = Round::assemble(
            fetched("odd", ImageKind::Png),
            fetched("same", ImageKind::Jpeg),
            &mut StdRng::seed_from_u64(3),
        );
        let value = to_value(&HeadlessEvent::round_ready(2, 2, 390, &round));

        assert_eq!(value["event"], "round_ready");
        assert_eq!(value["round_id"], 2);
        assert_eq!(value["score"], 390);

        let slots = value["slots"].as_array().unwrap();
        assert_eq!(slots.len(), 4);
        let odd: Vec<_> = slots.iter().filter(|s| s["image"] == 0).collect();
        assert_eq!(odd.len(), 1);
        assert_eq!(odd[0]["url"], "https://images.test/odd.jpg");
        assert_eq!(odd[0]["kind"], "png");
        assert_eq!(odd[0]["len"], 3);
        assert_eq!(odd[0]["photo_id"], "odd");
    }

    #[test]
    fn test_game_stopped_serialization() {
        let value = to_value(&HeadlessEvent::game_stopped(&StopReason::WrongGuess));

        assert_eq!(value["event"], "game_stopped");
        assert_eq!(value["reason"], "wrong_guess");
        assert_eq!(value["detail"], "picked the odd one out");
    }

    #[test]
    fn test_guess_evaluated_from_engine_event() {
        let events = HeadlessEvent::from_engine_event(&EngineEvent::GuessEvaluated {
            outcome: GuessOutcome {
                index: 3,
                correct: true,
            },
        });

        assert_eq!(events.len(), 1);
        let value = to_value(&events[0]);
        assert_eq!(value["event"], "guess_evaluated");
        assert_eq!(value["index"], 3);
        assert_eq!(value["correct"], true);
    }

    #[test]
    fn test_round_failure_also_reports_error() {
        let events = HeadlessEvent::from_engine_event(&EngineEvent::GameStopped {
            reason: StopReason::RoundFailed {
                message: "unique image: connection refused".to_string(),
            },
        });

        assert_eq!(events.len(), 2);
        let error = to_value(&events[1]);
        assert_eq!(error["event"], "error");
        assert_eq!(error["fatal"], false);
        assert_eq!(error["message"], "unique image: connection refused");
    }

    #[test]
    fn test_shutdown_writes_nothing() {
        assert!(HeadlessEvent::from_engine_event(&EngineEvent::Shutdown).is_empty());
    }
}
