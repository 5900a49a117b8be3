//! Core domain types for a game session

use bytes::Bytes;
use serde::Serialize;
use url::Url;

/// Identifier issued for each round request. Only the highest-issued id may
/// commit a result.
pub type RoundId = u64;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// No round active, score and level at zero
    #[default]
    Stopped,
    /// A round is loading or on screen
    Playing,
}

impl GamePhase {
    pub fn is_playing(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GamePhase::Stopped => write!(f, "stopped"),
            GamePhase::Playing => write!(f, "playing"),
        }
    }
}

/// Identity tag for an image within a round.
///
/// Correctness is decided by how often a tag appears in the round, never by
/// comparing image bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ImageId(pub u8);

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "img-{}", self.0)
    }
}

/// Remote image as described by the photo service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Service-side photo id, when the payload carries one
    pub photo_id: Option<String>,
    /// URL of the image bytes
    pub url: Url,
}

impl ImageDescriptor {
    pub fn new(url: Url) -> Self {
        Self {
            photo_id: None,
            url,
        }
    }

    pub fn with_photo_id(mut self, photo_id: impl Into<String>) -> Self {
        self.photo_id = Some(photo_id.into());
        self
    }
}

/// Image container format detected from the downloaded bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    WebP,
    Other,
}

/// Downloaded image bytes. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBytes {
    pub data: Bytes,
    pub kind: ImageKind,
}

impl ImageBytes {
    pub fn new(data: impl Into<Bytes>, kind: ImageKind) -> Self {
        Self {
            data: data.into(),
            kind,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Why the session last returned to [`GamePhase::Stopped`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    /// Player pressed stop
    UserStopped,
    /// Player picked the singleton
    WrongGuess,
    /// The decaying score hit zero
    ScoreExhausted,
    /// The round could not be assembled
    RoundFailed { message: String },
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::UserStopped => write!(f, "stopped by player"),
            StopReason::WrongGuess => write!(f, "picked the odd one out"),
            StopReason::ScoreExhausted => write!(f, "score ran out"),
            StopReason::RoundFailed { message } => write!(f, "round failed: {}", message),
        }
    }
}

/// Result of evaluating one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    /// Slot the player picked
    pub index: usize,
    /// True when the slot held one of the three repeated images
    pub correct: bool,
}
