//! # fol-core - Core Domain Types
//!
//! Foundation crate for Find or Lose. Provides the round model, score
//! arithmetic, error taxonomy, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing, bytes, url, rand).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`GamePhase`] - Session phase (Stopped, Playing)
//! - [`ImageDescriptor`] - Remote image URL plus service metadata
//! - [`ImageBytes`] / [`ImageKind`] - Downloaded bytes and their detected format
//! - [`StopReason`], [`GuessOutcome`] - Why a session stopped, how a guess went
//!
//! ### Rounds (`round`)
//! - [`Round`] - Four tagged slots, one singleton and one triple
//! - [`FetchedImage`] / [`RoundImage`] - Untagged and tagged images
//!
//! ### Score (`score`)
//! - [`DecayConfig`] - Tick step and interval, saturating decay
//!
//! ### Error Handling (`error`)
//! - [`NetworkError`] - Transport, status, and decode failures
//! - [`RoundError`] - A round could not be assembled
//! - [`Error`] / [`Result`] / [`ResultExt`] - Application-wide errors
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use fol_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod prelude;
pub mod round;
pub mod score;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, NetworkError, Result, ResultExt, RoundError, RoundStage};
pub use round::{
    FetchedImage, Round, RoundImage, REPEATED_IMAGE_ID, REPEAT_COUNT, ROUND_SIZE, UNIQUE_IMAGE_ID,
};
pub use score::{DecayConfig, DEFAULT_DECAY_STEP, DEFAULT_ROUND_BONUS, DEFAULT_TICK_INTERVAL};
pub use types::{
    GamePhase, GuessOutcome, ImageBytes, ImageDescriptor, ImageId, ImageKind, RoundId, StopReason,
};
