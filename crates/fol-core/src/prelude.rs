//! Prelude for common imports used throughout all Find or Lose crates

pub use crate::error::{Error, NetworkError, Result, ResultExt, RoundError};
pub use tracing::{debug, error, info, instrument, trace, warn};
