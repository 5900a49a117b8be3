//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failure talking to the photo service or downloading image bytes.
///
/// Cloneable so it can travel inside messages back to the update loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("Transport failure: {message}")]
    Transport { message: String },

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {message}")]
    Decode { message: String },

    #[error("Empty response body from {url}")]
    EmptyBody { url: String },

    #[error("Response from {url} is not a supported image")]
    UnsupportedImage { url: String },
}

impl NetworkError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }
}

/// Which half of a round was being fetched when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStage {
    /// The image shown exactly once
    UniqueImage,
    /// The image shown three times
    RepeatedImage,
}

impl std::fmt::Display for RoundStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundStage::UniqueImage => write!(f, "unique image"),
            RoundStage::RepeatedImage => write!(f, "repeated image"),
        }
    }
}

/// A round could not be assembled. Always all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("Failed to fetch {stage}: {source}")]
    Network {
        stage: RoundStage,
        #[source]
        source: NetworkError,
    },
}

impl RoundError {
    pub fn network(stage: RoundStage, source: NetworkError) -> Self {
        Self::Network { stage, source }
    }

    /// The underlying network failure
    pub fn network_error(&self) -> &NetworkError {
        match self {
            RoundError::Network { source, .. } => source,
        }
    }
}

/// Application-wide error
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Infrastructure
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Game
    // ─────────────────────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Round error: {0}")]
    Round(#[from] RoundError),

    #[error("Invalid round: {message}")]
    InvalidRound { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },
}

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn invalid_round(message: impl Into<String>) -> Self {
        Self::InvalidRound {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    /// A failed round or a bad response; the player can simply start again
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Network(_) | Error::Round(_) | Error::InvalidRound { .. }
        )
    }

    /// The game cannot run at all
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ConfigInvalid { .. } | Error::Terminal { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
