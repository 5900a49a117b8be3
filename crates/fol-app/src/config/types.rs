//! Configuration types for Find or Lose

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use fol_core::prelude::*;
use fol_core::{DecayConfig, DEFAULT_DECAY_STEP, DEFAULT_ROUND_BONUS, DEFAULT_TICK_INTERVAL};
use fol_photos::{
    ProviderConfig, DEFAULT_ACCEPT_VERSION, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT,
};

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub photos: PhotoSettings,

    #[serde(default)]
    pub game: GameSettings,
}

impl Settings {
    /// Reject settings the game cannot run with
    pub fn validate(&self) -> Result<()> {
        self.photos.validate()?;
        self.game.validate()
    }
}

/// Photo service settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhotoSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Access token sent as `client_id`
    #[serde(default)]
    pub access_token: String,

    #[serde(default = "default_accept_version")]
    pub accept_version: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for PhotoSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            access_token: String::new(),
            accept_version: default_accept_version(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl PhotoSettings {
    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(Error::config_invalid(
                "photos.access_token is empty; set it in config.toml or FOL_ACCESS_TOKEN",
            ));
        }
        self.base_url()?;
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.api_base_url).map_err(|e| {
            Error::config_invalid(format!(
                "photos.api_base_url '{}' is not a valid URL: {}",
                self.api_base_url, e
            ))
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn provider_config(&self) -> Result<ProviderConfig> {
        let mut config = ProviderConfig::new(self.base_url()?, self.access_token.trim());
        config.accept_version = self.accept_version.clone();
        Ok(config)
    }
}

/// Scoring settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameSettings {
    /// Score credited when a round starts
    #[serde(default = "default_round_bonus")]
    pub round_bonus: u32,

    /// Points removed per tick
    #[serde(default = "default_decay_step")]
    pub decay_step: u32,

    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            round_bonus: default_round_bonus(),
            decay_step: default_decay_step(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<()> {
        if self.decay_step == 0 {
            return Err(Error::config_invalid("game.decay_step must be positive"));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::config_invalid(
                "game.tick_interval_ms must be positive",
            ));
        }
        Ok(())
    }

    pub fn decay(&self) -> DecayConfig {
        DecayConfig {
            step: self.decay_step,
            interval: Duration::from_millis(self.tick_interval_ms),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_accept_version() -> String {
    DEFAULT_ACCEPT_VERSION.to_string()
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_millis() as u64
}

fn default_round_bonus() -> u32 {
    DEFAULT_ROUND_BONUS
}

fn default_decay_step() -> u32 {
    DEFAULT_DECAY_STEP
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL.as_millis() as u64
}
