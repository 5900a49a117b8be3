//! Configuration file parsing for Find or Lose
//!
//! Supports `<config_dir>/find-or-lose/config.toml` (or an explicit path)
//! with `FOL_ACCESS_TOKEN` overriding the photo service token.

pub mod settings;
pub mod types;

pub use settings::{
    apply_env_overrides, default_config_path, init_config_file, load_settings,
    load_validated_settings, parse_settings, ACCESS_TOKEN_ENV,
};
pub use types::*;
