//! Settings parser for config.toml

use std::path::{Path, PathBuf};

use super::types::Settings;
use fol_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "find-or-lose";

/// Environment variable that overrides `photos.access_token`
pub const ACCESS_TOKEN_ENV: &str = "FOL_ACCESS_TOKEN";

/// Default config location: `<config_dir>/find-or-lose/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILENAME)
}

/// Load settings from `config_path`, falling back to defaults when the file
/// is missing, unreadable, or malformed.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    let parsed = std::fs::read_to_string(config_path)
        .map_err(Error::from)
        .and_then(|content| parse_settings(&content));

    match parsed {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", config_path);
            settings
        }
        Err(e) => {
            warn!("Ignoring {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Parse config.toml content; absent keys take their defaults
pub fn parse_settings(content: &str) -> Result<Settings> {
    Ok(toml::from_str(content)?)
}

/// Apply environment overrides on top of file settings
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
        if !token.trim().is_empty() {
            debug!("Using access token from {}", ACCESS_TOKEN_ENV);
            settings.photos.access_token = token;
        }
    }
}

/// Load, override from the environment, and validate.
pub fn load_validated_settings(config_path: &Path) -> Result<Settings> {
    let mut settings = load_settings(config_path);
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

/// Write a commented default config file. Returns `false` if one already
/// exists.
pub fn init_config_file(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", parent, e)))?;
    }

    let default_content = r#"# Find or Lose Configuration

[photos]
api_base_url = "https://api.unsplash.com"
access_token = ""            # or set FOL_ACCESS_TOKEN
accept_version = "v1"
request_timeout_ms = 10000

[game]
round_bonus = 200            # score credited when a round starts
decay_step = 10              # points lost per tick
tick_interval_ms = 100
"#;

    std::fs::write(config_path, default_content)?;
    info!("Created default config at {:?}", config_path);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_missing_file() {
        let dir = tempdir().unwrap();
        let settings = load_settings(&dir.path().join("config.toml"));
        assert_eq!(settings.game.round_bonus, 200);
    }

    #[test]
    fn test_load_settings_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[photos]
access_token = "abc"

[game]
round_bonus = 500
"#,
        )
        .unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings.photos.access_token, "abc");
        assert_eq!(settings.photos.api_base_url, "https://api.unsplash.com");
        assert_eq!(settings.game.round_bonus, 500);
        assert_eq!(settings.game.decay_step, 10);
    }

    #[test]
    fn test_load_settings_malformed_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[game\nround_bonus = ").unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings.game.round_bonus, 200);
    }

    #[test]
    fn test_parse_settings_reports_toml_error() {
        let err = parse_settings("[photos]\naccess_token = ").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_init_config_file_creates_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(init_config_file(&path).unwrap());
        assert!(!init_config_file(&path).unwrap());

        let settings = load_settings(&path);
        assert_eq!(settings.game.tick_interval_ms, 100);
        assert!(settings.photos.access_token.is_empty());
    }

    #[test]
    #[serial]
    fn test_env_override_sets_token() {
        let dir = tempdir().unwrap();
        std::env::set_var(ACCESS_TOKEN_ENV, "from-env");

        let result = load_validated_settings(&dir.path().join("config.toml"));
        std::env::remove_var(ACCESS_TOKEN_ENV);

        assert_eq!(result.unwrap().photos.access_token, "from-env");
    }

    #[test]
    #[serial]
    fn test_missing_token_is_fatal() {
        std::env::remove_var(ACCESS_TOKEN_ENV);
        let dir = tempdir().unwrap();

        let err = load_validated_settings(&dir.path().join("config.toml")).unwrap_err();
        assert!(err.is_fatal());
    }
}
