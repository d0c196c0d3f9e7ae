//! Application configuration: session settings plus driver knobs.

use crate::cli::Overrides;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};
use turnclock_session::{ConfigError, SessionConfig};

/// Everything the console driver needs to run.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    tick_interval_ms: u64,

    /// Seed for the session's random source. Random when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,

    /// Session settings.
    #[serde(default)]
    session: SessionConfig,
}

fn default_tick_interval_ms() -> u64 {
    100
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            seed: None,
            session: SessionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(mode = %config.session.game_mode(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the driver settings and the session settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::new("tick_interval_ms must be greater than zero"));
        }
        self.session.validate()
    }

    /// Loads `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Layers command-line overrides on top and validates the result.
    #[instrument(skip_all)]
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut session = self.session.clone();
        if let Some(mode) = overrides.mode {
            session = session.with_game_mode(mode);
        }
        if let Some(difficulty) = overrides.difficulty {
            session = session.with_difficulty(difficulty);
        }
        if let Some(secs) = overrides.max_turn_secs {
            session = session.with_max_time_per_turn(seconds("--max-turn-secs", secs)?);
        }
        if let Some(secs) = overrides.finished_delay_secs {
            session = session.with_finished_to_idle_delay(seconds("--finished-delay-secs", secs)?);
        }
        if let Some(secs) = overrides.think_secs {
            session = session.with_ai_think_delay(seconds("--think-secs", secs)?);
        }
        self.session = session;

        if let Some(ms) = overrides.tick_ms {
            self.tick_interval_ms = ms;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }

        self.validate()?;
        Ok(self)
    }

    /// Tick interval as a duration.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::new(format!("Failed to render config: {}", e)))
    }
}

#[track_caller]
fn seconds(flag: &str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value)
        .map_err(|e| ConfigError::new(format!("{} {}: {}", flag, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use turnclock_board::Difficulty;
    use turnclock_session::GameMode;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.seed(), &None);
        assert_eq!(config.session(), &SessionConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            tick_interval_ms = 50
            seed = 9

            [session]
            max_time_per_turn = 15.0
            game_mode = "single-player"
            difficulty = "easy"
            "#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.tick_interval_ms(), 50);
        assert_eq!(*config.seed(), Some(9));
        assert_eq!(*config.session().game_mode(), GameMode::SinglePlayer);
        assert_eq!(*config.session().max_time_per_turn(), Duration::from_secs(15));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = AppConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = AppConfig::from_toml("[session]\nmax_time_per_turn = 30.0\n").unwrap();
        let overrides = Overrides {
            max_turn_secs: Some(5.0),
            seed: Some(3),
            ..Overrides::default()
        };
        let config = config.with_overrides(&overrides).unwrap();
        assert_eq!(*config.session().max_time_per_turn(), Duration::from_secs(5));
        assert_eq!(*config.seed(), Some(3));
    }

    #[test]
    fn test_overrides_are_validated() {
        let overrides = Overrides {
            mode: Some(GameMode::SinglePlayer),
            difficulty: Some(Difficulty::Legendary),
            ..Overrides::default()
        };
        assert!(AppConfig::load(None).unwrap().with_overrides(&overrides).is_err());

        let negative = Overrides {
            think_secs: Some(-2.0),
            ..Overrides::default()
        };
        assert!(AppConfig::load(None).unwrap().with_overrides(&negative).is_err());
    }

    #[test]
    fn test_zero_tick_interval_rejected_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tick_interval_ms = 0").unwrap();
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("tick_interval_ms"));

        let overrides = Overrides {
            tick_ms: Some(0),
            ..Overrides::default()
        };
        assert!(AppConfig::default().with_overrides(&overrides).is_err());
    }

    #[test]
    fn test_toml_round_trips_settings() {
        let config = AppConfig::load(None).unwrap();
        let text = config.to_toml().unwrap();
        assert!(text.contains("max_time_per_turn = 120.0"));
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }
}
