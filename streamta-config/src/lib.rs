//! Configuration loading for Streamta replays.

mod settings;

use std::collections::HashSet;
use std::path::Path;

use config::{Config, Environment, File};
use streamta_indicators::{IndicatorBoard, IndicatorError};
use thiserror::Error;
use tracing::debug;

pub use settings::{IndicatorConfig, LogConfig, ReplayConfig};

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating a replay configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("indicator `{label}` is misconfigured: {source}")]
    Indicator {
        label: String,
        #[source]
        source: IndicatorError,
    },
    #[error("indicator label `{0}` is used more than once")]
    DuplicateLabel(String),
    #[error("no indicators configured")]
    NoIndicators,
}

/// Load configuration from `path`, then apply `STREAMTA__*` environment overrides.
///
/// Nothing is logged here: callers usually install their subscriber from the loaded
/// `[log]` section, so they report the load themselves.
pub fn load_config(path: &Path) -> ConfigResult<ReplayConfig> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("STREAMTA")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

impl ReplayConfig {
    /// Parse a configuration from TOML text without consulting the environment.
    pub fn from_toml_str(raw: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Build every configured indicator into a board, in declaration order.
    pub fn build_board(&self) -> ConfigResult<IndicatorBoard> {
        if self.indicators.is_empty() {
            return Err(ConfigError::NoIndicators);
        }
        let mut seen = HashSet::new();
        let mut board = IndicatorBoard::new();
        for entry in &self.indicators {
            let label = entry.label();
            if !seen.insert(label.clone()) {
                return Err(ConfigError::DuplicateLabel(label));
            }
            let indicator = entry.build()?;
            debug!(%label, indicator = indicator.name(), window = indicator.window_size(), "indicator ready");
            board.insert(label, indicator);
        }
        Ok(board)
    }
}
