//! Typed replay settings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use streamta_core::Candle;
use streamta_indicators::indicators::{
    Atr, BollingerBands, Ema, Macd, Rsi, Sma, Stochastic,
};
use streamta_indicators::AnyIndicator;

use crate::{ConfigError, ConfigResult};

/// Top-level configuration of a replay run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub indicators: Vec<IndicatorConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// One indicator to attach to the replay, selected by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IndicatorConfig {
    Sma {
        #[serde(default)]
        label: Option<String>,
        period: usize,
    },
    Ema {
        #[serde(default)]
        label: Option<String>,
        period: usize,
    },
    Rsi {
        #[serde(default)]
        label: Option<String>,
        #[serde(default = "default_rsi_period")]
        period: usize,
    },
    Atr {
        #[serde(default)]
        label: Option<String>,
        #[serde(default = "default_atr_period")]
        period: usize,
    },
    Bbands {
        #[serde(default)]
        label: Option<String>,
        #[serde(default = "default_bbands_period")]
        period: usize,
        #[serde(default = "default_bbands_multiplier")]
        std_multiplier: Decimal,
    },
    Macd {
        #[serde(default)]
        label: Option<String>,
        #[serde(default = "default_macd_fast")]
        fast: usize,
        #[serde(default = "default_macd_slow")]
        slow: usize,
        #[serde(default = "default_macd_signal")]
        signal: usize,
    },
    Stoch {
        #[serde(default)]
        label: Option<String>,
        #[serde(default = "default_stoch_period")]
        period: usize,
        #[serde(default = "default_stoch_smooth_k")]
        smooth_k: usize,
        #[serde(default = "default_stoch_smooth_d")]
        smooth_d: usize,
    },
}

impl IndicatorConfig {
    /// Explicit label, or one derived from the kind and parameters, e.g. `macd(12,26,9)`.
    pub fn label(&self) -> String {
        let explicit = match self {
            Self::Sma { label, .. }
            | Self::Ema { label, .. }
            | Self::Rsi { label, .. }
            | Self::Atr { label, .. }
            | Self::Bbands { label, .. }
            | Self::Macd { label, .. }
            | Self::Stoch { label, .. } => label,
        };
        if let Some(label) = explicit {
            return label.clone();
        }
        match self {
            Self::Sma { period, .. } => format!("sma({period})"),
            Self::Ema { period, .. } => format!("ema({period})"),
            Self::Rsi { period, .. } => format!("rsi({period})"),
            Self::Atr { period, .. } => format!("atr({period})"),
            Self::Bbands {
                period,
                std_multiplier,
                ..
            } => format!("bbands({period},{std_multiplier})"),
            Self::Macd {
                fast, slow, signal, ..
            } => format!("macd({fast},{slow},{signal})"),
            Self::Stoch {
                period,
                smooth_k,
                smooth_d,
                ..
            } => format!("stoch({period},{smooth_k},{smooth_d})"),
        }
    }

    /// Constructs the configured indicator, validating its parameters.
    pub fn build(&self) -> ConfigResult<AnyIndicator> {
        let built = match self {
            Self::Sma { period, .. } => Sma::<Candle>::new(*period).map(AnyIndicator::from),
            Self::Ema { period, .. } => Ema::<Candle>::new(*period).map(AnyIndicator::from),
            Self::Rsi { period, .. } => Rsi::<Candle>::new(*period).map(AnyIndicator::from),
            Self::Atr { period, .. } => Atr::<Candle>::new(*period).map(AnyIndicator::from),
            Self::Bbands {
                period,
                std_multiplier,
                ..
            } => BollingerBands::<Candle>::new(*period, *std_multiplier).map(AnyIndicator::from),
            Self::Macd {
                fast, slow, signal, ..
            } => Macd::<Candle>::new(*fast, *slow, *signal).map(AnyIndicator::from),
            Self::Stoch {
                period,
                smooth_k,
                smooth_d,
                ..
            } => Stochastic::<Candle>::new(*period, *smooth_k, *smooth_d).map(AnyIndicator::from),
        };
        built.map_err(|source| ConfigError::Indicator {
            label: self.label(),
            source,
        })
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_rsi_period() -> usize {
    14
}

fn default_atr_period() -> usize {
    14
}

fn default_bbands_period() -> usize {
    20
}

fn default_bbands_multiplier() -> Decimal {
    Decimal::from(2)
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_stoch_period() -> usize {
    14
}

fn default_stoch_smooth_k() -> usize {
    1
}

fn default_stoch_smooth_d() -> usize {
    3
}
