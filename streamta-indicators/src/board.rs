//! A set of heterogeneous indicators driven by the same candle feed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use streamta_core::Candle;

use crate::core::{Indicator, StreamingIndicator};
use crate::indicators::{
    Atr, BollingerBands, BollingerBandsOutput, Ema, Macd, MacdOutput, Rsi, Sma, Stochastic,
    StochasticOutput,
};

/// One emission of any built-in indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reading {
    /// Single-line indicators (SMA, EMA, RSI, ATR).
    Value {
        /// Emitted value.
        value: Decimal,
    },
    /// Bollinger Bands triple.
    Bands(BollingerBandsOutput),
    /// MACD triple.
    Macd(MacdOutput),
    /// Stochastic %K / %D pair.
    Stochastic(StochasticOutput),
}

impl From<Decimal> for Reading {
    fn from(value: Decimal) -> Self {
        Self::Value { value }
    }
}

impl From<BollingerBandsOutput> for Reading {
    fn from(value: BollingerBandsOutput) -> Self {
        Self::Bands(value)
    }
}

impl From<MacdOutput> for Reading {
    fn from(value: MacdOutput) -> Self {
        Self::Macd(value)
    }
}

impl From<StochasticOutput> for Reading {
    fn from(value: StochasticOutput) -> Self {
        Self::Stochastic(value)
    }
}

/// Any built-in indicator, fed from candles.
///
/// Scalar indicators consume the close; ATR and the Stochastic Oscillator consume the bar.
#[derive(Debug, Clone)]
pub enum AnyIndicator {
    /// Simple moving average.
    Sma(Sma<Candle>),
    /// Exponential moving average.
    Ema(Ema<Candle>),
    /// Relative strength index.
    Rsi(Rsi<Candle>),
    /// Average true range.
    Atr(Atr<Candle>),
    /// Bollinger Bands.
    Bollinger(BollingerBands<Candle>),
    /// Moving average convergence divergence.
    Macd(Macd<Candle>),
    /// Stochastic Oscillator.
    Stochastic(Stochastic<Candle>),
}

macro_rules! dispatch {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            AnyIndicator::Sma($inner) => $body,
            AnyIndicator::Ema($inner) => $body,
            AnyIndicator::Rsi($inner) => $body,
            AnyIndicator::Atr($inner) => $body,
            AnyIndicator::Bollinger($inner) => $body,
            AnyIndicator::Macd($inner) => $body,
            AnyIndicator::Stochastic($inner) => $body,
        }
    };
}

impl AnyIndicator {
    /// Short display name of the wrapped indicator.
    pub fn name(&self) -> &'static str {
        dispatch!(self, inner => inner.name())
    }

    /// Primary lookback period of the wrapped indicator.
    pub fn window_size(&self) -> usize {
        dispatch!(self, inner => inner.window_size())
    }

    /// Number of emissions so far.
    pub fn emitted(&self) -> usize {
        dispatch!(self, inner => inner.series().len())
    }

    /// Feeds one candle; returns the emission it produced, if any.
    pub fn update(&mut self, candle: &Candle) -> Option<Reading> {
        dispatch!(self, inner => inner.next(*candle).map(Reading::from))
    }

    /// Latest emission.
    pub fn last(&self) -> Option<Reading> {
        dispatch!(self, inner => inner.last().map(Reading::from))
    }

    /// Clears the wrapped indicator back to warm-up.
    pub fn reset(&mut self) {
        dispatch!(self, inner => inner.reset())
    }
}

macro_rules! impl_from_indicator {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for AnyIndicator {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_indicator!(
    Sma(Sma<Candle>),
    Ema(Ema<Candle>),
    Rsi(Rsi<Candle>),
    Atr(Atr<Candle>),
    Bollinger(BollingerBands<Candle>),
    Macd(Macd<Candle>),
    Stochastic(Stochastic<Candle>),
);

/// Emission produced by a board entry for one candle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission<'a> {
    /// Label of the entry that emitted.
    pub label: &'a str,
    /// The emitted reading.
    pub reading: Reading,
}

/// Point-in-time summary of one board entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    /// Entry label.
    pub label: String,
    /// Indicator name.
    pub indicator: String,
    /// Primary lookback period.
    pub window: usize,
    /// Number of emissions so far.
    pub emitted: usize,
    /// Latest emission, absent while warming up.
    pub latest: Option<Reading>,
}

/// Ordered collection of labelled indicators updated together.
#[derive(Debug, Clone, Default)]
pub struct IndicatorBoard {
    entries: Vec<(String, AnyIndicator)>,
}

impl IndicatorBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an indicator under `label`. Labels are not required to be unique.
    pub fn insert(&mut self, label: impl Into<String>, indicator: impl Into<AnyIndicator>) {
        self.entries.push((label.into(), indicator.into()));
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the board has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry registered under `label`.
    pub fn get(&self, label: &str) -> Option<&AnyIndicator> {
        self.entries
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, indicator)| indicator)
    }

    /// Feeds `candle` to every entry in insertion order.
    pub fn on_candle(&mut self, candle: &Candle) -> Vec<Emission<'_>> {
        self.entries
            .iter_mut()
            .filter_map(|(label, indicator)| {
                let reading = indicator.update(candle)?;
                Some(Emission {
                    label: label.as_str(),
                    reading,
                })
            })
            .collect()
    }

    /// Summaries of every entry in insertion order.
    pub fn snapshot(&self) -> Vec<EntrySnapshot> {
        self.entries
            .iter()
            .map(|(label, indicator)| EntrySnapshot {
                label: label.clone(),
                indicator: indicator.name().to_string(),
                window: indicator.window_size(),
                emitted: indicator.emitted(),
                latest: indicator.last(),
            })
            .collect()
    }

    /// Resets every entry.
    pub fn reset(&mut self) {
        for (_, indicator) in self.entries.iter_mut() {
            indicator.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn candles(closes: &[i64]) -> Vec<Candle> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(idx, close)| Candle {
                timestamp: base + Duration::minutes(idx as i64),
                open: Decimal::from(*close),
                high: Decimal::from(close + 1),
                low: Decimal::from(close - 1),
                close: Decimal::from(*close),
                volume: Decimal::ONE,
            })
            .collect()
    }

    fn board() -> IndicatorBoard {
        let mut board = IndicatorBoard::new();
        board.insert("sma3", Sma::<Candle>::new(3).unwrap());
        board.insert("atr2", Atr::<Candle>::new(2).unwrap());
        board.insert("macd", Macd::<Candle>::new(2, 3, 2).unwrap());
        board
    }

    #[test]
    fn emits_per_entry_once_warm() {
        let mut board = board();
        let feed = candles(&[10, 11, 12, 13]);

        assert_eq!(board.on_candle(&feed[0]).len(), 0);
        let labels: Vec<_> = board
            .on_candle(&feed[1])
            .into_iter()
            .map(|emission| emission.label.to_string())
            .collect();
        assert_eq!(labels, vec!["atr2"]);

        let emissions = board.on_candle(&feed[2]);
        assert_eq!(emissions.len(), 2);
        assert_eq!(
            emissions[0].reading,
            Reading::Value {
                value: Decimal::from(11)
            }
        );

        let emissions = board.on_candle(&feed[3]);
        assert_eq!(emissions.len(), 3);
        assert!(matches!(emissions[2].reading, Reading::Macd(_)));
    }

    #[test]
    fn snapshot_reports_progress() {
        let mut board = board();
        for candle in candles(&[10, 11, 12]) {
            board.on_candle(&candle);
        }
        let snapshot = board.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].indicator, "SMA");
        assert_eq!(snapshot[0].emitted, 1);
        assert_eq!(snapshot[2].latest, None);
        assert_eq!(snapshot[2].window, 3);

        let json = serde_json::to_value(&snapshot[0]).unwrap();
        assert_eq!(json["latest"]["type"], "value");

        board.reset();
        assert!(board.snapshot().iter().all(|entry| entry.emitted == 0));
        assert_eq!(board.get("atr2").map(AnyIndicator::name), Some("ATR"));
    }
}
