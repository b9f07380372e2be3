//! Core traits, input adapters and the error type shared by every indicator.

use std::fmt::Display;

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use streamta_core::Candle;
use thiserror::Error;

use crate::series::OutputSeries;

/// Result alias for indicator operations.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// Errors raised while building indicators or reading their output.
///
/// Updates never fail: once an indicator is constructed every observation is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// A construction parameter was rejected: a zero period, a negative multiplier, or
    /// inconsistent periods.
    #[error("{indicator} parameter `{name}` is invalid: {value}")]
    InvalidParameter {
        /// Indicator that rejected the parameter.
        indicator: &'static str,
        /// Parameter name.
        name: &'static str,
        /// Offending value rendered as text.
        value: String,
    },
    /// Random access past the emitted outputs.
    #[error("index {index} is out of range for {len} outputs")]
    OutOfRange {
        /// Requested position.
        index: usize,
        /// Number of outputs available.
        len: usize,
    },
}

impl IndicatorError {
    /// Helper for zero-length periods.
    pub fn invalid_period(indicator: &'static str, name: &'static str, period: usize) -> Self {
        Self::invalid_parameter(
            indicator,
            name,
            format!("{period} (must be greater than zero)"),
        )
    }

    /// Helper for rejected parameters.
    pub fn invalid_parameter(
        indicator: &'static str,
        name: &'static str,
        value: impl Display,
    ) -> Self {
        Self::InvalidParameter {
            indicator,
            name,
            value: value.to_string(),
        }
    }
}

/// Incremental state machine consuming one observation per call.
pub trait Indicator {
    /// Observation type.
    type Input;
    /// Emitted value type.
    type Output;

    /// Feeds one observation and returns the value emitted for it, if warm-up has completed.
    fn next(&mut self, input: Self::Input) -> Option<Self::Output>;

    /// Returns the indicator to its freshly constructed state.
    fn reset(&mut self);
}

/// Indicator that records its emissions and exposes the shared lifecycle accessors.
pub trait StreamingIndicator: Indicator {
    /// The recorded emissions.
    fn series(&self) -> &OutputSeries<Self::Output>;

    /// Primary lookback period.
    fn window_size(&self) -> usize;

    /// Short display name such as `"SMA"`.
    fn name(&self) -> &'static str {
        self.series().name()
    }

    /// Feeds one observation, discarding the immediate result.
    fn add_value<V>(&mut self, value: V)
    where
        Self: Sized,
        V: Into<Self::Input>,
    {
        let _ = self.next(value.into());
    }

    /// Feeds one high/low/close bar to a range-aware indicator.
    fn add_range_value(&mut self, high: Decimal, low: Decimal, close: Decimal)
    where
        Self: Sized,
        Self::Input: From<Hlc>,
    {
        let _ = self.next(Hlc::new(high, low, close).into());
    }

    /// Copy of every emission in arrival order.
    fn output(&self) -> Vec<Self::Output>
    where
        Self::Output: Clone,
    {
        self.series().to_vec()
    }

    /// Checked random access into the emissions.
    fn get(&self, index: usize) -> IndicatorResult<Self::Output>
    where
        Self::Output: Clone,
    {
        self.series().get(index)
    }

    /// The most recent emission.
    fn last(&self) -> Option<Self::Output>
    where
        Self::Output: Clone,
    {
        self.series().last()
    }

    /// Whether warm-up has completed.
    fn is_initialized(&self) -> bool {
        !self.series().is_empty()
    }
}

/// Scalar view over an observation.
pub trait Input {
    /// Value consumed by single-stream indicators.
    fn value(&self) -> Decimal;
}

impl Input for Decimal {
    fn value(&self) -> Decimal {
        *self
    }
}

/// Non-finite floats map to zero.
impl Input for f64 {
    fn value(&self) -> Decimal {
        Decimal::from_f64(*self).unwrap_or_default()
    }
}

impl Input for Candle {
    fn value(&self) -> Decimal {
        self.close
    }
}

impl<T: Input + ?Sized> Input for &T {
    fn value(&self) -> Decimal {
        (**self).value()
    }
}

/// High/low/close view over an observation, used by range-aware indicators.
pub trait RangeInput {
    /// Highest price of the bar.
    fn high(&self) -> Decimal;
    /// Lowest price of the bar.
    fn low(&self) -> Decimal;
    /// Closing price of the bar.
    fn close(&self) -> Decimal;
}

/// Minimal high/low/close bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hlc {
    /// Highest price.
    pub high: Decimal,
    /// Lowest price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
}

impl Hlc {
    /// Builds a bar from its components.
    pub fn new(high: Decimal, low: Decimal, close: Decimal) -> Self {
        Self { high, low, close }
    }

    /// Bar whose high, low and close all equal `value`.
    pub fn flat(value: Decimal) -> Self {
        Self::new(value, value, value)
    }
}

impl From<Decimal> for Hlc {
    fn from(value: Decimal) -> Self {
        Self::flat(value)
    }
}

impl From<(Decimal, Decimal, Decimal)> for Hlc {
    fn from((high, low, close): (Decimal, Decimal, Decimal)) -> Self {
        Self::new(high, low, close)
    }
}

impl From<&Candle> for Hlc {
    fn from(candle: &Candle) -> Self {
        Self::new(candle.high, candle.low, candle.close)
    }
}

impl Input for Hlc {
    fn value(&self) -> Decimal {
        self.close
    }
}

impl RangeInput for Hlc {
    fn high(&self) -> Decimal {
        self.high
    }

    fn low(&self) -> Decimal {
        self.low
    }

    fn close(&self) -> Decimal {
        self.close
    }
}

impl RangeInput for Candle {
    fn high(&self) -> Decimal {
        self.high
    }

    fn low(&self) -> Decimal {
        self.low
    }

    fn close(&self) -> Decimal {
        self.close
    }
}

/// A lone scalar is treated as a flat bar.
impl RangeInput for Decimal {
    fn high(&self) -> Decimal {
        *self
    }

    fn low(&self) -> Decimal {
        *self
    }

    fn close(&self) -> Decimal {
        *self
    }
}

pub(crate) fn decimal_from_usize(value: usize) -> Decimal {
    Decimal::from(value)
}

pub(crate) fn ensure_period(
    indicator: &'static str,
    name: &'static str,
    period: usize,
) -> IndicatorResult<usize> {
    if period == 0 {
        Err(IndicatorError::invalid_period(indicator, name, period))
    } else {
        Ok(period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_inputs_convert_to_decimal() {
        assert_eq!(2.5_f64.value(), Decimal::new(25, 1));
        assert_eq!(f64::NAN.value(), Decimal::ZERO);
    }

    #[test]
    fn scalar_range_input_is_flat() {
        let value = Decimal::from(7);
        assert_eq!(RangeInput::high(&value), value);
        assert_eq!(RangeInput::low(&value), value);
        assert_eq!(Hlc::from(value), Hlc::flat(value));
    }

    #[test]
    fn errors_render_context() {
        let err = IndicatorError::invalid_period("SMA", "period", 0);
        assert_eq!(
            err.to_string(),
            "SMA parameter `period` is invalid: 0 (must be greater than zero)"
        );
        assert!(matches!(err, IndicatorError::InvalidParameter { name: "period", .. }));
        let err = IndicatorError::OutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "index 4 is out of range for 2 outputs");
    }
}
