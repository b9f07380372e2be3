//! Moving Average Convergence Divergence indicator implementation.

use std::marker::PhantomData;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accumulators::ExponentialSmoother;
use crate::core::{
    ensure_period, Indicator, IndicatorError, IndicatorResult, Input, StreamingIndicator,
};
use crate::series::OutputSeries;

/// MACD output (line, signal line, and histogram).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line value (fast EMA minus slow EMA).
    pub macd: Decimal,
    /// Signal line value (EMA of the MACD line).
    pub signal: Decimal,
    /// Histogram representing the distance between MACD and signal lines.
    pub histogram: Decimal,
}

/// Moving Average Convergence Divergence indicator.
///
/// The MACD line starts once the slow EMA is seeded and is recorded on its own, because it
/// runs ahead of the signal line by `signal_period - 1` observations. Only complete triples
/// are emitted.
#[derive(Debug, Clone)]
pub struct Macd<I = Decimal> {
    fast: ExponentialSmoother,
    slow: ExponentialSmoother,
    signal: ExponentialSmoother,
    macd_line: Vec<Decimal>,
    series: OutputSeries<MacdOutput>,
    marker: PhantomData<I>,
}

impl<I> Macd<I>
where
    I: Input,
{
    /// Create a MACD indicator with custom fast/slow/signal periods.
    pub fn new(
        fast_period: usize,
        slow_period: usize,
        signal_period: usize,
    ) -> IndicatorResult<Self> {
        let fast_period = ensure_period("MACD", "fast_period", fast_period)?;
        let slow_period = ensure_period("MACD", "slow_period", slow_period)?;
        let signal_period = ensure_period("MACD", "signal_period", signal_period)?;
        if fast_period >= slow_period {
            return Err(IndicatorError::invalid_parameter(
                "MACD",
                "fast_period",
                format!("{fast_period} must be smaller than slow period {slow_period}"),
            ));
        }
        Ok(Self {
            fast: ExponentialSmoother::new(fast_period)?,
            slow: ExponentialSmoother::new(slow_period)?,
            signal: ExponentialSmoother::new(signal_period)?,
            macd_line: Vec::new(),
            series: OutputSeries::new("MACD"),
            marker: PhantomData,
        })
    }

    /// Every MACD line value, including those produced while the signal EMA warms up.
    pub fn macd_line(&self) -> Vec<Decimal> {
        self.macd_line.clone()
    }

    /// Signal line values in emission order.
    pub fn signal_line(&self) -> Vec<Decimal> {
        self.series.iter().map(|out| out.signal).collect()
    }

    /// Histogram values in emission order.
    pub fn histogram(&self) -> Vec<Decimal> {
        self.series.iter().map(|out| out.histogram).collect()
    }
}

impl<I> Indicator for Macd<I>
where
    I: Input,
{
    type Input = I;
    type Output = MacdOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let value = input.value();
        let fast = self.fast.next(value);
        let slow = self.slow.next(value);
        let (fast_val, slow_val) = fast.zip(slow)?;

        let macd = fast_val.saturating_sub(slow_val);
        self.macd_line.push(macd);
        let signal_line = self.signal.next(macd)?;
        Some(self.series.record(MacdOutput {
            macd,
            signal: signal_line,
            histogram: macd.saturating_sub(signal_line),
        }))
    }

    fn reset(&mut self) {
        self.fast.reset();
        self.slow.reset();
        self.signal.reset();
        self.macd_line.clear();
        self.series.clear();
    }
}

impl<I> StreamingIndicator for Macd<I>
where
    I: Input,
{
    fn series(&self) -> &OutputSeries<MacdOutput> {
        &self.series
    }

    /// The slow period, which bounds the first MACD line value.
    fn window_size(&self) -> usize {
        self.slow.period()
    }
}
