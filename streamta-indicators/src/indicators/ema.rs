//! Exponential Moving Average (EMA).

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::accumulators::ExponentialSmoother;
use crate::core::{ensure_period, Indicator, IndicatorResult, Input, StreamingIndicator};
use crate::series::OutputSeries;

/// Exponentially-weighted moving average seeded with the SMA of the first window.
#[derive(Debug, Clone)]
pub struct Ema<I = Decimal> {
    smoother: ExponentialSmoother,
    series: OutputSeries<Decimal>,
    marker: PhantomData<I>,
}

impl<I> Ema<I>
where
    I: Input,
{
    /// Creates a new EMA with the provided period.
    pub fn new(period: usize) -> IndicatorResult<Self> {
        let period = ensure_period("EMA", "period", period)?;
        Ok(Self {
            smoother: ExponentialSmoother::new(period)?,
            series: OutputSeries::new("EMA"),
            marker: PhantomData,
        })
    }

    /// Returns the current EMA value, if the indicator has produced one.
    pub fn value(&self) -> Option<Decimal> {
        self.smoother.value()
    }
}

impl<I> Indicator for Ema<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let smoothed = self.smoother.next(input.value())?;
        Some(self.series.record(smoothed))
    }

    fn reset(&mut self) {
        self.smoother.reset();
        self.series.clear();
    }
}

impl<I> StreamingIndicator for Ema<I>
where
    I: Input,
{
    fn series(&self) -> &OutputSeries<Decimal> {
        &self.series
    }

    fn window_size(&self) -> usize {
        self.smoother.period()
    }
}
