//! Simple Moving Average (SMA).

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::accumulators::SlidingAverage;
use crate::core::{ensure_period, Indicator, IndicatorResult, Input, StreamingIndicator};
use crate::series::OutputSeries;

/// Computes the arithmetic mean over a rolling window.
#[derive(Debug, Clone)]
pub struct Sma<I = Decimal> {
    average: SlidingAverage,
    series: OutputSeries<Decimal>,
    marker: PhantomData<I>,
}

impl<I> Sma<I>
where
    I: Input,
{
    /// Creates a new SMA with the provided period.
    pub fn new(period: usize) -> IndicatorResult<Self> {
        let period = ensure_period("SMA", "period", period)?;
        Ok(Self {
            average: SlidingAverage::new(period)?,
            series: OutputSeries::new("SMA"),
            marker: PhantomData,
        })
    }

    /// Returns the configured lookback period.
    pub fn period(&self) -> usize {
        self.average.period()
    }
}

impl<I> Indicator for Sma<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let mean = self.average.next(input.value())?;
        Some(self.series.record(mean))
    }

    fn reset(&mut self) {
        self.average.reset();
        self.series.clear();
    }
}

impl<I> StreamingIndicator for Sma<I>
where
    I: Input,
{
    fn series(&self) -> &OutputSeries<Decimal> {
        &self.series
    }

    fn window_size(&self) -> usize {
        self.period()
    }
}
