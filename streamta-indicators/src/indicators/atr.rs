//! Average True Range indicator implementation.

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::accumulators::WilderSmoother;
use crate::core::{ensure_period, Hlc, Indicator, IndicatorResult, RangeInput, StreamingIndicator};
use crate::series::OutputSeries;

/// Average True Range indicator.
///
/// Generic over the bar type; `Atr<Decimal>` treats each scalar as a flat bar, so after the
/// first observation the true range is driven purely by gaps between closes.
#[derive(Debug, Clone)]
pub struct Atr<I = Hlc> {
    prev_close: Option<Decimal>,
    smoother: WilderSmoother,
    series: OutputSeries<Decimal>,
    marker: PhantomData<I>,
}

impl<I> Atr<I>
where
    I: RangeInput,
{
    /// Create a new ATR indicator with the provided period.
    pub fn new(period: usize) -> IndicatorResult<Self> {
        let period = ensure_period("ATR", "period", period)?;
        Ok(Self {
            prev_close: None,
            smoother: WilderSmoother::new(period)?,
            series: OutputSeries::new("ATR"),
            marker: PhantomData,
        })
    }

    fn true_range(bar: &I, prev_close: Option<Decimal>) -> Decimal {
        let high_low = bar.high().saturating_sub(bar.low());
        match prev_close {
            Some(prev_close) => {
                let high_close = bar.high().saturating_sub(prev_close).abs();
                let low_close = bar.low().saturating_sub(prev_close).abs();
                high_low.max(high_close).max(low_close)
            }
            None => high_low,
        }
    }
}

impl<I> Indicator for Atr<I>
where
    I: RangeInput,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let tr = Self::true_range(&input, self.prev_close);
        self.prev_close = Some(input.close());
        let atr = self.smoother.next(tr)?;
        Some(self.series.record(atr))
    }

    fn reset(&mut self) {
        self.prev_close = None;
        self.smoother.reset();
        self.series.clear();
    }
}

impl<I> StreamingIndicator for Atr<I>
where
    I: RangeInput,
{
    fn series(&self) -> &OutputSeries<Decimal> {
        &self.series
    }

    fn window_size(&self) -> usize {
        self.smoother.period()
    }
}
