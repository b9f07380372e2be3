//! Relative Strength Index (RSI).

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::accumulators::WilderSmoother;
use crate::core::{ensure_period, Indicator, IndicatorResult, Input, StreamingIndicator};
use crate::series::OutputSeries;

/// Computes Wilder's RSI oscillator scaled between 0 and 100.
///
/// The window counts price changes, so the first value is emitted on observation
/// `period + 1`.
#[derive(Debug, Clone)]
pub struct Rsi<I = Decimal> {
    period: usize,
    prev_value: Option<Decimal>,
    gains: WilderSmoother,
    losses: WilderSmoother,
    series: OutputSeries<Decimal>,
    marker: PhantomData<I>,
}

impl<I> Rsi<I>
where
    I: Input,
{
    /// Creates a new RSI with the provided period.
    pub fn new(period: usize) -> IndicatorResult<Self> {
        let period = ensure_period("RSI", "period", period)?;
        Ok(Self {
            period,
            prev_value: None,
            gains: WilderSmoother::new(period)?,
            losses: WilderSmoother::new(period)?,
            series: OutputSeries::new("RSI"),
            marker: PhantomData,
        })
    }

    /// `100 * gain / (gain + loss)`, divided through by the larger average so the ratio
    /// never exceeds one.
    fn compute_rsi(avg_gain: Decimal, avg_loss: Decimal) -> Decimal {
        if avg_loss.is_zero() {
            Decimal::ONE_HUNDRED
        } else if avg_gain >= avg_loss {
            Decimal::ONE_HUNDRED / (Decimal::ONE + avg_loss / avg_gain)
        } else {
            Decimal::ONE_HUNDRED - Decimal::ONE_HUNDRED / (Decimal::ONE + avg_gain / avg_loss)
        }
    }
}

impl<I> Indicator for Rsi<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let value = input.value();
        let prev = self.prev_value.replace(value)?;

        let change = value.saturating_sub(prev);
        let gain = change.max(Decimal::ZERO);
        let loss = (-change).max(Decimal::ZERO);

        let avg_gain = self.gains.next(gain);
        let avg_loss = self.losses.next(loss);
        let (avg_gain, avg_loss) = avg_gain.zip(avg_loss)?;
        Some(self.series.record(Self::compute_rsi(avg_gain, avg_loss)))
    }

    fn reset(&mut self) {
        self.prev_value = None;
        self.gains.reset();
        self.losses.reset();
        self.series.clear();
    }
}

impl<I> StreamingIndicator for Rsi<I>
where
    I: Input,
{
    fn series(&self) -> &OutputSeries<Decimal> {
        &self.series
    }

    fn window_size(&self) -> usize {
        self.period
    }
}
