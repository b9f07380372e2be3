//! Stochastic Oscillator (%K / %D).

use std::marker::PhantomData;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accumulators::{Extrema, SlidingAverage, SlidingExtrema};
use crate::core::{
    ensure_period, Hlc, Indicator, IndicatorResult, RangeInput, StreamingIndicator,
};
use crate::series::OutputSeries;

/// Raw %K reported when the window has no range.
const FLAT_RANGE_K: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// A %K / %D pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StochasticOutput {
    /// Position of the close within the window's range, 0 to 100 (optionally smoothed).
    pub k: Decimal,
    /// Simple average of the last `smooth_d` %K values.
    pub d: Decimal,
}

/// Stochastic Oscillator over high/low/close bars.
#[derive(Debug, Clone)]
pub struct Stochastic<I = Hlc> {
    extrema: SlidingExtrema,
    k_smoother: Option<SlidingAverage>,
    d_smoother: SlidingAverage,
    smooth_k: usize,
    series: OutputSeries<StochasticOutput>,
    marker: PhantomData<I>,
}

impl<I> Stochastic<I>
where
    I: RangeInput,
{
    /// Creates an oscillator over `period` bars; `smooth_k == 1` disables %K smoothing.
    pub fn new(period: usize, smooth_k: usize, smooth_d: usize) -> IndicatorResult<Self> {
        let period = ensure_period("Stochastic", "period", period)?;
        let smooth_k = ensure_period("Stochastic", "smooth_k", smooth_k)?;
        let smooth_d = ensure_period("Stochastic", "smooth_d", smooth_d)?;
        let k_smoother = if smooth_k > 1 {
            Some(SlidingAverage::new(smooth_k)?)
        } else {
            None
        };
        Ok(Self {
            extrema: SlidingExtrema::new(period)?,
            k_smoother,
            d_smoother: SlidingAverage::new(smooth_d)?,
            smooth_k,
            series: OutputSeries::new("STOCH"),
            marker: PhantomData,
        })
    }

    /// %K smoothing length.
    pub fn smooth_k(&self) -> usize {
        self.smooth_k
    }

    /// %D smoothing length.
    pub fn smooth_d(&self) -> usize {
        self.d_smoother.period()
    }

    /// %K values in emission order.
    pub fn k_values(&self) -> Vec<Decimal> {
        self.series.iter().map(|out| out.k).collect()
    }

    /// %D values in emission order.
    pub fn d_values(&self) -> Vec<Decimal> {
        self.series.iter().map(|out| out.d).collect()
    }

    fn raw_k(close: Decimal, extrema: Extrema) -> Decimal {
        let range = extrema.range();
        if range.is_zero() {
            return FLAT_RANGE_K;
        }
        let offset = close.saturating_sub(extrema.lowest);
        let position = offset.checked_div(range).unwrap_or(if offset.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        });
        position.saturating_mul(Decimal::ONE_HUNDRED)
    }
}

impl<I> Indicator for Stochastic<I>
where
    I: RangeInput,
{
    type Input = I;
    type Output = StochasticOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let extrema = self.extrema.next((input.high(), input.low()))?;
        let raw_k = Self::raw_k(input.close(), extrema);
        let k = match self.k_smoother.as_mut() {
            Some(smoother) => smoother.next(raw_k)?,
            None => raw_k,
        };
        let d = self.d_smoother.next(k)?;
        Some(self.series.record(StochasticOutput { k, d }))
    }

    fn reset(&mut self) {
        self.extrema.reset();
        if let Some(smoother) = self.k_smoother.as_mut() {
            smoother.reset();
        }
        self.d_smoother.reset();
        self.series.clear();
    }
}

impl<I> StreamingIndicator for Stochastic<I>
where
    I: RangeInput,
{
    fn series(&self) -> &OutputSeries<StochasticOutput> {
        &self.series
    }

    fn window_size(&self) -> usize {
        self.extrema.period()
    }
}
