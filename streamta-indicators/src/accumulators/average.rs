//! Sliding-sum simple average.

use rust_decimal::Decimal;

use crate::core::{decimal_from_usize, ensure_period, Indicator, IndicatorResult};
use crate::window::RingWindow;

/// Exact sum of `values`, or `None` when it leaves `Decimal`'s range.
pub(crate) fn checked_sum<'a>(values: impl IntoIterator<Item = &'a Decimal>) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
}

/// Mean as the sum of `value / divisor`; stays in range whenever every value does.
pub(crate) fn scaled_mean<'a>(
    values: impl IntoIterator<Item = &'a Decimal>,
    divisor: Decimal,
) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, value| acc.saturating_add(*value / divisor))
}

/// Arithmetic mean over the trailing `period` values, maintained as a running sum.
///
/// While the exact sum of the window would overflow, the running sum is dropped and the mean
/// is rebuilt from `value / period` terms until the window fits again.
#[derive(Debug, Clone)]
pub struct SlidingAverage {
    divisor: Decimal,
    sum: Option<Decimal>,
    window: RingWindow<Decimal>,
}

impl SlidingAverage {
    /// Creates an average over `period` values.
    pub fn new(period: usize) -> IndicatorResult<Self> {
        let period = ensure_period("SlidingAverage", "period", period)?;
        Ok(Self {
            divisor: decimal_from_usize(period),
            sum: Some(Decimal::ZERO),
            window: RingWindow::new(period),
        })
    }

    /// Configured lookback period.
    pub fn period(&self) -> usize {
        self.window.capacity()
    }

    /// Current mean once the window is full.
    pub fn current(&self) -> Option<Decimal> {
        if !self.window.is_full() {
            return None;
        }
        Some(match self.sum {
            Some(sum) => sum / self.divisor,
            None => scaled_mean(self.window.iter(), self.divisor),
        })
    }
}

impl Indicator for SlidingAverage {
    type Input = Decimal;
    type Output = Decimal;

    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        let evicted = self.window.push(value);
        self.sum = match self.sum {
            Some(sum) => sum
                .checked_add(value)
                .and_then(|sum| match evicted {
                    Some(oldest) => sum.checked_sub(oldest),
                    None => Some(sum),
                })
                .or_else(|| checked_sum(self.window.iter())),
            None => checked_sum(self.window.iter()),
        };
        self.current()
    }

    fn reset(&mut self) {
        self.sum = Some(Decimal::ZERO);
        self.window.clear();
    }
}
