//! Sliding population variance.

use rust_decimal::{Decimal, MathematicalOps};

use crate::accumulators::average::{checked_sum, scaled_mean};
use crate::core::{decimal_from_usize, ensure_period, Indicator, IndicatorResult};
use crate::window::RingWindow;

/// Mean squared deviation of a set of values around a mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dispersion {
    /// The squared deviations summed without overflow.
    Exact(Decimal),
    /// `scale^2 * normalized`, where `scale` is the largest absolute deviation.
    Scaled { scale: Decimal, normalized: Decimal },
}

impl Dispersion {
    fn measure<'a, I>(values: I, mean: Decimal) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Decimal>,
        I::IntoIter: Clone,
    {
        let values = values.into_iter();
        let count = values.clone().count();
        if count == 0 {
            return None;
        }
        let divisor = decimal_from_usize(count);
        let exact = values.clone().try_fold(Decimal::ZERO, |acc, value| {
            let diff = value.checked_sub(mean)?;
            acc.checked_add(diff.checked_mul(diff)?)
        });
        if let Some(sum) = exact {
            return Some(Self::Exact(sum / divisor));
        }

        let scale = values
            .clone()
            .map(|value| value.saturating_sub(mean).abs())
            .max()
            .unwrap_or(Decimal::ZERO);
        let normalized = values
            .map(|value| {
                let ratio = value.saturating_sub(mean) / scale;
                ratio * ratio
            })
            .sum::<Decimal>()
            / divisor;
        Some(Self::Scaled { scale, normalized })
    }

    fn variance(self) -> Decimal {
        match self {
            Self::Exact(variance) => variance,
            Self::Scaled { scale, normalized } => scale
                .checked_mul(scale)
                .and_then(|square| square.checked_mul(normalized))
                .unwrap_or(Decimal::MAX),
        }
    }

    fn std_dev(self) -> Decimal {
        match self {
            Self::Exact(variance) => variance.sqrt().unwrap_or(Decimal::ZERO),
            Self::Scaled { scale, normalized } => {
                scale.saturating_mul(normalized.sqrt().unwrap_or(Decimal::ZERO))
            }
        }
    }
}

/// Population variance (divides by the number of values) of `values` around `mean`.
///
/// Saturates at `Decimal::MAX` when the variance itself is not representable.
pub fn population_variance<'a, I>(values: I, mean: Decimal) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Decimal>,
    I::IntoIter: Clone,
{
    Dispersion::measure(values, mean).map(Dispersion::variance)
}

/// Population standard deviation of `values` around `mean`.
///
/// Stays exact in magnitude for spreads whose variance would not fit in a `Decimal`.
pub fn population_std_dev<'a, I>(values: I, mean: Decimal) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Decimal>,
    I::IntoIter: Clone,
{
    Dispersion::measure(values, mean).map(Dispersion::std_dev)
}

/// Keeps the trailing `period` raw values and measures their dispersion.
///
/// [`SlidingVariance::variance_around`] measures against a caller-supplied mean, which lets a
/// composite reuse the mean it already computes. As an [`Indicator`] it measures against the
/// mean of its own window.
#[derive(Debug, Clone)]
pub struct SlidingVariance {
    window: RingWindow<Decimal>,
}

impl SlidingVariance {
    /// Creates a tracker over `period` values.
    pub fn new(period: usize) -> IndicatorResult<Self> {
        let period = ensure_period("SlidingVariance", "period", period)?;
        Ok(Self {
            window: RingWindow::new(period),
        })
    }

    /// Configured lookback period.
    pub fn period(&self) -> usize {
        self.window.capacity()
    }

    /// Appends a value, evicting the oldest once the window is full.
    pub fn push(&mut self, value: Decimal) {
        self.window.push(value);
    }

    /// Returns true once `period` values are retained.
    pub fn is_full(&self) -> bool {
        self.window.is_full()
    }

    /// Population variance of the full window around `mean`.
    pub fn variance_around(&self, mean: Decimal) -> Option<Decimal> {
        if !self.window.is_full() {
            return None;
        }
        population_variance(self.window.iter(), mean)
    }

    /// Population standard deviation of the full window around `mean`.
    pub fn std_dev_around(&self, mean: Decimal) -> Option<Decimal> {
        if !self.window.is_full() {
            return None;
        }
        population_std_dev(self.window.iter(), mean)
    }
}

impl Indicator for SlidingVariance {
    type Input = Decimal;
    type Output = Decimal;

    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        self.push(value);
        if !self.window.is_full() {
            return None;
        }
        let divisor = decimal_from_usize(self.window.len());
        let mean = match checked_sum(self.window.iter()) {
            Some(sum) => sum / divisor,
            None => scaled_mean(self.window.iter(), divisor),
        };
        self.variance_around(mean)
    }

    fn reset(&mut self) {
        self.window.clear();
    }
}
