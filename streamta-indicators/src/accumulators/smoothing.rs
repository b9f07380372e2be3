//! Seeded recursive smoothers.
//!
//! Both smoothers run in two phases: the first `period` values are summed and their simple
//! average becomes the seed, after which only the last smoothed value is retained.
//!
//! Recursions are written so that intermediate values never leave `Decimal`'s range; a
//! result that genuinely exceeds it saturates at `Decimal::MAX` / `Decimal::MIN`.

use rust_decimal::Decimal;

use crate::core::{decimal_from_usize, ensure_period, Indicator, IndicatorResult};

/// Exact sum while it fits, with the `value / period` sum as fallback.
#[derive(Debug, Clone)]
struct Seed {
    sum: Option<Decimal>,
    scaled: Decimal,
    count: usize,
}

impl Seed {
    const fn new() -> Self {
        Self {
            sum: Some(Decimal::ZERO),
            scaled: Decimal::ZERO,
            count: 0,
        }
    }

    /// Accumulates `value`; yields the simple average when the `period`-th value arrives.
    fn accumulate(&mut self, value: Decimal, period: usize, divisor: Decimal) -> Option<Decimal> {
        self.sum = self.sum.and_then(|sum| sum.checked_add(value));
        self.scaled = self.scaled.saturating_add(value / divisor);
        self.count += 1;
        if self.count == period {
            let average = match self.sum {
                Some(sum) => sum / divisor,
                None => self.scaled,
            };
            *self = Self::new();
            Some(average)
        } else {
            None
        }
    }
}

/// Exponential smoother with `alpha = 2 / (period + 1)`.
#[derive(Debug, Clone)]
pub struct ExponentialSmoother {
    period: usize,
    alpha: Decimal,
    divisor: Decimal,
    seed: Seed,
    state: Option<Decimal>,
}

impl ExponentialSmoother {
    /// Creates a smoother seeded from the first `period` values.
    pub fn new(period: usize) -> IndicatorResult<Self> {
        let period = ensure_period("ExponentialSmoother", "period", period)?;
        Ok(Self {
            period,
            alpha: Decimal::from(2) / decimal_from_usize(period + 1),
            divisor: decimal_from_usize(period),
            seed: Seed::new(),
            state: None,
        })
    }

    /// Configured lookback period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Smoothing factor.
    pub fn alpha(&self) -> Decimal {
        self.alpha
    }

    /// Latest smoothed value.
    pub fn value(&self) -> Option<Decimal> {
        self.state
    }
}

impl Indicator for ExponentialSmoother {
    type Input = Decimal;
    type Output = Decimal;

    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        let next = match self.state {
            Some(current) => value
                .saturating_sub(current)
                .saturating_mul(self.alpha)
                .saturating_add(current),
            None => self.seed.accumulate(value, self.period, self.divisor)?,
        };
        self.state = Some(next);
        Some(next)
    }

    fn reset(&mut self) {
        self.seed = Seed::new();
        self.state = None;
    }
}

/// Wilder's smoother: `avg = (avg * (period - 1) + value) / period`, evaluated as
/// `avg + (value - avg) / period`.
#[derive(Debug, Clone)]
pub struct WilderSmoother {
    period: usize,
    divisor: Decimal,
    seed: Seed,
    state: Option<Decimal>,
}

impl WilderSmoother {
    /// Creates a smoother seeded from the first `period` values.
    pub fn new(period: usize) -> IndicatorResult<Self> {
        let period = ensure_period("WilderSmoother", "period", period)?;
        Ok(Self {
            period,
            divisor: decimal_from_usize(period),
            seed: Seed::new(),
            state: None,
        })
    }

    /// Configured lookback period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Latest smoothed value.
    pub fn value(&self) -> Option<Decimal> {
        self.state
    }
}

impl Indicator for WilderSmoother {
    type Input = Decimal;
    type Output = Decimal;

    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        let next = match self.state {
            Some(current) => current.saturating_add(value.saturating_sub(current) / self.divisor),
            None => self.seed.accumulate(value, self.period, self.divisor)?,
        };
        self.state = Some(next);
        Some(next)
    }

    fn reset(&mut self) {
        self.seed = Seed::new();
        self.state = None;
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::{ExponentialSmoother, WilderSmoother};
    use crate::Indicator;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn exponential_seeds_from_simple_average() {
        let mut ema = ExponentialSmoother::new(3).unwrap();
        assert_eq!(ema.alpha(), dec("0.5"));
        assert_eq!(ema.next(dec("1")), None);
        assert_eq!(ema.next(dec("2")), None);
        assert_eq!(ema.next(dec("3")), Some(dec("2")));
        assert_eq!(ema.next(dec("4")), Some(dec("3")));
        assert_eq!(ema.value(), Some(dec("3")));
    }

    #[test]
    fn wilder_uses_one_over_period_weight() {
        let mut wilder = WilderSmoother::new(2).unwrap();
        assert_eq!(wilder.next(dec("4")), None);
        assert_eq!(wilder.next(dec("6")), Some(dec("5")));
        // (5 * 1 + 9) / 2
        assert_eq!(wilder.next(dec("9")), Some(dec("7")));
    }

    #[test]
    fn period_one_tracks_input() {
        let mut wilder = WilderSmoother::new(1).unwrap();
        assert_eq!(wilder.next(dec("3")), Some(dec("3")));
        assert_eq!(wilder.next(dec("8")), Some(dec("8")));
        let mut ema = ExponentialSmoother::new(1).unwrap();
        ema.next(dec("3"));
        assert_eq!(ema.next(dec("8")), Some(dec("8")));
    }

    #[test]
    fn large_values_do_not_overflow() {
        let huge = Decimal::MAX / Decimal::from(2);
        let mut wilder = WilderSmoother::new(3).unwrap();
        let mut ema = ExponentialSmoother::new(3).unwrap();
        for _ in 0..3 {
            wilder.next(huge);
            ema.next(huge);
        }
        // Seeds of three values near half the range fall back to the scaled sum.
        let seeded = wilder.value().unwrap();
        assert!((seeded - huge).abs() <= dec("10"));
        assert_eq!(ema.value(), wilder.value());

        assert!(wilder.next(Decimal::MAX).unwrap() > huge);
        assert!(wilder.next(Decimal::MIN).unwrap() < huge);
        assert!(ema.next(Decimal::MIN).unwrap() < huge);
    }

    #[test]
    fn reset_restarts_seeding() {
        let mut wilder = WilderSmoother::new(2).unwrap();
        wilder.next(dec("1"));
        wilder.next(dec("2"));
        wilder.reset();
        assert_eq!(wilder.value(), None);
        assert_eq!(wilder.next(dec("10")), None);
        assert_eq!(wilder.next(dec("20")), Some(dec("15")));
    }
}
