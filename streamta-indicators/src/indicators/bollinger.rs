//! Bollinger Bands indicator built on top of SMA and standard deviation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accumulators::{SlidingAverage, SlidingVariance};
use crate::core::{
    ensure_period, Indicator, IndicatorError, IndicatorResult, Input, StreamingIndicator,
};
use crate::series::OutputSeries;

/// Output value of the Bollinger Bands indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BollingerBandsOutput {
    /// Upper band (mean + k * std dev).
    pub upper: Decimal,
    /// Middle band (rolling mean).
    pub middle: Decimal,
    /// Lower band (mean - k * std dev).
    pub lower: Decimal,
}

/// Produces Bollinger Bands from a rolling window.
///
/// The middle band is the simple average of the window; the deviation is the population
/// standard deviation of the same window measured around that average. Bands beyond
/// `Decimal`'s range saturate.
#[derive(Debug, Clone)]
pub struct BollingerBands<I = Decimal> {
    std_multiplier: Decimal,
    average: SlidingAverage,
    prices: SlidingVariance,
    series: OutputSeries<BollingerBandsOutput>,
    marker: std::marker::PhantomData<I>,
}

impl<I> BollingerBands<I>
where
    I: Input,
{
    /// Creates a new Bollinger Bands indicator.
    pub fn new(period: usize, std_multiplier: Decimal) -> IndicatorResult<Self> {
        let period = ensure_period("BollingerBands", "period", period)?;
        if std_multiplier.is_sign_negative() {
            return Err(IndicatorError::invalid_parameter(
                "BollingerBands",
                "std_multiplier",
                std_multiplier,
            ));
        }

        Ok(Self {
            std_multiplier,
            average: SlidingAverage::new(period)?,
            prices: SlidingVariance::new(period)?,
            series: OutputSeries::new("BBANDS"),
            marker: std::marker::PhantomData,
        })
    }

    /// Standard deviation multiplier.
    pub fn std_multiplier(&self) -> Decimal {
        self.std_multiplier
    }

    /// Upper band values in emission order.
    pub fn upper_band(&self) -> Vec<Decimal> {
        self.series.iter().map(|bands| bands.upper).collect()
    }

    /// Middle band (SMA) values in emission order.
    pub fn middle_band(&self) -> Vec<Decimal> {
        self.series.iter().map(|bands| bands.middle).collect()
    }

    /// Lower band values in emission order.
    pub fn lower_band(&self) -> Vec<Decimal> {
        self.series.iter().map(|bands| bands.lower).collect()
    }

    fn compute_bands(&self, middle: Decimal) -> Option<BollingerBandsOutput> {
        let std_dev = self.prices.std_dev_around(middle)?;
        let offset = self.std_multiplier.saturating_mul(std_dev);

        Some(BollingerBandsOutput {
            upper: middle.saturating_add(offset),
            middle,
            lower: middle.saturating_sub(offset),
        })
    }
}

impl<I> Indicator for BollingerBands<I>
where
    I: Input,
{
    type Input = I;
    type Output = BollingerBandsOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let value = input.value();
        let middle = self.average.next(value);
        self.prices.push(value);
        let bands = self.compute_bands(middle?)?;
        Some(self.series.record(bands))
    }

    fn reset(&mut self) {
        self.average.reset();
        self.prices.reset();
        self.series.clear();
    }
}

impl<I> StreamingIndicator for BollingerBands<I>
where
    I: Input,
{
    fn series(&self) -> &OutputSeries<BollingerBandsOutput> {
        &self.series
    }

    fn window_size(&self) -> usize {
        self.average.period()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::BollingerBands;
    use crate::{Indicator, StreamingIndicator};

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn assert_close(lhs: Decimal, rhs: Decimal) {
        let tolerance = dec("0.00000001");
        assert!((lhs - rhs).abs() <= tolerance, "{lhs} != {rhs}");
    }

    #[test]
    fn computes_expected_bands() {
        let mut bb = BollingerBands::<Decimal>::new(5, dec("2")).unwrap();
        for value in ["10", "11", "12", "13", "14", "20"] {
            bb.add_value(dec(value));
        }

        // 10..=14: mean 12, population deviation sqrt(2).
        let first = bb.get(0).unwrap();
        assert_close(first.middle, dec("12"));
        assert_close(first.upper, dec("14.82842712"));
        assert_close(first.lower, dec("9.17157288"));

        // 11, 12, 13, 14, 20: mean 14, population deviation sqrt(10).
        let second = bb.last().unwrap();
        assert_close(second.middle, dec("14"));
        assert_close(second.upper, dec("20.32455532"));
        assert_close(second.lower, dec("7.67544468"));

        assert_eq!(bb.middle_band(), vec![first.middle, second.middle]);
        assert_eq!(bb.upper_band(), vec![first.upper, second.upper]);
        assert_eq!(bb.lower_band(), vec![first.lower, second.lower]);
        assert!(bb.get(2).is_err());
    }

    #[test]
    fn flat_window_collapses_bands() {
        let mut bb = BollingerBands::<Decimal>::new(3, dec("2")).unwrap();
        for _ in 0..3 {
            bb.add_value(dec("5"));
        }
        let bands = bb.last().unwrap();
        assert_eq!(bands.upper, bands.middle);
        assert_eq!(bands.middle, bands.lower);

        bb.add_value(dec("8"));
        let bands = bb.last().unwrap();
        assert!(bands.upper > bands.middle);
        assert!(bands.middle > bands.lower);
        assert_eq!(bb.middle_band(), vec![dec("5"), dec("6")]);
        assert_eq!(bb.upper_band().len(), 2);
        assert_eq!(bb.lower_band().len(), 2);
    }

    #[test]
    fn respects_reset() {
        let mut bb = BollingerBands::new(2, dec("1")).unwrap();
        bb.next(dec("1"));
        let first = bb.next(dec("3")).unwrap();
        assert_close(first.middle, dec("2"));
        assert_close(first.upper, dec("3"));
        bb.reset();
        assert_eq!(bb.next(dec("3")), None);
        assert!(!bb.is_initialized());
    }

    #[test]
    fn volume_sized_spreads_do_not_overflow() {
        let mut bb = BollingerBands::<Decimal>::new(20, dec("2")).unwrap();
        let spread = dec("200000000000000");
        for idx in 0..40 {
            bb.add_value(if idx % 2 == 0 { Decimal::ZERO } else { spread });
        }
        assert_eq!(bb.output().len(), 21);
        let bands = bb.last().unwrap();
        assert_eq!(bands.middle, dec("100000000000000"));
        assert_close(bands.upper, dec("300000000000000"));
        assert_close(bands.lower, dec("-100000000000000"));
    }

    #[test]
    fn bands_saturate_at_decimal_bounds() {
        let mut bb = BollingerBands::<Decimal>::new(2, dec("3")).unwrap();
        bb.add_value(Decimal::MIN);
        bb.add_value(Decimal::MAX);
        let bands = bb.last().unwrap();
        assert_eq!(bands.upper, Decimal::MAX);
        assert_eq!(bands.lower, Decimal::MIN);
    }

    #[test]
    fn rejects_negative_multiplier() {
        let err = BollingerBands::<Decimal>::new(5, dec("-1")).unwrap_err();
        assert!(matches!(
            err,
            crate::IndicatorError::InvalidParameter { .. }
        ));
    }
}
