//! Sliding maximum/minimum using monotonic deques.
//!
//! Each deque keeps `(sequence, value)` pairs whose values are monotonic, so the extreme of
//! the window always sits at the front. Every value is pushed and popped at most once, which
//! makes an update O(1) amortized while yielding exactly what a full scan of the window would.

use std::collections::VecDeque;

use rust_decimal::Decimal;

use crate::core::{ensure_period, Indicator, IndicatorResult};

/// Highest high and lowest low of the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extrema {
    /// Maximum of the highs.
    pub highest: Decimal,
    /// Minimum of the lows.
    pub lowest: Decimal,
}

impl Extrema {
    /// Distance between the extremes, saturating at `Decimal::MAX`.
    pub fn range(&self) -> Decimal {
        self.highest.saturating_sub(self.lowest)
    }
}

/// Tracks `max(high)` and `min(low)` over the trailing `period` observations.
///
/// Input is a `(high, low)` pair.
#[derive(Debug, Clone)]
pub struct SlidingExtrema {
    period: usize,
    seen: usize,
    highs: VecDeque<(usize, Decimal)>,
    lows: VecDeque<(usize, Decimal)>,
}

impl SlidingExtrema {
    /// Creates a tracker over `period` observations.
    pub fn new(period: usize) -> IndicatorResult<Self> {
        let period = ensure_period("SlidingExtrema", "period", period)?;
        Ok(Self {
            period,
            seen: 0,
            highs: VecDeque::with_capacity(period),
            lows: VecDeque::with_capacity(period),
        })
    }

    /// Configured lookback period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Extremes of the current window once it is full.
    pub fn current(&self) -> Option<Extrema> {
        if self.seen < self.period {
            return None;
        }
        let (_, highest) = *self.highs.front()?;
        let (_, lowest) = *self.lows.front()?;
        Some(Extrema { highest, lowest })
    }
}

impl Indicator for SlidingExtrema {
    type Input = (Decimal, Decimal);
    type Output = Extrema;

    fn next(&mut self, (high, low): (Decimal, Decimal)) -> Option<Extrema> {
        let sequence = self.seen;
        self.seen += 1;

        while matches!(self.highs.back(), Some(&(_, value)) if value <= high) {
            self.highs.pop_back();
        }
        self.highs.push_back((sequence, high));

        while matches!(self.lows.back(), Some(&(_, value)) if value >= low) {
            self.lows.pop_back();
        }
        self.lows.push_back((sequence, low));

        // Oldest sequence still inside the window.
        let horizon = self.seen.saturating_sub(self.period);
        while matches!(self.highs.front(), Some(&(seq, _)) if seq < horizon) {
            self.highs.pop_front();
        }
        while matches!(self.lows.front(), Some(&(seq, _)) if seq < horizon) {
            self.lows.pop_front();
        }

        self.current()
    }

    fn reset(&mut self) {
        self.seen = 0;
        self.highs.clear();
        self.lows.clear();
    }
}
