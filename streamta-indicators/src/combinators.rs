//! Combinators that allow indicators to be chained together.

use crate::core::{Indicator, StreamingIndicator};
use crate::series::OutputSeries;

/// Chains two indicators together, feeding the output of the first into the second.
///
/// The downstream indicator only sees values the upstream one emits, so warm-up periods add
/// up: an `Sma(3)` piped into an `Ema(2)` emits from the fourth observation.
#[derive(Debug, Clone)]
pub struct PipedIndicator<First, Second> {
    first: First,
    second: Second,
}

impl<First, Second> PipedIndicator<First, Second> {
    /// Creates a new piped indicator.
    pub fn new(first: First, second: Second) -> Self {
        Self { first, second }
    }

    /// The upstream stage.
    pub fn first(&self) -> &First {
        &self.first
    }

    /// The downstream stage.
    pub fn second(&self) -> &Second {
        &self.second
    }
}

impl<First, Second> Indicator for PipedIndicator<First, Second>
where
    First: Indicator,
    Second: Indicator<Input = First::Output>,
{
    type Input = First::Input;
    type Output = Second::Output;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let intermediate = self.first.next(input)?;
        self.second.next(intermediate)
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }
}

/// A pipe reports the downstream emissions under the downstream name.
impl<First, Second> StreamingIndicator for PipedIndicator<First, Second>
where
    First: StreamingIndicator,
    Second: StreamingIndicator<Input = First::Output>,
{
    fn series(&self) -> &OutputSeries<Self::Output> {
        self.second.series()
    }

    /// Sum of both stage windows minus the shared observation.
    ///
    /// This is the observation of the first emission only when every stage emits on its
    /// `window_size`-th input. Stages that need extra warm-up (RSI counts changes, so it
    /// emits on input `period + 1`) delay the first emission past this figure.
    fn window_size(&self) -> usize {
        self.first.window_size() + self.second.window_size() - 1
    }
}

/// Fluent construction of [`PipedIndicator`].
pub trait IndicatorExt: Indicator + Sized {
    /// Feeds every emission of `self` into `next`.
    fn pipe<Next>(self, next: Next) -> PipedIndicator<Self, Next>
    where
        Next: Indicator<Input = Self::Output>,
    {
        PipedIndicator::new(self, next)
    }
}

impl<T: Indicator> IndicatorExt for T {}
