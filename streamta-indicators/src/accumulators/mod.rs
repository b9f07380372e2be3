//! Accumulator primitives the indicators are assembled from.
//!
//! Primitives implement [`Indicator`](crate::Indicator) but do not record their
//! emissions; they only carry the state needed to produce the next value.

pub mod average;
pub mod extrema;
pub mod smoothing;
pub mod variance;

pub use average::SlidingAverage;
pub use extrema::{Extrema, SlidingExtrema};
pub use smoothing::{ExponentialSmoother, WilderSmoother};
pub use variance::{population_std_dev, population_variance, SlidingVariance};
