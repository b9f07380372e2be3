#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Streaming technical indicators built on decimal arithmetic.

/// Accumulator primitives shared by the indicators.
pub mod accumulators;
/// Heterogeneous indicator sets driven by a candle feed.
pub mod board;
/// Indicator composition helpers such as `PipedIndicator`.
pub mod combinators;
/// Foundational traits and shared abstractions.
pub mod core;
/// Built-in indicator implementations.
pub mod indicators;
/// Append-only record of emissions.
pub mod series;
/// Fixed-capacity FIFO window.
pub mod window;

/// Re-export of the board types for convenience.
pub use crate::board::{AnyIndicator, Emission, EntrySnapshot, IndicatorBoard, Reading};
/// Re-export of the piped indicator combinator for convenience.
pub use crate::combinators::{IndicatorExt, PipedIndicator};
/// Re-export of the core traits and error type to make the crate easy to consume.
pub use crate::core::{
    Hlc, Indicator, IndicatorError, IndicatorResult, Input, RangeInput, StreamingIndicator,
};
/// Re-export of the output record.
pub use crate::series::OutputSeries;
