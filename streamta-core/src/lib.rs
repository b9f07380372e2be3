//! Core market data types shared across the Streamta crates.

/// OHLCV candle record.
pub mod candle;
/// Append-only candle stream with synchronous subscribers.
pub mod stream;

pub use candle::Candle;
pub use stream::CandleStream;
