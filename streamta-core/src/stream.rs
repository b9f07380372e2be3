use rust_decimal::Decimal;
use tracing::trace;

use crate::candle::Candle;

type Observer<'a> = Box<dyn FnMut(&Candle) + 'a>;

/// Ordered, append-only sequence of candles.
///
/// Subscribers are invoked synchronously, in registration order, once for every candle
/// pushed after they subscribed. There is no buffering: `push` returns only after every
/// subscriber has seen the candle.
#[derive(Default)]
pub struct CandleStream<'a> {
    candles: Vec<Candle>,
    observers: Vec<Observer<'a>>,
}

impl<'a> CandleStream<'a> {
    /// Creates an empty stream without subscribers.
    pub fn new() -> Self {
        Self {
            candles: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Registers a callback invoked for every subsequently appended candle.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&Candle) + 'a,
    {
        self.observers.push(Box::new(observer));
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Appends a candle and notifies every subscriber.
    pub fn push(&mut self, candle: Candle) {
        trace!(
            index = self.candles.len(),
            timestamp = %candle.timestamp,
            close = %candle.close,
            subscribers = self.observers.len(),
            "candle appended"
        );
        for observer in self.observers.iter_mut() {
            observer(&candle);
        }
        self.candles.push(candle);
    }

    /// Number of candles appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Returns true when no candle has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Candle at the given position, counted from the first append.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// Candle `offset` positions before the most recent one (`0` is the latest).
    #[must_use]
    pub fn from_last(&self, offset: usize) -> Option<&Candle> {
        let index = self.candles.len().checked_sub(offset)?.checked_sub(1)?;
        self.candles.get(index)
    }

    /// The most recent candle.
    #[must_use]
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// All candles in append order.
    #[must_use]
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Drops the stored candles. Subscribers stay registered.
    pub fn clear(&mut self) {
        self.candles.clear();
    }

    /// Opening prices in append order.
    pub fn opens(&self) -> Vec<Decimal> {
        self.column(|c| c.open)
    }

    /// Highs in append order.
    pub fn highs(&self) -> Vec<Decimal> {
        self.column(|c| c.high)
    }

    /// Lows in append order.
    pub fn lows(&self) -> Vec<Decimal> {
        self.column(|c| c.low)
    }

    /// Closing prices in append order.
    pub fn closes(&self) -> Vec<Decimal> {
        self.column(|c| c.close)
    }

    /// Volumes in append order.
    pub fn volumes(&self) -> Vec<Decimal> {
        self.column(|c| c.volume)
    }

    fn column(&self, field: impl Fn(&Candle) -> Decimal) -> Vec<Decimal> {
        self.candles.iter().map(field).collect()
    }
}

impl std::fmt::Debug for CandleStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandleStream")
            .field("candles", &self.candles.len())
            .field("subscribers", &self.observers.len())
            .finish()
    }
}
