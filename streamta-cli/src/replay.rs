//! Drives a candle feed through an indicator board.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;
use streamta_core::{Candle, CandleStream};
use streamta_indicators::{EntrySnapshot, IndicatorBoard, Reading};
use tracing::{debug, info};

/// Outcome of a replay run.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub candles: usize,
    pub emissions: usize,
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,
    pub indicators: Vec<EntrySnapshot>,
}

/// Pushes every candle through a [`CandleStream`] whose subscriber updates `board`.
pub fn replay(candles: &[Candle], board: &mut IndicatorBoard) -> ReplaySummary {
    let mut emissions = 0usize;
    let (count, first, last) = {
        let mut stream = CandleStream::new();
        stream.subscribe(|candle: &Candle| {
            for emission in board.on_candle(candle) {
                debug!(
                    label = emission.label,
                    timestamp = %candle.timestamp,
                    reading = %format_reading(&emission.reading),
                    "indicator emitted"
                );
                emissions += 1;
            }
        });
        for candle in candles {
            stream.push(*candle);
        }
        let first = stream.get(0).map(|candle| candle.timestamp);
        let last = stream.last().map(|candle| candle.timestamp);
        (stream.len(), first, last)
    };

    info!(candles = count, emissions, "replay finished");
    ReplaySummary {
        candles: count,
        emissions,
        first,
        last,
        indicators: board.snapshot(),
    }
}

/// Human-readable rendering of a reading.
pub fn format_reading(reading: &Reading) -> String {
    match reading {
        Reading::Value { value } => value.round_dp(6).normalize().to_string(),
        Reading::Bands(bands) => format!(
            "upper={} middle={} lower={}",
            bands.upper.round_dp(6).normalize(),
            bands.middle.round_dp(6).normalize(),
            bands.lower.round_dp(6).normalize()
        ),
        Reading::Macd(macd) => format!(
            "macd={} signal={} histogram={}",
            macd.macd.round_dp(6).normalize(),
            macd.signal.round_dp(6).normalize(),
            macd.histogram.round_dp(6).normalize()
        ),
        Reading::Stochastic(stoch) => format!(
            "k={} d={}",
            stoch.k.round_dp(6).normalize(),
            stoch.d.round_dp(6).normalize()
        ),
    }
}

/// Plain-text report, one line per indicator.
pub fn render_text(summary: &ReplaySummary) -> String {
    let mut out = String::new();
    let span = match (summary.first, summary.last) {
        (Some(first), Some(last)) => format!(" from {} to {}", first.to_rfc3339(), last.to_rfc3339()),
        _ => String::new(),
    };
    let _ = writeln!(
        out,
        "replayed {} candles{span}, {} emissions",
        summary.candles, summary.emissions
    );
    let width = summary
        .indicators
        .iter()
        .map(|entry| entry.label.len())
        .max()
        .unwrap_or(0);
    for entry in &summary.indicators {
        let latest = entry
            .latest
            .as_ref()
            .map(format_reading)
            .unwrap_or_else(|| "warming up".to_string());
        let _ = writeln!(
            out,
            "{:<width$}  {:<7} window={:<4} emitted={:<6} {latest}",
            entry.label, entry.indicator, entry.window, entry.emitted
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;
    use streamta_indicators::indicators::{Rsi, Sma};

    use super::*;

    fn candles(closes: &[i64]) -> Vec<Candle> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(idx, close)| {
                Candle::new(
                    base + Duration::minutes(idx as i64),
                    Decimal::from(*close),
                    Decimal::from(close + 1),
                    Decimal::from(close - 1),
                    Decimal::from(*close),
                    Decimal::ONE,
                )
            })
            .collect()
    }

    #[test]
    fn counts_candles_and_emissions() {
        let mut board = IndicatorBoard::new();
        board.insert("sma", Sma::<Candle>::new(3).unwrap());
        board.insert("rsi", Rsi::<Candle>::new(2).unwrap());
        let feed = candles(&[10, 15, 10, 15, 20]);

        let summary = replay(&feed, &mut board);
        assert_eq!(summary.candles, 5);
        // SMA emits from candle 3, RSI from candle 3.
        assert_eq!(summary.emissions, 6);
        assert_eq!(summary.first, Some(feed[0].timestamp));
        assert_eq!(summary.last, Some(feed[4].timestamp));
        assert_eq!(
            summary.indicators[0].latest,
            Some(Reading::Value {
                value: Decimal::from(15)
            })
        );

        let text = render_text(&summary);
        assert!(text.starts_with("replayed 5 candles"));
        assert!(text.contains("sma"));
        assert!(text.contains("emitted=3"));
    }

    #[test]
    fn empty_feed_leaves_board_warming_up() {
        let mut board = IndicatorBoard::new();
        board.insert("sma", Sma::<Candle>::new(3).unwrap());
        let summary = replay(&[], &mut board);
        assert_eq!(summary.candles, 0);
        assert_eq!(summary.first, None);
        assert!(render_text(&summary).contains("warming up"));
    }
}
