//! Candle loading from CSV files.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use streamta_core::Candle;
use tracing::{info, warn};

/// Raw CSV record; numeric fields are parsed as decimals from their text.
#[derive(Debug, Deserialize)]
struct CandleRow {
    timestamp: String,
    open: String,
    high: String,
    low: String,
    close: String,
    #[serde(default)]
    volume: Option<String>,
}

/// Reads `timestamp,open,high,low,close[,volume]` rows from `path`.
pub fn read_candles_csv(path: &Path) -> Result<Vec<Candle>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let candles =
        read_candles(file).with_context(|| format!("failed to read {}", path.display()))?;
    info!(path = %path.display(), candles = candles.len(), "loaded candles");
    Ok(candles)
}

/// Reads candles from any CSV source with a header row.
pub fn read_candles<R: Read>(source: R) -> Result<Vec<Candle>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);
    let mut candles: Vec<Candle> = Vec::new();
    for (idx, row) in reader.deserialize::<CandleRow>().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let row = row.with_context(|| format!("malformed row at line {line}"))?;
        let candle = parse_row(&row).with_context(|| format!("invalid candle at line {line}"))?;
        if candle.high < candle.low {
            warn!(line, high = %candle.high, low = %candle.low, "high below low");
        }
        if let Some(prev) = candles.last() {
            if candle.timestamp < prev.timestamp {
                warn!(line, timestamp = %candle.timestamp, "candle out of order");
            }
        }
        candles.push(candle);
    }
    Ok(candles)
}

fn parse_row(row: &CandleRow) -> Result<Candle> {
    let volume = match row.volume.as_deref() {
        Some(raw) if !raw.is_empty() => parse_decimal("volume", raw)?,
        _ => Decimal::ZERO,
    };
    Ok(Candle::new(
        parse_timestamp(&row.timestamp)?,
        parse_decimal("open", &row.open)?,
        parse_decimal("high", &row.high)?,
        parse_decimal("low", &row.low)?,
        parse_decimal("close", &row.close)?,
        volume,
    ))
}

fn parse_decimal(field: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|err| anyhow!("{field} `{raw}` is not a number: {err}"))
}

/// Accepts RFC 3339 strings or unix timestamps in seconds.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(seconds) = raw.parse::<i64>() {
        return Utc
            .timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| anyhow!("timestamp {seconds} is out of range"));
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Ok(parsed.with_timezone(&Utc)),
        Err(err) => bail!("timestamp `{raw}` is neither RFC 3339 nor unix seconds: {err}"),
    }
}
