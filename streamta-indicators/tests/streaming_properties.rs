//! Cross-indicator properties of the streaming contract.

use std::fmt::Debug;
use std::str::FromStr;

use rust_decimal::Decimal;
use streamta_indicators::indicators::{Atr, BollingerBands, Ema, Macd, Rsi, Sma, Stochastic};
use streamta_indicators::{Hlc, Indicator, StreamingIndicator};

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// Deterministic, gently oscillating price path.
fn closes(len: usize) -> Vec<Decimal> {
    (0..len)
        .map(|idx| {
            let wave = [0, 3, 5, 2, -1, -4, -2, 1][idx % 8];
            Decimal::from(100 + idx as i64 / 3 + wave) + Decimal::new(idx as i64 % 7, 1)
        })
        .collect()
}

fn bars(len: usize) -> Vec<Hlc> {
    closes(len)
        .into_iter()
        .enumerate()
        .map(|(idx, close)| {
            let spread = Decimal::new(5 + (idx as i64 % 4) * 5, 1);
            Hlc::new(close + spread, close - spread, close)
        })
        .collect()
}

fn replay<T, I>(indicator: &mut T, inputs: &[I]) -> Vec<T::Output>
where
    T: StreamingIndicator<Input = I>,
    T::Output: Clone,
    I: Clone,
{
    for input in inputs {
        indicator.next(input.clone());
    }
    indicator.output()
}

/// Feeding a prefix, resetting, then replaying must match a fresh instance exactly.
fn assert_reset_is_idempotent<T, I>(make: impl Fn() -> T, inputs: &[I])
where
    T: StreamingIndicator<Input = I>,
    T::Output: Clone + PartialEq + Debug,
    I: Clone,
{
    let mut fresh = make();
    let expected = replay(&mut fresh, inputs);
    assert!(!expected.is_empty());

    let mut reused = make();
    replay(&mut reused, &inputs[..inputs.len() / 3]);
    reused.reset();
    assert!(!reused.is_initialized());
    assert!(reused.output().is_empty());
    assert_eq!(replay(&mut reused, inputs), expected);
}

/// Earlier emissions never change and exactly `expected_len(seen)` values exist after each step.
fn assert_append_only<T, I>(mut indicator: T, inputs: &[I], expected_len: impl Fn(usize) -> usize)
where
    T: StreamingIndicator<Input = I>,
    T::Output: Clone + PartialEq + Debug,
    I: Clone,
{
    let mut previous: Vec<T::Output> = Vec::new();
    for (idx, input) in inputs.iter().enumerate() {
        indicator.next(input.clone());
        let current = indicator.output();
        let seen = idx + 1;
        assert_eq!(current.len(), expected_len(seen), "after {seen} observations");
        assert!(current.len() <= seen);
        assert_eq!(&current[..previous.len()], previous.as_slice());
        assert_eq!(indicator.is_initialized(), !current.is_empty());
        previous = current;
    }
}

#[test]
fn single_stage_output_lengths() {
    let prices = closes(40);
    let window = 5;
    let warm = move |seen: usize| (seen + 1).saturating_sub(window);
    assert_append_only(Sma::<Decimal>::new(window).unwrap(), &prices, warm);
    assert_append_only(Ema::<Decimal>::new(window).unwrap(), &prices, warm);
    assert_append_only(Atr::<Hlc>::new(window).unwrap(), &bars(40), warm);
    // The first observation only seeds the first price change.
    assert_append_only(Rsi::<Decimal>::new(window).unwrap(), &prices, move |seen| {
        seen.saturating_sub(window)
    });
}

#[test]
fn composite_output_lengths() {
    let prices = closes(60);
    assert_append_only(
        BollingerBands::<Decimal>::new(4, dec("2")).unwrap(),
        &prices,
        |seen| (seen + 1).saturating_sub(4),
    );
    // First MACD line on observation 12, first signal 3 MACD values later.
    assert_append_only(Macd::<Decimal>::new(6, 12, 4).unwrap(), &prices, |seen| {
        (seen + 1).saturating_sub(12 + 4 - 1)
    });
    // Raw %K from bar 5, smoothed %K from bar 7, %D from bar 9.
    assert_append_only(
        Stochastic::<Hlc>::new(5, 3, 3).unwrap(),
        &bars(60),
        |seen| (seen + 1).saturating_sub(5 + 3 - 1 + 3 - 1),
    );
}

#[test]
fn reset_then_replay_matches_fresh_instance() {
    let prices = closes(50);
    let bars = bars(50);
    assert_reset_is_idempotent(|| Sma::<Decimal>::new(4).unwrap(), &prices);
    assert_reset_is_idempotent(|| Ema::<Decimal>::new(4).unwrap(), &prices);
    assert_reset_is_idempotent(|| Rsi::<Decimal>::new(6).unwrap(), &prices);
    assert_reset_is_idempotent(|| Atr::<Hlc>::new(6).unwrap(), &bars);
    assert_reset_is_idempotent(
        || BollingerBands::<Decimal>::new(8, dec("2")).unwrap(),
        &prices,
    );
    assert_reset_is_idempotent(|| Macd::<Decimal>::new(3, 8, 3).unwrap(), &prices);
    assert_reset_is_idempotent(|| Stochastic::<Hlc>::new(7, 2, 3).unwrap(), &bars);
}

#[test]
fn macd_histogram_matches_line_difference() {
    let mut macd = Macd::<Decimal>::new(3, 5, 2).unwrap();
    let outputs = replay(&mut macd, &closes(80));
    let tolerance = dec("0.000000001");
    assert!(!outputs.is_empty());
    for out in outputs {
        assert!((out.histogram - (out.macd - out.signal)).abs() <= tolerance);
    }
}

#[test]
fn macd_composes_the_same_emas_fed_by_hand() {
    let prices = closes(30);
    let mut macd = Macd::<Decimal>::new(3, 5, 2).unwrap();
    let mut fast = Ema::<Decimal>::new(3).unwrap();
    let mut slow = Ema::<Decimal>::new(5).unwrap();
    let mut signal = Ema::<Decimal>::new(2).unwrap();

    for price in prices {
        let expected = match (fast.next(price), slow.next(price)) {
            (Some(f), Some(s)) => signal.next(f - s).map(|sig| (f - s, sig)),
            _ => None,
        };
        let actual = macd.next(price).map(|out| (out.macd, out.signal));
        assert_eq!(actual, expected);
    }
}

#[test]
fn bollinger_middle_band_is_the_sma() {
    let prices = closes(30);
    let mut bands = BollingerBands::<Decimal>::new(6, dec("1.5")).unwrap();
    let mut sma = Sma::<Decimal>::new(6).unwrap();
    for price in prices {
        bands.next(price);
        sma.next(price);
    }
    assert_eq!(bands.middle_band(), sma.output());
    let tolerance = dec("0.000000001");
    for out in bands.output() {
        assert!(out.upper >= out.middle && out.middle >= out.lower);
        assert!(((out.upper - out.middle) - (out.middle - out.lower)).abs() <= tolerance);
    }
}

#[test]
fn stochastic_stays_within_bounds() {
    let mut stoch = Stochastic::<Hlc>::new(5, 1, 3).unwrap();
    for out in replay(&mut stoch, &bars(60)) {
        assert!(out.k >= Decimal::ZERO && out.k <= Decimal::ONE_HUNDRED);
        assert!(out.d >= Decimal::ZERO && out.d <= Decimal::ONE_HUNDRED);
    }
}
