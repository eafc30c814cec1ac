//! Number formatting helpers for preformatted bundle values.
//!
//! Fixed-point rendering rounds half away from zero on the exact binary
//! value of the `f64`, so `5.25` becomes `"5.3"` while `1.95` (stored as
//! 1.9499999…) becomes `"1.9"`. `format!("{:.1}")` would round the first
//! case half-to-even instead.

use rust_decimal::{Decimal, RoundingStrategy};

/// Renders `value` with exactly `digits` fractional digits.
#[must_use]
pub fn to_fixed(value: f64, digits: u32) -> String {
    Decimal::from_f64_retain(value).map_or_else(
        || format!("{value:.prec$}", prec = digits as usize),
        |exact| {
            let mut rounded =
                exact.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(digits);
            rounded.to_string()
        },
    )
}

/// Rounds toward negative infinity into an integer count.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn floor_count(value: f64) -> i64 {
    value.floor() as i64
}

/// Rounds toward negative infinity into a non-negative score.
///
/// Negative and NaN inputs saturate to `0`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn floor_score(value: f64) -> u32 {
    value.floor() as u32
}

/// Groups thousands with commas (`29136` → `"29,136"`).
#[must_use]
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// Dollar amount with two decimals (`14.5` → `"$14.50"`).
#[must_use]
pub fn currency(value: f64) -> String {
    format!("${}", to_fixed(value, 2))
}

/// Percentage with `digits` decimals (`5.25`, 1 → `"5.3%"`).
#[must_use]
pub fn percent(value: f64, digits: u32) -> String {
    format!("{}%", to_fixed(value, digits))
}
