//! Lenient parsing and fixed-precision formatting of amount field text.
//!
//! Field text is whatever the user is in the middle of typing: `""`, `"1."`,
//! `"-"`, `"12abc"`. Parsing takes the longest numeric prefix, so a half-typed
//! number still converts, and anything without digits is `Invalid`.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::currency::round_display;

/// Exponent magnitude beyond which no `Decimal` value is representable.
const MAX_EXPONENT: u32 = 28;

/// Outcome of parsing an amount field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedAmount {
    /// The text starts with a number.
    Valid(Decimal),
    /// The text has no numeric prefix, or the number is out of range.
    Invalid,
}

impl ParsedAmount {
    /// Returns the amount the converter works with.
    ///
    /// `Invalid` and negative values count as zero.
    #[must_use]
    pub fn effective(self) -> Decimal {
        match self {
            Self::Valid(value) if value > Decimal::ZERO => value,
            _ => Decimal::ZERO,
        }
    }

    /// Returns true if the text parsed to a number.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Parses the numeric prefix of `text`.
///
/// Accepts leading whitespace, an optional sign, digits with at most one
/// decimal point and an optional exponent (`1.5e3`). Whatever follows the
/// prefix is ignored.
#[must_use]
pub fn parse_amount(text: &str) -> ParsedAmount {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    pos += count_digits(&bytes[pos..]);
    let int_digits = &text[int_start..pos];

    let mut frac_digits = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let frac_end = frac_start + count_digits(&bytes[frac_start..]);
        frac_digits = &text[frac_start..frac_end];
        pos = frac_end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return ParsedAmount::Invalid;
    }

    let mantissa = format!(
        "{}.{}",
        if int_digits.is_empty() { "0" } else { int_digits },
        if frac_digits.is_empty() { "0" } else { frac_digits },
    );
    let Ok(mut value) = Decimal::from_str(&mantissa) else {
        return ParsedAmount::Invalid;
    };

    if let Some((exp_negative, magnitude)) = parse_exponent(&bytes[pos..]) {
        match scale_by_power_of_ten(value, exp_negative, magnitude) {
            Some(scaled) => value = scaled,
            None => return ParsedAmount::Invalid,
        }
    }

    ParsedAmount::Valid(if negative { -value } else { value })
}

/// Formats an amount with exactly `decimal_places` fractional digits.
///
/// Values too large to carry that many digits in a `Decimal` are padded
/// with zeros.
#[must_use]
pub fn format_amount(value: Decimal, decimal_places: u32) -> String {
    let mut rounded = round_display(value, decimal_places);
    rounded.rescale(decimal_places);
    let mut text = rounded.to_string();
    let missing = decimal_places.saturating_sub(rounded.scale());
    if missing > 0 {
        if rounded.scale() == 0 {
            text.push('.');
        }
        text.extend(std::iter::repeat_n('0', missing as usize));
    }
    text
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Reads `e[+-]digits`. An `e` without digits is not an exponent.
fn parse_exponent(bytes: &[u8]) -> Option<(bool, u32)> {
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return None;
    }
    let (negative, start) = match bytes.get(1) {
        Some(b'-') => (true, 2),
        Some(b'+') => (false, 2),
        _ => (false, 1),
    };
    let digits = &bytes[start.min(bytes.len())..];
    let len = count_digits(digits);
    if len == 0 {
        return None;
    }
    let magnitude = digits[..len]
        .iter()
        .try_fold(0u32, |acc, d| acc.checked_mul(10)?.checked_add(u32::from(d - b'0')))
        .unwrap_or(u32::MAX);
    Some((negative, magnitude))
}

fn scale_by_power_of_ten(value: Decimal, negative: bool, magnitude: u32) -> Option<Decimal> {
    if value.is_zero() {
        return Some(value);
    }
    if negative {
        // Below the smallest representable step the value is zero.
        if magnitude > MAX_EXPONENT {
            return Some(Decimal::ZERO);
        }
        let scaled = (0..magnitude).try_fold(value, |acc, _| acc.checked_div(Decimal::TEN));
        return Some(scaled.unwrap_or(Decimal::ZERO));
    }
    if magnitude > MAX_EXPONENT {
        return None;
    }
    (0..magnitude).try_fold(value, |acc, _| acc.checked_mul(Decimal::TEN))
}
