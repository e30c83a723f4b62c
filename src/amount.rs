//! Conversion between human-readable decimal amounts and integer
//! base-unit amounts.
//!
//! Every chain asset carries its own decimal precision, so amounts move
//! through the app as integer base-unit strings and are only converted
//! to decimal form at the input/display boundary. Excess fractional
//! precision is truncated toward zero, never rounded.

use std::sync::OnceLock;

use regex::Regex;

/// Matches an optional leading minus, digits, and an optional
/// fractional part. The integer part may be empty when a fractional
/// part is present (".5").
fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^-?\d*(\.\d+)?$").expect("valid amount pattern"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("not a valid decimal amount")]
    InvalidInput,
    #[error("amount cannot be negative")]
    Negative,
    #[error("amount is too large")]
    Overflow,
}

fn pow10(decimals: u32) -> Result<u128, AmountError> {
    10u128.checked_pow(decimals).ok_or(AmountError::Overflow)
}

/// Convert a decimal string to an integer base-unit string for an asset
/// with `decimals` precision.
///
/// `"1.5"` with 12 decimals becomes `"1500000000000"`. Fractional
/// digits beyond `decimals` are discarded (truncation toward zero).
pub fn to_base_units(display: &str, decimals: u32) -> Result<String, AmountError> {
    if !amount_pattern().is_match(display) || !display.contains(|c: char| c.is_ascii_digit()) {
        return Err(AmountError::InvalidInput);
    }
    if display.starts_with('-') {
        return Err(AmountError::Negative);
    }

    let (int_part, frac_part) = match display.split_once('.') {
        Some((i, f)) => (i, f),
        None => (display, ""),
    };

    let int_value = if int_part.is_empty() {
        0u128
    } else {
        int_part.parse().map_err(|_| AmountError::Overflow)?
    };

    // Truncate the fraction to the asset precision, then right-pad so it
    // always weighs exactly `decimals` digits.
    let truncated: String = frac_part.chars().take(decimals as usize).collect();
    let frac_value = if truncated.is_empty() {
        0u128
    } else {
        let padded = format!("{truncated:0<width$}", width = decimals as usize);
        padded.parse().map_err(|_| AmountError::Overflow)?
    };

    let base = int_value
        .checked_mul(pow10(decimals)?)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or(AmountError::Overflow)?;

    Ok(base.to_string())
}

/// Convert an integer base-unit string back to a decimal string.
///
/// Only the integer part before any decimal point is considered;
/// non-numeric input is treated as zero. No trailing zeros are emitted
/// for the fractional part.
pub fn to_display_units(base_units: &str, decimals: u32) -> String {
    let int_part = base_units.split('.').next().unwrap_or_default();
    let value: u128 = int_part.parse().unwrap_or(0);

    let Ok(scale) = pow10(decimals) else {
        return "0".to_owned();
    };
    let whole = value / scale;
    let frac = value % scale;

    if frac == 0 {
        whole.to_string()
    } else {
        let frac = format!("{frac:0>width$}", width = decimals as usize);
        format!("{whole}.{}", frac.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_units_shift_by_decimals() {
        assert_eq!(to_base_units("1.5", 12).unwrap(), "1500000000000");
        assert_eq!(to_base_units("1", 6).unwrap(), "1000000");
        assert_eq!(to_base_units("0.000001", 6).unwrap(), "1");
        assert_eq!(to_base_units(".5", 2).unwrap(), "50");
        assert_eq!(to_base_units("0", 10).unwrap(), "0");
    }

    #[test]
    fn base_units_truncate_excess_precision_toward_zero() {
        // Never rounded up to 124, never kept as 123.4567.
        assert_eq!(to_base_units("1.234567", 2).unwrap(), "123");
        assert_eq!(to_base_units("0.9999", 0).unwrap(), "0");
    }

    #[test]
    fn base_units_reject_non_numeric_input() {
        assert_eq!(to_base_units("abc", 6), Err(AmountError::InvalidInput));
        assert_eq!(to_base_units("", 6), Err(AmountError::InvalidInput));
        assert_eq!(to_base_units("-", 6), Err(AmountError::InvalidInput));
        assert_eq!(to_base_units(".", 6), Err(AmountError::InvalidInput));
        assert_eq!(to_base_units("1.2.3", 6), Err(AmountError::InvalidInput));
        assert_eq!(to_base_units("1e5", 6), Err(AmountError::InvalidInput));
    }

    #[test]
    fn base_units_reject_negative_amounts() {
        assert_eq!(to_base_units("-1.5", 6), Err(AmountError::Negative));
    }

    #[test]
    fn base_units_reject_overflowing_amounts() {
        let huge = "9".repeat(60);
        assert_eq!(to_base_units(&huge, 18), Err(AmountError::Overflow));
    }

    #[test]
    fn display_units_shift_back() {
        assert_eq!(to_display_units("1500000000000", 12), "1.5");
        assert_eq!(to_display_units("1000000", 6), "1");
        assert_eq!(to_display_units("1", 6), "0.000001");
        assert_eq!(to_display_units("0", 6), "0");
    }

    #[test]
    fn display_units_ignore_fraction_and_garbage() {
        assert_eq!(to_display_units("150.75", 2), "1.5");
        assert_eq!(to_display_units("abc", 6), "0");
        assert_eq!(to_display_units("", 6), "0");
    }

    #[test]
    fn round_trip_is_numerically_exact() {
        for (display, decimals) in [
            ("1.5", 12u32),
            ("0.25", 8),
            ("123456.789", 9),
            ("7", 0),
            ("0.000000000000000001", 18),
        ] {
            let base = to_base_units(display, decimals).unwrap();
            let back = to_display_units(&base, decimals);
            assert_eq!(
                back.parse::<f64>().unwrap(),
                display.parse::<f64>().unwrap(),
                "{display} @ {decimals}"
            );
        }
    }

    #[test]
    fn round_trip_is_lossless_from_base_units() {
        // base -> display -> base is exact for integer base-unit strings.
        for (base, decimals) in [("1500000000000", 12u32), ("42", 6), ("100000000", 8)] {
            let display = to_display_units(base, decimals);
            assert_eq!(to_base_units(&display, decimals).unwrap(), base);
        }
    }
}
