//! Raw amount parsing and 2-decimal normalization.
//!
//! Every number that becomes money passes through [`ToAmount`] first, so a
//! malformed input is rejected here instead of turning into a `"NaN"` string
//! further down.

use core::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tally_core::{DomainError, DomainResult};

/// Number of fractional digits carried by every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// Round half away from zero at [`MONEY_SCALE`] and pad to exactly two digits.
///
/// A result of zero is always positive zero, so `-0.001` formats as `0.00`.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Exponents beyond this shift round to zero (negative) or overflow (positive).
const MAX_EXPONENT_SHIFT: i64 = 512;

/// Parse a decimal string, accepting surrounding whitespace and `1e3` notation.
///
/// Only ASCII digits, one leading sign, `.` and an `e`/`E` exponent are
/// allowed; digit separators such as `_` or `,` are rejected. Digits beyond
/// the representable precision are rounded, in plain and scientific form alike.
pub fn parse_decimal(raw: &str) -> DomainResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_amount("empty string"));
    }
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return Err(DomainError::invalid_amount(format!(
            "{trimmed:?}: not a decimal number"
        )));
    }

    let plain = if trimmed.contains(['e', 'E']) {
        match expand_exponent(trimmed)? {
            Some(plain) => plain,
            None => return Ok(Decimal::ZERO),
        }
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&plain).map_err(|e| DomainError::invalid_amount(format!("{trimmed:?}: {e}")))
}

/// Rewrite `1.5e-3` as `0.0015`. `None` means the value is too small to matter.
fn expand_exponent(raw: &str) -> DomainResult<Option<String>> {
    let invalid = || DomainError::invalid_amount(format!("{raw:?}: not a decimal number"));

    let (mantissa, exponent) = raw.split_once(['e', 'E']).ok_or_else(invalid)?;
    let exponent: i64 = exponent.parse().map_err(|_| invalid())?;

    let (sign, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = format!("{int_part}{frac_part}");
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    // Position of the decimal point within `digits` after shifting.
    let point = int_part.len() as i64 + exponent;
    if point < -MAX_EXPONENT_SHIFT {
        return Ok(None);
    }
    if point > MAX_EXPONENT_SHIFT {
        return Err(DomainError::invalid_amount(format!("{raw:?}: out of range")));
    }

    let plain = if point <= 0 {
        format!("{sign}0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else if point as usize >= digits.len() {
        format!("{sign}{digits}{}", "0".repeat(point as usize - digits.len()))
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{sign}{whole}.{fraction}")
    };
    Ok(Some(plain))
}

/// Anything a caller may hand over as an amount: strings, integers, floats, decimals.
pub trait ToAmount {
    /// Convert to an exact decimal, failing with `InvalidAmount` on non-finite
    /// or unparsable input.
    fn to_amount(&self) -> DomainResult<Decimal>;
}

impl ToAmount for Decimal {
    fn to_amount(&self) -> DomainResult<Decimal> {
        Ok(*self)
    }
}

impl ToAmount for str {
    fn to_amount(&self) -> DomainResult<Decimal> {
        parse_decimal(self)
    }
}

impl ToAmount for String {
    fn to_amount(&self) -> DomainResult<Decimal> {
        parse_decimal(self)
    }
}

impl ToAmount for f64 {
    fn to_amount(&self) -> DomainResult<Decimal> {
        if !self.is_finite() {
            return Err(DomainError::invalid_amount(format!("{self} is not finite")));
        }
        // Shortest round-trip rendering, so 5.255 stays 5.255 rather than 5.25499...
        parse_decimal(&self.to_string())
    }
}

impl ToAmount for i64 {
    fn to_amount(&self) -> DomainResult<Decimal> {
        Ok(Decimal::from(*self))
    }
}

impl ToAmount for i32 {
    fn to_amount(&self) -> DomainResult<Decimal> {
        Ok(Decimal::from(*self))
    }
}

impl ToAmount for u32 {
    fn to_amount(&self) -> DomainResult<Decimal> {
        Ok(Decimal::from(*self))
    }
}

impl ToAmount for u64 {
    fn to_amount(&self) -> DomainResult<Decimal> {
        Decimal::from_u64(*self)
            .ok_or_else(|| DomainError::invalid_amount(format!("{self} out of range")))
    }
}

impl<T: ToAmount + ?Sized> ToAmount for &T {
    fn to_amount(&self) -> DomainResult<Decimal> {
        (**self).to_amount()
    }
}
