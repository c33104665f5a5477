//! Dual-amount money value (transaction currency + base currency).

use core::cmp::Ordering;
use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_core::{DomainError, DomainResult};

use crate::amount::{ToAmount, parse_decimal, round_money};

/// A monetary amount carried in the transaction currency and the base currency.
///
/// Both components are exact decimals held at two fractional digits. Money
/// built by this crate always has `txn == base`; FX conversion is applied by
/// the backend and only ever arrives here through [`Money::with_base`] or
/// deserialization.
///
/// Arithmetic works on the transaction amount and returns a freshly
/// normalized value (`base` re-derived from `txn`), never mutating `self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRecord", into = "MoneyRecord")]
pub struct Money {
    txn: Decimal,
    base: Decimal,
}

impl Money {
    /// Build money from any amount, rounding half away from zero at 2 decimals.
    pub fn create(amount: impl ToAmount) -> DomainResult<Self> {
        Ok(Self::from_decimal(amount.to_amount()?))
    }

    /// Build money from an exact decimal (infallible).
    pub fn from_decimal(amount: Decimal) -> Self {
        let normalized = round_money(amount);
        Self {
            txn: normalized,
            base: normalized,
        }
    }

    pub fn zero() -> Self {
        Self::from_decimal(Decimal::ZERO)
    }

    /// Replace the base-currency amount with an externally converted one.
    pub fn with_base(self, base: impl ToAmount) -> DomainResult<Self> {
        Ok(Self {
            txn: self.txn,
            base: round_money(base.to_amount()?),
        })
    }

    /// Transaction-currency amount.
    pub fn txn(&self) -> Decimal {
        self.txn
    }

    /// Base-currency amount.
    pub fn base(&self) -> Decimal {
        self.base
    }

    pub fn is_zero(&self) -> bool {
        self.txn.is_zero()
    }

    pub fn checked_add(&self, other: &Money) -> DomainResult<Money> {
        self.txn
            .checked_add(other.txn)
            .map(Self::from_decimal)
            .ok_or_else(|| DomainError::invalid_amount(format!("{self} + {other} overflows")))
    }

    pub fn checked_sub(&self, other: &Money) -> DomainResult<Money> {
        self.txn
            .checked_sub(other.txn)
            .map(Self::from_decimal)
            .ok_or_else(|| DomainError::invalid_amount(format!("{self} - {other} overflows")))
    }

    pub fn checked_mul(&self, scalar: impl ToAmount) -> DomainResult<Money> {
        let scalar = scalar.to_amount()?;
        self.txn
            .checked_mul(scalar)
            .map(Self::from_decimal)
            .ok_or_else(|| DomainError::invalid_amount(format!("{self} * {scalar} overflows")))
    }

    pub fn negate(&self) -> Money {
        Self::from_decimal(-self.txn)
    }

    /// Total ordering by transaction amount (the base amount is ignored).
    pub fn compare(&self, other: &Money) -> Ordering {
        self.txn.cmp(&other.txn)
    }

    /// Sum any number of amounts; an empty input sums to `0.00`.
    pub fn sum<'a>(amounts: impl IntoIterator<Item = &'a Money>) -> DomainResult<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.txn)
    }
}

/// Persisted JSON shape of money: `{ "txn": "12.30", "base": "12.30" }`.
///
/// This is what the backend stores and what arrives from the editing UI, so
/// its strings are not trusted until converted into [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyRecord {
    pub txn: String,
    pub base: String,
}

impl MoneyRecord {
    pub fn new(txn: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            txn: txn.into(),
            base: base.into(),
        }
    }

    /// True iff both components parse as finite decimals.
    pub fn is_valid(&self) -> bool {
        parse_decimal(&self.txn).is_ok() && parse_decimal(&self.base).is_ok()
    }

    /// Numeric value of the transaction component.
    pub fn parse_txn(&self) -> DomainResult<Decimal> {
        parse_decimal(&self.txn)
    }
}

impl TryFrom<MoneyRecord> for Money {
    type Error = DomainError;

    fn try_from(record: MoneyRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            txn: round_money(parse_decimal(&record.txn)?),
            base: round_money(parse_decimal(&record.base)?),
        })
    }
}

impl From<Money> for MoneyRecord {
    fn from(money: Money) -> Self {
        Self {
            txn: format!("{:.2}", money.txn),
            base: format!("{:.2}", money.base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use proptest::prelude::*;
    use rust_decimal::RoundingStrategy;

    fn money(s: &str) -> Money {
        Money::create(s).unwrap()
    }

    #[test]
    fn create_formats_to_two_decimals() {
        assert_eq!(money("12").to_string(), "12.00");
        assert_eq!(money("12.3").to_string(), "12.30");
        assert_eq!(money("5.255").to_string(), "5.26");
        assert_eq!(money("-3.335").to_string(), "-3.34");
        assert_eq!(Money::create(7).unwrap().to_string(), "7.00");
        assert_eq!(Money::create(2.5).unwrap().to_string(), "2.50");
    }

    #[test]
    fn create_sets_base_equal_to_txn() {
        let m = money("19.999");
        assert_eq!(m.txn(), m.base());
        assert_eq!(m.base().to_string(), "20.00");
    }

    #[test]
    fn create_rejects_non_numeric_input() {
        match Money::create("abc") {
            Err(DomainError::InvalidAmount(_)) => {}
            other => panic!("Expected InvalidAmount, got {other:?}"),
        }
        assert!(Money::create("").is_err());
        assert!(Money::create(f64::NAN).is_err());
    }

    #[test]
    fn negate_flips_sign_and_resets_base() {
        let converted = money("12.34").with_base("10.00").unwrap();
        let negated = converted.negate();
        assert_eq!(negated.to_string(), "-12.34");
        assert_eq!(negated.base(), negated.txn());
        assert_eq!(negated.negate(), money("12.34"));
        assert_eq!(Money::zero().negate().to_string(), "0.00");
    }

    #[test]
    fn underscore_separated_amount_is_rejected() {
        assert!(matches!(Money::create("1_000.5"), Err(DomainError::InvalidAmount(_))));
    }

    #[test]
    fn tiny_scientific_amount_rounds_to_zero() {
        assert_eq!(Money::create("1e-29").unwrap(), Money::zero());
        assert_eq!(Money::create(1e-29f64).unwrap(), Money::zero());
    }

    #[test]
    fn subtracting_self_yields_zero() {
        let a = money("42.17");
        assert_eq!(a.checked_sub(&a).unwrap(), Money::zero());
    }

    #[test]
    fn multiply_rounds_result() {
        let price = money("10.01");
        assert_eq!(price.checked_mul("0.5").unwrap().to_string(), "5.01");
        assert_eq!(price.checked_mul(3).unwrap().to_string(), "30.03");
    }

    #[test]
    fn arithmetic_renormalizes_base() {
        let converted = money("10.00").with_base("8.50").unwrap();
        let sum = converted.checked_add(&money("1.00")).unwrap();
        assert_eq!(sum.txn(), sum.base());
        assert_eq!(sum.to_string(), "11.00");
    }

    #[test]
    fn overflow_is_reported_not_panicked() {
        let huge = Money::from_decimal(Decimal::MAX / Decimal::from(1000));
        match huge.checked_mul(1_000_000) {
            Err(DomainError::InvalidAmount(msg)) if msg.contains("overflows") => {}
            other => panic!("Expected overflow error, got {other:?}"),
        }
    }

    #[test]
    fn compare_orders_by_txn() {
        assert_eq!(money("1.00").compare(&money("2.00")), Ordering::Less);
        assert_eq!(money("2.00").compare(&money("2.001")), Ordering::Equal);
        assert_eq!(money("-1").compare(&money("-2")), Ordering::Greater);
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        assert_eq!(Money::sum([]).unwrap().to_string(), "0.00");
    }

    #[test]
    fn serializes_as_string_pair() {
        let json = serde_json::to_value(money("12.3")).unwrap();
        assert_eq!(json, serde_json::json!({ "txn": "12.30", "base": "12.30" }));
    }

    #[test]
    fn deserialize_keeps_external_base() {
        let m: Money = serde_json::from_str(r#"{"txn":"10","base":"8.5"}"#).unwrap();
        assert_eq!(m.txn().to_string(), "10.00");
        assert_eq!(m.base().to_string(), "8.50");
    }

    #[test]
    fn deserialize_rejects_nan_strings() {
        let err = serde_json::from_str::<Money>(r#"{"txn":"NaN","base":"NaN"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid amount"));
    }

    #[test]
    fn record_validity_checks_both_components() {
        assert!(MoneyRecord::new("1.00", "1.00").is_valid());
        assert!(!MoneyRecord::new("1.00", "NaN").is_valid());
        assert!(!MoneyRecord::new("", "1.00").is_valid());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: construction always yields exactly two fractional digits,
        /// rounded half away from zero.
        #[test]
        fn create_normalizes_to_two_places(
            mantissa in -1_000_000_000_000i64..1_000_000_000_000i64,
            scale in 0u32..7
        ) {
            let raw = Decimal::new(mantissa, scale);
            let m = Money::create(raw.to_string()).unwrap();

            let rendered = m.to_string();
            let fraction = rendered.split('.').nth(1).unwrap_or("");
            prop_assert_eq!(fraction.len(), 2);

            let expected = raw.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            prop_assert_eq!(m.txn(), expected);
        }

        /// Property: adding a non-negative amount never decreases the value.
        #[test]
        fn adding_non_negative_is_monotonic(a in -100_000_000i64..100_000_000i64, b in 0i64..100_000_000i64) {
            let a = Money::from_decimal(Decimal::new(a, 2));
            let b = Money::from_decimal(Decimal::new(b, 2));
            let sum = a.checked_add(&b).unwrap();
            prop_assert_ne!(a.compare(&sum), Ordering::Greater);
        }

        /// Property: addition is commutative.
        #[test]
        fn addition_commutes(a in -100_000_000i64..100_000_000i64, b in -100_000_000i64..100_000_000i64) {
            let a = Money::from_decimal(Decimal::new(a, 2));
            let b = Money::from_decimal(Decimal::new(b, 2));
            prop_assert_eq!(a.checked_add(&b).unwrap(), b.checked_add(&a).unwrap());
        }

        /// Property: a - a == 0.00 for every valid amount string.
        #[test]
        fn self_subtraction_is_zero(raw in "-?[0-9]{1,9}(\\.[0-9]{1,4})?") {
            let a = Money::create(raw.as_str()).unwrap();
            prop_assert_eq!(a.checked_sub(&a).unwrap(), Money::create(0).unwrap());
            prop_assert_eq!(Decimal::from_str(&a.checked_sub(&a).unwrap().to_string()).unwrap(), Decimal::ZERO);
        }
    }
}
