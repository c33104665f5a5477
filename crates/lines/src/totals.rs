//! Document total aggregation: subtotal, tax, shipping, grand total.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_core::{DomainError, DomainResult};
use tally_money::{Money, ToAmount, parse_decimal};

use crate::collection::LineItems;

/// Tax rate expressed as a percentage (`8.25` means 8.25%).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxRate(Decimal);

impl TaxRate {
    pub fn new(percent: impl ToAmount) -> DomainResult<Self> {
        let percent = percent.to_amount()?;
        if percent.is_sign_negative() && !percent.is_zero() {
            return Err(DomainError::validation(format!(
                "tax rate must not be negative (got {percent})"
            )));
        }
        Ok(Self(percent))
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn percent(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TaxRate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_decimal(s)?)
    }
}

impl TryFrom<String> for TaxRate {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaxRate> for String {
    fn from(value: TaxRate) -> Self {
        value.to_string()
    }
}

/// Sum of all line totals (`0.00` when there are no lines).
pub fn calculate_subtotal(items: &LineItems) -> DomainResult<Money> {
    items.subtotal()
}

/// `subtotal * rate / 100`, rounded to two decimals.
pub fn calculate_tax(subtotal: &Money, rate: &TaxRate) -> DomainResult<Money> {
    subtotal
        .txn()
        .checked_mul(rate.percent())
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .map(Money::from_decimal)
        .ok_or_else(|| DomainError::invalid_amount(format!("tax on {subtotal} at {rate}% overflows")))
}

/// `subtotal + tax + shipping`.
pub fn calculate_grand_total(subtotal: &Money, tax: &Money, shipping: &Money) -> DomainResult<Money> {
    subtotal.checked_add(tax)?.checked_add(shipping)
}

/// All derived totals of a document, computed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub grand_total: Money,
}

impl DocumentTotals {
    pub fn compute(items: &LineItems, rate: &TaxRate, shipping: &Money) -> DomainResult<Self> {
        let subtotal = calculate_subtotal(items)?;
        let tax = calculate_tax(&subtotal, rate)?;
        let grand_total = calculate_grand_total(&subtotal, &tax, shipping)?;
        Ok(Self {
            subtotal,
            tax,
            shipping: *shipping,
            grand_total,
        })
    }
}
