//! Free-function façade over [`Money`], one function per editing operation.
//!
//! Document pages call these instead of reaching into `Money` directly so
//! that every amount flows through the same parse-and-normalize path.

use core::cmp::Ordering;

use rust_decimal::Decimal;
use tally_core::DomainResult;

use crate::amount::ToAmount;
use crate::money::{Money, MoneyRecord};

/// Build money from a number or numeric string (2 decimals, half away from zero).
pub fn create_money(amount: impl ToAmount) -> DomainResult<Money> {
    Money::create(amount)
}

/// Numeric value of a persisted money record's transaction amount.
pub fn parse_money(record: &MoneyRecord) -> DomainResult<Decimal> {
    record.parse_txn()
}

pub fn add_money(a: &Money, b: &Money) -> DomainResult<Money> {
    a.checked_add(b)
}

pub fn subtract_money(a: &Money, b: &Money) -> DomainResult<Money> {
    a.checked_sub(b)
}

pub fn multiply_money(a: &Money, scalar: impl ToAmount) -> DomainResult<Money> {
    a.checked_mul(scalar)
}

pub fn compare_money(a: &Money, b: &Money) -> Ordering {
    a.compare(b)
}

pub fn is_valid_money(record: &MoneyRecord) -> bool {
    record.is_valid()
}
