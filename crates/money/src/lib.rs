//! `tally-money` — exact decimal money for document editing.
//!
//! Amounts are `rust_decimal` values normalized to two fractional digits and
//! serialized as strings, so a total never drifts the way float math does.

pub mod amount;
pub mod money;
pub mod ops;

pub use amount::{MONEY_SCALE, ToAmount, parse_decimal, round_money};
pub use money::{Money, MoneyRecord};
pub use ops::{
    add_money, compare_money, create_money, is_valid_money, multiply_money, parse_money,
    subtract_money,
};
pub use rust_decimal::Decimal;
