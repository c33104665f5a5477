//! Quantities and units of measure.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_core::{DomainError, DomainResult};
use tally_money::{ToAmount, parse_decimal};

/// Line quantity, kept at the precision the user typed (`"1.5"` stays `"1.5"`).
///
/// Negative quantities are allowed; credit memos use them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quantity(Decimal);

impl Quantity {
    pub const ONE: Self = Quantity(Decimal::ONE);

    pub fn new(value: impl ToAmount) -> DomainResult<Self> {
        Ok(Self(value.to_amount()?))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Quantity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(parse_decimal(s)?))
    }
}

impl TryFrom<String> for Quantity {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Quantity> for String {
    fn from(value: Quantity) -> Self {
        value.to_string()
    }
}

impl ToAmount for Quantity {
    fn to_amount(&self) -> DomainResult<Decimal> {
        Ok(self.0)
    }
}

/// Unit of measure: one of the common codes, or any free-text code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Uom {
    #[default]
    Each,
    Hour,
    Day,
    Kilogram,
    Pound,
    Liter,
    Meter,
    Box,
    Other(String),
}

impl Uom {
    pub fn code(&self) -> &str {
        match self {
            Uom::Each => "EA",
            Uom::Hour => "HR",
            Uom::Day => "DAY",
            Uom::Kilogram => "KG",
            Uom::Pound => "LB",
            Uom::Liter => "L",
            Uom::Meter => "M",
            Uom::Box => "BOX",
            Uom::Other(code) => code,
        }
    }
}

impl fmt::Display for Uom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Uom {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("unit of measure must not be empty"));
        }
        let uom = match trimmed.to_ascii_uppercase().as_str() {
            "EA" => Uom::Each,
            "HR" => Uom::Hour,
            "DAY" => Uom::Day,
            "KG" => Uom::Kilogram,
            "LB" => Uom::Pound,
            "L" => Uom::Liter,
            "M" => Uom::Meter,
            "BOX" => Uom::Box,
            _ => Uom::Other(trimmed.to_string()),
        };
        Ok(uom)
    }
}

impl TryFrom<String> for Uom {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Uom> for String {
    fn from(value: Uom) -> Self {
        value.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_keeps_typed_precision() {
        let q: Quantity = "1.50".parse().unwrap();
        assert_eq!(q.to_string(), "1.50");
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"1.50\"");
    }

    #[test]
    fn quantity_rejects_garbage() {
        assert!("".parse::<Quantity>().is_err());
        assert!(serde_json::from_str::<Quantity>("\"many\"").is_err());
    }

    #[test]
    fn known_uom_codes_are_case_insensitive() {
        assert_eq!("hr".parse::<Uom>().unwrap(), Uom::Hour);
        assert_eq!("Kg".parse::<Uom>().unwrap(), Uom::Kilogram);
        assert_eq!(Uom::Each.to_string(), "EA");
    }

    #[test]
    fn unknown_uom_is_free_text() {
        let uom: Uom = serde_json::from_str("\"pallet\"").unwrap();
        assert_eq!(uom, Uom::Other("pallet".to_string()));
        assert_eq!(serde_json::to_string(&uom).unwrap(), "\"pallet\"");
    }

    #[test]
    fn empty_uom_is_rejected() {
        match "  ".parse::<Uom>() {
            Err(DomainError::Validation(_)) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
}
