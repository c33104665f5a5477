//! Defaults applied to new documents and new lines.
//!
//! Read from the environment:
//! - `TALLY_TAX_RATE`: tax rate percentage (default `0`)
//! - `TALLY_SHIPPING`: shipping amount (default `0.00`)
//! - `TALLY_DEFAULT_UOM`: unit of measure for new lines (default `EA`)
//!
//! A variable that is set but malformed is an error, not a silent default.

use tally_core::DomainResult;
use tally_lines::{LineDefaults, TaxRate, Uom};
use tally_money::Money;

pub const TAX_RATE_VAR: &str = "TALLY_TAX_RATE";
pub const SHIPPING_VAR: &str = "TALLY_SHIPPING";
pub const DEFAULT_UOM_VAR: &str = "TALLY_DEFAULT_UOM";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSettings {
    pub default_tax_rate: TaxRate,
    pub default_shipping: Money,
    pub default_uom: Uom,
}

impl DocumentSettings {
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut settings = Self::default();

        if let Some(raw) = lookup(TAX_RATE_VAR) {
            settings.default_tax_rate = raw.parse()?;
        }
        if let Some(raw) = lookup(SHIPPING_VAR) {
            settings.default_shipping = Money::create(raw.as_str())?;
        }
        if let Some(raw) = lookup(DEFAULT_UOM_VAR) {
            settings.default_uom = raw.parse()?;
        }

        tracing::debug!(
            tax_rate = %settings.default_tax_rate,
            shipping = %settings.default_shipping,
            uom = %settings.default_uom,
            "document settings loaded"
        );
        Ok(settings)
    }

    /// Defaults for a freshly added line (`qty = 1`, price `0.00`, configured UOM).
    pub fn line_defaults(&self) -> LineDefaults {
        LineDefaults {
            uom: self.default_uom.clone(),
            ..LineDefaults::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tally_core::DomainError;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let settings = DocumentSettings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings, DocumentSettings::default());
        assert_eq!(settings.default_uom, Uom::Each);
        assert_eq!(settings.default_shipping.to_string(), "0.00");
    }

    #[test]
    fn variables_override_defaults() {
        let settings = DocumentSettings::from_lookup(lookup_from(&[
            (TAX_RATE_VAR, "8.25"),
            (SHIPPING_VAR, "15"),
            (DEFAULT_UOM_VAR, "hr"),
        ]))
        .unwrap();
        assert_eq!(settings.default_tax_rate.to_string(), "8.25");
        assert_eq!(settings.default_shipping.to_string(), "15.00");
        assert_eq!(settings.line_defaults().uom, Uom::Hour);
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = DocumentSettings::from_lookup(lookup_from(&[(SHIPPING_VAR, "free")]))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount(_)));

        let err = DocumentSettings::from_lookup(lookup_from(&[(TAX_RATE_VAR, "-3")]))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
