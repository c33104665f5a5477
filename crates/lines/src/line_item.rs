//! A single row of a financial document.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use tally_core::{CatalogItemId, DomainError, DomainResult, LineItemId};
use tally_money::Money;

use crate::quantity::{Quantity, Uom};

/// One line of an invoice, bill, journal entry, credit memo or purchase order.
///
/// `total` is derived: it always equals `qty * unit_price`, rounded to two
/// decimals. Fields are only reachable through [`LineItem::apply`], which
/// recomputes the total in the same step that changes a price or quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    id: LineItemId,
    seq: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item_id: Option<CatalogItemId>,
    #[serde(default)]
    description: String,
    qty: Quantity,
    uom: Uom,
    unit_price: Money,
    total: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    memo: Option<String>,
}

impl LineItem {
    /// Build a new line at position `seq` from defaults.
    pub fn new(id: LineItemId, seq: u32, defaults: LineDefaults) -> DomainResult<Self> {
        let total = line_total(&defaults.qty, &defaults.unit_price)?;
        Ok(Self {
            id,
            seq,
            item_id: defaults.item_id,
            description: defaults.description,
            qty: defaults.qty,
            uom: defaults.uom,
            unit_price: defaults.unit_price,
            total,
            memo: defaults.memo,
        })
    }

    pub fn id_typed(&self) -> LineItemId {
        self.id
    }

    pub fn seq(&self) -> u32 {
        self.seq
    }

    pub fn item_id(&self) -> Option<CatalogItemId> {
        self.item_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn qty(&self) -> Quantity {
        self.qty
    }

    pub fn uom(&self) -> &Uom {
        &self.uom
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    /// Return a copy with `update` applied (and the total recomputed when needed).
    pub fn apply(&self, update: LineUpdate) -> DomainResult<Self> {
        let mut next = self.clone();
        match update {
            LineUpdate::ItemId(item_id) => next.item_id = item_id,
            LineUpdate::Description(description) => next.description = description,
            LineUpdate::Qty(qty) => next.qty = qty,
            LineUpdate::Uom(uom) => next.uom = uom,
            LineUpdate::UnitPrice(price) => next.unit_price = price,
            LineUpdate::Memo(memo) => next.memo = memo,
        }
        next.total = line_total(&next.qty, &next.unit_price)?;
        Ok(next)
    }

    /// True when the stored total matches `qty * unit_price`.
    pub fn total_is_current(&self) -> bool {
        line_total(&self.qty, &self.unit_price).is_ok_and(|expected| expected == self.total)
    }

    pub(crate) fn with_seq(mut self, seq: u32) -> Self {
        self.seq = seq;
        self
    }
}

fn line_total(qty: &Quantity, unit_price: &Money) -> DomainResult<Money> {
    unit_price.checked_mul(qty)
}

/// Field values for a freshly added line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDefaults {
    pub item_id: Option<CatalogItemId>,
    pub description: String,
    pub qty: Quantity,
    pub uom: Uom,
    pub unit_price: Money,
    pub memo: Option<String>,
}

impl Default for LineDefaults {
    fn default() -> Self {
        Self {
            item_id: None,
            description: String::new(),
            qty: Quantity::ONE,
            uom: Uom::Each,
            unit_price: Money::zero(),
            memo: None,
        }
    }
}

/// Editable line fields, named the way the persisted JSON names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineField {
    ItemId,
    Description,
    Qty,
    Uom,
    UnitPrice,
    Memo,
}

impl LineField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineField::ItemId => "itemId",
            LineField::Description => "description",
            LineField::Qty => "qty",
            LineField::Uom => "uom",
            LineField::UnitPrice => "unitPrice",
            LineField::Memo => "memo",
        }
    }
}

impl fmt::Display for LineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "itemId" => Ok(LineField::ItemId),
            "description" => Ok(LineField::Description),
            "qty" => Ok(LineField::Qty),
            "uom" => Ok(LineField::Uom),
            "unitPrice" => Ok(LineField::UnitPrice),
            "memo" => Ok(LineField::Memo),
            other => Err(DomainError::validation(format!(
                "unknown line item field: {other}"
            ))),
        }
    }
}

/// A single-field edit to a line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineUpdate {
    ItemId(Option<CatalogItemId>),
    Description(String),
    Qty(Quantity),
    Uom(Uom),
    UnitPrice(Money),
    Memo(Option<String>),
}

impl LineUpdate {
    /// Build an update from a raw form value.
    ///
    /// Empty strings clear the optional fields (`itemId`, `memo`); numeric
    /// fields reject anything that is not a finite decimal.
    pub fn parse(field: LineField, value: &str) -> DomainResult<Self> {
        let update = match field {
            LineField::ItemId => {
                if value.trim().is_empty() {
                    LineUpdate::ItemId(None)
                } else {
                    LineUpdate::ItemId(Some(value.trim().parse()?))
                }
            }
            LineField::Description => LineUpdate::Description(value.to_string()),
            LineField::Qty => LineUpdate::Qty(value.parse()?),
            LineField::Uom => LineUpdate::Uom(value.parse()?),
            LineField::UnitPrice => LineUpdate::UnitPrice(Money::create(value)?),
            LineField::Memo => {
                if value.is_empty() {
                    LineUpdate::Memo(None)
                } else {
                    LineUpdate::Memo(Some(value.to_string()))
                }
            }
        };
        Ok(update)
    }

    pub fn field(&self) -> LineField {
        match self {
            LineUpdate::ItemId(_) => LineField::ItemId,
            LineUpdate::Description(_) => LineField::Description,
            LineUpdate::Qty(_) => LineField::Qty,
            LineUpdate::Uom(_) => LineField::Uom,
            LineUpdate::UnitPrice(_) => LineField::UnitPrice,
            LineUpdate::Memo(_) => LineField::Memo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(qty: &str, price: &str) -> LineItem {
        LineItem::new(
            LineItemId::new(),
            1,
            LineDefaults {
                qty: qty.parse().unwrap(),
                unit_price: Money::create(price).unwrap(),
                ..LineDefaults::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn new_line_defaults_to_one_at_zero() {
        let line = LineItem::new(LineItemId::new(), 1, LineDefaults::default()).unwrap();
        assert_eq!(line.qty().to_string(), "1");
        assert_eq!(line.unit_price().to_string(), "0.00");
        assert_eq!(line.total().to_string(), "0.00");
        assert_eq!(line.uom(), &Uom::Each);
    }

    #[test]
    fn qty_change_recomputes_total() {
        let line = priced("1", "10.00");
        let updated = line.apply(LineUpdate::Qty("3".parse().unwrap())).unwrap();
        assert_eq!(updated.total().to_string(), "30.00");
        // Input untouched.
        assert_eq!(line.total().to_string(), "10.00");
    }

    #[test]
    fn price_change_recomputes_total() {
        let line = priced("2", "10.00");
        let updated = line
            .apply(LineUpdate::UnitPrice(Money::create("4.995").unwrap()))
            .unwrap();
        assert_eq!(updated.unit_price().to_string(), "5.00");
        assert_eq!(updated.total().to_string(), "10.00");
        assert!(updated.total_is_current());
    }

    #[test]
    fn fractional_qty_rounds_total() {
        let line = priced("1.5", "3.33");
        assert_eq!(line.total().to_string(), "5.00");
    }

    #[test]
    fn parse_rejects_non_numeric_qty_and_price() {
        assert!(matches!(
            LineUpdate::parse(LineField::Qty, "abc"),
            Err(DomainError::InvalidAmount(_))
        ));
        assert!(matches!(
            LineUpdate::parse(LineField::UnitPrice, ""),
            Err(DomainError::InvalidAmount(_))
        ));
    }

    #[test]
    fn parse_clears_optional_fields_on_empty() {
        assert_eq!(
            LineUpdate::parse(LineField::Memo, "").unwrap(),
            LineUpdate::Memo(None)
        );
        assert_eq!(
            LineUpdate::parse(LineField::ItemId, " ").unwrap(),
            LineUpdate::ItemId(None)
        );
    }

    #[test]
    fn field_names_match_json_keys() {
        for field in [
            LineField::ItemId,
            LineField::Description,
            LineField::Qty,
            LineField::Uom,
            LineField::UnitPrice,
            LineField::Memo,
        ] {
            assert_eq!(field.as_str().parse::<LineField>().unwrap(), field);
        }
        assert!("price".parse::<LineField>().is_err());
    }

    #[test]
    fn serializes_as_camel_case_object() {
        let line = priced("2", "10");
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["seq"], 1);
        assert_eq!(json["qty"], "2");
        assert_eq!(json["uom"], "EA");
        assert_eq!(json["unitPrice"], serde_json::json!({ "txn": "10.00", "base": "10.00" }));
        assert_eq!(json["total"]["txn"], "20.00");
        assert!(json.get("memo").is_none());
    }
}
