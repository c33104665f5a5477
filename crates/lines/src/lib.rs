//! `tally-lines` — line items of financial documents and their totals.
//!
//! The collection is edited functionally: each operation returns a new
//! [`LineItems`] so the editing surface can re-render from the result and keep
//! the previous value for undo.

pub mod collection;
pub mod line_item;
pub mod quantity;
pub mod totals;

pub use collection::LineItems;
pub use line_item::{LineDefaults, LineField, LineItem, LineUpdate};
pub use quantity::{Quantity, Uom};
pub use totals::{
    DocumentTotals, TaxRate, calculate_grand_total, calculate_subtotal, calculate_tax,
};
