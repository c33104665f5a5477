//! Ordered line-item collection with functional updates.
//!
//! Every operation borrows the current collection and returns a new one; the
//! input is never mutated, and a failed operation returns an error without
//! producing a partial result. After each successful operation `seq` runs
//! `1..=N` in array order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tally_core::{DomainError, DomainResult, LineItemId};
use tally_money::Money;

use crate::line_item::{LineDefaults, LineItem, LineUpdate};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct LineItems(Vec<LineItem>);

impl LineItems {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Adopt lines loaded from storage, checking sequencing, id uniqueness and
    /// derived totals.
    pub fn from_lines(lines: Vec<LineItem>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            let expected_seq = index as u32 + 1;
            if line.seq() != expected_seq {
                return Err(DomainError::validation(format!(
                    "line {} has seq {}, expected {expected_seq}",
                    line.id_typed(),
                    line.seq()
                )));
            }
            if !seen.insert(line.id_typed()) {
                return Err(DomainError::validation(format!(
                    "duplicate line item id {}",
                    line.id_typed()
                )));
            }
            if !line.total_is_current() {
                return Err(DomainError::validation(format!(
                    "line {} total {} does not equal qty * unit price",
                    line.id_typed(),
                    line.total()
                )));
            }
        }
        Ok(Self(lines))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[LineItem] {
        &self.0
    }

    pub fn get(&self, id: LineItemId) -> Option<&LineItem> {
        self.0.iter().find(|line| line.id_typed() == id)
    }

    pub fn last(&self) -> Option<&LineItem> {
        self.0.last()
    }

    /// Append a new line built from `defaults` with `seq = len + 1`.
    pub fn add_line(&self, defaults: LineDefaults) -> DomainResult<Self> {
        self.add_line_with_id(LineItemId::new(), defaults)
    }

    /// Same as [`LineItems::add_line`] with a caller-chosen id.
    pub fn add_line_with_id(&self, id: LineItemId, defaults: LineDefaults) -> DomainResult<Self> {
        if self.get(id).is_some() {
            return Err(DomainError::validation(format!(
                "duplicate line item id {id}"
            )));
        }

        let seq = self.0.len() as u32 + 1;
        let line = LineItem::new(id, seq, defaults)?;

        let mut lines = self.0.clone();
        lines.push(line);
        tracing::debug!(line_id = %id, seq, len = lines.len(), "line item added");
        Ok(Self(lines))
    }

    /// Drop the line with `id` and close the gap in `seq`.
    pub fn remove_line(&self, id: LineItemId) -> DomainResult<Self> {
        if self.get(id).is_none() {
            tracing::warn!(line_id = %id, "remove rejected: line item not found");
            return Err(DomainError::item_not_found(id));
        }

        let remaining = self
            .0
            .iter()
            .filter(|line| line.id_typed() != id)
            .cloned()
            .collect();
        let next = Self::resequenced(remaining);
        tracing::debug!(line_id = %id, len = next.len(), "line item removed");
        Ok(next)
    }

    /// Apply a single-field edit to the line with `id`.
    pub fn update_line(&self, id: LineItemId, update: LineUpdate) -> DomainResult<Self> {
        let Some(index) = self.position(id) else {
            tracing::warn!(line_id = %id, field = %update.field(), "update rejected: line item not found");
            return Err(DomainError::item_not_found(id));
        };

        let field = update.field();
        let updated = self.0[index].apply(update)?;

        let mut lines = self.0.clone();
        lines[index] = updated;
        tracing::debug!(line_id = %id, %field, total = %lines[index].total(), "line item updated");
        Ok(Self(lines))
    }

    /// Move the line at `from` to position `to` (both zero-based).
    pub fn move_line(&self, from: usize, to: usize) -> DomainResult<Self> {
        let len = self.0.len();
        for index in [from, to] {
            if index >= len {
                tracing::warn!(index, len, "move rejected: index out of range");
                return Err(DomainError::index_out_of_range(index, len));
            }
        }

        let mut lines = self.0.clone();
        let line = lines.remove(from);
        lines.insert(to, line);
        tracing::debug!(from, to, "line item moved");
        Ok(Self::resequenced(lines))
    }

    /// Sum of line totals; `0.00` for an empty collection.
    pub fn subtotal(&self) -> DomainResult<Money> {
        self.0
            .iter()
            .try_fold(Money::zero(), |acc, line| acc.checked_add(&line.total()))
    }

    fn position(&self, id: LineItemId) -> Option<usize> {
        self.0.iter().position(|line| line.id_typed() == id)
    }

    fn resequenced(lines: Vec<LineItem>) -> Self {
        Self(
            lines
                .into_iter()
                .enumerate()
                .map(|(index, line)| line.with_seq(index as u32 + 1))
                .collect(),
        )
    }
}

impl TryFrom<Vec<LineItem>> for LineItems {
    type Error = DomainError;

    fn try_from(lines: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_lines(lines)
    }
}

impl From<LineItems> for Vec<LineItem> {
    fn from(items: LineItems) -> Self {
        items.0
    }
}

impl<'a> IntoIterator for &'a LineItems {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
