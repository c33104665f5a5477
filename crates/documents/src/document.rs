use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tally_core::{DomainError, DomainResult, LineItemId};
use tally_lines::{DocumentTotals, LineDefaults, LineItems, LineUpdate, TaxRate};
use tally_money::Money;

use crate::settings::DocumentSettings;

/// Kind of financial document being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    Invoice,
    Bill,
    JournalEntry,
    CreditMemo,
    PurchaseOrder,
}

impl DocumentKind {
    /// Journal entries move amounts between accounts; they carry no tax or shipping.
    pub fn carries_tax_and_shipping(&self) -> bool {
        !matches!(self, DocumentKind::JournalEntry)
    }
}

/// A document being edited: its lines plus the externally supplied tax rate
/// and shipping amount.
///
/// Like [`LineItems`], a draft is updated functionally: every edit returns a
/// new draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDraft {
    kind: DocumentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    number: Option<String>,
    date: NaiveDate,
    #[serde(default)]
    lines: LineItems,
    #[serde(default)]
    tax_rate: TaxRate,
    #[serde(default)]
    shipping: Money,
}

impl DocumentDraft {
    pub fn new(kind: DocumentKind, date: NaiveDate, settings: &DocumentSettings) -> Self {
        let (tax_rate, shipping) = if kind.carries_tax_and_shipping() {
            (settings.default_tax_rate, settings.default_shipping)
        } else {
            (TaxRate::zero(), Money::zero())
        };

        tracing::debug!(?kind, %date, "document draft created");
        Self {
            kind,
            number: None,
            date,
            lines: LineItems::new(),
            tax_rate,
            shipping,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn lines(&self) -> &LineItems {
        &self.lines
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn shipping(&self) -> Money {
        self.shipping
    }

    pub fn with_number(&self, number: impl Into<String>) -> Self {
        Self {
            number: Some(number.into()),
            ..self.clone()
        }
    }

    pub fn with_tax_rate(&self, tax_rate: TaxRate) -> DomainResult<Self> {
        self.ensure_taxable("tax rate")?;
        Ok(Self {
            tax_rate,
            ..self.clone()
        })
    }

    pub fn with_shipping(&self, shipping: Money) -> DomainResult<Self> {
        self.ensure_taxable("shipping")?;
        Ok(Self {
            shipping,
            ..self.clone()
        })
    }

    pub fn add_line(&self, defaults: LineDefaults) -> DomainResult<Self> {
        self.with_lines(self.lines.add_line(defaults)?)
    }

    pub fn remove_line(&self, id: LineItemId) -> DomainResult<Self> {
        self.with_lines(self.lines.remove_line(id)?)
    }

    pub fn update_line(&self, id: LineItemId, update: LineUpdate) -> DomainResult<Self> {
        self.with_lines(self.lines.update_line(id, update)?)
    }

    pub fn move_line(&self, from: usize, to: usize) -> DomainResult<Self> {
        self.with_lines(self.lines.move_line(from, to)?)
    }

    /// Subtotal, tax, shipping and grand total.
    ///
    /// Journal entries ignore any stored tax rate or shipping amount.
    pub fn totals(&self) -> DomainResult<DocumentTotals> {
        if self.kind.carries_tax_and_shipping() {
            DocumentTotals::compute(&self.lines, &self.tax_rate, &self.shipping)
        } else {
            DocumentTotals::compute(&self.lines, &TaxRate::zero(), &Money::zero())
        }
    }

    fn with_lines(&self, lines: LineItems) -> DomainResult<Self> {
        Ok(Self {
            lines,
            ..self.clone()
        })
    }

    fn ensure_taxable(&self, what: &str) -> DomainResult<()> {
        if !self.kind.carries_tax_and_shipping() {
            return Err(DomainError::validation(format!(
                "{:?} documents do not carry {what}",
                self.kind
            )));
        }
        Ok(())
    }
}
