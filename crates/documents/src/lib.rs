//! Document drafts (invoices, bills, journal entries, credit memos, purchase
//! orders) built on the line-item collection, plus the settings that seed them.

pub mod document;
pub mod settings;

pub use document::{DocumentDraft, DocumentKind};
pub use settings::DocumentSettings;
