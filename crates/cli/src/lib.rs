//! `tally` command-line front end.
//!
//! Commands:
//! - `tally new <kind> <YYYY-MM-DD> [blank-lines]`: print a draft seeded from
//!   `TALLY_*` settings, optionally with blank lines in the default unit of measure
//! - `tally totals <draft.json>`: print the totals of a saved draft

use anyhow::{Context, bail};
use chrono::NaiveDate;

use tally_documents::{DocumentDraft, DocumentKind, DocumentSettings};

pub const USAGE: &str =
    "usage: tally new <kind> <YYYY-MM-DD> [blank-lines] | tally totals <draft.json>";

pub fn run(args: &[String]) -> anyhow::Result<String> {
    match args {
        [cmd, kind, date] if cmd == "new" => {
            let settings = DocumentSettings::from_env().context("invalid TALLY_* settings")?;
            new_draft_json(kind, date, 0, &settings)
        }
        [cmd, kind, date, blank_lines] if cmd == "new" => {
            let blank_lines: usize = blank_lines
                .parse()
                .with_context(|| format!("invalid line count {blank_lines:?}"))?;
            let settings = DocumentSettings::from_env().context("invalid TALLY_* settings")?;
            new_draft_json(kind, date, blank_lines, &settings)
        }
        [cmd, path] if cmd == "totals" => {
            let input = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read draft from {path}"))?;
            totals_json(&input).with_context(|| format!("failed to total {path}"))
        }
        _ => bail!(USAGE),
    }
}

/// Serialize a draft of `kind` dated `date` holding `blank_lines` default lines.
pub fn new_draft_json(
    kind: &str,
    date: &str,
    blank_lines: usize,
    settings: &DocumentSettings,
) -> anyhow::Result<String> {
    let kind: DocumentKind = serde_json::from_value(serde_json::Value::String(kind.to_string()))
        .with_context(|| format!("unknown document kind {kind:?}"))?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid date {date:?}"))?;

    let mut draft = DocumentDraft::new(kind, date, settings);
    for _ in 0..blank_lines {
        draft = draft.add_line(settings.line_defaults())?;
    }
    Ok(serde_json::to_string_pretty(&draft)?)
}

/// Parse a saved draft and serialize its totals.
pub fn totals_json(input: &str) -> anyhow::Result<String> {
    let draft: DocumentDraft = serde_json::from_str(input).context("malformed draft JSON")?;
    let totals = draft.totals()?;
    tracing::info!(
        kind = ?draft.kind(),
        lines = draft.lines().len(),
        grand_total = %totals.grand_total,
        "document totaled"
    );
    Ok(serde_json::to_string_pretty(&totals)?)
}
