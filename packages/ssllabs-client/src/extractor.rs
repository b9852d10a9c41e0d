//! Report table extraction.
//!
//! A best-effort regex scrape of the SSL Labs result page. No DOM is built:
//! tables, rows and cells are located by paired open/close tags, and anything
//! that does not match is skipped rather than reported.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::types::{ReportRow, ReportTable};

static RE_REPORT_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<table[^>]*class=["']reportTable["'][^>]*>[\s\S]*?</table>"#).unwrap()
});
static RE_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<tr[^>]*>([\s\S]*?)</tr>").unwrap());
static RE_LABEL_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<td[^>]*class=["']tableLabel["'][^>]*>([\s\S]*?)</td>"#).unwrap()
});
// Anchored: the value cell must start right after the label cell.
static RE_VALUE_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\s*<td[^>]*class=["']tableCell["'][^>]*>([\s\S]*?)</td>"#).unwrap()
});
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Extract every `reportTable` block from `markup`, in document order.
///
/// Tables without any label/value row still appear, as empty tables.
pub fn extract_tables(markup: &str) -> Vec<ReportTable> {
    RE_REPORT_TABLE
        .find_iter(markup)
        .enumerate()
        .map(|(index, table)| {
            let rows = extract_rows(table.as_str());
            debug!(table = index + 1, rows = rows.len(), "Table processed");
            rows
        })
        .collect()
}

/// Rows of a single table block. Rows without an adjacent
/// `tableLabel`/`tableCell` pair are dropped.
fn extract_rows(table_html: &str) -> ReportTable {
    RE_ROW
        .captures_iter(table_html)
        .enumerate()
        .filter_map(|(index, row)| {
            let (label, value) = label_value_cells(row.get(1)?.as_str())?;
            let label = clean_cell_text(label);
            let value = clean_cell_text(value);
            debug!(row = index + 1, label = %label, value = %value, "Row extracted");
            Some(ReportRow { label, value })
        })
        .collect()
}

/// Inner HTML of the first label cell directly followed by a value cell.
/// Only whitespace may sit between the two.
///
/// Each label cell is matched from its own opening tag, so stray or unclosed
/// cells earlier in the row do not hide it.
fn label_value_cells(row_html: &str) -> Option<(&str, &str)> {
    RE_LABEL_CELL.captures_iter(row_html).find_map(|label| {
        let rest = &row_html[label.get(0)?.end()..];
        let value = RE_VALUE_CELL.captures(rest)?;

        Some((label.get(1)?.as_str(), value.get(1)?.as_str()))
    })
}

/// Strip tags, collapse whitespace runs to one space, trim.
pub fn clean_cell_text(html: &str) -> String {
    let text = RE_TAG.replace_all(html, "");
    RE_WHITESPACE.replace_all(&text, " ").trim().to_string()
}
