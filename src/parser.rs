//! Selenium table parser
//!
//! Selenium IDE stores a test case as an HTML table with one `<tr>` per
//! command and exactly three `<td>` cells: command, target, value.
//!
//! ```text
//! <tr>
//!     <td>click</td>
//!     <td>id=submit</td>
//!     <td></td>
//! </tr>
//! ```
//!
//! Rows of any other shape (the title row, rows with attributes or nested
//! markup) are skipped without a diagnostic. This is a scan, not an HTML
//! parser.
//!
//! This module also resolves `${name}` configuration references inside cell
//! text into CasperJS expressions that read the value at runtime.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// One command row of the Selenium table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRow {
    pub command: String,
    pub target: String,
    pub value: String,
}

impl CommandRow {
    pub fn new(command: impl Into<String>, target: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            target: target.into(),
            value: value.into(),
        }
    }
}

/// Result of scanning one `<tr>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowScan {
    /// The row had the command/target/value shape
    Recognized(CommandRow),
    /// Anything else; carries the raw row markup
    Skipped(String),
}

fn row_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<tr>(.*?)</tr>").expect("valid row regex"))
}

fn cells_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*<td>([A-Za-z0-9_]+)</td>\s*<td>([^<]*)</td>\s*<td>([^<]*)</td>\s*$")
            .expect("valid cells regex")
    })
}

/// Scan every `<tr>...</tr>` element in source order.
pub fn scan_rows(text: &str) -> impl Iterator<Item = RowScan> + '_ {
    row_regex().captures_iter(text).map(|caps| {
        let inner = caps.get(1).map_or("", |m| m.as_str());
        match cells_regex().captures(inner) {
            Some(cells) => RowScan::Recognized(CommandRow::new(&cells[1], &cells[2], &cells[3])),
            None => RowScan::Skipped(caps[0].to_string()),
        }
    })
}

/// Extract the command rows, dropping every row that doesn't fit.
pub fn parse_rows(text: &str) -> Vec<CommandRow> {
    scan_rows(text)
        .filter_map(|scan| match scan {
            RowScan::Recognized(row) => Some(row),
            RowScan::Skipped(raw) => {
                tracing::debug!(row = %raw.trim(), "skipping row without command/target/value cells");
                None
            }
        })
        .collect()
}

/// A cell value after `${name}` references have been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// No references; the original text, untouched
    Literal(String),
    /// A JS expression concatenating literals and `utils.get(...)` calls
    Expression(String),
}

impl Resolved {
    pub fn as_str(&self) -> &str {
        match self {
            Resolved::Literal(s) | Resolved::Expression(s) => s,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Resolved::Literal(_))
    }

    /// A JS expression for this value: literals are quoted, expressions
    /// are used as they are.
    pub fn to_js(&self) -> String {
        match self {
            Resolved::Literal(s) => crate::selector::quote(s),
            Resolved::Expression(e) => e.clone(),
        }
    }
}

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid reference regex"))
}

/// JS call that reads a configuration variable at test runtime.
pub fn lookup_expr(name: &str) -> String {
    format!("utils.get('{}')", crate::selector::escape_quotes(name))
}

/// Resolve `${name}` references in `s`.
///
/// References are consumed left to right. Text around them becomes quoted
/// literals, references become [`lookup_expr`] calls, and the pieces are
/// joined with ` + `:
///
/// - `"${x}"` → `utils.get('x')`
/// - `"a${x}b"` → `'a' + utils.get('x') + 'b'`
///
/// A string without references comes back unchanged as
/// [`Resolved::Literal`].
pub fn resolve_references(s: &str) -> Resolved {
    let mut parts: Vec<String> = Vec::new();
    let mut last = 0;

    for caps in reference_regex().captures_iter(s) {
        let Some(whole) = caps.get(0) else { continue };
        let prefix = &s[last..whole.start()];
        if !prefix.is_empty() {
            parts.push(crate::selector::quote(prefix));
        }
        parts.push(lookup_expr(&caps[1]));
        last = whole.end();
    }

    if parts.is_empty() {
        return Resolved::Literal(s.to_string());
    }

    let suffix = &s[last..];
    if !suffix.is_empty() {
        parts.push(crate::selector::quote(suffix));
    }
    Resolved::Expression(parts.join(" + "))
}
