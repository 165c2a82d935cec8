//! select, selectAndWait
//!
//! The value is a Selenium option locator: `label=`, `value=`, `id=` or
//! `index=` followed by the payload; no prefix means a label. The payload
//! may carry a match-mode prefix (`label=regexp:^Red$`) and `${...}`
//! references. It reaches the page as the argument of `thenEvaluate`, so a
//! runtime lookup is evaluated in the CasperJS context.

use serde::Serialize;
use serde_json::json;

use crate::context::{Context, Step};
use crate::engine::{Cmd, CmdResult, CmdUsage};
use crate::parser::{resolve_references, Resolved};
use crate::selector::{escape_quotes, parse_value, quote, xpath_by_attr, ParsedValue, SelectorKind};

use super::{unsupported_target, WAIT_FLAG};

const SELECT_TARGETS: &[SelectorKind] = &[
    SelectorKind::Bare,
    SelectorKind::Css,
    SelectorKind::Id,
    SelectorKind::Name,
];

/// How the option to select is identified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum OptionForm {
    Label,
    Value,
    Id,
    Index,
}

const OPTION_PREFIXES: &[(&str, OptionForm)] = &[
    ("label=", OptionForm::Label),
    ("value=", OptionForm::Value),
    ("id=", OptionForm::Id),
    ("index=", OptionForm::Index),
];

/// A parsed option locator
#[derive(Debug, Clone, PartialEq, Eq)]
struct OptionLocator {
    form: OptionForm,
    /// Payload with its match-mode prefix stripped
    payload: ParsedValue,
    /// Payload with references resolved
    resolved: Resolved,
}

impl OptionLocator {
    fn parse(raw: &str) -> Self {
        let (form, rest) = OPTION_PREFIXES
            .iter()
            .find_map(|(prefix, form)| raw.strip_prefix(prefix).map(|rest| (*form, rest)))
            .unwrap_or((OptionForm::Label, raw));
        let payload = parse_value(rest);
        let resolved = resolve_references(&payload.value);
        Self { form, payload, resolved }
    }

    /// JS expression passed into the page. A literal index must be a
    /// non-negative integer and is emitted as a number.
    fn js(&self) -> Option<String> {
        match (self.form, &self.resolved) {
            (OptionForm::Index, Resolved::Literal(index)) => {
                let index = index.trim();
                (!index.is_empty() && index.bytes().all(|b| b.is_ascii_digit())).then(|| index.to_string())
            }
            (_, resolved) => Some(resolved.to_js()),
        }
    }
}

pub(super) struct SelectCmd {
    pub(super) wait: bool,
}

impl SelectCmd {
    /// (expression for waitForSelector/assertExists, CSS for querySelector)
    fn selectors(&self, step: &Step) -> Option<(String, String)> {
        let value = &step.target.value;
        match step.target.kind {
            SelectorKind::Bare | SelectorKind::Css => Some((quote(value), value.clone())),
            SelectorKind::Id if self.wait => {
                Some((xpath_by_attr("select", "id", value), format!("select[id=\"{}\"]", value)))
            }
            SelectorKind::Id => Some((quote(&format!("#{}", value)), format!("select[id=\"{}\"]", value))),
            SelectorKind::Name => {
                Some((xpath_by_attr("select", "name", value), format!("select[name=\"{}\"]", value)))
            }
            _ => None,
        }
    }
}

impl Cmd for SelectCmd {
    fn prepare(&self, step: &Step, ctx: &mut Context) -> CmdResult {
        let Some((quoted_selector, query_selector)) = self.selectors(step) else {
            return unsupported_target(step);
        };
        let option = OptionLocator::parse(&step.row.value);
        let Some(option_js) = option.js() else {
            return CmdResult::unsupported(format!(
                "The option locator {} can't be translated.",
                quote(&step.row.value)
            ));
        };
        ctx.set("quoted_selector", quoted_selector);
        ctx.set("query_selector", escape_quotes(&query_selector));
        ctx.set("option", json!({ "form": option.form, "js": option_js }));
        if self.wait {
            ctx.set("flag_var", WAIT_FLAG);
        }
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: if self.wait {
                "Select an option and wait for the next page load".into()
            } else {
                "Select an option of a drop-down list".into()
            },
            assertions: if self.wait { 2 } else { 1 },
            targets: SELECT_TARGETS,
            exact_match_only: true,
        }
    }

    fn match_value(&self, step: &Step) -> ParsedValue {
        OptionLocator::parse(&step.row.value).payload
    }
}
