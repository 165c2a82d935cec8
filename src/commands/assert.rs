//! Assertions: assertConfirmation, assertTextPresent, assertText,
//! assertTitle, assertValue

use crate::context::{Context, Step};
use crate::engine::{Cmd, CmdResult, CmdUsage};
use crate::selector::{
    css_selector, escape_quotes, quote, xpath_by_attr, xpath_expr, xpath_link, SelectorKind,
};

use super::{expected_value, presence_msg, unsupported_target, TIMEOUT_MS};

const TEXT_TARGETS: &[SelectorKind] = &[
    SelectorKind::Bare,
    SelectorKind::Css,
    SelectorKind::Id,
    SelectorKind::Name,
    SelectorKind::Xpath,
    SelectorKind::Link,
];

const VALUE_TARGETS: &[SelectorKind] = &[
    SelectorKind::Bare,
    SelectorKind::Css,
    SelectorKind::Id,
    SelectorKind::Name,
];

// ──────────────────────────────────────────────────────────
// assertConfirmation: compare the last confirm() message
// ──────────────────────────────────────────────────────────

pub(super) struct AssertConfirmationCmd;

impl Cmd for AssertConfirmationCmd {
    fn prepare(&self, _step: &Step, ctx: &mut Context) -> CmdResult {
        ctx.set("timeout", TIMEOUT_MS);
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: "Assert the message of the last confirmation dialog".into(),
            assertions: 1,
            targets: &[],
            exact_match_only: false,
        }
    }
}

// ──────────────────────────────────────────────────────────
// assertTextPresent / assertTitle: the target is the text
// ──────────────────────────────────────────────────────────

pub(super) struct AssertTextPresentCmd;

impl Cmd for AssertTextPresentCmd {
    fn prepare(&self, _step: &Step, _ctx: &mut Context) -> CmdResult {
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: "Assert that a text appears somewhere on the page".into(),
            assertions: 1,
            targets: &[],
            exact_match_only: false,
        }
    }
}

pub(super) struct AssertTitleCmd;

impl Cmd for AssertTitleCmd {
    fn prepare(&self, _step: &Step, _ctx: &mut Context) -> CmdResult {
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: "Assert the page title".into(),
            assertions: 1,
            targets: &[],
            exact_match_only: false,
        }
    }
}

// ──────────────────────────────────────────────────────────
// assertText: text content of an element
// ──────────────────────────────────────────────────────────

pub(super) struct AssertTextCmd;

impl Cmd for AssertTextCmd {
    fn prepare(&self, step: &Step, ctx: &mut Context) -> CmdResult {
        let value = &step.target.value;
        let (quoted_selector, use_query_selector) = match step.target.kind {
            SelectorKind::Name => (xpath_by_attr("input", "name", value), false),
            SelectorKind::Xpath => (xpath_expr(value), false),
            SelectorKind::Link => (xpath_link(value), false),
            _ => match css_selector(&step.target) {
                Some(css) => (quote(&css), true),
                None => return unsupported_target(step),
            },
        };
        ctx.set("selector", &quoted_selector);
        ctx.set("quoted_selector", quoted_selector);
        ctx.set("use_query_selector", use_query_selector);
        ctx.set("assert_msg", presence_msg(step));
        ctx.set("expected_value", expected_value(step));
        ctx.set("timeout", TIMEOUT_MS);
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: "Assert the text content of an element".into(),
            assertions: 3,
            targets: TEXT_TARGETS,
            exact_match_only: true,
        }
    }
}

// ──────────────────────────────────────────────────────────
// assertValue: value of a form field
// ──────────────────────────────────────────────────────────

pub(super) struct AssertValueCmd;

impl Cmd for AssertValueCmd {
    fn prepare(&self, step: &Step, ctx: &mut Context) -> CmdResult {
        let (selector, query_selector) = match step.target.kind {
            SelectorKind::Name => {
                let name = &step.target.value;
                (xpath_by_attr("input", "name", name), format!("input[name=\"{}\"]", name))
            }
            _ => match css_selector(&step.target) {
                Some(css) => (quote(&css), css),
                None => return unsupported_target(step),
            },
        };
        ctx.set("selector", &selector);
        ctx.set("quoted_selector", selector);
        ctx.set("query_selector", escape_quotes(&query_selector));
        ctx.set("assert_msg", presence_msg(step));
        ctx.set("expected_value", expected_value(step));
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: "Assert the value of a form field".into(),
            assertions: 2,
            targets: VALUE_TARGETS,
            exact_match_only: true,
        }
    }
}
