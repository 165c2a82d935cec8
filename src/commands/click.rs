//! click, clickAndWait

use crate::context::{Context, Step};
use crate::engine::{Cmd, CmdResult, CmdUsage};
use crate::selector::{css_selector, quote, xpath_by_attr, xpath_expr, xpath_link, SelectorKind};

use super::{presence_msg, unsupported_target, WAIT_FLAG};

const CLICK_TARGETS: &[SelectorKind] = &[
    SelectorKind::Bare,
    SelectorKind::Css,
    SelectorKind::Id,
    SelectorKind::Link,
    SelectorKind::Xpath,
];

const CLICK_AND_WAIT_TARGETS: &[SelectorKind] = &[
    SelectorKind::Bare,
    SelectorKind::Css,
    SelectorKind::Id,
    SelectorKind::Link,
    SelectorKind::Name,
];

fn click_label(label: &str) -> String {
    format!("this.clickLabel({}, 'a')", quote(label))
}

// ──────────────────────────────────────────────────────────
// click
// ──────────────────────────────────────────────────────────

pub(super) struct ClickCmd;

impl Cmd for ClickCmd {
    fn prepare(&self, step: &Step, ctx: &mut Context) -> CmdResult {
        let value = &step.target.value;
        let (quoted_selector, click_expression) = match step.target.kind {
            SelectorKind::Link => (xpath_link(value), click_label(value)),
            SelectorKind::Xpath => {
                let selector = xpath_expr(value);
                let click = format!("this.click({})", selector);
                (selector, click)
            }
            _ => match css_selector(&step.target) {
                Some(css) => {
                    let selector = quote(&css);
                    let click = format!("this.click({})", selector);
                    (selector, click)
                }
                None => return unsupported_target(step),
            },
        };
        ctx.set("quoted_selector", quoted_selector);
        ctx.set("click_expression", click_expression);
        ctx.set("assert_msg", presence_msg(step));
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: "Click an element".into(),
            assertions: 1,
            targets: CLICK_TARGETS,
            exact_match_only: false,
        }
    }
}

// ──────────────────────────────────────────────────────────
// clickAndWait
// ──────────────────────────────────────────────────────────

pub(super) struct ClickAndWaitCmd;

impl Cmd for ClickAndWaitCmd {
    fn prepare(&self, step: &Step, ctx: &mut Context) -> CmdResult {
        let value = &step.target.value;
        let click_expression = match step.target.kind {
            SelectorKind::Link => click_label(value),
            // FIXME: the second 'a' argument matches no CasperJS click()
            // signature; kept until someone confirms what it was meant to be.
            SelectorKind::Name => format!("this.click({}, 'a')", xpath_by_attr("input", "name", value)),
            _ => match css_selector(&step.target) {
                Some(css) => format!("this.click({})", quote(&css)),
                None => return unsupported_target(step),
            },
        };
        ctx.set("flag_var", WAIT_FLAG);
        ctx.set("click_expression", click_expression);
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: "Click an element and wait for the next page load".into(),
            assertions: 1,
            targets: CLICK_AND_WAIT_TARGETS,
            exact_match_only: false,
        }
    }
}
