//! Keyboard input: type, sendKeys
//!
//! Both map to CasperJS `sendKeys`. `type` replaces the field content, so
//! its template passes `{reset: true}`; `sendKeys` appends.

use crate::context::{Context, Step};
use crate::engine::{Cmd, CmdResult, CmdUsage};
use crate::selector::{css_selector, quote, xpath_by_attr, SelectorKind};

use super::{presence_msg, unsupported_target};

const KEY_TARGETS: &[SelectorKind] = &[
    SelectorKind::Bare,
    SelectorKind::Css,
    SelectorKind::Id,
    SelectorKind::Name,
];

pub(super) struct KeysCmd {
    pub(super) reset: bool,
}

impl Cmd for KeysCmd {
    fn prepare(&self, step: &Step, ctx: &mut Context) -> CmdResult {
        let quoted_selector = match step.target.kind {
            SelectorKind::Name => xpath_by_attr("input", "name", &step.target.value),
            _ => match css_selector(&step.target) {
                Some(css) => quote(&css),
                None => return unsupported_target(step),
            },
        };
        ctx.set("quoted_selector", quoted_selector);
        ctx.set("assert_msg", presence_msg(step));
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: if self.reset {
                "Replace the content of an input field".into()
            } else {
                "Append keystrokes to an input field".into()
            },
            assertions: 1,
            targets: KEY_TARGETS,
            exact_match_only: false,
        }
    }
}
