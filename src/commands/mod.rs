//! Built-in command rules
//!
//! One rule per translatable Selenium command. Rules only fill the template
//! context; the engine handles vocabulary checks, selector support, match
//! mode warnings and rendering.

mod assert;
mod click;
mod input;
mod navigation;
mod select;
mod table;

use std::collections::HashMap;

use crate::context::Step;
use crate::engine::{untranslatable_target, BoxedCmd, CmdResult};
use crate::selector::{escape_quotes, quote, SelectorKind};

/// Flag variable shared by the `*AndWait` commands; declared in the header.
const WAIT_FLAG: &str = "finished";

/// Milliseconds the generated `waitFor*` calls wait before failing.
const TIMEOUT_MS: u64 = 10000;

/// Return the default set of command rules
pub fn default_commands() -> HashMap<String, BoxedCmd> {
    let mut cmds: HashMap<String, BoxedCmd> = HashMap::new();
    cmds.insert("open".into(), Box::new(navigation::OpenCmd));
    cmds.insert("goBack".into(), Box::new(navigation::GoBackCmd));
    cmds.insert("goBackAndWait".into(), Box::new(navigation::GoBackAndWaitCmd));
    cmds.insert("pause".into(), Box::new(navigation::PauseCmd));
    cmds.insert("type".into(), Box::new(input::KeysCmd { reset: true }));
    cmds.insert("sendKeys".into(), Box::new(input::KeysCmd { reset: false }));
    cmds.insert("click".into(), Box::new(click::ClickCmd));
    cmds.insert("clickAndWait".into(), Box::new(click::ClickAndWaitCmd));
    cmds.insert("select".into(), Box::new(select::SelectCmd { wait: false }));
    cmds.insert("selectAndWait".into(), Box::new(select::SelectCmd { wait: true }));
    cmds.insert("assertConfirmation".into(), Box::new(assert::AssertConfirmationCmd));
    cmds.insert("assertTextPresent".into(), Box::new(assert::AssertTextPresentCmd));
    cmds.insert("assertText".into(), Box::new(assert::AssertTextCmd));
    cmds.insert("assertTitle".into(), Box::new(assert::AssertTitleCmd));
    cmds.insert("assertValue".into(), Box::new(assert::AssertValueCmd));
    cmds.insert("assertTable".into(), Box::new(table::AssertTableCmd));
    cmds
}

/// Presence message for `test.assertExists`, escaped for a `'...'` literal.
fn presence_msg(step: &Step) -> String {
    let value = &step.target.value;
    let msg = match step.target.kind {
        SelectorKind::Id => format!("id \"{}\" must be present.", value),
        SelectorKind::Name => format!("Input named \"{}\" must be present.", value),
        SelectorKind::Xpath => format!("xpath reference \"{}\" must be present.", value),
        SelectorKind::Link => format!("link containing text \"{}\" must be present.", value),
        _ => format!("\"{}\" must be present.", value),
    };
    escape_quotes(&msg)
}

/// JS expression for the comparison value: quoted when literal, the
/// runtime expression otherwise.
fn expected_value(step: &Step) -> String {
    if step.updated_value.is_literal() {
        quote(&step.value.value)
    } else {
        step.value.value.clone()
    }
}

/// Fallback for a kind that passed the usage check but has no builder.
fn unsupported_target(step: &Step) -> CmdResult {
    CmdResult::unsupported(untranslatable_target(step))
}
