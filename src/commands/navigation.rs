//! Navigation commands: open, goBack, goBackAndWait, pause

use crate::context::{Context, Step};
use crate::engine::{Cmd, CmdResult, CmdUsage};
use crate::parser::Resolved;

use super::WAIT_FLAG;

/// Delay used when `pause` has no usable duration.
const DEFAULT_PAUSE_MS: u64 = 1000;

// ──────────────────────────────────────────────────────────
// open: navigate to a URL
// ──────────────────────────────────────────────────────────

pub(super) struct OpenCmd;

impl Cmd for OpenCmd {
    fn prepare(&self, _step: &Step, _ctx: &mut Context) -> CmdResult {
        // The template opens `quoted_target` directly.
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: "Open a URL".into(),
            assertions: 0,
            targets: &[],
            exact_match_only: false,
        }
    }
}

// ──────────────────────────────────────────────────────────
// goBack / goBackAndWait: browser history
// ──────────────────────────────────────────────────────────

pub(super) struct GoBackCmd;

impl Cmd for GoBackCmd {
    fn prepare(&self, _step: &Step, _ctx: &mut Context) -> CmdResult {
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: "Go back in the browser history".into(),
            assertions: 0,
            targets: &[],
            exact_match_only: false,
        }
    }
}

pub(super) struct GoBackAndWaitCmd;

impl Cmd for GoBackAndWaitCmd {
    fn prepare(&self, _step: &Step, ctx: &mut Context) -> CmdResult {
        ctx.set("flag_var", WAIT_FLAG);
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: "Go back and wait for the page to load".into(),
            assertions: 1,
            targets: &[],
            exact_match_only: false,
        }
    }
}

// ──────────────────────────────────────────────────────────
// pause: wait a number of milliseconds
// ──────────────────────────────────────────────────────────

pub(super) struct PauseCmd;

impl Cmd for PauseCmd {
    fn prepare(&self, step: &Step, ctx: &mut Context) -> CmdResult {
        ctx.set("delay", pause_delay(step));
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: "Wait for the given number of milliseconds".into(),
            assertions: 0,
            targets: &[],
            exact_match_only: false,
        }
    }
}

/// Delay expression for `pause`: the target, else the value, else the
/// default. Literal text that isn't a number falls back to the default.
fn pause_delay(step: &Step) -> String {
    let source = if step.row.target.trim().is_empty() {
        &step.updated_value
    } else {
        &step.updated_target
    };
    match source {
        Resolved::Expression(expr) => expr.clone(),
        Resolved::Literal(text) => match text.trim().parse::<u64>() {
            Ok(ms) => ms.to_string(),
            Err(_) => DEFAULT_PAUSE_MS.to_string(),
        },
    }
}
