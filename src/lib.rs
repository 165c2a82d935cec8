//! sel2casper: translate Selenium IDE test tables into CasperJS scripts
//!
//! # Overview
//!
//! Selenium IDE saves a test case as an HTML table with one
//! `command | target | value` row per step. This crate scans those rows,
//! translates each one through a per-command rule and a template, and
//! assembles a CasperJS test script around the generated code.
//!
//! Problems in the table never abort a run. A row with an untranslatable
//! target or an unsupported comparison mode becomes a warning comment in
//! the script; an unknown command becomes an error, and any error
//! suppresses the script so only the diagnostics are printed.
//!
//! ```text
//! <tr><td>open</td><td>/login</td><td></td></tr>
//! <tr><td>type</td><td>id=user</td><td>${username}</td></tr>
//! <tr><td>clickAndWait</td><td>css=button.submit</td><td></td></tr>
//! ```
//!
//! `${name}` references become `utils.get('name')` lookups evaluated when
//! the CasperJS test runs.
//!
//! # Commands
//!
//! | Command | Targets | Assertions |
//! |---------|---------|------------|
//! | `open` | URL | 0 |
//! | `type`, `sendKeys` | bare, css, id, name | 1 |
//! | `click` | bare, css, id, link, xpath | 1 |
//! | `clickAndWait` | bare, css, id, link, name | 1 |
//! | `select` | bare, css, id, name | 1 |
//! | `selectAndWait` | bare, css, id, name | 2 |
//! | `assertConfirmation` | message | 1 |
//! | `assertTextPresent` | text | 1 |
//! | `assertText` | bare, css, id, name, xpath, link | 3 |
//! | `assertTitle` | title | 1 |
//! | `assertValue` | bare, css, id, name | 2 |
//! | `assertTable` | bare, css, id | 3 |
//! | `goBack` | - | 0 |
//! | `goBackAndWait` | - | 1 |
//! | `pause` | milliseconds | 0 |
//!
//! Other commands from the Selenium vocabulary are recognized and left as
//! a "not implemented" warning.

mod commands;
mod context;
mod engine;
mod error;
mod parser;
mod runner;
mod selector;
mod templates;

pub use commands::default_commands;
pub use context::{Context, Step};
pub use engine::{untranslatable_target, BoxedCmd, Cmd, CmdResult, CmdUsage, Engine, Outcome, RunResult};
pub use error::{ErrorKind, TranslateError};
pub use parser::{lookup_expr, parse_rows, resolve_references, scan_rows, CommandRow, Resolved, RowScan};
pub use runner::{run, test_name, RunConfig, Translation, Translator};
pub use selector::{
    decode_entities, parse_target, parse_value, MatchMode, ParsedSelector, ParsedValue, SelectorKind,
};
pub use templates::{command_template_name, TemplateStore};
