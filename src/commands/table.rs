//! assertTable
//!
//! Targets have the form `<table>.<row>.<column>` with zero-based indices.
//! The table part is `table` (the first table on the page), `#id`, or a
//! name which is matched as an id for `id=` targets and as a class
//! otherwise. `table.name` and `table#name` spell the class and id forms
//! explicitly.
//!
//! Neither pattern is anchored: `mytable.grid.0.1` addresses the `grid`
//! class because `table.grid` occurs inside the name, and trailing text
//! after the column index is ignored.

use std::sync::OnceLock;

use regex::Regex;

use crate::context::{Context, Step};
use crate::engine::{Cmd, CmdResult, CmdUsage};
use crate::selector::{xpath_expr, SelectorKind};

use super::{expected_value, TIMEOUT_MS};

const TABLE_TARGETS: &[SelectorKind] = &[SelectorKind::Bare, SelectorKind::Css, SelectorKind::Id];

const CELL_FILTER: &str = r#"[name()="TD" or name()="td" or name()="TH" or name()="th"]"#;

fn cell_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(.*)\.(\d+)\.(\d+)").expect("valid cell regex"))
}

fn table_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"table([.#])(.*)").expect("valid table regex"))
}

/// Which table a cell address points into
#[derive(Debug, Clone, PartialEq, Eq)]
enum TableRef {
    First,
    Id(String),
    Class(String),
}

/// A parsed cell address; `row` and `column` are one-based, as in XPath.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CellRef {
    table: TableRef,
    row: u32,
    column: u32,
}

impl CellRef {
    fn parse(kind: &SelectorKind, target: &str) -> Option<CellRef> {
        let caps = cell_regex().captures(target)?;
        let row = caps[2].parse::<u32>().ok()?.checked_add(1)?;
        let column = caps[3].parse::<u32>().ok()?.checked_add(1)?;
        let name = &caps[1];

        let table = if name == "table" {
            TableRef::First
        } else if let Some(tc) = table_regex().captures(name) {
            match &tc[1] {
                "#" => TableRef::Id(tc[2].to_string()),
                _ => TableRef::Class(tc[2].to_string()),
            }
        } else if let Some(id) = name.strip_prefix('#') {
            TableRef::Id(id.to_string())
        } else if *kind == SelectorKind::Id {
            TableRef::Id(name.to_string())
        } else {
            TableRef::Class(name.to_string())
        };
        Some(CellRef { table, row, column })
    }

    fn xpath(&self) -> String {
        let table = match &self.table {
            TableRef::First => "//table".to_string(),
            TableRef::Id(id) => format!("//table[@id=\"{}\"]", id),
            TableRef::Class(class) => format!("//table[@class=\"{}\"]", class),
        };
        format!("{}/tbody/tr[{}]/*[{}]{}", table, self.row, self.column, CELL_FILTER)
    }
}

pub(super) struct AssertTableCmd;

impl Cmd for AssertTableCmd {
    fn prepare(&self, step: &Step, ctx: &mut Context) -> CmdResult {
        let Some(cell) = CellRef::parse(&step.target.kind, &step.target.value) else {
            return CmdResult::Unsupported {
                warning: format!(
                    "there's no implementation of this assertTable target ('{}') at the present time.",
                    step.updated_target.as_str()
                ),
                note: Some("You will need to implement this test manually.".into()),
            };
        };
        ctx.set("selector", xpath_expr(&cell.xpath()));
        ctx.set("expected_value", expected_value(step));
        ctx.set("timeout", TIMEOUT_MS);
        CmdResult::Render
    }

    fn usage(&self) -> CmdUsage {
        CmdUsage {
            summary: "Assert the text of a table cell".into(),
            assertions: 3,
            targets: TABLE_TARGETS,
            exact_match_only: false,
        }
    }
}
