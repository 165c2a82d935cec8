//! Per-row translation inputs
//!
//! A [`Step`] is a command row with its target and value resolved and
//! classified. A [`Context`] is the bag of named fields handed to the
//! command's template.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::parser::{resolve_references, CommandRow, Resolved};
use crate::selector::{escape_quotes, parse_target, parse_value, ParsedSelector, ParsedValue};

/// A command row prepared for dispatch
#[derive(Debug, Clone)]
pub struct Step {
    pub row: CommandRow,
    /// Target with `${...}` references resolved
    pub updated_target: Resolved,
    /// Value with `${...}` references resolved
    pub updated_value: Resolved,
    /// Classified `updated_target`
    pub target: ParsedSelector,
    /// Classified `updated_value`
    pub value: ParsedValue,
}

impl Step {
    pub fn prepare(row: &CommandRow) -> Self {
        let updated_target = resolve_references(&row.target);
        let updated_value = resolve_references(&row.value);
        let target = parse_target(updated_target.as_str());
        let value = parse_value(updated_value.as_str());
        Self {
            row: row.clone(),
            updated_target,
            updated_value,
            target,
            value,
        }
    }

    pub fn command(&self) -> &str {
        &self.row.command
    }
}

/// Named fields for template rendering
#[derive(Debug, Clone, Default)]
pub struct Context {
    fields: Map<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields every command template can rely on.
    ///
    /// `parsed_target.value` and `parsed_value.value` are quote-escaped, as
    /// templates place them inside `'...'` literals.
    pub fn for_step(step: &Step) -> Self {
        let mut ctx = Self::new();
        ctx.set("command", &step.row.command);
        ctx.set("target", &step.row.target);
        ctx.set("value", &step.row.value);
        ctx.set("updated_target", step.updated_target.as_str());
        ctx.set("updated_value", step.updated_value.as_str());
        ctx.set("quoted_target", step.updated_target.to_js());
        ctx.set("quoted_value", step.updated_value.to_js());
        ctx.set("parsed_target", json!({
            "key": step.target.kind.as_str(),
            "value": escape_quotes(&step.target.value),
        }));
        ctx.set("parsed_value", json!({
            "search_type": step.value.mode.as_str(),
            "value": escape_quotes(&step.value.value),
        }));
        ctx
    }

    pub fn set(&mut self, key: &str, value: impl Serialize) {
        let value = serde_json::to_value(value).unwrap_or_default();
        self.fields.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
