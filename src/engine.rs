//! Translation engine
//!
//! The Engine holds the command registry, the template store and the
//! command vocabulary. It is stateless config: one engine can translate
//! many tables.
//!
//! Each row becomes an immutable [`Outcome`]; a run folds the outcomes, in
//! source order, into a [`RunResult`].

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::context::{Context, Step};
use crate::error::TranslateError;
use crate::parser::{parse_rows, CommandRow};
use crate::selector::{quote, ParsedValue, SelectorKind};
use crate::templates::{command_template_name, TemplateStore, DOCS_TEMPLATE, UNKNOWN_TEMPLATE};

/// What a command rule decided for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdResult {
    /// Render the command template with the prepared context
    Render,
    /// The row can't be translated; emit a warning instead of code
    Unsupported {
        warning: String,
        /// Extra comment line for whoever fixes the script by hand
        note: Option<String>,
    },
}

impl CmdResult {
    pub fn unsupported(warning: impl Into<String>) -> Self {
        CmdResult::Unsupported { warning: warning.into(), note: None }
    }
}

/// Static description of a command rule
pub struct CmdUsage {
    /// One-line summary
    pub summary: String,
    /// Assertions the generated code performs; feeds the header total
    pub assertions: usize,
    /// Selector kinds the rule can translate. Empty when the target is not
    /// an element locator (a URL, a message, a delay).
    pub targets: &'static [SelectorKind],
    /// Whether the generated code only does exact comparisons, so `regexp:`
    /// and `regexpi:` values deserve a warning
    pub exact_match_only: bool,
}

impl CmdUsage {
    pub fn supports(&self, kind: &SelectorKind) -> bool {
        self.targets.is_empty() || self.targets.contains(kind)
    }
}

/// A translation rule for one Selenium command
pub trait Cmd: Send + Sync {
    /// Fill `ctx` with the fields the command template needs.
    ///
    /// Called only for selector kinds listed in [`CmdUsage::targets`].
    fn prepare(&self, step: &Step, ctx: &mut Context) -> CmdResult;

    /// Return usage information
    fn usage(&self) -> CmdUsage;

    /// The comparison value whose match mode is checked when
    /// [`CmdUsage::exact_match_only`] is set. Defaults to the value cell.
    fn match_value(&self, step: &Step) -> ParsedValue {
        step.value.clone()
    }
}

/// A boxed command
pub type BoxedCmd = Box<dyn Cmd>;

/// Result of translating one row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Generated code; `None` when the row produced nothing at all
    pub fragment: Option<String>,
    pub assertions: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Outcome {
    fn append(&mut self, code: &str) {
        self.fragment.get_or_insert_with(String::new).push_str(code);
    }

    /// Record a warning and leave it as a comment in the generated code.
    fn warn(&mut self, command: &str, message: String) {
        tracing::warn!(command, "{}", message);
        self.append(&format!("\t\t// WARNING: {}\n", message));
        self.warnings.push(message);
    }

    fn note(&mut self, message: &str) {
        self.append(&format!("\t\t// {}\n", message));
    }

    fn error(command: &str, message: String) -> Self {
        tracing::error!(command, "{}", message);
        Self {
            errors: vec![message],
            ..Self::default()
        }
    }
}

/// Accumulated result of a whole table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Code fragments in source row order
    pub fragments: Vec<String>,
    /// Sum of declared assertions
    pub assertions: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl RunResult {
    /// Append the outcome of the next row.
    pub fn push(&mut self, outcome: Outcome) {
        self.fragments.extend(outcome.fragment);
        self.assertions += outcome.assertions;
        self.warnings.extend(outcome.warnings);
        self.errors.extend(outcome.errors);
    }

    /// Concatenate two results; `self` covers the earlier rows.
    pub fn merge(mut self, other: RunResult) -> RunResult {
        self.fragments.extend(other.fragments);
        self.assertions += other.assertions;
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        self
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All fragments joined in order.
    pub fn body(&self) -> String {
        self.fragments.concat()
    }
}

impl Extend<Outcome> for RunResult {
    fn extend<I: IntoIterator<Item = Outcome>>(&mut self, iter: I) {
        for outcome in iter {
            self.push(outcome);
        }
    }
}

impl FromIterator<Outcome> for RunResult {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut result = RunResult::default();
        result.extend(iter);
        result
    }
}

/// The translation engine: command registry, templates, vocabulary
pub struct Engine {
    /// Registered command rules
    pub commands: HashMap<String, BoxedCmd>,
    /// Template store the engine renders from
    pub templates: TemplateStore,
    vocabulary: HashSet<String>,
    implemented: BTreeSet<String>,
}

impl Engine {
    /// Create an engine with the default commands and embedded templates.
    pub fn new() -> Result<Self, TranslateError> {
        Ok(Self::with_templates(TemplateStore::embedded()?))
    }

    /// Create an engine with the default commands over `templates`.
    pub fn with_templates(templates: TemplateStore) -> Self {
        let vocabulary = templates.vocabulary().iter().cloned().collect();
        let implemented = templates.implemented_commands();
        Self {
            commands: crate::commands::default_commands(),
            templates,
            vocabulary,
            implemented,
        }
    }

    /// Register a custom command rule
    pub fn register_command(&mut self, name: impl Into<String>, cmd: BoxedCmd) {
        self.commands.insert(name.into(), cmd);
    }

    /// Whether `command` is a known Selenium command.
    pub fn is_known(&self, command: &str) -> bool {
        self.vocabulary.contains(command)
    }

    /// Whether the template store implements `command`.
    pub fn is_implemented(&self, command: &str) -> bool {
        self.implemented.contains(command)
    }

    /// Translate every row of a Selenium table.
    pub fn translate(&self, text: &str) -> Result<RunResult, TranslateError> {
        parse_rows(text)
            .iter()
            .map(|row| self.translate_row(row))
            .collect()
    }

    /// Translate a single command row.
    pub fn translate_row(&self, row: &CommandRow) -> Result<Outcome, TranslateError> {
        let command = row.command.as_str();
        tracing::debug!(command, target = %row.target, value = %row.value, "translating row");

        let step = Step::prepare(row);
        let mut ctx = Context::for_step(&step);

        if !self.is_implemented(command) {
            if !self.is_known(command) {
                return Ok(Outcome::error(
                    command,
                    format!("\"{}\" is an unknown command and cannot be processed.", command),
                ));
            }
            let mut outcome = Outcome::default();
            outcome.append(&self.render(command, DOCS_TEMPLATE, &ctx)?);
            outcome.append(&self.render(command, UNKNOWN_TEMPLATE, &ctx)?);
            let message = format!("there's no implementation of \"{}\" at the present time.", command);
            tracing::warn!(command, "{}", message);
            outcome.warnings.push(message);
            return Ok(outcome);
        }

        let Some(cmd) = self.commands.get(command) else {
            return Ok(Outcome::error(
                command,
                format!("\"{}\" has a template but no translation rule and cannot be processed.", command),
            ));
        };
        let usage = cmd.usage();

        let mut outcome = Outcome::default();
        outcome.append(&self.render(command, DOCS_TEMPLATE, &ctx)?);

        if !usage.supports(&step.target.kind) {
            outcome.warn(command, untranslatable_target(&step));
            return Ok(outcome);
        }

        if usage.exact_match_only {
            let mode = cmd.match_value(&step).mode;
            if !mode.is_exact_compatible() {
                outcome.warn(command, format!("The '{}' search type is not yet supported.", mode.as_str()));
                outcome.note("WARNING: The code below represents an 'exact' search type.");
            }
        }

        match cmd.prepare(&step, &mut ctx) {
            CmdResult::Render => {
                let code = self.render(command, &command_template_name(command), &ctx)?;
                outcome.append(&code);
                outcome.assertions = usage.assertions;
            }
            CmdResult::Unsupported { warning, note } => {
                outcome.warn(command, warning);
                if let Some(note) = note {
                    outcome.note(&note);
                }
            }
        }
        Ok(outcome)
    }

    fn render(&self, command: &str, template: &str, ctx: &Context) -> Result<String, TranslateError> {
        self.templates
            .render(template, &ctx.to_value())
            .map_err(|e| e.with_command(command))
    }
}

/// Warning text for a target the command can't address.
pub fn untranslatable_target(step: &Step) -> String {
    format!("The target value {} can't be translated.", quote(step.updated_target.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::new().unwrap()
    }

    fn row(command: &str, target: &str, value: &str) -> CommandRow {
        CommandRow::new(command, target, value)
    }

    #[test]
    fn test_open_translates_without_diagnostics() {
        let out = engine().translate_row(&row("open", "/home", "")).unwrap();
        assert_eq!(out.assertions, 0);
        assert!(out.warnings.is_empty() && out.errors.is_empty());
        assert!(out.fragment.unwrap().contains("casper.thenOpen('/home');"));
    }

    #[test]
    fn test_click_by_id() {
        let out = engine().translate_row(&row("click", "id=submitBtn", "")).unwrap();
        assert_eq!(out.assertions, 1);
        assert!(out.warnings.is_empty());
        assert!(out.fragment.unwrap().contains("this.click('#submitBtn');"));
    }

    #[test]
    fn test_assert_text_exact() {
        let out = engine().translate_row(&row("assertText", "css=.msg", "exact:Hello")).unwrap();
        assert_eq!(out.assertions, 3);
        assert!(out.warnings.is_empty());
        let code = out.fragment.unwrap();
        assert!(code.contains("'Hello'"));
        assert!(code.contains("utils.getTextOnly(text, true)"));
    }

    #[test]
    fn test_assert_text_regexp_falls_back_to_exact() {
        let out = engine().translate_row(&row("assertText", "css=.msg", "regexp:^Hel+o$")).unwrap();
        assert_eq!(out.assertions, 3);
        assert_eq!(out.warnings.len(), 1);
        let code = out.fragment.unwrap();
        assert!(code.contains("// WARNING: The 'regexp' search type is not yet supported."));
        assert!(code.contains("represents an 'exact' search type"));
        assert!(code.contains("'^Hel+o$'"));
    }

    #[test]
    fn test_type_with_reference_value() {
        let out = engine().translate_row(&row("type", "name=user", "${username}")).unwrap();
        assert_eq!(out.assertions, 1);
        let code = out.fragment.unwrap();
        assert!(code.contains("this.sendKeys(x('//input[@name=\"user\"]'), utils.get('username'), {reset: true});"));
    }

    #[test]
    fn test_unknown_command_is_error_without_fragment() {
        let out = engine().translate_row(&row("frobnicate", "x", "y")).unwrap();
        assert_eq!(out.errors.len(), 1);
        assert!(out.warnings.is_empty());
        assert_eq!(out.fragment, None);
        assert_eq!(out.assertions, 0);
    }

    #[test]
    fn test_known_but_unimplemented_is_warning() {
        let out = engine().translate_row(&row("waitForElementPresent", "id=x", "")).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.errors.is_empty());
        assert_eq!(out.assertions, 0);
        assert!(out.fragment.unwrap().contains("no implementation of \"waitForElementPresent\""));
    }

    #[test]
    fn test_unsupported_selector_is_warning() {
        let out = engine().translate_row(&row("click", "name=go", "")).unwrap();
        assert_eq!(out.warnings, vec!["The target value 'name=go' can't be translated.".to_string()]);
        assert_eq!(out.assertions, 0);
        let code = out.fragment.unwrap();
        assert!(code.contains("// WARNING: The target value 'name=go' can't be translated."));
        assert!(!code.contains("waitForSelector"));
    }

    #[test]
    fn test_implemented_without_rule_is_error() {
        let store = TemplateStore::from_sources(
            vec![
                ("commandDocs.js".to_string(), "// {{ command }}\n".to_string()),
                ("storeText_cmd_impl.js".to_string(), "x\n".to_string()),
            ],
            "storeText\n",
        )
        .unwrap();
        let engine = Engine::with_templates(store);
        let out = engine.translate_row(&row("storeText", "id=a", "v")).unwrap();
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.fragment, None);
    }

    #[test]
    fn test_implemented_outside_vocabulary_still_translates() {
        let store = TemplateStore::from_sources(
            vec![
                ("commandDocs.js".to_string(), "".to_string()),
                ("goBack_cmd_impl.js".to_string(), "back\n".to_string()),
            ],
            "",
        )
        .unwrap();
        let engine = Engine::with_templates(store);
        assert!(!engine.is_known("goBack"));
        let out = engine.translate_row(&row("goBack", "", "")).unwrap();
        assert!(out.errors.is_empty());
        assert_eq!(out.fragment.as_deref(), Some("back\n"));
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let store = TemplateStore::from_sources(
            vec![("goBack_cmd_impl.js".to_string(), "back\n".to_string())],
            "goBack\n",
        )
        .unwrap();
        let err = Engine::with_templates(store).translate_row(&row("goBack", "", "")).unwrap_err();
        assert!(err.is_missing_template());
        assert_eq!(err.command.as_deref(), Some("goBack"));
    }

    #[test]
    fn test_translate_keeps_source_order() {
        let table = "<tr><td>open</td><td>/a</td><td></td></tr>\
                     <tr><td>frobnicate</td><td></td><td></td></tr>\
                     <tr><td>click</td><td>id=go</td><td></td></tr>\
                     <tr><td>goBackAndWait</td><td></td><td></td></tr>";
        let result = engine().translate(table).unwrap();
        assert_eq!(result.fragments.len(), 3);
        assert!(result.fragments[0].contains("thenOpen('/a')"));
        assert!(result.fragments[1].contains("this.click('#go')"));
        assert!(result.fragments[2].contains("casper.back();"));
        assert_eq!(result.assertions, 2);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_merge_matches_sequential_fold() {
        let engine = engine();
        let rows = vec![
            row("open", "/", ""),
            row("click", "link=Home", ""),
            row("nope", "", ""),
            row("assertText", "id=t", "regexpi:x"),
            row("pause", "200", ""),
        ];
        let outcomes: Vec<Outcome> = rows.iter().map(|r| engine.translate_row(r).unwrap()).collect();

        let sequential: RunResult = outcomes.iter().cloned().collect();
        let head: RunResult = outcomes[..2].iter().cloned().collect();
        let tail: RunResult = outcomes[2..].iter().cloned().collect();
        assert_eq!(head.merge(tail), sequential);
        assert_eq!(sequential.assertions, 1 + 3);
        assert_eq!(sequential.warning_count(), 1);
        assert_eq!(sequential.error_count(), 1);
    }

    #[test]
    fn test_match_mode_warning_on_value_and_select() {
        let engine = engine();
        let out = engine.translate_row(&row("assertValue", "id=email", "regexp:.*@b\\.c")).unwrap();
        assert_eq!(out.warnings, vec!["The 'regexp' search type is not yet supported.".to_string()]);
        assert!(out.fragment.unwrap().contains("var expectedValue = '.*@b\\.c';"));

        for (command, value) in [("select", "label=regexp:^Red$"), ("selectAndWait", "regexp:^Red$")] {
            let out = engine.translate_row(&row(command, "id=color", value)).unwrap();
            assert_eq!(out.warnings, vec!["The 'regexp' search type is not yet supported.".to_string()], "{}", command);
            let code = out.fragment.unwrap();
            assert!(code.contains("// WARNING: The code below represents an 'exact' search type."));
            assert!(code.contains("}, '^Red$');"), "{}", code);
        }

        let out = engine.translate_row(&row("select", "id=color", "label=exact:Red")).unwrap();
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_glob_value_is_compared_literally() {
        let out = engine().translate_row(&row("assertText", "id=t", "glob:*x*")).unwrap();
        assert!(out.warnings.is_empty());
        assert_eq!(out.assertions, 3);
        let code = out.fragment.unwrap();
        assert!(code.contains("'*x*'"));
        assert!(!code.contains("glob:"));
    }

    #[test]
    fn test_send_keys_keeps_field_contents() {
        let out = engine().translate_row(&row("sendKeys", "id=q", "rust")).unwrap();
        assert!(out.fragment.unwrap().contains("this.sendKeys('#q', 'rust', {reset: false});"));
    }

    #[test]
    fn test_wait_commands_gate_on_page_load() {
        let engine = engine();
        for r in [
            row("clickAndWait", "id=go", ""),
            row("selectAndWait", "id=color", "Red"),
            row("goBackAndWait", "", ""),
        ] {
            let out = engine.translate_row(&r).unwrap();
            let code = out.fragment.unwrap();
            assert!(code.contains("finished = false;"), "{}", r.command);
            assert!(code.contains("casper.once('load.finished', function setFinished() { finished = true; });"), "{}", r.command);
            assert!(code.contains("return finished === true;"), "{}", r.command);
        }
    }

    #[test]
    fn test_click_and_wait_by_name() {
        let out = engine().translate_row(&row("clickAndWait", "name=go", "")).unwrap();
        assert!(out.warnings.is_empty());
        assert!(out.fragment.unwrap().contains("this.click(x('//input[@name=\"go\"]'), 'a');"));
    }

    #[test]
    fn test_select_option_reference_is_evaluated_at_runtime() {
        let out = engine().translate_row(&row("select", "id=color", "${color}")).unwrap();
        let code = out.fragment.unwrap();
        assert!(code.contains("casper.thenEvaluate(function(option) {"));
        assert!(code.contains("elmt.options[i].text === option"));
        assert!(code.contains("}, utils.get('color'));"));
        assert!(!code.contains("'utils.get"));
    }

    #[test]
    fn test_select_non_numeric_index_is_unsupported() {
        let out = engine().translate_row(&row("select", "id=color", "index=abc")).unwrap();
        assert_eq!(out.warnings, vec!["The option locator 'index=abc' can't be translated.".to_string()]);
        assert_eq!(out.assertions, 0);
        assert!(!out.fragment.unwrap().contains("thenEvaluate"));
    }

    #[test]
    fn test_text_present_counts_one_assertion() {
        let out = engine().translate_row(&row("assertTextPresent", "Welcome back", "")).unwrap();
        assert!(out.warnings.is_empty());
        assert_eq!(out.assertions, 1);
    }
}
