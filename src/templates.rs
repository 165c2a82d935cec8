//! Template store
//!
//! Every piece of CasperJS the translator emits comes from a minijinja
//! template. The store also answers which commands are implemented: a
//! command is translatable when a template named `<command>_cmd_impl.js`
//! exists. The Selenium command vocabulary (`commandlist.txt`) lives next
//! to the templates.
//!
//! The default store is compiled into the binary. A directory store
//! replaces it completely, so dropping a `*_cmd_impl.js` file from a custom
//! directory turns that command back into a "recognized, not implemented"
//! warning.

use std::collections::BTreeSet;
use std::path::Path;

use minijinja::{AutoEscape, Environment};
use serde_json::Value;

use crate::error::{ErrorKind, TranslateError};

/// Suffix marking a per-command template
pub const CMD_TEMPLATE_SUFFIX: &str = "_cmd_impl.js";
/// File holding the command vocabulary, one name per line
pub const VOCABULARY_FILE: &str = "commandlist.txt";

pub const HEADER_TEMPLATE: &str = "common_start.js";
pub const FOOTER_TEMPLATE: &str = "common_end.js";
pub const MESSAGING_TEMPLATE: &str = "messaging.js";
pub const DOCS_TEMPLATE: &str = "commandDocs.js";
pub const UNKNOWN_TEMPLATE: &str = "unknown_command.js";

const EMBEDDED: &[(&str, &str)] = &[
    ("common_start.js", include_str!("../templates/common_start.js")),
    ("common_end.js", include_str!("../templates/common_end.js")),
    ("messaging.js", include_str!("../templates/messaging.js")),
    ("commandDocs.js", include_str!("../templates/commandDocs.js")),
    ("unknown_command.js", include_str!("../templates/unknown_command.js")),
    ("assertConfirmation_cmd_impl.js", include_str!("../templates/assertConfirmation_cmd_impl.js")),
    ("assertTable_cmd_impl.js", include_str!("../templates/assertTable_cmd_impl.js")),
    ("assertTextPresent_cmd_impl.js", include_str!("../templates/assertTextPresent_cmd_impl.js")),
    ("assertText_cmd_impl.js", include_str!("../templates/assertText_cmd_impl.js")),
    ("assertTitle_cmd_impl.js", include_str!("../templates/assertTitle_cmd_impl.js")),
    ("assertValue_cmd_impl.js", include_str!("../templates/assertValue_cmd_impl.js")),
    ("clickAndWait_cmd_impl.js", include_str!("../templates/clickAndWait_cmd_impl.js")),
    ("click_cmd_impl.js", include_str!("../templates/click_cmd_impl.js")),
    ("goBackAndWait_cmd_impl.js", include_str!("../templates/goBackAndWait_cmd_impl.js")),
    ("goBack_cmd_impl.js", include_str!("../templates/goBack_cmd_impl.js")),
    ("open_cmd_impl.js", include_str!("../templates/open_cmd_impl.js")),
    ("pause_cmd_impl.js", include_str!("../templates/pause_cmd_impl.js")),
    ("selectAndWait_cmd_impl.js", include_str!("../templates/selectAndWait_cmd_impl.js")),
    ("select_cmd_impl.js", include_str!("../templates/select_cmd_impl.js")),
    ("sendKeys_cmd_impl.js", include_str!("../templates/sendKeys_cmd_impl.js")),
    ("type_cmd_impl.js", include_str!("../templates/type_cmd_impl.js")),
];

const EMBEDDED_VOCABULARY: &str = include_str!("../templates/commandlist.txt");

/// Name of the template implementing `command`.
pub fn command_template_name(command: &str) -> String {
    format!("{}{}", command, CMD_TEMPLATE_SUFFIX)
}

/// Compiled templates plus the command vocabulary
pub struct TemplateStore {
    env: Environment<'static>,
    names: BTreeSet<String>,
    vocabulary: Vec<String>,
}

impl TemplateStore {
    /// The templates compiled into the crate.
    pub fn embedded() -> Result<Self, TranslateError> {
        Self::from_sources(
            EMBEDDED.iter().map(|(name, src)| (name.to_string(), src.to_string())),
            EMBEDDED_VOCABULARY,
        )
    }

    /// Load every file of `dir` as a template; `commandlist.txt` is the
    /// vocabulary. Subdirectories are ignored.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TranslateError> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| {
            TranslateError::new(ErrorKind::Io, format!("{}: {}", dir.display(), e))
        })?;

        let mut sources = Vec::new();
        let mut vocabulary = None;
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                continue;
            };
            let content = std::fs::read_to_string(&path).map_err(|e| {
                TranslateError::new(ErrorKind::Io, format!("{}: {}", path.display(), e))
            })?;
            if name == VOCABULARY_FILE {
                vocabulary = Some(content);
            } else {
                sources.push((name, content));
            }
        }

        let vocabulary = vocabulary.unwrap_or_else(|| {
            tracing::warn!(dir = %dir.display(), "no {} found; every command without a template is unknown", VOCABULARY_FILE);
            String::new()
        });
        let store = Self::from_sources(sources, &vocabulary)?;
        tracing::info!(
            dir = %dir.display(),
            templates = store.names.len(),
            commands = store.vocabulary.len(),
            "loaded template directory"
        );
        Ok(store)
    }

    /// Build a store from `(name, source)` pairs and vocabulary text.
    pub fn from_sources(
        sources: impl IntoIterator<Item = (String, String)>,
        vocabulary: &str,
    ) -> Result<Self, TranslateError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        let mut names = BTreeSet::new();
        for (name, source) in sources {
            env.add_template_owned(name.clone(), source)
                .map_err(|e| TranslateError::from(e).with_template(name.as_str()))?;
            names.insert(name);
        }

        Ok(Self {
            env,
            names,
            vocabulary: parse_vocabulary(vocabulary),
        })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Commands with a `<command>_cmd_impl.js` template.
    pub fn implemented_commands(&self) -> BTreeSet<String> {
        self.names
            .iter()
            .filter_map(|name| name.strip_suffix(CMD_TEMPLATE_SUFFIX))
            .filter(|cmd| !cmd.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Known Selenium commands, in file order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Render a named template with a JSON object as context.
    pub fn render(&self, name: &str, ctx: &Value) -> Result<String, TranslateError> {
        if !self.has_template(name) {
            return Err(TranslateError::missing_template(name));
        }
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(ctx)?)
    }
}

fn parse_vocabulary(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
