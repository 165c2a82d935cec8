//! Target and value classification
//!
//! Selenium targets look like `id=foo`, `css=.msg`, `//div[@id='x']` or a
//! bare string. Values may carry a pattern prefix such as `exact:` or
//! `regexp:`. This module splits both into a kind and a payload, and holds
//! the small helpers that turn a classified target into CasperJS
//! expressions.

use std::fmt;

/// Unescape the four HTML entities Selenium IDE writes into table cells.
///
/// Replacements run in a fixed order (`&lt;`, `&gt;`, `&quot;`, `&amp;`) in
/// a single pass, so `&amp;lt;` becomes `&lt;` and not `<`.
pub fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// How a target addresses a DOM element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    /// No `key=` prefix; each command picks its own default
    Bare,
    Css,
    Id,
    Name,
    Xpath,
    Link,
    /// Any other `key=` prefix (`label=`, `dom=`, ...)
    Other(String),
}

impl SelectorKind {
    fn from_key(key: &str) -> Self {
        match key {
            "" => SelectorKind::Bare,
            "css" => SelectorKind::Css,
            "id" => SelectorKind::Id,
            "name" => SelectorKind::Name,
            "xpath" => SelectorKind::Xpath,
            "link" => SelectorKind::Link,
            other => SelectorKind::Other(other.to_string()),
        }
    }

    /// The key as written in the Selenium target (`""` for bare).
    pub fn as_str(&self) -> &str {
        match self {
            SelectorKind::Bare => "",
            SelectorKind::Css => "css",
            SelectorKind::Id => "id",
            SelectorKind::Name => "name",
            SelectorKind::Xpath => "xpath",
            SelectorKind::Link => "link",
            SelectorKind::Other(key) => key,
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelector {
    pub kind: SelectorKind,
    pub value: String,
}

/// Classify a target string.
///
/// - `//...` is an xpath, kept verbatim
/// - `key=rest` splits on the first `=`; both halves are entity-decoded
/// - anything else is bare
pub fn parse_target(s: &str) -> ParsedSelector {
    if s.starts_with("//") {
        return ParsedSelector { kind: SelectorKind::Xpath, value: s.to_string() };
    }
    match s.split_once('=') {
        Some((key, rest)) => ParsedSelector {
            kind: SelectorKind::from_key(&decode_entities(key)),
            value: decode_entities(rest),
        },
        None => ParsedSelector { kind: SelectorKind::Bare, value: decode_entities(s) },
    }
}

/// Pattern-matching mode of a comparison value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// No prefix, or `glob:`
    Default,
    Exact,
    Regexp,
    RegexpI,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Default => "",
            MatchMode::Exact => "exact",
            MatchMode::Regexp => "regexp",
            MatchMode::RegexpI => "regexpi",
        }
    }

    /// Whether an exact string comparison honours this mode.
    pub fn is_exact_compatible(&self) -> bool {
        matches!(self, MatchMode::Default | MatchMode::Exact)
    }
}

/// A classified value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedValue {
    pub mode: MatchMode,
    pub value: String,
}

// `regexpi:` must be tried before `regexp:`.
const VALUE_PREFIXES: &[(&str, MatchMode)] = &[
    ("exact:", MatchMode::Exact),
    ("regexpi:", MatchMode::RegexpI),
    ("regexp:", MatchMode::Regexp),
    // glob is accepted but not tracked as a mode of its own
    ("glob:", MatchMode::Default),
];

/// Classify a value string by its pattern prefix.
pub fn parse_value(s: &str) -> ParsedValue {
    for (prefix, mode) in VALUE_PREFIXES {
        if let Some(rest) = s.strip_prefix(prefix) {
            return ParsedValue { mode: *mode, value: decode_entities(rest) };
        }
    }
    ParsedValue { mode: MatchMode::Default, value: decode_entities(s) }
}

/// Escape single quotes so the string can sit inside a `'...'` JS literal.
pub fn escape_quotes(s: &str) -> String {
    s.replace('\'', "\\'")
}

/// Wrap a string in single quotes, escaping embedded ones.
pub fn quote(s: &str) -> String {
    format!("'{}'", escape_quotes(s))
}

/// CSS selector for bare/css/id targets; `None` for every other kind.
pub fn css_selector(target: &ParsedSelector) -> Option<String> {
    match target.kind {
        SelectorKind::Bare | SelectorKind::Css => Some(target.value.clone()),
        SelectorKind::Id => Some(format!("#{}", target.value)),
        _ => None,
    }
}

/// `x('...')` evaluation of an arbitrary xpath.
pub fn xpath_expr(xpath: &str) -> String {
    format!("x('{}')", escape_quotes(xpath))
}

/// `x('//tag[@attr="value"]')`, with `value` escaped for the `'...'` literal.
pub fn xpath_by_attr(tag: &str, attr: &str, value: &str) -> String {
    format!("x('//{}[@{}=\"{}\"]')", tag, attr, escape_quotes(value))
}

/// `x('//a[contains(text(),"label")]')`, with `label` escaped for the
/// `'...'` literal.
pub fn xpath_link(label: &str) -> String {
    format!("x('//a[contains(text(),\"{}\")]')", escape_quotes(label))
}
