use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{BuildError, Section};
use crate::syntax::Node;

/// How surrounding double quotes on raw values are treated.
///
/// Parse trees keep values exactly as written, so quoted and bare spellings
/// of the same text only compare equal once the quotes are stripped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteHandling {
    /// Remove one pair of enclosing double quotes.
    #[default]
    Strip,
    /// Keep values exactly as written, apart from trimming.
    Preserve,
}

/// Trims `text` and removes one pair of enclosing double quotes, if present.
///
/// ```
/// use cvlang::builder::fields::unquote;
///
/// assert_eq!(unquote(r#"  "Ana Pérez" "#), "Ana Pérez");
/// assert_eq!(unquote(r#""say "hi"""#), r#"say "hi""#);
/// assert_eq!(unquote("plain"), "plain");
/// assert_eq!(unquote("\""), "\"");
/// ```
#[must_use]
pub fn unquote(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed)
}

/// The trimmed value of `node`, unquoted according to `quotes`.
///
/// # Errors
///
/// Returns [`BuildError::MalformedValue`] if the node carries no value, which
/// happens when a block appears where a field is expected.
pub fn extract_value(node: &Node, quotes: QuoteHandling) -> Result<String, BuildError> {
    let raw = node.value().ok_or_else(|| BuildError::MalformedValue {
        rule: node.rule().to_owned(),
        line: node.line(),
    })?;

    let value = match quotes {
        QuoteHandling::Strip => unquote(raw),
        QuoteHandling::Preserve => raw.trim(),
    };
    Ok(value.to_owned())
}

/// Splits a technology list on commas, or on whitespace if there are none.
///
/// Tokens are trimmed and empty ones dropped.
///
/// ```
/// use cvlang::builder::fields::split_technologies;
///
/// assert_eq!(split_technologies("Python, Go,  Rust"), ["Python", "Go", "Rust"]);
/// assert_eq!(split_technologies("Python Go Rust"), ["Python", "Go", "Rust"]);
/// ```
#[must_use]
pub fn split_technologies(text: &str) -> Vec<String> {
    let raw = text.trim();
    if raw.contains(',') {
        raw.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .collect()
    } else {
        raw.split_whitespace().map(str::to_owned).collect()
    }
}

/// Checks that every child of `node` is one of `once`, given at most one
/// time, or one of `repeated`.
///
/// # Errors
///
/// Returns [`BuildError::UnknownRule`] or [`BuildError::DuplicateRule`] for
/// the first offending child.
pub(crate) fn check_rules(
    node: &Node,
    section: Option<Section>,
    once: &[&str],
    repeated: &[&str],
) -> Result<(), BuildError> {
    let mut seen = HashMap::new();

    for child in node.nodes() {
        let rule = child.rule();
        if repeated.contains(&rule) {
            continue;
        }
        if !once.contains(&rule) {
            return Err(BuildError::UnknownRule {
                section,
                within: node.rule().to_owned(),
                rule: rule.to_owned(),
                line: child.line(),
            });
        }
        if let Some(first_line) = seen.insert(rule, child.line()) {
            return Err(BuildError::DuplicateRule {
                section,
                within: node.rule().to_owned(),
                rule: rule.to_owned(),
                line: child.line(),
                first_line,
            });
        }
    }

    Ok(())
}

/// Reads the fields of a single record node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
    node: &'a Node,
    section: Section,
    quotes: QuoteHandling,
}

impl<'a> Fields<'a> {
    pub(crate) const fn new(node: &'a Node, section: Section, quotes: QuoteHandling) -> Self {
        Self {
            node,
            section,
            quotes,
        }
    }

    /// Rejects children other than `once` and `repeated`, see [`check_rules`].
    pub(crate) fn only(&self, once: &[&str], repeated: &[&str]) -> Result<(), BuildError> {
        check_rules(self.node, Some(self.section), once, repeated)
    }

    /// Reads `other` with the same section and quote handling.
    pub(crate) const fn of(&self, other: &'a Node) -> Self {
        Self::new(other, self.section, self.quotes)
    }

    pub(crate) fn node(&self, field: &'static str) -> Result<&'a Node, BuildError> {
        self.node
            .child(field)
            .ok_or_else(|| BuildError::MissingField {
                section: self.section,
                field,
                line: self.node.line(),
            })
    }

    pub(crate) fn required(&self, field: &'static str) -> Result<String, BuildError> {
        extract_value(self.node(field)?, self.quotes)
    }

    pub(crate) fn optional(&self, field: &'static str) -> Result<Option<String>, BuildError> {
        self.node
            .child(field)
            .map(|node| extract_value(node, self.quotes))
            .transpose()
    }

    /// The node's own value, as used for the language name.
    pub(crate) fn label(&self) -> Result<Option<String>, BuildError> {
        self.node
            .value()
            .map(|_| extract_value(self.node, self.quotes))
            .transpose()
    }

    /// Parses an optional whole-number field.
    pub(crate) fn number(&self, field: &'static str) -> Result<Option<u32>, BuildError> {
        let Some(node) = self.node.child(field) else {
            return Ok(None);
        };
        let value = extract_value(node, QuoteHandling::Strip)?;
        value
            .parse()
            .map(Some)
            .map_err(|source| BuildError::Numeric {
                field,
                value,
                line: node.line(),
                source,
            })
    }

    pub(crate) const fn quotes(&self) -> QuoteHandling {
        self.quotes
    }
}
