//! Conversion of a parse tree into a [`CvDocument`](crate::CvDocument).
//!
//! [`DocumentBuilder`] walks the first `cv` block of a
//! [`ParseTree`](crate::syntax::ParseTree) and hands each section subtree to
//! its section builder. The first failure aborts the build; no partial
//! document is ever returned.

use std::{fmt, num::ParseIntError};

mod document;
pub use document::{DocumentBuilder, build};

/// Normalization of raw values.
pub mod fields;
pub use fields::QuoteHandling;

mod sections;

/// A top-level section of a CV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// `datospersonales`
    Identity,
    /// `formacion`
    Education,
    /// `idiomas`
    Languages,
    /// `experiencia`
    Experience,
    /// `habilidades`
    Skills,
    /// `portafolio`
    Portfolio,
}

impl Section {
    /// Every section, in document order.
    pub const ALL: [Self; 6] = [
        Self::Identity,
        Self::Education,
        Self::Languages,
        Self::Experience,
        Self::Skills,
        Self::Portfolio,
    ];

    /// The rule name of the section in source text.
    #[must_use]
    pub const fn rule(self) -> &'static str {
        match self {
            Self::Identity => "datospersonales",
            Self::Education => "formacion",
            Self::Languages => "idiomas",
            Self::Experience => "experiencia",
            Self::Skills => "habilidades",
            Self::Portfolio => "portafolio",
        }
    }

    /// Whether a document can be built without this section.
    #[must_use]
    pub const fn is_optional(self) -> bool {
        !matches!(self, Self::Identity | Self::Education)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rule())
    }
}

/// Errors that can occur while building a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A mandatory field or sub-record is absent.
    #[error("missing required field `{field}` in `{section}` (line {line})")]
    MissingField {
        /// Section being built.
        section: Section,
        /// Rule name of the missing field.
        field: &'static str,
        /// Line of the enclosing node.
        line: usize,
    },

    /// A mandatory section was never built.
    #[error("incomplete document: section `{0}` is missing")]
    Incomplete(Section),

    /// An hours value is not a whole number.
    #[error("`{field}` must be a whole number, found `{value}` (line {line})")]
    Numeric {
        /// Rule name of the field.
        field: &'static str,
        /// The offending text.
        value: String,
        /// Line of the field.
        line: usize,
        /// Why parsing failed.
        #[source]
        source: ParseIntError,
    },

    /// A rule that has no meaning where it appears, such as a misspelled
    /// section or field.
    #[error("unknown rule `{rule}` in `{within}` (line {line})")]
    UnknownRule {
        /// Section being built, or `None` directly under `cv`.
        section: Option<Section>,
        /// Rule name of the enclosing node.
        within: String,
        /// The unexpected rule name.
        rule: String,
        /// Line of the unexpected node.
        line: usize,
    },

    /// A rule allowed once appears again in the same node.
    #[error("`{rule}` repeated in `{within}` on line {line}, first given on line {first_line}")]
    DuplicateRule {
        /// Section being built, or `None` directly under `cv`.
        section: Option<Section>,
        /// Rule name of the enclosing node.
        within: String,
        /// The repeated rule name.
        rule: String,
        /// Line of the repetition.
        line: usize,
        /// Line of the first occurrence.
        first_line: usize,
    },

    /// A value was read from a node that carries none.
    #[error("`{rule}` on line {line} has no value")]
    MalformedValue {
        /// Rule name of the node.
        rule: String,
        /// Line of the node.
        line: usize,
    },
}
