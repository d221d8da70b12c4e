//! Parse trees for CV source text.
//!
//! ```text
//! cv "ana" {
//!   datospersonales {
//!     nomyape: "Ana Pérez";
//!     contacto { email: "ana@example.com"; telefono: (600123123); }
//!   }
//! }
//! ```
//!
//! A block is a rule name, an optional label and a braced body of fields and
//! nested blocks. A field is `name: value;`. Values run up to the `;` on the
//! same line unless they are quoted, in which case they may contain `;`,
//! braces and newlines. `//` at the start of a line begins a comment. A file
//! holds one or more `cv` blocks.
//!
//! Two independent parsers accept this language, [`descent`] and [`stack`].
//! Both produce the same [`ParseTree`] for the same text, so the document
//! builder never needs to know which one was used.

pub mod descent;
pub mod stack;
mod tree;

pub use tree::{Node, ParseTree};

/// The source text does not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("syntax error on line {line}: {message}")]
pub struct SyntaxError {
    /// 1-based line the error was detected on.
    pub line: usize,
    /// What was expected.
    pub message: String,
}

impl SyntaxError {
    pub(crate) fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Characters that end a bare word.
const fn is_delimiter(c: char) -> bool {
    matches!(c, ':' | ';' | '{' | '}' | '"')
}

/// Returns `true` if `word` can name a rule.
fn is_rule_name(word: &str) -> bool {
    let mut chars = word.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
