//! Selection between the two parsing engines.
//!
//! Both engines accept the same language and produce equal parse trees, so
//! for identical source text they yield identical [`Context`]s.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    builder::{self, BuildError, QuoteHandling},
    context::Context,
    domain::CvDocument,
    syntax::{self, ParseTree, SyntaxError},
};

/// A parser backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Engine {
    /// Recursive descent over characters, see [`syntax::descent`].
    #[default]
    Descent,
    /// Tokenizer and explicit block stack, see [`syntax::stack`].
    Stack,
}

impl Engine {
    /// Every engine.
    pub const ALL: [Self; 2] = [Self::Descent, Self::Stack];

    /// Canonical identifier, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Descent => "descent",
            Self::Stack => "stack",
        }
    }

    /// Parses `source` into a tree.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if the text is not well formed.
    pub fn parse_tree(self, source: &str) -> Result<ParseTree, SyntaxError> {
        match self {
            Self::Descent => syntax::descent::parse(source),
            Self::Stack => syntax::stack::parse(source),
        }
    }

    /// Parses `source` and builds its first document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] or [`Error::Build`].
    pub fn build(self, source: &str, quotes: QuoteHandling) -> Result<CvDocument, Error> {
        let tree = self.parse_tree(source)?;
        debug!(engine = %self, cvs = tree.cvs().count(), "parsed source");
        Ok(builder::build(&tree, quotes)?)
    }

    /// Parses `source`, builds its first document and serializes it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`], [`Error::Build`] or [`Error::Serialize`].
    pub fn context(self, source: &str, quotes: QuoteHandling) -> Result<Context, Error> {
        let document = self.build(source, quotes)?;
        Ok(Context::from_document(&document)?)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The identifier does not name an engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown engine '{0}': expected 'descent' or 'stack'")]
pub struct UnknownEngine(String);

impl FromStr for Engine {
    type Err = UnknownEngine;

    /// Accepts the canonical names and the legacy `antlr`, `cup` and `flexcup`
    /// identifiers, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "descent" | "antlr" => Ok(Self::Descent),
            "stack" | "cup" | "flexcup" => Ok(Self::Stack),
            _ => Err(UnknownEngine(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Engine {
    type Error = UnknownEngine;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Engine> for String {
    fn from(engine: Engine) -> Self {
        engine.name().to_owned()
    }
}

/// Errors that can occur while turning a source file into a [`Context`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested engine is not recognized.
    #[error(transparent)]
    UnknownEngine(#[from] UnknownEngine),

    /// The source file could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        /// Path of the source file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The source text is not well formed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The parse tree does not describe a complete document.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reads the file at `source_path` and converts it with `engine`, stripping
/// quotes from values.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not well formed, or does
/// not describe a complete document.
pub fn parse(source_path: &Path, engine: Engine) -> Result<Context, Error> {
    parse_with(source_path, engine, QuoteHandling::default())
}

/// Like [`parse`], with explicit quote handling.
///
/// # Errors
///
/// See [`parse`].
#[instrument(level = "debug", skip(source_path), fields(path = %source_path.display()))]
pub fn parse_with(
    source_path: &Path,
    engine: Engine,
    quotes: QuoteHandling,
) -> Result<Context, Error> {
    let source = fs::read_to_string(source_path).map_err(|source| Error::Io {
        path: source_path.to_path_buf(),
        source,
    })?;

    let context = engine.context(&source, quotes)?;
    info!(%engine, path = %source_path.display(), "built context");
    Ok(context)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use test_case::test_case;

    use super::*;

    const SOURCE: &str = r#"
cv "ana" {
  datospersonales {
    nomyape: "Ana Pérez";
    contacto { email: ana@example.com; telefono: (600123123); }
  }
  formacion {
    oficial { titulo: "BSc"; expedidor: "Uni"; fecha: 2020; }
  }
  habilidades {
    soft { habilidad: Liderazgo; }
  }
}
"#;

    fn source_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test_case("descent", Engine::Descent; "descent")]
    #[test_case("antlr", Engine::Descent; "legacy antlr")]
    #[test_case("ANTLR", Engine::Descent; "uppercase")]
    #[test_case("stack", Engine::Stack; "stack")]
    #[test_case("cup", Engine::Stack; "legacy cup")]
    #[test_case(" FlexCup ", Engine::Stack; "legacy flexcup padded")]
    fn engine_identifiers(input: &str, expected: Engine) {
        assert_eq!(input.parse::<Engine>(), Ok(expected));
    }

    #[test_case(""; "empty")]
    #[test_case("yacc"; "unknown")]
    fn unknown_engine_is_rejected(input: &str) {
        let error = input.parse::<Engine>().unwrap_err();
        assert!(matches!(Error::from(error), Error::UnknownEngine(_)));
    }

    #[test]
    fn name_round_trips_through_from_str() {
        for engine in Engine::ALL {
            assert_eq!(engine.name().parse::<Engine>(), Ok(engine));
        }
    }

    #[test]
    fn both_engines_give_identical_contexts() {
        let file = source_file(SOURCE);
        let descent = parse(file.path(), Engine::Descent).unwrap();
        let stack = parse(file.path(), Engine::Stack).unwrap();

        assert_eq!(descent.to_json().unwrap(), stack.to_json().unwrap());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.cv");

        let error = parse(&path, Engine::Descent).unwrap_err();
        assert!(matches!(error, Error::Io { ref path, .. } if path.ends_with("missing.cv")));
    }

    #[test]
    fn syntax_errors_are_reported_by_either_engine() {
        let file = source_file("cv {\n  datospersonales {\n");
        for engine in Engine::ALL {
            assert!(matches!(parse(file.path(), engine), Err(Error::Syntax(_))));
        }
    }

    #[test]
    fn build_errors_pass_through() {
        let file = source_file("cv { formacion { } }");
        let error = parse(file.path(), Engine::Stack).unwrap_err();
        assert!(matches!(error, Error::Build(BuildError::Incomplete(_))));
    }

    #[test]
    fn quote_handling_is_forwarded() {
        let file = source_file(SOURCE);
        let context = parse_with(file.path(), Engine::Descent, QuoteHandling::Preserve).unwrap();
        assert_eq!(context.get("datos").unwrap()["nombre"], "\"Ana Pérez\"");
    }
}
