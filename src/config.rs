//! Tool configuration.
//!
//! Settings are read from `cvlang.toml` at the project root. Projects laid out
//! the older way keep an `argumentos.txt` instead, see [`Arguments`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Engine, builder::QuoteHandling};

/// File name of the configuration at the project root.
pub const FILE_NAME: &str = "cvlang.toml";

/// Configuration for turning CV sources into contexts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Parser used when none is given on the command line.
    pub engine: Engine,

    /// Whether enclosing quotes are stripped from values.
    pub quotes: QuoteHandling,
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads `cvlang.toml` from `root`, falling back to the defaults if it is
    /// missing or unreadable.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        let path = root.join(FILE_NAME);
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring {}: {e}", path.display());
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        engine: Engine,

        #[serde(default)]
        quotes: QuoteHandling,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { engine, quotes } => Self { engine, quotes },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            engine: config.engine,
            quotes: config.quotes,
        }
    }
}

/// File name of the legacy arguments file.
pub const ARGUMENTS_FILE_NAME: &str = "argumentos.txt";

/// Directory, beside the arguments file, that relative inputs live in.
const INPUT_DIR: &str = "entradas";

/// The legacy three-line arguments file.
///
/// ```text
/// ANTLR
/// ana.cv
/// plantilla.html
/// ```
///
/// The first non-blank line names the engine, the second the input file and
/// the optional third the renderer template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    /// Parser to use.
    pub engine: Engine,
    /// Source file, resolved against the `entradas` directory.
    pub input: PathBuf,
    /// Template name for the renderer.
    pub template: Option<String>,
}

impl Arguments {
    /// Reads an arguments file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not name a known
    /// engine and an input file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read arguments file: {e}"))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&content, base)
    }

    fn parse(content: &str, base: &Path) -> Result<Self, String> {
        let mut lines = content.lines().map(str::trim).filter(|line| !line.is_empty());

        let engine = lines
            .next()
            .ok_or_else(|| "Arguments file is empty".to_owned())?
            .parse::<Engine>()
            .map_err(|e| format!("Failed to parse arguments file: {e}"))?;

        let input = lines
            .next()
            .ok_or_else(|| "Arguments file does not name an input file".to_owned())?;
        let input = Path::new(input);
        let input = if input.is_absolute() {
            input.to_path_buf()
        } else {
            base.join(INPUT_DIR).join(input)
        };

        Ok(Self {
            engine,
            input,
            template: lines.next().map(str::to_owned),
        })
    }
}
