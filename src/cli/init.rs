use std::path::{Path, PathBuf};

use clap::Parser;
use cvlang::{Config, Engine, QuoteHandling, config::FILE_NAME};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Write a cvlang.toml with the chosen defaults")]
pub struct Init {
    /// Parser recorded as the default (descent, stack)
    #[arg(short, long, default_value_t)]
    engine: Engine,

    /// Keep enclosing quotes on values instead of stripping them
    #[arg(long)]
    preserve_quotes: bool,
}

impl Init {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let path = self.write(root)?;
        println!("{} created {}", "✅".success(), path.display());
        Ok(())
    }

    fn write(self, root: &Path) -> anyhow::Result<PathBuf> {
        let path = root.join(FILE_NAME);
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }

        let config = Config {
            engine: self.engine,
            quotes: if self.preserve_quotes {
                QuoteHandling::Preserve
            } else {
                QuoteHandling::Strip
            },
        };
        config
            .save(&path)
            .map_err(|e| anyhow::anyhow!("Failed to create {FILE_NAME}: {e}"))?;
        tracing::info!(engine = %config.engine, "wrote {}", path.display());

        Ok(path)
    }
}
