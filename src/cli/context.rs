use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use cvlang::Engine;
use tracing::instrument;

use super::Project;

#[derive(Debug, Parser)]
#[command(about = "Print the renderer context of a CV as JSON")]
pub struct Context {
    /// CV source file [default: the input named in `argumentos.txt`]
    input: Option<PathBuf>,

    /// Parser to use (descent, stack)
    #[arg(short, long)]
    engine: Option<Engine>,

    /// Write the JSON to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON on a single line
    #[arg(long)]
    compact: bool,
}

impl Context {
    #[instrument(level = "debug", skip(self, project))]
    pub fn run(self, project: &Project) -> anyhow::Result<()> {
        let (input, engine) = project.source(self.input, self.engine)?;
        let context = cvlang::parse_with(&input, engine, project.config().quotes)
            .with_context(|| format!("failed to build a context from {}", input.display()))?;

        let json = if self.compact {
            context.to_json()?
        } else {
            context.to_json_pretty()?
        };

        match self.output {
            Some(path) => {
                std::fs::write(&path, format!("{json}\n"))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("wrote context to {}", path.display());
            }
            None => println!("{json}"),
        }

        Ok(())
    }
}
