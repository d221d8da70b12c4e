use std::path::{Path, PathBuf};

mod check;
mod compare;
mod context;
mod init;
mod terminal;

use anyhow::Context as _;
use check::Check;
use clap::ArgAction;
use compare::Compare;
use context::Context;
use init::Init;
use cvlang::{Arguments, Config, Engine, config::ARGUMENTS_FILE_NAME};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The project root, holding `cvlang.toml` or a legacy `argumentos.txt`
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Configuration file to use instead of `<ROOT>/cvlang.toml`
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path).map_err(anyhow::Error::msg)?,
            None => Config::load_or_default(&self.root),
        };
        let project = Project {
            root: self.root,
            config,
        };

        self.command.run(&project)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Write a `cvlang.toml` under the root
    Init(Init),

    /// Print the renderer context of a CV as JSON
    Context(Context),

    /// Build a CV and summarise its sections
    Check(Check),

    /// Run a CV through both engines and compare the results
    ///
    /// Exits with code 2 if the engines disagree.
    Compare(Compare),
}

impl Command {
    fn run(self, project: &Project) -> anyhow::Result<()> {
        match self {
            Self::Init(command) => command.run(&project.root)?,
            Self::Context(command) => command.run(project)?,
            Self::Check(command) => command.run(project)?,
            Self::Compare(command) => command.run(project)?,
        }
        Ok(())
    }
}

/// Settings shared by every command.
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Picks the source file and engine for a command.
    ///
    /// Without an explicit input both come from `argumentos.txt` under the
    /// root. An explicit engine always wins over the configured one.
    fn source(
        &self,
        input: Option<PathBuf>,
        engine: Option<Engine>,
    ) -> anyhow::Result<(PathBuf, Engine)> {
        if let Some(input) = input {
            return Ok((input, engine.unwrap_or(self.config.engine)));
        }

        let path = self.root.join(ARGUMENTS_FILE_NAME);
        let arguments = Arguments::load(&path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("no input given and {} is unusable", path.display()))?;
        tracing::debug!(template = ?arguments.template, "using {}", path.display());

        Ok((arguments.input, engine.unwrap_or(arguments.engine)))
    }

    const fn config(&self) -> &Config {
        &self.config
    }
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
