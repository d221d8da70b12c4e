//! Command line for turning plain-text CVs into renderer contexts.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
