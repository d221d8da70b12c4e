use std::{path::PathBuf, process};

use anyhow::Context as _;
use clap::Parser;
use cvlang::{Context, Engine};
use tracing::instrument;

use super::{Project, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Run a CV through both engines and compare the results")]
pub struct Compare {
    /// CV source file [default: the input named in `argumentos.txt`]
    input: Option<PathBuf>,
}

impl Compare {
    #[instrument(level = "debug", skip(self, project))]
    pub fn run(self, project: &Project) -> anyhow::Result<()> {
        let (input, _) = project.source(self.input, None)?;
        let quotes = project.config().quotes;

        let contexts = Engine::ALL
            .into_iter()
            .map(|engine| {
                cvlang::parse_with(&input, engine, quotes)
                    .with_context(|| format!("{engine} failed on {}", input.display()))
                    .map(|context| (engine, context))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let [(first, expected), rest @ ..] = contexts.as_slice() else {
            return Ok(());
        };

        let mut identical = true;
        for (engine, actual) in rest {
            let differing = differing_sections(expected, actual);
            if differing.is_empty() {
                continue;
            }
            identical = false;
            println!(
                "{}",
                format!("⚠️  {first} and {engine} disagree on: {}", differing.join(", ")).warning()
            );
        }

        if !identical {
            process::exit(2);
        }

        let names: Vec<_> = Engine::ALL.iter().map(ToString::to_string).collect();
        println!(
            "{}",
            format!("✅ {} produce identical contexts", names.join(" and ")).success()
        );
        Ok(())
    }
}

fn differing_sections(left: &Context, right: &Context) -> Vec<&'static str> {
    Context::KEYS
        .into_iter()
        .filter(|key| left.get(key) != right.get(key))
        .collect()
}
