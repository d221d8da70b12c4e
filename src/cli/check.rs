use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use cvlang::{CvDocument, Engine, Section};
use tracing::instrument;

use super::{Project, read_source, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Build a CV and summarise its sections")]
pub struct Check {
    /// CV source file [default: the input named in `argumentos.txt`]
    input: Option<PathBuf>,

    /// Parser to use (descent, stack)
    #[arg(short, long)]
    engine: Option<Engine>,

    /// Suppress the summary; only the exit code reports the result
    #[arg(long, short)]
    quiet: bool,
}

impl Check {
    #[instrument(level = "debug", skip(self, project))]
    pub fn run(self, project: &Project) -> anyhow::Result<()> {
        let (input, engine) = project.source(self.input, self.engine)?;
        let source = read_source(&input)?;
        let document = engine
            .build(&source, project.config().quotes)
            .with_context(|| format!("{} is not a valid CV", input.display()))?;

        if self.quiet {
            return Ok(());
        }

        println!(
            "{} {} ({}, {engine})",
            "✅".success(),
            document.personal().full_name,
            document.id()
        );
        for section in Section::ALL {
            let summary = summarise(&document, section);
            let line = format!("  {:<16} {summary}", section.rule());
            if summary.starts_with("no ") {
                println!("{}", line.dim());
            } else {
                println!("{line}");
            }
        }

        Ok(())
    }
}

fn summarise(document: &CvDocument, section: Section) -> String {
    match section {
        Section::Identity => {
            let personal = document.personal();
            format!("{} <{}>", personal.full_name, personal.email)
        }
        Section::Education => {
            let education = document.education();
            if education.items.is_empty() {
                return "no entries".to_owned();
            }
            format!(
                "{} formal, {} supplementary",
                education.formal().count(),
                education.supplementary().count()
            )
        }
        Section::Languages => count(document.languages().entries.len(), "language"),
        Section::Experience => count(document.experience().entries.len(), "position"),
        Section::Skills => count(document.skills().entries.len(), "skill"),
        Section::Portfolio => {
            let portfolio = document.portfolio();
            if portfolio.projects.is_empty() && portfolio.merits.is_empty() {
                "no entries".to_owned()
            } else {
                count(portfolio.projects.len(), "project")
                    + ", "
                    + &count(portfolio.merits.len(), "merit")
            }
        }
    }
}

fn count(n: usize, noun: &str) -> String {
    match n {
        0 => format!("no {noun}s"),
        1 => format!("1 {noun}"),
        _ => format!("{n} {noun}s"),
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::count;

    #[test_case(0, "skill", "no skills"; "none")]
    #[test_case(1, "skill", "1 skill"; "one")]
    #[test_case(3, "skill", "3 skills"; "several")]
    fn counts_are_pluralised(n: usize, noun: &str, expected: &str) {
        assert_eq!(count(n, noun), expected);
    }
}
