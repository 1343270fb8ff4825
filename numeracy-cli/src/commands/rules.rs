//! Rules command for validating task rule files without serving

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use numeracy_core::TaskRegistry;

use crate::config::ConfigLoader;

#[derive(Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommands,
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// Load every rule file and list the tasks they define
    Check {
        /// Directory containing task rule files
        #[arg(long)]
        rules_dir: Option<PathBuf>,
    },
}

pub fn run(args: RulesArgs) -> Result<()> {
    match args.command {
        RulesCommands::Check { rules_dir } => {
            let dir = match rules_dir {
                Some(dir) => dir,
                None => ConfigLoader::load()?.rules.dir,
            };
            for line in check(&dir)? {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

/// Validate `dir`, returning one report line per task
fn check(dir: &std::path::Path) -> Result<Vec<String>> {
    let registry = TaskRegistry::load_dir(dir)
        .with_context(|| format!("Invalid rules in {}", dir.display()))?;

    if registry.is_empty() {
        return Ok(vec![format!("No task definitions in {}", dir.display())]);
    }

    Ok(registry
        .iter()
        .map(|task| {
            format!(
                "{}: {} probe(s), {} stop condition(s), {} level rule(s)",
                task.task_id(),
                task.probes().len(),
                task.stop_conditions().len(),
                task.level_assignments().len()
            )
        })
        .collect())
}
