use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stdcheck_enforce::types::RuleId;

#[derive(Parser, Debug)]
#[command(
    name = "stdcheck",
    version,
    about = "Naming, annotation, and docstring consistency checks for Python"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log per-file progress to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Check Python sources against the rule catalogue
    Check {
        /// Files or directories to check (default: the project root)
        paths: Vec<PathBuf>,
        /// Project root holding `.stdcheck.json` and the ignore file
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Ignore file to use instead of the configured one
        #[arg(long, env = "STDCHECK_IGNORE_FILE")]
        ignore_file: Option<PathBuf>,
        /// Worker threads; 0 means one per core
        #[arg(long, short = 'j')]
        jobs: Option<usize>,
        /// Skip a rule, by id (`R9`) or name (`summary-period`); repeatable
        #[arg(long = "disable", value_name = "RULE")]
        disable: Vec<RuleId>,
        /// Exempt `__dunder__` names from the name mangling rule
        #[arg(long)]
        allow_dunder_names: bool,
    },

    /// List every rule with its id, severity, and meaning
    Rules,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, elvish, powershell)
        shell: String,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
