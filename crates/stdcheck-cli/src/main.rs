//! stdcheck CLI: naming, annotation, and docstring-consistency checks for
//! Python code.
//!
//! This binary provides the `stdcheck` command with subcommands for checking
//! sources, listing the rule catalogue, and generating shell completions.
//! See `stdcheck --help` for usage.

use clap::Parser;

mod cli_args;
mod commands;
mod logging;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let formatter: Box<dyn stdcheck_output::OutputFormatter> = if cli.json {
        Box::new(stdcheck_output::json::JsonFormatter)
    } else {
        Box::new(stdcheck_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Check {
            paths,
            root,
            ignore_file,
            jobs,
            disable,
            allow_dunder_names,
        } => commands::check::run(
            &*formatter,
            commands::check::CheckOptions {
                paths,
                root,
                ignore_file,
                jobs,
                disable,
                allow_dunder_names,
            },
        ),
        Commands::Rules => commands::rules::run(&*formatter),
        Commands::Completion { shell } => commands::completion::run(&shell),
    };

    std::process::exit(exit_code);
}
