mod build;
mod check;
mod clean;
mod completions;
mod inspect;
mod list;

use build::BuildCommand;
use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use clean::CleanCommand;
use completions::CompletionsCommand;
use eyre::Result;
use inspect::InspectCommand;
use list::ListCommand;

use crate::logging::Verbosity;

/// Extension trait for exiting on configuration errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for ngworker_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "ngworker")]
#[command(version)]
#[command(about = "Build Angular apps that run inside a web worker")]
pub(crate) struct Cli {
    /// Log debug output
    #[arg(short, long, global = true, action = ArgAction::SetTrue, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }

    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Build(cmd) => cmd.run().await,
            Commands::List(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Inspect(cmd) => cmd.run(),
            Commands::Clean(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile and bundle every worker app
    Build(BuildCommand),

    /// List configured apps and whether they are worker apps
    List(ListCommand),

    /// Validate the configuration and the worker app sources
    Check(CheckCommand),

    /// Print the generated webpack configuration of each worker app
    Inspect(InspectCommand),

    /// Remove the work directory and worker app output directories
    Clean(CleanCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
