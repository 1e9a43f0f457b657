mod check;
mod log;
mod run;

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Play a saga plan, compensating completed steps if one fails
    Run(RunArgs),
    /// Print the events recorded in a saga log
    Log(LogArgs),
    /// Validate a saga plan without running it
    Check(CheckArgs),
}

#[derive(Args)]
pub(crate) struct RunArgs {
    /// Path to the saga plan (TOML)
    pub(crate) plan: PathBuf,

    /// Log file to append events to (default: the plan's `log` setting)
    #[arg(long)]
    pub(crate) log: Option<PathBuf>,

    /// Execution id to record instead of a generated one
    #[arg(long)]
    pub(crate) execution_id: Option<String>,
}

#[derive(Args)]
pub(crate) struct LogArgs {
    /// Path to a JSON-lines saga log
    pub(crate) file: PathBuf,

    /// Only show events of this execution
    #[arg(long)]
    pub(crate) execution_id: Option<String>,
}

#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to the saga plan (TOML)
    pub(crate) plan: PathBuf,
}

impl Commands {
    pub(crate) fn execute(self) -> Result<()> {
        match self {
            Self::Run(args) => run::run(args),
            Self::Log(args) => log::run(args),
            Self::Check(args) => check::run(args),
        }
    }
}
