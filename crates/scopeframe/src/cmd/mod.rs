use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod check;
pub mod inspect;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the top-level scopes of an encoded file.
    Inspect(InspectArgs),
    /// Validate the framing of an encoded file.
    Check(CheckArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Inspect(args) => inspect::run(args, format),
        Command::Check(args) => check::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Encoded file to inspect.
    pub path: PathBuf,
    /// Stop after listing N scopes.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Encoded file to validate.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
