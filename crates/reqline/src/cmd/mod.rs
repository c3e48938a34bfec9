use clap::{Args, Subcommand};
use reqline_frame::LineTerminator;
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod emit;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Frame JSON requests onto an output stream, one flushed line each.
    Emit(EmitArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Emit(args) => emit::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EmitArgs {
    /// Read JSON requests from a file instead of stdin.
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Write frames to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Append a timestamped copy of the traffic to this file.
    #[arg(long, value_name = "FILE", env = "REQLINE_DEBUG_LOG")]
    pub debug_log: Option<PathBuf>,
    /// Call name kept out of the debug log (repeatable). Default: server.getVersion.
    #[arg(long = "exclude-call", value_name = "NAME", conflicts_with = "mirror_all")]
    pub exclude_calls: Vec<String>,
    /// Mirror every frame to the debug log.
    #[arg(long)]
    pub mirror_all: bool,
    /// Line terminator written after each frame (lf, crlf, platform).
    #[arg(long, value_name = "ENDING", default_value = "platform")]
    pub line_ending: LineTerminator,
    /// Do not print the run summary.
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
