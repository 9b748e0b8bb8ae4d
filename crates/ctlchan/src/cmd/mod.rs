use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod run;
pub mod send;
pub mod serve;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the resident service on a channel node.
    Serve(ServeArgs),
    /// Activate a service module, run the reference round trips, deactivate.
    Run(RunArgs),
    /// Perform one ad-hoc command round trip.
    Send(SendArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Serve(args) => serve::run(args),
        Command::Run(args) => run::run(args, format),
        Command::Send(args) => send::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Channel node path to create.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the service module executable.
    pub module: PathBuf,
    /// Channel node path the service will create.
    #[arg(long, default_value = ctlchan_node::DEFAULT_NODE_PATH)]
    pub node_path: PathBuf,
    /// Maximum time to wait for the node after activation (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub startup_timeout: String,
    /// Maximum time to wait for the service to exit on deactivation.
    #[arg(long, default_value = "5s")]
    pub shutdown_timeout: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CommandKind {
    Monitor,
    Unmonitor,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Channel node path to talk to.
    pub path: PathBuf,
    /// Named command to send.
    #[arg(long, conflicts_with = "code")]
    pub command: Option<CommandKind>,
    /// Raw command code to send.
    #[arg(long, conflicts_with = "command")]
    pub code: Option<i32>,
    /// Command payload.
    #[arg(long, default_value = "")]
    pub data: String,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
