mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "ctlchan", version, about = "Control-plane channel CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_subcommand() {
        let cli = Cli::try_parse_from(["ctlchan", "serve", "/tmp/chan.sock"])
            .expect("serve args should parse");
        assert!(matches!(cli.command, Command::Serve(_)));
    }

    #[test]
    fn parses_run_subcommand() {
        let cli = Cli::try_parse_from([
            "ctlchan",
            "run",
            "/usr/bin/ctlchan",
            "--node-path",
            "/tmp/chan.sock",
        ])
        .expect("run args should parse");
        assert!(matches!(cli.command, Command::Run(_)));
    }

    #[test]
    fn rejects_conflicting_command_args() {
        let err = Cli::try_parse_from([
            "ctlchan",
            "send",
            "/tmp/chan.sock",
            "--command",
            "monitor",
            "--code",
            "9",
        ])
        .expect_err("conflicting args should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_send_with_raw_code() {
        let cli = Cli::try_parse_from([
            "ctlchan",
            "send",
            "/tmp/chan.sock",
            "--code",
            "9",
            "--data",
            "mystery",
        ])
        .expect("send args should parse");
        assert!(matches!(cli.command, Command::Send(_)));
    }
}
