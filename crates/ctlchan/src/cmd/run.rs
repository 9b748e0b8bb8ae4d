use std::time::Duration;

use ctlchan_agent::{AgentClient, ModuleProcess, Orchestrator};

use crate::cmd::RunArgs;
use crate::exit::{agent_error, CliError, CliResult, FAILURE, SUCCESS, USAGE};
use crate::output::{print_round_trip, OutputFormat};

pub fn run(args: RunArgs, format: OutputFormat) -> CliResult<i32> {
    let startup = parse_duration(&args.startup_timeout)?;
    let shutdown = parse_duration(&args.shutdown_timeout)?;

    let client = AgentClient::new(&args.node_path);
    let lifecycle =
        ModuleProcess::new(&args.module, &args.node_path).with_timeouts(startup, shutdown);

    let report = Orchestrator::new(client, lifecycle)
        .run()
        .map_err(|err| agent_error("activation failed", err))?;

    for outcome in &report.round_trips {
        print_round_trip(outcome, format);
    }

    // Round-trip failures alone never change the exit code; a failed
    // deactivation does.
    if report.is_success() {
        Ok(SUCCESS)
    } else {
        Ok(FAILURE)
    }
}

fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}
