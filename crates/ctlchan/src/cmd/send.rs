use ctlchan_agent::{AgentClient, RoundTripOutcome};
use ctlchan_frame::Command;

use crate::cmd::{CommandKind, SendArgs};
use crate::exit::{CliError, CliResult, FAILURE, SUCCESS, USAGE};
use crate::output::{print_round_trip, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let command = resolve_command(&args)?;
    let client = AgentClient::new(&args.path);

    let outcome = RoundTripOutcome {
        command,
        payload: args.data.clone().into_bytes(),
        outcome: client.round_trip(command, args.data.as_bytes()),
    };
    let failed = outcome.outcome.is_err();
    print_round_trip(&outcome, format);

    if failed {
        Ok(FAILURE)
    } else {
        Ok(SUCCESS)
    }
}

fn resolve_command(args: &SendArgs) -> CliResult<Command> {
    match (args.command, args.code) {
        (Some(CommandKind::Monitor), None) => Ok(Command::Monitor),
        (Some(CommandKind::Unmonitor), None) => Ok(Command::Unmonitor),
        (None, Some(code)) => Ok(Command::from_code(code)),
        (None, None) => Err(CliError::new(
            USAGE,
            "one of --command or --code is required",
        )),
        (Some(_), Some(_)) => unreachable!("clap rejects conflicting args"),
    }
}
