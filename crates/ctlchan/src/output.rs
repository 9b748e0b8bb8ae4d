use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use ctlchan_agent::RoundTripOutcome;
use serde::Serialize;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct RoundTripOutput<'a> {
    command: i32,
    command_name: String,
    payload: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn print_round_trip(outcome: &RoundTripOutcome, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = RoundTripOutput {
                command: outcome.command.code(),
                command_name: outcome.command.to_string(),
                payload: String::from_utf8_lossy(&outcome.payload).into_owned(),
                ok: outcome.outcome.is_ok(),
                response: outcome.outcome.as_deref().ok(),
                error: outcome.outcome.as_ref().err().map(|err| err.to_string()),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Pretty => match &outcome.outcome {
            Ok(response) => println!(
                "{} ({}) -> {response}",
                outcome.command,
                String::from_utf8_lossy(&outcome.payload)
            ),
            Err(err) => println!("{} -> error: {err}", outcome.command),
        },
        OutputFormat::Raw => {
            if let Ok(response) = &outcome.outcome {
                print_raw(response.as_bytes());
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}
