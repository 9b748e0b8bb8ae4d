use ctlchan_frame::Command;
use tracing::{info, warn};

use crate::client::AgentClient;
use crate::error::{AgentError, Result};
use crate::lifecycle::ServiceLifecycle;

/// Payload of the first reference round trip.
pub const COMMAND_ONE: &[u8] = b"command one";
/// Payload of the second reference round trip.
pub const COMMAND_TWO: &[u8] = b"command two";

/// Outcome of one round trip.
#[derive(Debug)]
pub struct RoundTripOutcome {
    pub command: Command,
    pub payload: Vec<u8>,
    pub outcome: std::result::Result<String, AgentError>,
}

/// What a full orchestration run produced.
///
/// Round-trip failures live inside the report; they never abort the run
/// and never affect the exit status. Deactivation failure is recorded here
/// as well, since the round trips before it still happened.
#[derive(Debug)]
pub struct RunReport {
    pub round_trips: Vec<RoundTripOutcome>,
    pub deactivation: std::result::Result<(), AgentError>,
}

impl RunReport {
    /// Whether the run as a whole succeeded (activation did, or this report
    /// would not exist; deactivation is the only remaining gate).
    pub fn is_success(&self) -> bool {
        self.deactivation.is_ok()
    }
}

/// Sequences the reference command round trips around the service
/// lifecycle.
pub struct Orchestrator<L> {
    client: AgentClient,
    lifecycle: L,
}

impl<L: ServiceLifecycle> Orchestrator<L> {
    pub fn new(client: AgentClient, lifecycle: L) -> Self {
        Self { client, lifecycle }
    }

    /// Run the full orchestration.
    ///
    /// Activation failure aborts immediately — no round trip is attempted
    /// and deactivation is not tried. Otherwise both reference round trips
    /// run unconditionally, each failure logged and contained, and the
    /// service is deactivated at the end regardless of their outcomes.
    pub fn run(&mut self) -> Result<RunReport> {
        self.lifecycle.activate()?;

        let round_trips = vec![
            self.round_trip(Command::Monitor, COMMAND_ONE),
            self.round_trip(Command::Unmonitor, COMMAND_TWO),
        ];

        let deactivation = self.lifecycle.deactivate();
        if let Err(err) = &deactivation {
            warn!(%err, "deactivation failed");
        }

        Ok(RunReport {
            round_trips,
            deactivation,
        })
    }

    fn round_trip(&self, command: Command, payload: &[u8]) -> RoundTripOutcome {
        let outcome = self.client.round_trip(command, payload);
        match &outcome {
            Ok(response) => info!(%command, response, "round trip complete"),
            Err(err) => warn!(%command, %err, "round trip failed"),
        }
        RoundTripOutcome {
            command,
            payload: payload.to_vec(),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingLifecycle {
        fail_activate: bool,
        fail_deactivate: bool,
        activated: usize,
        deactivated: usize,
    }

    impl ServiceLifecycle for &mut RecordingLifecycle {
        fn activate(&mut self) -> Result<()> {
            self.activated += 1;
            if self.fail_activate {
                return Err(AgentError::Activation {
                    module: "/dev/null".into(),
                    reason: "refused".into(),
                });
            }
            Ok(())
        }

        fn deactivate(&mut self) -> Result<()> {
            self.deactivated += 1;
            if self.fail_deactivate {
                return Err(AgentError::Deactivation {
                    reason: "refused".into(),
                });
            }
            Ok(())
        }
    }

    fn dead_client() -> AgentClient {
        AgentClient::new("/tmp/ctlchan-orchestrator-dead.sock")
    }

    #[test]
    fn activation_failure_aborts_without_round_trips() {
        let mut lifecycle = RecordingLifecycle {
            fail_activate: true,
            ..Default::default()
        };
        let mut orchestrator = Orchestrator::new(dead_client(), &mut lifecycle);

        let err = orchestrator.run().unwrap_err();
        assert!(matches!(err, AgentError::Activation { .. }));
        assert_eq!(lifecycle.activated, 1);
        assert_eq!(lifecycle.deactivated, 0, "no deactivation after failed activation");
    }

    #[test]
    fn round_trip_failures_do_not_abort_the_run() {
        // No service behind the node: both round trips fail, but the run
        // proceeds to deactivation and reports success.
        let mut lifecycle = RecordingLifecycle::default();
        let mut orchestrator = Orchestrator::new(dead_client(), &mut lifecycle);

        let report = orchestrator.run().unwrap();
        assert!(report.is_success());
        assert_eq!(report.round_trips.len(), 2);
        assert!(report.round_trips.iter().all(|rt| rt.outcome.is_err()));
        assert_eq!(lifecycle.deactivated, 1);
    }

    #[test]
    fn deactivation_failure_is_reported_not_retried() {
        let mut lifecycle = RecordingLifecycle {
            fail_deactivate: true,
            ..Default::default()
        };
        let mut orchestrator = Orchestrator::new(dead_client(), &mut lifecycle);

        let report = orchestrator.run().unwrap();
        assert!(!report.is_success());
        assert!(matches!(
            report.deactivation,
            Err(AgentError::Deactivation { .. })
        ));
        assert_eq!(lifecycle.activated, 1, "deactivation failure must not re-activate");
    }

    #[test]
    fn reference_round_trips_use_fixed_commands() {
        let mut lifecycle = RecordingLifecycle::default();
        let mut orchestrator = Orchestrator::new(dead_client(), &mut lifecycle);

        let report = orchestrator.run().unwrap();
        assert_eq!(report.round_trips[0].command, Command::Monitor);
        assert_eq!(report.round_trips[0].payload, COMMAND_ONE);
        assert_eq!(report.round_trips[1].command, Command::Unmonitor);
        assert_eq!(report.round_trips[1].payload, COMMAND_TWO);
    }
}
