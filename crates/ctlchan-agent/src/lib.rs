//! Client agent for the ctlchan control channel.
//!
//! The agent crafts command frames, performs the synchronous write-then-read
//! round trip against the channel node, and sequences round trips around the
//! activate/deactivate lifecycle of the resident service.

pub mod client;
pub mod error;
pub mod lifecycle;
pub mod orchestrator;

pub use client::{AgentClient, RESPONSE_BUFFER_LEN};
pub use error::{AgentError, Result};
pub use lifecycle::{ModuleProcess, ServiceLifecycle};
pub use orchestrator::{Orchestrator, RoundTripOutcome, RunReport, COMMAND_ONE, COMMAND_TWO};
