use std::fmt;
use std::io;

use ctlchan_agent::AgentError;
use ctlchan_frame::FrameError;
use ctlchan_node::NodeError;
use ctlchan_service::ChannelError;

// Stable exit-code table. Scripts depend on these values.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::ConnectionRefused | io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn node_error(context: &str, err: NodeError) -> CliError {
    match err {
        NodeError::Bind { source, .. }
        | NodeError::Connect { source, .. }
        | NodeError::Accept(source)
        | NodeError::Io(source) => io_error(context, source),
        other => CliError::new(TRANSPORT_ERROR, format!("{context}: {other}")),
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}

pub fn channel_error(context: &str, err: ChannelError) -> CliError {
    match err {
        ChannelError::Node(err) => node_error(context, err),
        ChannelError::Frame(err) => frame_error(context, err),
        ChannelError::FrameSizeMismatch { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

pub fn agent_error(context: &str, err: AgentError) -> CliError {
    match err {
        AgentError::ChannelOpen { source, .. } => node_error(context, source),
        AgentError::Node(err) => node_error(context, err),
        AgentError::Io(err) => io_error(context, err),
        AgentError::Frame(err) => frame_error(context, err),
        AgentError::ShortWrite { .. } | AgentError::ShortRead => {
            CliError::new(FAILURE, format!("{context}: {err}"))
        }
        AgentError::Activation { .. } | AgentError::Deactivation { .. } => {
            CliError::new(FAILURE, format!("{context}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_maps_to_its_code() {
        let err = io_error(
            "open",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert_eq!(err.code, PERMISSION_DENIED);
    }

    #[test]
    fn missing_node_maps_to_failure() {
        let err = node_error(
            "connect",
            NodeError::Connect {
                path: "/tmp/x.sock".into(),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
        );
        assert_eq!(err.code, FAILURE);
    }

    #[test]
    fn size_mismatch_is_invalid_data() {
        let err = channel_error(
            "write",
            ChannelError::FrameSizeMismatch {
                got: 5,
                expected: 64,
            },
        );
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn activation_failure_is_nonzero() {
        let err = agent_error(
            "run",
            AgentError::Activation {
                module: "/no/module".into(),
                reason: "spawn failed".into(),
            },
        );
        assert_eq!(err.code, FAILURE);
    }
}
