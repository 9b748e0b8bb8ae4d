use std::path::PathBuf;

use ctlchan_frame::FrameError;
use ctlchan_node::NodeError;

/// Errors that can occur on the agent side of the channel.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The channel node could not be opened.
    #[error("failed to open channel at {path}: {source}")]
    ChannelOpen {
        path: PathBuf,
        #[source]
        source: NodeError,
    },

    /// Fewer bytes than one full frame were written.
    #[error("short write ({written} of {expected} frame bytes)")]
    ShortWrite { written: usize, expected: usize },

    /// The response read returned no bytes.
    #[error("short read (no response bytes received)")]
    ShortRead,

    /// The service module could not be activated.
    #[error("failed to activate service module {module}: {reason}")]
    Activation { module: PathBuf, reason: String },

    /// The resident service could not be deactivated.
    #[error("failed to deactivate service: {reason}")]
    Deactivation { reason: String },

    /// Frame crafting or encoding failed.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Node-level failure on an open session.
    #[error("node error: {0}")]
    Node(#[from] NodeError),

    /// I/O failure on an open session.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AgentError>;
