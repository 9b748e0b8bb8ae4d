use std::path::PathBuf;

/// Errors that can occur on the channel node.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// Failed to create the node at the given path.
    #[error("failed to create channel node at {path}: {source}")]
    Bind {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to open the node at the given path.
    #[error("failed to open channel node at {path}: {source}")]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to accept an incoming session.
    #[error("failed to accept session: {0}")]
    Accept(std::io::Error),

    /// The node path is too long for the platform.
    #[error("node path too long ({len} bytes, max {max}): {path}")]
    PathTooLong {
        path: PathBuf,
        len: usize,
        max: usize,
    },

    /// An I/O error occurred on an open session.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NodeError>;
