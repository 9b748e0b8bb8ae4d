use ctlchan_frame::FrameError;
use ctlchan_node::NodeError;

/// Errors that can occur in the service-side channel driver and serve loop.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// A write carried a byte count different from the exact frame size.
    #[error("frame size mismatch ({got} bytes written, frame is {expected})")]
    FrameSizeMismatch { got: usize, expected: usize },

    /// No decoded frame was available to process.
    #[error("no decoded frame available")]
    NullMessage,

    /// The response could not be copied out to the caller.
    #[error("failed to copy response to caller: {0}")]
    CopyFailure(#[source] std::io::Error),

    /// Frame decode failed.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Node-level transport failure.
    #[error("node error: {0}")]
    Node(#[from] NodeError),
}

pub type Result<T> = std::result::Result<T, ChannelError>;
