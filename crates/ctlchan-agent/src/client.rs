use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use bytes::BytesMut;
use ctlchan_frame::{encode_frame, Command, Frame, FRAME_SIZE};
use ctlchan_node::NodeStream;
use tracing::debug;

use crate::error::{AgentError, Result};

/// Size of the fixed response buffer. Every response literal fits, NUL
/// terminator included.
pub const RESPONSE_BUFFER_LEN: usize = 20;

/// Crafts frames and performs write/read round trips against the channel
/// node.
///
/// Each operation opens the channel, performs its one transfer, and closes
/// it again — a round trip is a write open followed by a read open.
#[derive(Debug, Clone)]
pub struct AgentClient {
    node_path: PathBuf,
}

impl AgentClient {
    /// Create a client for the channel node at `node_path`.
    pub fn new(node_path: impl Into<PathBuf>) -> Self {
        Self {
            node_path: node_path.into(),
        }
    }

    /// The node path this client talks to.
    pub fn node_path(&self) -> &Path {
        &self.node_path
    }

    /// Craft a command frame, copying the payload into the frame.
    ///
    /// The wire length field reserves one terminator slot past the payload.
    /// Nothing borrowed from the caller crosses the channel.
    pub fn craft_frame(command: Command, payload: &[u8]) -> Result<Frame> {
        Frame::new(command, payload).map_err(Into::into)
    }

    /// Write one frame to the channel.
    ///
    /// Opens the node read-write, writes exactly [`FRAME_SIZE`] bytes, and
    /// half-closes so the service sees the end of the write. Fails with
    /// [`AgentError::ShortWrite`] if the written count differs.
    pub fn send(&self, frame: &Frame) -> Result<()> {
        let mut stream = self.open()?;

        let mut wire = BytesMut::with_capacity(FRAME_SIZE);
        encode_frame(frame, &mut wire)?;

        let written = stream.write(&wire)?;
        if written != FRAME_SIZE {
            return Err(AgentError::ShortWrite {
                written,
                expected: FRAME_SIZE,
            });
        }
        stream.flush()?;
        stream.shutdown_write()?;

        // The service closes the session once the frame is handled; wait
        // for that so a follow-up read observes this write.
        let mut eof = [0u8; 1];
        let _ = stream.read(&mut eof);

        debug!(command = %frame.command, written, "frame sent");
        Ok(())
    }

    /// Read the current response from the channel.
    ///
    /// Opens the node read-only (connect plus immediate write-side
    /// shutdown), fills a fixed [`RESPONSE_BUFFER_LEN`]-byte buffer, and
    /// interprets it as a NUL-terminated response string. Zero bytes is
    /// [`AgentError::ShortRead`].
    pub fn receive(&self) -> Result<String> {
        let mut stream = self.open()?;
        stream.shutdown_write()?;

        let mut buffer = [0u8; RESPONSE_BUFFER_LEN];
        let mut filled = 0usize;
        while filled < buffer.len() {
            let n = stream.read(&mut buffer[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        if filled == 0 {
            return Err(AgentError::ShortRead);
        }

        let end = buffer[..filled]
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(filled);
        let response = String::from_utf8_lossy(&buffer[..end]).into_owned();
        debug!(bytes = filled, response, "response received");
        Ok(response)
    }

    /// One full round trip: craft, send, receive.
    pub fn round_trip(&self, command: Command, payload: &[u8]) -> Result<String> {
        let frame = Self::craft_frame(command, payload)?;
        self.send(&frame)?;
        self.receive()
    }

    fn open(&self) -> Result<NodeStream> {
        NodeStream::connect(&self.node_path).map_err(|source| AgentError::ChannelOpen {
            path: self.node_path.clone(),
            source,
        })
    }
}
