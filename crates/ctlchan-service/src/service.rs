use std::io::{Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use ctlchan_frame::FRAME_SIZE;
use ctlchan_node::{ChannelNode, NodeError, NodeStream};
use tracing::{info, warn};

use crate::driver::ChannelDriver;
use crate::error::Result;

/// Upper bound on bytes accepted from one write session. Anything past the
/// frame size is already a size mismatch, so reading further is pointless.
const MAX_SESSION_WRITE: usize = FRAME_SIZE * 2;

/// Bytes copied out per driver read call while draining a response.
const READ_CHUNK: usize = 20;

/// The resident control-channel service.
///
/// Owns the channel node and the single channel driver. Sessions are
/// handled one at a time on the accepting thread; the protocol assumes at
/// most one client performs a write/read pair at a time, so the serial
/// accept loop is the only serialization needed.
pub struct ChannelService {
    node: ChannelNode,
    driver: ChannelDriver,
}

impl ChannelService {
    /// Create the channel node and the driver behind it.
    pub fn bind(path: impl AsRef<Path>) -> Result<Self> {
        let node = ChannelNode::bind(path)?;
        Ok(Self {
            node,
            driver: ChannelDriver::new(),
        })
    }

    /// The path of the channel node.
    pub fn node_path(&self) -> &Path {
        self.node.path()
    }

    /// The driver, for observability.
    pub fn driver(&self) -> &ChannelDriver {
        &self.driver
    }

    /// Accept and handle sessions until `running` clears.
    ///
    /// Session-level failures (size mismatch, corrupt frame, copy failure)
    /// are logged and the session is dropped; the service stays resident.
    /// Only an accept failure stops the loop.
    pub fn serve(&mut self, running: &AtomicBool) -> Result<()> {
        info!(path = ?self.node.path(), "service resident");
        while running.load(Ordering::SeqCst) {
            let stream = self.node.accept()?;
            if let Err(err) = self.handle_session(stream) {
                warn!(%err, "channel session failed");
            }
        }
        info!("service teardown");
        Ok(())
    }

    /// Handle one open of the channel node.
    ///
    /// The client half-closes after writing. Zero bytes received means a
    /// read-only open: the current response is streamed out until the
    /// driver reports EOF. Any other byte count is a write and goes through
    /// the driver's exact-size check.
    fn handle_session(&mut self, mut stream: NodeStream) -> Result<()> {
        let mut written = Vec::with_capacity(FRAME_SIZE);
        (&mut stream)
            .take(MAX_SESSION_WRITE as u64)
            .read_to_end(&mut written)
            .map_err(NodeError::from)?;

        if written.is_empty() {
            while self.driver.handle_read(&mut stream, READ_CHUNK)? > 0 {}
            stream.flush().map_err(NodeError::from)?;
        } else {
            self.driver.handle_write(&written)?;
        }
        Ok(())
    }
}
