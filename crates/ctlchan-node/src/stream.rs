use std::io::{Read, Write};
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use std::path::Path;

use tracing::debug;

use crate::error::{NodeError, Result};

/// One open session on the channel node — implements Read + Write.
///
/// A session is created either by [`NodeStream::connect`] (client side) or
/// by `ChannelNode::accept` (service side). Dropping the stream closes the
/// session.
pub struct NodeStream {
    inner: UnixStream,
}

impl NodeStream {
    /// Open a session against a listening channel node (blocking).
    pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let stream = UnixStream::connect(path).map_err(|e| NodeError::Connect {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(?path, "opened channel node");
        Ok(Self::from_unix(stream))
    }

    pub(crate) fn from_unix(inner: UnixStream) -> Self {
        Self { inner }
    }

    /// Half-close the write side of the session.
    ///
    /// A read-only open of the channel is a connect followed immediately by
    /// this call: the service sees EOF without any frame bytes and serves
    /// the current response.
    pub fn shutdown_write(&self) -> Result<()> {
        self.inner.shutdown(Shutdown::Write).map_err(Into::into)
    }

    /// Set read timeout on the session.
    pub fn set_read_timeout(&self, timeout: Option<std::time::Duration>) -> Result<()> {
        self.inner.set_read_timeout(timeout).map_err(Into::into)
    }

    /// Set write timeout on the session.
    pub fn set_write_timeout(&self, timeout: Option<std::time::Duration>) -> Result<()> {
        self.inner.set_write_timeout(timeout).map_err(Into::into)
    }
}

impl Read for NodeStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for NodeStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl std::fmt::Debug for NodeStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeStream").finish_non_exhaustive()
    }
}
