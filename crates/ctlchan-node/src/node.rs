use std::os::unix::fs::{FileTypeExt, MetadataExt, PermissionsExt};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{NodeError, Result};
use crate::stream::NodeStream;

/// Well-known default location of the channel node.
pub const DEFAULT_NODE_PATH: &str = "/tmp/ctlchan.sock";

/// The channel node: a listening Unix domain socket at a well-known path.
///
/// Created by the resident service, removed on service teardown (`Drop`).
/// Stale nodes left by a crashed service are replaced on bind; a non-socket
/// file at the path is never removed.
pub struct ChannelNode {
    listener: UnixListener,
    path: PathBuf,
    created_inode: Option<(u64, u64)>,
}

impl ChannelNode {
    /// Default permission mode for the node.
    ///
    /// The expected caller is an unprivileged agent, so the node is
    /// read-write for everyone; access control beyond file permissions is
    /// out of scope.
    pub const DEFAULT_NODE_MODE: u32 = 0o666;
    /// Maximum node path length (`sockaddr_un.sun_path`).
    #[cfg(target_os = "linux")]
    const MAX_PATH_LEN: usize = 108;
    #[cfg(not(target_os = "linux"))]
    const MAX_PATH_LEN: usize = 104;

    /// Create the channel node and start listening.
    pub fn bind(path: impl AsRef<Path>) -> Result<Self> {
        Self::bind_with_mode(path, Self::DEFAULT_NODE_MODE)
    }

    /// Create the channel node with an explicit permission mode.
    pub fn bind_with_mode(path: impl AsRef<Path>, mode: u32) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let path_bytes = path.as_os_str().len();
        if path_bytes >= Self::MAX_PATH_LEN {
            return Err(NodeError::PathTooLong {
                path,
                len: path_bytes,
                max: Self::MAX_PATH_LEN,
            });
        }

        // Remove a stale node if one exists, but never remove non-socket files.
        if path.exists() {
            let metadata = std::fs::symlink_metadata(&path).map_err(|e| NodeError::Bind {
                path: path.clone(),
                source: e,
            })?;
            if metadata.file_type().is_socket() {
                debug!(?path, "removing stale channel node");
                std::fs::remove_file(&path).map_err(|e| NodeError::Bind {
                    path: path.clone(),
                    source: e,
                })?;
            } else {
                return Err(NodeError::Bind {
                    path: path.clone(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::AlreadyExists,
                        "existing path is not a channel node",
                    ),
                });
            }
        }

        let listener = UnixListener::bind(&path).map_err(|e| NodeError::Bind {
            path: path.clone(),
            source: e,
        })?;

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
            NodeError::Bind {
                path: path.clone(),
                source: e,
            }
        })?;
        let created_metadata = std::fs::symlink_metadata(&path).map_err(|e| NodeError::Bind {
            path: path.clone(),
            source: e,
        })?;
        let created_inode = Some((created_metadata.dev(), created_metadata.ino()));

        info!(?path, "channel node created");

        Ok(Self {
            listener,
            path,
            created_inode,
        })
    }

    /// Accept the next session on the node (blocking).
    pub fn accept(&self) -> Result<NodeStream> {
        let (stream, _addr) = self.listener.accept().map_err(NodeError::Accept)?;
        debug!("accepted channel session");
        Ok(NodeStream::from_unix(stream))
    }

    /// The path this node lives at.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ChannelNode {
    fn drop(&mut self) {
        if let Some((expected_dev, expected_ino)) = self.created_inode {
            if let Ok(metadata) = std::fs::symlink_metadata(&self.path) {
                if metadata.file_type().is_socket()
                    && metadata.dev() == expected_dev
                    && metadata.ino() == expected_ino
                {
                    debug!(path = ?self.path, "removing channel node on teardown");
                    let _ = std::fs::remove_file(&self.path);
                } else {
                    debug!(path = ?self.path, "node identity changed; leaving path in place");
                }
            }
        }
    }
}
