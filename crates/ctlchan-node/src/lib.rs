//! Channel node transport for ctlchan.
//!
//! The control channel is exposed through a single well-known filesystem
//! node. The original design used a proc pseudo-file; here the node is a
//! Unix domain socket created by the resident service and removed on
//! teardown. One accepted connection corresponds to one open of the node.
//!
//! This is the lowest layer of ctlchan. The service and the agent both
//! build on [`ChannelNode`] and [`NodeStream`].

#![cfg(unix)]

pub mod error;
pub mod node;
pub mod stream;

pub use error::{NodeError, Result};
pub use node::{ChannelNode, DEFAULT_NODE_PATH};
pub use stream::NodeStream;
