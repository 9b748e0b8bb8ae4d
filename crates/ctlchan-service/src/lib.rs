//! Resident service side of the ctlchan control channel.
//!
//! The service owns the channel node and a single [`ChannelDriver`]. Each
//! accepted session is either a write (one exact-size command frame, which
//! transitions the channel state) or a read (the current response streamed
//! out once, then EOF). The service stays resident across session failures;
//! only node-level faults stop the serve loop.

pub mod driver;
pub mod error;
pub mod processor;
pub mod respond;
pub mod service;
pub mod state;

pub use driver::ChannelDriver;
pub use error::{ChannelError, Result};
pub use respond::{RESPONSE_BAD_REQUEST, RESPONSE_MONITOR, RESPONSE_UNMONITOR};
pub use service::ChannelService;
pub use state::ChannelState;
