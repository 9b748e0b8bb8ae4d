//! Fixed-size command frame codec for the ctlchan control channel.
//!
//! The client and service share exactly one wire structure: a fixed-layout
//! command frame. Every frame is `FRAME_SIZE` bytes:
//! - A 4-byte little-endian command code
//! - A 4-byte little-endian payload length (payload bytes + terminator slot)
//! - The payload itself, inlined, NUL-terminated, zero-padded to capacity
//!
//! The payload is always carried inline. A frame never contains a reference
//! into the sender's address space, so the receiver may read every byte it
//! was handed.

pub mod codec;
pub mod command;
pub mod error;

pub use codec::{decode_frame, encode_frame, Frame, FRAME_SIZE, HEADER_SIZE, PAYLOAD_CAPACITY};
pub use command::{Command, MONITOR, UNMONITOR};
pub use error::{FrameError, Result};
