use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::command::Command;
use crate::error::{FrameError, Result};

/// Frame header: command code (4) + payload length (4) = 8 bytes.
pub const HEADER_SIZE: usize = 8;

/// Inline payload capacity, terminator slot included.
pub const PAYLOAD_CAPACITY: usize = 56;

/// Total wire size of every frame. Writes of any other length are rejected
/// by the service.
pub const FRAME_SIZE: usize = HEADER_SIZE + PAYLOAD_CAPACITY;

/// A command frame.
///
/// The payload is owned by the frame. Crafting a frame copies the payload
/// bytes in; nothing borrowed from the sender survives encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The command this frame carries.
    pub command: Command,
    /// The inline payload, terminator excluded.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame, copying the payload into owned storage.
    ///
    /// Fails with [`FrameError::PayloadTooLarge`] if the payload plus its
    /// terminator slot exceeds [`PAYLOAD_CAPACITY`].
    pub fn new(command: Command, payload: impl AsRef<[u8]>) -> Result<Self> {
        let payload = payload.as_ref();
        if payload.len() + 1 > PAYLOAD_CAPACITY {
            return Err(FrameError::PayloadTooLarge {
                size: payload.len(),
                max: PAYLOAD_CAPACITY - 1,
            });
        }
        Ok(Self {
            command,
            payload: Bytes::copy_from_slice(payload),
        })
    }

    /// The payload length field as written to the wire: payload bytes plus
    /// one reserved terminator slot.
    pub fn payload_length(&self) -> u32 {
        self.payload.len() as u32 + 1
    }

    /// The wire size of this frame. Always [`FRAME_SIZE`].
    pub fn wire_size(&self) -> usize {
        FRAME_SIZE
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌───────────────┬───────────────┬──────────────────────────────┐
/// │ Command (4B)  │ Length (4B)   │ Payload (56B)                │
/// │ i32 LE        │ u32 LE        │ bytes + NUL, zero-padded     │
/// └───────────────┴───────────────┴──────────────────────────────┘
/// ```
pub fn encode_frame(frame: &Frame, dst: &mut BytesMut) -> Result<()> {
    if frame.payload.len() + 1 > PAYLOAD_CAPACITY {
        return Err(FrameError::PayloadTooLarge {
            size: frame.payload.len(),
            max: PAYLOAD_CAPACITY - 1,
        });
    }
    dst.reserve(FRAME_SIZE);
    dst.put_i32_le(frame.command.code());
    dst.put_u32_le(frame.payload_length());
    dst.put_slice(&frame.payload);
    dst.put_bytes(0, PAYLOAD_CAPACITY - frame.payload.len());
    Ok(())
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer holds fewer than [`FRAME_SIZE`] bytes.
/// On success, consumes exactly one frame's worth of bytes.
pub fn decode_frame(src: &mut BytesMut) -> Result<Option<Frame>> {
    if src.len() < FRAME_SIZE {
        return Ok(None); // Need more data
    }

    let code = i32::from_le_bytes(src[0..4].try_into().unwrap());
    let payload_length = u32::from_le_bytes(src[4..8].try_into().unwrap()) as usize;

    // The length field always counts the terminator slot, so zero is as
    // malformed as an overrun.
    if payload_length == 0 || payload_length > PAYLOAD_CAPACITY {
        return Err(FrameError::InvalidPayloadLength {
            len: payload_length,
            max: PAYLOAD_CAPACITY,
        });
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_length - 1).freeze();
    src.advance(PAYLOAD_CAPACITY - (payload_length - 1));

    Ok(Some(Frame {
        command: Command::from_code(code),
        payload,
    }))
}
