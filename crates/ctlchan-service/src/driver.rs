use std::io::Write;

use bytes::BytesMut;
use ctlchan_frame::{decode_frame, FRAME_SIZE};
use tracing::debug;

use crate::error::{ChannelError, Result};
use crate::processor;
use crate::respond;
use crate::state::ChannelState;

/// Binds the channel's write and read entry points to the state machine.
///
/// The driver owns the channel state and the read cursor for the service's
/// lifetime. Cursor semantics: a successful write resets it to zero, each
/// read advances it by the bytes copied out, and a read at or past the end
/// of the current response reports EOF. A read strictly after a write
/// therefore observes that write's response exactly once, and any further
/// read without an intervening write drains to EOF.
#[derive(Debug, Default)]
pub struct ChannelDriver {
    state: ChannelState,
    cursor: usize,
}

impl ChannelDriver {
    /// Create a driver in the initial `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a write session: one exact-size command frame.
    ///
    /// Rejects any byte count other than [`FRAME_SIZE`] with
    /// [`ChannelError::FrameSizeMismatch`] — there is no partial-frame
    /// accumulation and no multi-frame write. On success the state machine
    /// transitions, the cursor resets, and the full frame size is returned.
    /// On any failure the state and cursor are left untouched.
    pub fn handle_write(&mut self, bytes: &[u8]) -> Result<usize> {
        if bytes.len() != FRAME_SIZE {
            return Err(ChannelError::FrameSizeMismatch {
                got: bytes.len(),
                expected: FRAME_SIZE,
            });
        }

        let mut buf = BytesMut::from(bytes);
        let frame = decode_frame(&mut buf)?;
        let next = processor::process(frame.as_ref())?;

        debug!(state = %next, "channel state transition");
        self.state = next;
        self.cursor = 0;
        Ok(FRAME_SIZE)
    }

    /// Handle a read: copy out up to `max_len` bytes of the current
    /// response, NUL terminator included, starting at the cursor.
    ///
    /// Returns the number of bytes copied, or `Ok(0)` once the response has
    /// been drained (EOF until the next write). A failed copy to `out` is
    /// [`ChannelError::CopyFailure`] and does not advance the cursor.
    pub fn handle_read<W: Write>(&mut self, out: &mut W, max_len: usize) -> Result<usize> {
        let response = respond::response_bytes(self.state);
        if self.cursor >= response.len() {
            return Ok(0);
        }

        let n = max_len.min(response.len() - self.cursor);
        out.write_all(&response[self.cursor..self.cursor + n])
            .map_err(ChannelError::CopyFailure)?;
        self.cursor += n;
        Ok(n)
    }

    /// The current channel state.
    pub fn state(&self) -> ChannelState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;
    use ctlchan_frame::{encode_frame, Command, Frame};

    use super::*;

    fn frame_bytes(code: i32, payload: &[u8]) -> Vec<u8> {
        let frame = Frame::new(Command::from_code(code), payload).unwrap();
        let mut buf = BytesMut::new();
        encode_frame(&frame, &mut buf).unwrap();
        buf.to_vec()
    }

    fn read_all(driver: &mut ChannelDriver) -> Vec<u8> {
        let mut out = Vec::new();
        while driver.handle_read(&mut out, 20).unwrap() > 0 {}
        out
    }

    #[test]
    fn monitor_write_then_read() {
        let mut driver = ChannelDriver::new();
        let written = driver.handle_write(&frame_bytes(1, b"command one")).unwrap();
        assert_eq!(written, FRAME_SIZE);
        assert_eq!(driver.state(), ChannelState::MonitorActive);
        assert_eq!(read_all(&mut driver), b"response 1\0");
    }

    #[test]
    fn unmonitor_write_then_read() {
        let mut driver = ChannelDriver::new();
        driver.handle_write(&frame_bytes(2, b"command two")).unwrap();
        assert_eq!(read_all(&mut driver), b"response 2\0");
    }

    #[test]
    fn unknown_code_reads_bad_request() {
        let mut driver = ChannelDriver::new();
        driver.handle_write(&frame_bytes(7, b"whatever")).unwrap();
        assert_eq!(driver.state(), ChannelState::Unknown);
        assert_eq!(read_all(&mut driver), b"bad request\0");
    }

    #[test]
    fn read_before_any_write_is_bad_request() {
        let mut driver = ChannelDriver::new();
        assert_eq!(read_all(&mut driver), b"bad request\0");
    }

    #[test]
    fn second_read_without_write_is_eof() {
        let mut driver = ChannelDriver::new();
        driver.handle_write(&frame_bytes(1, b"x")).unwrap();

        assert_eq!(read_all(&mut driver), b"response 1\0");
        let mut out = Vec::new();
        assert_eq!(driver.handle_read(&mut out, 20).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn write_resets_cursor_for_next_read() {
        let mut driver = ChannelDriver::new();
        driver.handle_write(&frame_bytes(1, b"x")).unwrap();
        let _ = read_all(&mut driver);

        driver.handle_write(&frame_bytes(2, b"y")).unwrap();
        assert_eq!(read_all(&mut driver), b"response 2\0");
    }

    #[test]
    fn short_buffer_reads_drain_in_pieces() {
        let mut driver = ChannelDriver::new();
        driver.handle_write(&frame_bytes(1, b"x")).unwrap();

        let mut out = Vec::new();
        assert_eq!(driver.handle_read(&mut out, 4).unwrap(), 4);
        assert_eq!(driver.handle_read(&mut out, 4).unwrap(), 4);
        assert_eq!(driver.handle_read(&mut out, 20).unwrap(), 3);
        assert_eq!(driver.handle_read(&mut out, 20).unwrap(), 0);
        assert_eq!(out, b"response 1\0");
    }

    #[test]
    fn size_mismatch_rejected_and_state_unchanged() {
        let mut driver = ChannelDriver::new();
        driver.handle_write(&frame_bytes(1, b"x")).unwrap();

        let short = vec![0u8; FRAME_SIZE - 1];
        let err = driver.handle_write(&short).unwrap_err();
        assert!(matches!(
            err,
            ChannelError::FrameSizeMismatch { got, expected }
                if got == FRAME_SIZE - 1 && expected == FRAME_SIZE
        ));

        let long = vec![0u8; FRAME_SIZE + 1];
        assert!(driver.handle_write(&long).is_err());

        // Follow-up read observes the previous state's response.
        assert_eq!(driver.state(), ChannelState::MonitorActive);
        assert_eq!(read_all(&mut driver), b"response 1\0");
    }

    #[test]
    fn failed_decode_leaves_state_unchanged() {
        let mut driver = ChannelDriver::new();
        driver.handle_write(&frame_bytes(2, b"x")).unwrap();

        // Exact-size frame with a corrupt length field.
        let mut bad = frame_bytes(1, b"x");
        bad[4..8].copy_from_slice(&0u32.to_le_bytes());
        let err = driver.handle_write(&bad).unwrap_err();
        assert!(matches!(err, ChannelError::Frame(_)));

        assert_eq!(driver.state(), ChannelState::UnmonitorActive);
        assert_eq!(read_all(&mut driver), b"response 2\0");
    }

    #[test]
    fn repeated_monitor_is_idempotent() {
        let mut driver = ChannelDriver::new();
        for _ in 0..5 {
            driver.handle_write(&frame_bytes(1, b"x")).unwrap();
            assert_eq!(driver.state(), ChannelState::MonitorActive);
            assert_eq!(read_all(&mut driver), b"response 1\0");
        }
    }

    #[test]
    fn copy_failure_does_not_advance_cursor() {
        struct FailingSink;
        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("sink refused bytes"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut driver = ChannelDriver::new();
        driver.handle_write(&frame_bytes(1, b"x")).unwrap();

        let err = driver.handle_read(&mut FailingSink, 20).unwrap_err();
        assert!(matches!(err, ChannelError::CopyFailure(_)));

        // The response is still fully available.
        assert_eq!(read_all(&mut driver), b"response 1\0");
    }
}
