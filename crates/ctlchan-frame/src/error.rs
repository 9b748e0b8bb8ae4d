/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload does not fit the frame's inline capacity.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The frame header carries a payload length outside `1..=capacity`.
    #[error("invalid payload length field ({len}, max {max})")]
    InvalidPayloadLength { len: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
