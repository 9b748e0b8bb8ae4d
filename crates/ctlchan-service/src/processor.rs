use ctlchan_frame::{Command, Frame};
use tracing::{debug, info, warn};

use crate::error::{ChannelError, Result};
use crate::state::ChannelState;

/// Longest payload slice echoed into logs. Payload bytes are untrusted
/// client input and are never interpreted beyond this bounded preview.
const LOG_PREVIEW_LEN: usize = 32;

/// The pure transition function of the channel state machine.
///
/// `None` means no frame was available to process and fails with
/// [`ChannelError::NullMessage`]. Transitions are unconditional on the
/// current state: every successfully decoded frame produces a new state.
pub fn process(frame: Option<&Frame>) -> Result<ChannelState> {
    let frame = frame.ok_or(ChannelError::NullMessage)?;

    debug!(
        command = frame.command.code(),
        payload_length = frame.payload_length(),
        payload = %payload_preview(&frame.payload),
        "frame decoded"
    );

    let next = match frame.command {
        Command::Monitor => {
            info!("received MONITOR command");
            ChannelState::MonitorActive
        }
        Command::Unmonitor => {
            info!("received UNMONITOR command");
            ChannelState::UnmonitorActive
        }
        Command::Unknown(code) => {
            warn!(code, "received unknown command");
            ChannelState::Unknown
        }
    };

    Ok(next)
}

fn payload_preview(payload: &[u8]) -> String {
    let bounded = &payload[..payload.len().min(LOG_PREVIEW_LEN)];
    let text = String::from_utf8_lossy(bounded);
    if payload.len() > LOG_PREVIEW_LEN {
        format!("{text}…(+{} bytes)", payload.len() - LOG_PREVIEW_LEN)
    } else {
        text.into_owned()
    }
}
