use crate::state::ChannelState;

/// Response after a MONITOR command.
pub const RESPONSE_MONITOR: &str = "response 1";
/// Response after an UNMONITOR command.
pub const RESPONSE_UNMONITOR: &str = "response 2";
/// Response while idle or after an unrecognized command.
pub const RESPONSE_BAD_REQUEST: &str = "bad request";

/// The response literal for a channel state.
///
/// Total and deterministic; recomputed on every read, never stored.
pub fn response_str(state: ChannelState) -> &'static str {
    match state {
        ChannelState::MonitorActive => RESPONSE_MONITOR,
        ChannelState::UnmonitorActive => RESPONSE_UNMONITOR,
        ChannelState::Idle | ChannelState::Unknown => RESPONSE_BAD_REQUEST,
    }
}

/// The response bytes for a channel state, NUL terminator included.
///
/// The terminator counts toward the byte total reported to the driver, so a
/// reader always receives a terminated string.
pub fn response_bytes(state: ChannelState) -> &'static [u8] {
    match state {
        ChannelState::MonitorActive => b"response 1\0",
        ChannelState::UnmonitorActive => b"response 2\0",
        ChannelState::Idle | ChannelState::Unknown => b"bad request\0",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_total() {
        assert_eq!(response_str(ChannelState::MonitorActive), "response 1");
        assert_eq!(response_str(ChannelState::UnmonitorActive), "response 2");
        assert_eq!(response_str(ChannelState::Idle), "bad request");
        assert_eq!(response_str(ChannelState::Unknown), "bad request");
    }

    #[test]
    fn bytes_include_terminator() {
        for state in [
            ChannelState::Idle,
            ChannelState::MonitorActive,
            ChannelState::UnmonitorActive,
            ChannelState::Unknown,
        ] {
            let bytes = response_bytes(state);
            assert_eq!(bytes.len(), response_str(state).len() + 1);
            assert_eq!(*bytes.last().unwrap(), 0);
            assert_eq!(&bytes[..bytes.len() - 1], response_str(state).as_bytes());
        }
    }
}
