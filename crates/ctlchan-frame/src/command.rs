/// Wire code for the MONITOR command.
pub const MONITOR: i32 = 1;
/// Wire code for the UNMONITOR command.
pub const UNMONITOR: i32 = 2;

/// A control command carried by a frame.
///
/// Unrecognized codes decode structurally — they are preserved, not
/// rejected, and the service answers them with its bad-request response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Monitor,
    Unmonitor,
    Unknown(i32),
}

impl Command {
    /// The wire code for this command.
    pub fn code(&self) -> i32 {
        match self {
            Command::Monitor => MONITOR,
            Command::Unmonitor => UNMONITOR,
            Command::Unknown(code) => *code,
        }
    }

    /// Map a wire code to a command.
    pub fn from_code(code: i32) -> Self {
        match code {
            MONITOR => Command::Monitor,
            UNMONITOR => Command::Unmonitor,
            other => Command::Unknown(other),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Monitor => write!(f, "MONITOR"),
            Command::Unmonitor => write!(f, "UNMONITOR"),
            Command::Unknown(code) => write!(f, "UNKNOWN({code})"),
        }
    }
}
