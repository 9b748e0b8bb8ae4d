/// The channel's control state.
///
/// Exactly one instance exists for the lifetime of the service, owned by the
/// [`ChannelDriver`](crate::ChannelDriver). It always reflects the outcome
/// of the most recently successfully decoded frame; a failed decode never
/// mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelState {
    /// No command has been decoded yet.
    #[default]
    Idle,
    /// The last decoded command was MONITOR.
    MonitorActive,
    /// The last decoded command was UNMONITOR.
    UnmonitorActive,
    /// The last decoded command carried an unrecognized code.
    Unknown,
}

impl std::fmt::Display for ChannelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChannelState::Idle => "idle",
            ChannelState::MonitorActive => "monitor-active",
            ChannelState::UnmonitorActive => "unmonitor-active",
            ChannelState::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
