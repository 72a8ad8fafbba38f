/// Why a room session reached `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The local user left.
    Local,
    /// The transport closed the room.
    Remote,
    /// The room never opened within the configured join timeout.
    JoinTimedOut,
}

/// Lifecycle of one room handle. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomState {
    Idle,
    Joining,
    Joined,
    Closed(CloseReason),
}

impl RoomState {
    pub fn is_joined(self) -> bool {
        matches!(self, RoomState::Joined)
    }

    pub fn is_closed(self) -> bool {
        matches!(self, RoomState::Closed(_))
    }

    /// Joining or joined: a room handle may be held.
    pub fn is_active(self) -> bool {
        matches!(self, RoomState::Joining | RoomState::Joined)
    }
}
