use meshroom_core::{CoreError, MediaKind};
use thiserror::Error;

use crate::room::RoomState;

/// Capture acquisition failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceError {
    #[error("no {kind} device matches {device_id:?}")]
    NotFound {
        kind: MediaKind,
        device_id: Option<String>,
    },

    #[error("permission to capture media was denied")]
    PermissionDenied,

    #[error("constraints cannot be satisfied: {0}")]
    Unsatisfiable(String),
}

/// Failures at the mesh transport boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("failed to join room: {0}")]
    Join(String),

    #[error("failed to send on data channel: {0}")]
    Send(String),

    #[error("failed to close room: {0}")]
    Close(String),

    #[error("failed to replace outgoing stream: {0}")]
    ReplaceStream(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid room id")]
    InvalidRoomId,

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("control message error: {0}")]
    Control(CoreError),

    #[error("room session is {0:?}, expected Idle")]
    NotIdle(RoomState),

    #[error("already in a room ({0:?})")]
    AlreadyInRoom(RoomState),

    #[error("no local stream has been acquired")]
    NoLocalStream,

    #[error("room did not open within the join timeout")]
    JoinTimedOut,
}

impl From<CoreError> for SessionError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidRoomId => SessionError::InvalidRoomId,
            other => SessionError::Control(other),
        }
    }
}
