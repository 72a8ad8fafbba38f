use bytes::Bytes;
use meshroom_core::PeerId;
use std::sync::Arc;

use crate::media::MediaStream;

/// Events a transport room handle delivers to its room session.
#[derive(Debug)]
pub enum RoomEvent {
    /// The transport acknowledged the join.
    Open,

    /// A remote peer joined after us.
    PeerJoin(PeerId),

    /// A remote peer left.
    PeerLeave(PeerId),

    /// A remote media stream arrived; tagged with its origin via `peer_id()`.
    Stream(Arc<MediaStream>),

    /// A data channel payload from `src`.
    Data { src: PeerId, payload: Bytes },

    /// The room was closed.
    Close,
}
