use async_trait::async_trait;
use bytes::Bytes;
use meshroom_core::{PeerId, RoomId};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::TransportError;
use crate::media::MediaStream;
use crate::room::RoomEvent;

/// Entry point of the peer-to-peer mesh library.
#[async_trait]
pub trait MeshTransport: Send + Sync {
    /// Joins `room_id` publishing `stream`. Room events, starting with
    /// `RoomEvent::Open` once the join is acknowledged, go to `events`.
    async fn join(
        &self,
        room_id: &RoomId,
        stream: Arc<MediaStream>,
        events: mpsc::Sender<RoomEvent>,
    ) -> Result<Box<dyn RoomHandle>, TransportError>;
}

/// A joined (or joining) mesh room.
#[async_trait]
pub trait RoomHandle: Send + Sync {
    /// Our own identifier in this room.
    fn peer_id(&self) -> &PeerId;

    /// Sends a payload to every other member over the data channel.
    async fn send(&self, payload: Bytes) -> Result<(), TransportError>;

    /// Swaps the stream published on every peer connection.
    async fn replace_stream(&self, stream: Arc<MediaStream>) -> Result<(), TransportError>;

    async fn close(&self) -> Result<(), TransportError>;
}
