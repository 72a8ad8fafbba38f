use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use futures::future::join_all;
use meshroom_core::{PeerId, RoomId};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info};

use crate::error::TransportError;
use crate::media::MediaStream;
use crate::room::RoomEvent;
use crate::transport::{MeshTransport, RoomHandle};

#[derive(Clone)]
struct Member {
    events: mpsc::Sender<RoomEvent>,
    stream: Arc<MediaStream>,
}

struct MeshInner {
    rooms: DashMap<RoomId, DashMap<PeerId, Member>>,
    acknowledge_joins: AtomicBool,
    refuse_joins: AtomicBool,
}

/// Queues `events` on `tx` in order without waiting for the receiver.
/// Whatever does not fit is handed to a task that waits for capacity.
fn deliver(tx: &mpsc::Sender<RoomEvent>, events: Vec<RoomEvent>) {
    let mut pending = events.into_iter();
    while let Some(event) = pending.next() {
        match tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                let tx = tx.clone();
                let rest: Vec<_> = std::iter::once(event).chain(pending).collect();
                debug!("Receiver is full, {} event(s) delivered later", rest.len());
                tokio::spawn(async move {
                    for event in rest {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                });
                return;
            }
            Err(TrySendError::Closed(_)) => return,
        }
    }
}

impl MeshInner {
    /// Snapshot of a room's members, so no map guard is held across `.await`.
    fn members(&self, room_id: &RoomId, except: Option<&PeerId>) -> Vec<(PeerId, Member)> {
        let Some(room) = self.rooms.get(room_id) else {
            return Vec::new();
        };
        room.iter()
            .filter(|entry| Some(entry.key()) != except)
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

/// In-process mesh: every participant sharing a `LoopbackMesh` and a room id
/// sees the others, with one ordered channel per receiver.
#[derive(Clone)]
pub struct LoopbackMesh {
    inner: Arc<MeshInner>,
}

impl Default for LoopbackMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopbackMesh {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MeshInner {
                rooms: DashMap::new(),
                acknowledge_joins: AtomicBool::new(true),
                refuse_joins: AtomicBool::new(false),
            }),
        }
    }

    /// When disabled, joins return a handle but the room never opens.
    pub fn set_acknowledge_joins(&self, acknowledge: bool) {
        self.inner
            .acknowledge_joins
            .store(acknowledge, Ordering::Release);
    }

    /// When enabled, joins fail at the transport boundary.
    pub fn set_refuse_joins(&self, refuse: bool) {
        self.inner.refuse_joins.store(refuse, Ordering::Release);
    }

    pub fn member_count(&self, room_id: &RoomId) -> usize {
        self.inner.rooms.get(room_id).map_or(0, |room| room.len())
    }
}

#[async_trait]
impl MeshTransport for LoopbackMesh {
    async fn join(
        &self,
        room_id: &RoomId,
        stream: Arc<MediaStream>,
        events: mpsc::Sender<RoomEvent>,
    ) -> Result<Box<dyn RoomHandle>, TransportError> {
        if self.inner.refuse_joins.load(Ordering::Acquire) {
            return Err(TransportError::Join(format!("room {} refused the join", room_id)));
        }

        let peer_id = PeerId::new();
        let acknowledged = self.inner.acknowledge_joins.load(Ordering::Acquire);
        let handle = LoopbackRoom {
            mesh: Arc::clone(&self.inner),
            room_id: room_id.clone(),
            peer_id: peer_id.clone(),
            events: events.clone(),
            registered: acknowledged,
            closed: AtomicBool::new(false),
        };

        if !acknowledged {
            debug!("Loopback join of {} to {} left pending", peer_id, room_id);
            return Ok(Box::new(handle));
        }

        let existing = self.inner.members(room_id, None);
        self.inner
            .rooms
            .entry(room_id.clone())
            .or_default()
            .insert(
                peer_id.clone(),
                Member {
                    events: events.clone(),
                    stream: Arc::clone(&stream),
                },
            );
        info!("Peer {} joined loopback room {}", peer_id, room_id);

        // The joiner only drains its events once this call returns, so
        // nothing here may wait on a receiver.
        let mut ours = vec![RoomEvent::Open];
        ours.extend(existing.iter().map(|(other_id, other)| {
            RoomEvent::Stream(Arc::new(other.stream.remote_view(other_id.clone())))
        }));
        deliver(&events, ours);

        for (_, other) in &existing {
            let view = Arc::new(stream.remote_view(peer_id.clone()));
            deliver(
                &other.events,
                vec![RoomEvent::PeerJoin(peer_id.clone()), RoomEvent::Stream(view)],
            );
        }

        Ok(Box::new(handle))
    }
}

pub struct LoopbackRoom {
    mesh: Arc<MeshInner>,
    room_id: RoomId,
    peer_id: PeerId,
    events: mpsc::Sender<RoomEvent>,
    /// Whether the join was acknowledged and the peer is visible to others.
    registered: bool,
    closed: AtomicBool,
}

#[async_trait]
impl RoomHandle for LoopbackRoom {
    fn peer_id(&self) -> &PeerId {
        &self.peer_id
    }

    async fn send(&self, payload: Bytes) -> Result<(), TransportError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(TransportError::Send("room is closed".into()));
        }

        let others = self.mesh.members(&self.room_id, Some(&self.peer_id));
        join_all(others.iter().map(|(_, member)| {
            member.events.send(RoomEvent::Data {
                src: self.peer_id.clone(),
                payload: payload.clone(),
            })
        }))
        .await;
        Ok(())
    }

    async fn replace_stream(&self, stream: Arc<MediaStream>) -> Result<(), TransportError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(TransportError::ReplaceStream("room is closed".into()));
        }

        if let Some(room) = self.mesh.rooms.get(&self.room_id) {
            if let Some(mut me) = room.get_mut(&self.peer_id) {
                me.stream = Arc::clone(&stream);
            }
        }

        let others = self.mesh.members(&self.room_id, Some(&self.peer_id));
        join_all(others.iter().map(|(_, member)| {
            let view = Arc::new(stream.remote_view(self.peer_id.clone()));
            member.events.send(RoomEvent::Stream(view))
        }))
        .await;
        Ok(())
    }

    async fn close(&self) -> Result<(), TransportError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        if !self.registered {
            debug!("Pending join of {} to {} abandoned", self.peer_id, self.room_id);
            let _ = self.events.try_send(RoomEvent::Close);
            return Ok(());
        }

        if let Some(room) = self.mesh.rooms.get(&self.room_id) {
            room.remove(&self.peer_id);
        }
        self.mesh
            .rooms
            .remove_if(&self.room_id, |_, members| members.is_empty());

        let others = self.mesh.members(&self.room_id, None);
        join_all(
            others
                .iter()
                .map(|(_, member)| member.events.send(RoomEvent::PeerLeave(self.peer_id.clone()))),
        )
        .await;

        // Our own session may be the caller and is not reading its events now.
        let _ = self.events.try_send(RoomEvent::Close);
        info!("Peer {} left loopback room {}", self.peer_id, self.room_id);
        Ok(())
    }
}
