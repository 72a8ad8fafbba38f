use meshroom_core::{ControlMessage, EmotionLevel, PeerId, RoomId};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::media::MediaStream;
use crate::room::{CloseReason, LocalProfile, RoomEvent, RoomState, Roster};
use crate::transport::{MeshTransport, RoomHandle};
use crate::view::RoomView;

/// State machine of one room membership.
///
/// `Idle -> Joining -> Joined -> Closed`. A closed session is never reused;
/// joining again takes a fresh `RoomSession`.
pub struct RoomSession {
    state: RoomState,
    room_id: Option<RoomId>,

    /// Transport handle, held while `Joining` or `Joined`.
    handle: Option<Box<dyn RoomHandle>>,

    /// Events of the current handle. Dropped on close, which stops
    /// processing of anything the transport still delivers.
    events: Option<mpsc::Receiver<RoomEvent>>,

    roster: Roster,

    /// Peers that currently have a stream attached to the view.
    attached: HashSet<PeerId>,

    view: Arc<dyn RoomView>,
    join_timeout: Option<Duration>,
    join_deadline: Option<Instant>,
    reset_emotion_on_open: bool,
    event_buffer: usize,
}

impl RoomSession {
    pub fn new(config: &SessionConfig, view: Arc<dyn RoomView>) -> Self {
        Self {
            state: RoomState::Idle,
            room_id: None,
            handle: None,
            events: None,
            roster: Roster::new(),
            attached: HashSet::new(),
            view,
            join_timeout: config.join_timeout,
            join_deadline: None,
            reset_emotion_on_open: config.reset_emotion_on_open,
            event_buffer: config.event_buffer.max(1),
        }
    }

    pub fn state(&self) -> RoomState {
        self.state
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Our identifier in the room, once the transport assigned one.
    pub fn local_peer_id(&self) -> Option<&PeerId> {
        self.handle.as_ref().map(|h| h.peer_id())
    }

    pub fn is_attached(&self, peer_id: &PeerId) -> bool {
        self.attached.contains(peer_id)
    }

    /// When a pending join gives up, if a join timeout is configured.
    pub fn join_deadline(&self) -> Option<Instant> {
        match self.state {
            RoomState::Joining => self.join_deadline,
            _ => None,
        }
    }

    /// `Idle -> Joining`.
    ///
    /// A transport failure is only logged: the session stays in `Joining`
    /// and is not retried. Configure a join timeout to bound that wait.
    pub async fn join(
        &mut self,
        transport: &dyn MeshTransport,
        room_id: &str,
        stream: Arc<MediaStream>,
    ) -> Result<(), SessionError> {
        if self.state != RoomState::Idle {
            return Err(SessionError::NotIdle(self.state));
        }
        let room_id = RoomId::parse(room_id)?;

        let (events_tx, events_rx) = mpsc::channel(self.event_buffer);
        self.state = RoomState::Joining;
        self.room_id = Some(room_id.clone());
        self.events = Some(events_rx);
        self.join_deadline = self.join_timeout.map(|timeout| Instant::now() + timeout);

        info!("Joining room {}", room_id);
        match transport.join(&room_id, stream, events_tx).await {
            Ok(handle) => {
                debug!("Transport assigned {} in room {}", handle.peer_id(), room_id);
                self.handle = Some(handle);
            }
            Err(e) => error!("Join of room {} failed: {}", room_id, e),
        }
        Ok(())
    }

    /// Waits for the next transport event. Pends forever without a handle
    /// or once the transport dropped its sender.
    pub async fn next_event(&mut self) -> RoomEvent {
        if let Some(events) = self.events.as_mut() {
            if let Some(event) = events.recv().await {
                return event;
            }
            warn!("Room event channel closed by the transport");
            self.events = None;
        }
        std::future::pending().await
    }

    /// Single dispatch point for transport events.
    pub async fn handle_event(&mut self, event: RoomEvent, profile: &mut LocalProfile) {
        match (self.state, event) {
            (RoomState::Joining, RoomEvent::Open) => self.on_open(profile).await,

            (RoomState::Joined, RoomEvent::PeerJoin(peer_id)) => {
                info!("Peer {} joined", peer_id);
                self.roster.observe_peer_join(&peer_id);
                self.view.notice(&format!("{} joined", peer_id));
                self.announce(profile).await;
            }

            (RoomState::Joined, RoomEvent::Data { src, payload }) => {
                match ControlMessage::decode(&payload) {
                    Ok(Some(message)) => self.on_control(src, message),
                    Ok(None) => debug!("Ignoring unknown control event from {}", src),
                    Err(e) => warn!("Malformed control message from {}: {}", src, e),
                }
            }

            (RoomState::Joined, RoomEvent::Stream(stream)) => self.on_stream(stream),

            (RoomState::Joined, RoomEvent::PeerLeave(peer_id)) => {
                info!("Peer {} left", peer_id);
                self.roster.remove(&peer_id);
                if self.attached.remove(&peer_id) {
                    self.view.detach(&peer_id);
                }
                self.view.notice(&format!("{} left", peer_id));
            }

            (RoomState::Joining | RoomState::Joined, RoomEvent::Close) => {
                self.finish_close(CloseReason::Remote);
            }

            (state, event) => debug!("Ignoring {:?} while {:?}", event, state),
        }
    }

    async fn on_open(&mut self, profile: &mut LocalProfile) {
        self.state = RoomState::Joined;
        self.join_deadline = None;
        if self.reset_emotion_on_open {
            profile.emotion = EmotionLevel::NEUTRAL;
        }

        if let Some(room_id) = &self.room_id {
            info!("Joined room {}", room_id);
            self.view.notice(&format!("You joined {}", room_id));
        }
        self.view.show_local(&profile.display_name, profile.emotion);
        self.announce(profile).await;
    }

    fn on_control(&mut self, src: PeerId, message: ControlMessage) {
        match message {
            ControlMessage::Name(name) => {
                self.roster.apply_name_message(&src, &name);
                if self.attached.contains(&src) {
                    self.view.rename(&src, &name);
                }
            }
            // Remote emotion is display-only; the roster keeps names alone.
            ControlMessage::Emotion(level) => self.view.show_emotion(&src, level),
        }
    }

    fn on_stream(&mut self, stream: Arc<MediaStream>) {
        let Some(peer_id) = stream.peer_id().cloned() else {
            warn!("Remote stream {} carries no peer id", stream.id());
            return;
        };
        let label = self.roster.label_for(&peer_id).to_owned();
        self.attached.insert(peer_id.clone());
        self.view.attach(&peer_id, &stream, &label);
    }

    /// Sends our name and emotion, in that order.
    pub async fn announce(&self, profile: &LocalProfile) {
        self.broadcast(&profile.name_message()).await;
        self.broadcast(&profile.emotion_message()).await;
    }

    /// Sends `message` to every peer. Returns whether it went out.
    ///
    /// Outside `Joined` the message is dropped silently: it is neither an
    /// error nor queued for later.
    pub async fn broadcast(&self, message: &ControlMessage) -> bool {
        let (RoomState::Joined, Some(handle)) = (self.state, &self.handle) else {
            debug!("Dropping {} message while {:?}", message.event(), self.state);
            return false;
        };

        let payload = match message.encode() {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to encode {} message: {}", message.event(), e);
                return false;
            }
        };

        match handle.send(payload).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to send {} message: {}", message.event(), e);
                false
            }
        }
    }

    /// Publishes a new local stream on every peer connection.
    pub async fn replace_stream(&self, stream: Arc<MediaStream>) {
        let Some(handle) = &self.handle else {
            return;
        };
        if let Err(e) = handle.replace_stream(stream).await {
            warn!("Failed to replace outgoing stream: {}", e);
        }
    }

    /// Local leave request. No-op unless joining or joined.
    pub async fn leave(&mut self) {
        if !self.state.is_active() {
            debug!("Leave ignored while {:?}", self.state);
            return;
        }
        if let Some(handle) = &self.handle {
            if let Err(e) = handle.close().await {
                warn!("Transport close failed: {}", e);
            }
        }
        self.finish_close(CloseReason::Local);
    }

    /// Gives up on a join the transport never acknowledged.
    pub async fn expire_join(&mut self) -> bool {
        if self.state != RoomState::Joining {
            return false;
        }
        if let Some(handle) = &self.handle {
            if let Err(e) = handle.close().await {
                warn!("Transport close failed: {}", e);
            }
        }
        if let Some(room_id) = &self.room_id {
            error!("{} ({})", SessionError::JoinTimedOut, room_id);
        }
        self.view.notice(&SessionError::JoinTimedOut.to_string());
        self.finish_close(CloseReason::JoinTimedOut);
        true
    }

    fn finish_close(&mut self, reason: CloseReason) {
        if self.state.is_closed() {
            return;
        }
        self.state = RoomState::Closed(reason);

        for peer_id in self.attached.drain() {
            self.view.detach(&peer_id);
        }
        self.roster.clear();
        self.handle = None;
        self.events = None;
        self.join_deadline = None;

        info!("Room session closed ({:?})", reason);
        if reason != CloseReason::JoinTimedOut {
            self.view.notice("You left");
        }
    }
}
