pub mod analytics_tests;
pub mod loopback_tests;
pub mod participant_tests;
pub mod state_machine_tests;

use bytes::Bytes;
use meshroom_core::{ControlMessage, MediaKind, PeerId};
use meshroom_session::{
    LocalProfile, MediaStream, MediaTrack, RoomEvent, RoomSession, SessionConfig,
};
use std::sync::Arc;
use tracing::Level;

use crate::utils::{MockTransport, RecordingView};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn local_stream() -> Arc<MediaStream> {
    Arc::new(MediaStream::new(vec![
        MediaTrack::new(MediaKind::Audio, Some("mic1".into()), "mic"),
        MediaTrack::new(MediaKind::Video, Some("cam1".into()), "cam"),
    ]))
}

/// A stream as the transport would deliver it from `peer`.
pub fn stream_from(peer: &PeerId) -> RoomEvent {
    RoomEvent::Stream(Arc::new(local_stream().remote_view(peer.clone())))
}

pub fn data_from(peer: &PeerId, message: &ControlMessage) -> RoomEvent {
    RoomEvent::Data {
        src: peer.clone(),
        payload: message.encode().expect("encode control message"),
    }
}

pub fn raw_data_from(peer: &PeerId, payload: &'static str) -> RoomEvent {
    RoomEvent::Data {
        src: peer.clone(),
        payload: Bytes::from_static(payload.as_bytes()),
    }
}

/// A session already in `Joining` against a mock transport.
pub async fn create_joining_session(
    config: SessionConfig,
) -> (RoomSession, MockTransport, RecordingView) {
    let transport = MockTransport::new();
    let view = RecordingView::new();
    let mut session = RoomSession::new(&config, Arc::new(view.clone()));
    session
        .join(&transport, "R", local_stream())
        .await
        .expect("join should be accepted");
    (session, transport, view)
}

/// A session that received `Open`, with the announce already cleared.
pub async fn create_joined_session(
    profile: &mut LocalProfile,
) -> (RoomSession, MockTransport, RecordingView) {
    let (mut session, transport, view) =
        create_joining_session(SessionConfig::default()).await;
    session.handle_event(RoomEvent::Open, profile).await;
    transport.clear_sent().await;
    (session, transport, view)
}
