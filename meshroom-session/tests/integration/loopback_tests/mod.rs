mod test_two_peers_sync;

use meshroom_core::PeerId;
use meshroom_session::{LoopbackMesh, NoopAnalytics, Participant, SessionConfig, VirtualDevices};
use std::sync::Arc;
use std::time::Duration;

use crate::utils::RecordingView;

pub fn create_peer(mesh: &LoopbackMesh, config: SessionConfig) -> (Participant, RecordingView) {
    let view = RecordingView::new();
    let participant = Participant::new(
        config,
        Arc::new(mesh.clone()),
        Arc::new(VirtualDevices::default_rig()),
        Arc::new(view.clone()),
        Arc::new(NoopAnalytics),
    );
    (participant, view)
}

/// Handles exactly `count` room events, failing the test if they stall.
pub async fn pump(participant: &mut Participant, count: usize) {
    for i in 0..count {
        tokio::time::timeout(
            Duration::from_secs(1),
            participant.process_next_room_event(),
        )
        .await
        .unwrap_or_else(|_| panic!("room event {} of {} never arrived", i + 1, count));
    }
}

pub fn peer_id_of(participant: &Participant) -> PeerId {
    participant
        .room()
        .and_then(|room| room.local_peer_id())
        .cloned()
        .expect("participant holds a room handle")
}
