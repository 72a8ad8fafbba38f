
use meshroom_session::{Participant, RoomEvent, SessionConfig, VirtualDevices};
use std::sync::Arc;

use crate::utils::{MockTransport, RecordingAnalytics, RecordingView};

pub struct Harness {
    pub participant: Participant,
    pub transport: MockTransport,
    pub view: RecordingView,
    pub analytics: RecordingAnalytics,
    pub devices: Arc<VirtualDevices>,
}

impl Harness {
    /// Joins room "R" and lets the mock transport open it.
    pub async fn join_and_open(&mut self) {
        self.participant.join("R").await.expect("join accepted");
        self.transport.emit(RoomEvent::Open).await;
        self.participant.process_next_room_event().await;
        self.transport.clear_sent().await;
    }
}

/// A started participant named Alice, not in any room yet.
pub async fn create_participant() -> Harness {
    let transport = MockTransport::new();
    let view = RecordingView::new();
    let analytics = RecordingAnalytics::new();
    let devices = Arc::new(VirtualDevices::default_rig());

    let mut participant = Participant::new(
        SessionConfig::default().with_display_name("Alice"),
        Arc::new(transport.clone()),
        devices.clone(),
        Arc::new(view.clone()),
        Arc::new(analytics.clone()),
    );
    participant.start().await.expect("virtual capture opens");

    Harness {
        participant,
        transport,
        view,
        analytics,
        devices,
    }
}
