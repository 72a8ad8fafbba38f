use meshroom_core::{ControlMessage, EmotionLevel};
use meshroom_session::{LocalProfile, RoomSession, SessionConfig};
use std::sync::Arc;

use crate::integration::{create_joined_session, create_joining_session, init_tracing};
use crate::utils::RecordingView;

#[tokio::test]
async fn test_broadcast_is_dropped_while_idle() {
    init_tracing();

    let session = RoomSession::new(&SessionConfig::default(), Arc::new(RecordingView::new()));

    let sent = session
        .broadcast(&ControlMessage::Emotion(EmotionLevel::MAX))
        .await;

    assert!(!sent);
}

#[tokio::test]
async fn test_broadcast_is_dropped_while_joining() {
    init_tracing();

    let (session, transport, _view) = create_joining_session(SessionConfig::default()).await;

    let sent = session.broadcast(&ControlMessage::Name("Alice".into())).await;

    assert!(!sent);
    assert!(transport.sent().await.is_empty());
}

#[tokio::test]
async fn test_broadcast_is_dropped_after_close() {
    init_tracing();

    let mut profile = LocalProfile::new("Alice");
    let (mut session, transport, _view) = create_joined_session(&mut profile).await;
    assert!(
        session
            .broadcast(&ControlMessage::Emotion(EmotionLevel::MIN))
            .await
    );

    session.leave().await;
    let sent = session
        .broadcast(&ControlMessage::Emotion(EmotionLevel::MAX))
        .await;

    assert!(!sent);
    assert_eq!(
        transport.sent().await,
        vec![ControlMessage::Emotion(EmotionLevel::MIN)]
    );
}
