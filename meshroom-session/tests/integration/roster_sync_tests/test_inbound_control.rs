use meshroom_core::utils::PLACEHOLDER_NAME;
use meshroom_core::{ControlMessage, EmotionLevel, PeerId};
use meshroom_session::LocalProfile;

use crate::integration::{create_joined_session, data_from, init_tracing, raw_data_from, stream_from};

#[tokio::test]
async fn test_name_before_peer_join_is_kept() {
    init_tracing();

    let mut profile = LocalProfile::new("Alice");
    let (mut session, _transport, _view) = create_joined_session(&mut profile).await;
    let bob = PeerId::from("bob");

    session
        .handle_event(data_from(&bob, &ControlMessage::Name("Bob".into())), &mut profile)
        .await;
    session
        .handle_event(meshroom_session::RoomEvent::PeerJoin(bob.clone()), &mut profile)
        .await;

    assert_eq!(session.roster().len(), 1);
    assert_eq!(session.roster().name_of(&bob), Some("Bob"));
}

#[tokio::test]
async fn test_stream_is_captioned_with_placeholder_then_renamed() {
    init_tracing();

    let mut profile = LocalProfile::new("Alice");
    let (mut session, _transport, view) = create_joined_session(&mut profile).await;
    let bob = PeerId::from("bob");

    session.handle_event(stream_from(&bob), &mut profile).await;
    assert_eq!(view.attached_label(&bob).as_deref(), Some(PLACEHOLDER_NAME));
    assert!(session.is_attached(&bob));

    session
        .handle_event(data_from(&bob, &ControlMessage::Name("Bob".into())), &mut profile)
        .await;
    session
        .handle_event(data_from(&bob, &ControlMessage::Name("Robert".into())), &mut profile)
        .await;

    assert_eq!(view.renames_of(&bob), vec!["Bob", "Robert"]);
    assert_eq!(session.roster().name_of(&bob), Some("Robert"));
}

#[tokio::test]
async fn test_stream_after_name_uses_known_name() {
    init_tracing();

    let mut profile = LocalProfile::new("Alice");
    let (mut session, _transport, view) = create_joined_session(&mut profile).await;
    let bob = PeerId::from("bob");

    session
        .handle_event(data_from(&bob, &ControlMessage::Name("Bob".into())), &mut profile)
        .await;
    session.handle_event(stream_from(&bob), &mut profile).await;

    assert!(view.renames_of(&bob).is_empty());
    assert_eq!(view.attached_label(&bob).as_deref(), Some("Bob"));
}

#[tokio::test]
async fn test_emotion_only_reaches_the_view() {
    init_tracing();

    let mut profile = LocalProfile::new("Alice");
    let (mut session, transport, view) = create_joined_session(&mut profile).await;
    let bob = PeerId::from("bob");

    session
        .handle_event(data_from(&bob, &ControlMessage::Emotion(EmotionLevel::MAX)), &mut profile)
        .await;

    assert_eq!(view.last_emotion_of(&bob), Some(EmotionLevel::MAX));
    assert!(session.roster().is_empty());
    assert_eq!(profile.emotion, EmotionLevel::NEUTRAL);
    assert!(transport.sent().await.is_empty());
}

#[tokio::test]
async fn test_unknown_and_malformed_payloads_are_ignored() {
    init_tracing();

    let mut profile = LocalProfile::new("Alice");
    let (mut session, _transport, view) = create_joined_session(&mut profile).await;
    let bob = PeerId::from("bob");
    let before = view.events().len();

    for payload in [
        r#"{"event":"wave","data":1}"#,
        r#"{"event":"emotion","data":9}"#,
        r#"{"event":"name","data":42}"#,
        "not json",
    ] {
        session
            .handle_event(raw_data_from(&bob, payload), &mut profile)
            .await;
    }

    assert!(session.state().is_joined());
    assert!(session.roster().is_empty());
    assert_eq!(view.events().len(), before);
}
