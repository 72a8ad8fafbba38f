use meshroom_core::utils::PLACEHOLDER_NAME;
use meshroom_core::{EmotionDelta, EmotionLevel, MediaKind, RoomId};
use meshroom_session::{LoopbackMesh, SessionConfig};

use super::{create_peer, peer_id_of, pump};
use crate::integration::init_tracing;

#[tokio::test]
async fn test_two_peers_learn_each_others_names() {
    init_tracing();

    let mesh = LoopbackMesh::new();
    let room = RoomId::parse("R").unwrap();
    let (mut alice, alice_view) = create_peer(&mesh, SessionConfig::default().with_display_name("Alice"));
    let (mut bob, bob_view) = create_peer(&mesh, SessionConfig::default().with_display_name("Bob"));

    alice.start().await.unwrap();
    alice.join("R").await.unwrap();
    pump(&mut alice, 1).await;
    assert!(alice.room_state().is_joined());

    bob.start().await.unwrap();
    bob.join("R").await.unwrap();
    assert_eq!(mesh.member_count(&room), 2);
    let alice_id = peer_id_of(&alice);
    let bob_id = peer_id_of(&bob);

    // Bob: Open, Alice's stream.
    pump(&mut bob, 2).await;
    assert_eq!(
        bob_view.attached_label(&alice_id).as_deref(),
        Some(PLACEHOLDER_NAME)
    );

    // Alice: PeerJoin, Bob's stream, Bob's name, Bob's emotion.
    pump(&mut alice, 4).await;
    let alice_roster = alice.room().unwrap().roster();
    assert_eq!(alice_roster.name_of(&bob_id), Some("Bob"));
    assert_eq!(alice_view.renames_of(&bob_id), vec!["Bob"]);
    assert_eq!(
        alice_view.last_emotion_of(&bob_id),
        Some(EmotionLevel::NEUTRAL)
    );

    // Bob: Alice's answer to the join.
    pump(&mut bob, 2).await;
    assert_eq!(bob.room().unwrap().roster().name_of(&alice_id), Some("Alice"));
    assert_eq!(bob_view.renames_of(&alice_id), vec!["Alice"]);
}

#[tokio::test]
async fn test_emotion_change_and_leave_propagate() {
    init_tracing();

    let mesh = LoopbackMesh::new();
    let (mut alice, _alice_view) = create_peer(&mesh, SessionConfig::default().with_display_name("Alice"));
    let (mut bob, bob_view) = create_peer(&mesh, SessionConfig::default().with_display_name("Bob"));

    alice.start().await.unwrap();
    alice.join("R").await.unwrap();
    pump(&mut alice, 1).await;
    bob.start().await.unwrap();
    bob.join("R").await.unwrap();
    pump(&mut bob, 2).await;
    pump(&mut alice, 4).await;
    pump(&mut bob, 2).await;
    let alice_id = peer_id_of(&alice);

    alice.shift_emotion(EmotionDelta::Closer).await;
    pump(&mut bob, 1).await;
    assert_eq!(
        bob_view.last_emotion_of(&alice_id),
        EmotionLevel::new(3).ok()
    );

    alice.leave().await;
    pump(&mut bob, 1).await;

    assert!(!bob.room().unwrap().roster().contains(&alice_id));
    assert_eq!(bob_view.detach_count(&alice_id), 1);
    assert_eq!(mesh.member_count(&RoomId::parse("R").unwrap()), 1);
}

#[tokio::test]
async fn test_device_switch_reaches_remote_peer() {
    init_tracing();

    let mesh = LoopbackMesh::new();
    let (mut alice, _alice_view) = create_peer(&mesh, SessionConfig::default().with_display_name("Alice"));
    let (mut bob, bob_view) = create_peer(&mesh, SessionConfig::default().with_display_name("Bob"));

    alice.start().await.unwrap();
    alice.join("R").await.unwrap();
    pump(&mut alice, 1).await;
    bob.start().await.unwrap();
    bob.join("R").await.unwrap();
    pump(&mut bob, 2).await;
    let alice_id = peer_id_of(&alice);

    alice.set_enabled(MediaKind::Audio, false);
    alice.select_device(MediaKind::Video, "cam2");
    assert!(alice.finish_device_switch().await);
    pump(&mut bob, 1).await;

    assert_eq!(bob_view.attach_count(&alice_id), 2);
    let shown = bob_view
        .events()
        .into_iter()
        .rev()
        .find_map(|e| match e {
            crate::utils::ViewEvent::Attach { stream_id, .. } => Some(stream_id),
            _ => None,
        })
        .unwrap();
    assert_eq!(shown, alice.local().stream().unwrap().id());
}

#[tokio::test]
async fn test_unacknowledged_join_stays_joining() {
    init_tracing();

    let mesh = LoopbackMesh::new();
    mesh.set_acknowledge_joins(false);
    let (mut alice, _view) = create_peer(&mesh, SessionConfig::default());

    alice.start().await.unwrap();
    alice.join("R").await.unwrap();

    let waited = tokio::time::timeout(
        std::time::Duration::from_millis(50),
        alice.process_next_room_event(),
    )
    .await;
    assert!(waited.is_err());
    assert_eq!(alice.room_state(), meshroom_session::RoomState::Joining);
}

#[tokio::test]
async fn test_abandoned_join_is_invisible_to_members() {
    init_tracing();

    let mesh = LoopbackMesh::new();
    let room = RoomId::parse("R").unwrap();
    let (mut alice, alice_view) = create_peer(&mesh, SessionConfig::default().with_display_name("Alice"));
    let (mut bob, _bob_view) = create_peer(&mesh, SessionConfig::default().with_display_name("Bob"));

    alice.start().await.unwrap();
    alice.join("R").await.unwrap();
    pump(&mut alice, 1).await;

    mesh.set_acknowledge_joins(false);
    bob.start().await.unwrap();
    bob.join("R").await.unwrap();
    bob.leave().await;

    let waited = tokio::time::timeout(
        std::time::Duration::from_millis(50),
        alice.process_next_room_event(),
    )
    .await;
    assert!(waited.is_err());
    assert_eq!(mesh.member_count(&room), 1);
    assert!(!alice_view.notices().iter().any(|n| n.ends_with(" left")));
}
