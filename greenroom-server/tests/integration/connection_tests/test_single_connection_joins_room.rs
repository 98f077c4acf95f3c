use greenroom_core::RoomId;

use crate::integration::{create_relay, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_single_connection_joins_room() {
    init_tracing();

    let relay = create_relay();
    let mut alice = TestPeer::connect(&relay, "alice");

    let members = alice.join(&relay, "r1").await.expect("join failed");
    assert!(members.is_empty(), "first joiner sees an empty room");

    let room = RoomId::from("r1");
    assert!(relay.directory().contains(&room));
    assert_eq!(
        relay.directory().members_of(&room),
        vec![alice.connection_id]
    );

    // No presence events for a solo joiner.
    alice.expect_silence().await.expect("unexpected event");
}
