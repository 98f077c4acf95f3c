use greenroom_core::RoomId;

use crate::integration::{create_relay, init_tracing};
use crate::utils::TestPeer;

// A connection may belong to several rooms at once; disconnect must
// announce the departure into every one of them.
#[tokio::test]
async fn test_multi_room_membership() {
    init_tracing();

    let relay = create_relay();

    let mut alice = TestPeer::connect(&relay, "alice");
    let mut bob = TestPeer::connect(&relay, "bob");
    let mut carol = TestPeer::connect(&relay, "carol");

    bob.join(&relay, "r1").await.expect("bob join failed");
    carol.join(&relay, "r2").await.expect("carol join failed");

    alice.join(&relay, "r1").await.expect("alice join r1 failed");
    let members = alice.join(&relay, "r2").await.expect("alice join r2 failed");
    assert_eq!(members.len(), 1, "second join sees the other room's members");
    bob.drain();
    carol.drain();

    alice.disconnect(&relay);

    bob.expect_user_left(&alice.user_id)
        .await
        .expect("r1 must hear the departure");
    carol
        .expect_user_left(&alice.user_id)
        .await
        .expect("r2 must hear the departure");

    assert!(relay.directory().contains(&RoomId::from("r1")));
    assert!(relay.directory().contains(&RoomId::from("r2")));
    assert!(!relay
        .directory()
        .is_member(&RoomId::from("r1"), alice.connection_id));
}
