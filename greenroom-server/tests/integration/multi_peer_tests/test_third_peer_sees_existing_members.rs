use greenroom_core::RoomMember;

use crate::integration::{create_relay, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_third_peer_sees_existing_members() {
    init_tracing();

    let relay = create_relay();

    let mut alice = TestPeer::connect(&relay, "alice");
    let mut bob = TestPeer::connect(&relay, "bob");
    let mut carol = TestPeer::connect(&relay, "carol");

    alice.join(&relay, "r1").await.expect("alice join failed");
    bob.join(&relay, "r1").await.expect("bob join failed");
    alice
        .expect_user_joined(&bob)
        .await
        .expect("alice should see bob join");

    let mut members = carol.join(&relay, "r1").await.expect("carol join failed");
    members.sort_by(|a, b| a.user_id.0.cmp(&b.user_id.0));
    assert_eq!(
        members,
        vec![
            RoomMember {
                user_id: alice.user_id.clone(),
                connection_id: alice.connection_id,
            },
            RoomMember {
                user_id: bob.user_id.clone(),
                connection_id: bob.connection_id,
            },
        ],
        "carol must see exactly the membership prior to her join"
    );

    alice
        .expect_user_joined(&carol)
        .await
        .expect("alice should see carol join");
    bob.expect_user_joined(&carol)
        .await
        .expect("bob should see carol join");

    alice
        .expect_silence()
        .await
        .expect("exactly one user-joined per new member");
    bob.expect_silence()
        .await
        .expect("exactly one user-joined per new member");
    carol
        .expect_silence()
        .await
        .expect("the joiner never gets a user-joined for itself");
}
