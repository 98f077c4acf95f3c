use greenroom_core::{RoomId, ServerEvent};

use crate::integration::{create_relay, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_offer_answer_exchange() {
    init_tracing();

    let relay = create_relay();

    let mut alice = TestPeer::connect(&relay, "alice");
    let mut bob = TestPeer::connect(&relay, "bob");

    alice.join(&relay, "r1").await.expect("alice join failed");
    bob.join(&relay, "r1").await.expect("bob join failed");
    alice.drain();

    alice.send_offer(&relay, "r1", bob.connection_id);
    match bob.recv().await.expect("bob expected an offer") {
        ServerEvent::Offer {
            offer,
            sender_connection_id,
        } => {
            assert_eq!(sender_connection_id, alice.connection_id);
            assert_eq!(offer["type"], "offer");
        }
        other => panic!("expected offer, got {other:?}"),
    }

    bob.send_answer(&relay, "r1", alice.connection_id);
    match alice.recv().await.expect("alice expected an answer") {
        ServerEvent::Answer {
            answer,
            sender_connection_id,
        } => {
            assert_eq!(sender_connection_id, bob.connection_id);
            assert_eq!(answer["type"], "answer");
        }
        other => panic!("expected answer, got {other:?}"),
    }

    // Completes the negotiation scenario: A departs, B is told, the
    // room disappears.
    alice.disconnect(&relay);
    bob.expect_user_left(&alice.user_id)
        .await
        .expect("bob should see alice leave");
    bob.disconnect(&relay);
    assert!(!relay.directory().contains(&RoomId::from("r1")));
}
