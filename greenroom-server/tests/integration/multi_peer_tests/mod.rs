mod test_multi_room_membership;
mod test_third_peer_sees_existing_members;
