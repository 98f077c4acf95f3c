use dashmap::DashMap;
use greenroom_core::{ConnectionId, RoomId};
use std::collections::HashSet;
use tracing::info;

/// Maps each room to its current member set.
///
/// Operations on the same room are linearized by the map's per-shard
/// locking; independent rooms do not contend. A reverse index keeps
/// disconnect cleanup from scanning every room.
///
/// Invariant: a room with zero members never persists in the
/// directory, so memory is bounded by active sessions.
#[derive(Default)]
pub struct RoomDirectory {
    rooms: DashMap<RoomId, HashSet<ConnectionId>>,
    memberships: DashMap<ConnectionId, HashSet<RoomId>>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a room (creating the room if absent) and
    /// return a snapshot of who was already present.
    ///
    /// The snapshot and the insert happen under the room's entry
    /// guard, so a joiner can never miss a peer that was present at
    /// the moment of its join, and never observes itself.
    pub fn join(&self, room_id: &RoomId, connection_id: ConnectionId) -> Vec<ConnectionId> {
        let snapshot = {
            let mut members = self.rooms.entry(room_id.clone()).or_default();
            if members.is_empty() {
                info!(%room_id, "room created");
            }
            let snapshot: Vec<ConnectionId> = members
                .iter()
                .copied()
                .filter(|member| *member != connection_id)
                .collect();
            members.insert(connection_id);
            snapshot
        };

        self.memberships
            .entry(connection_id)
            .or_default()
            .insert(room_id.clone());

        snapshot
    }

    /// Remove a connection from a room, deleting the room when its
    /// member set becomes empty. Idempotent.
    pub fn leave(&self, room_id: &RoomId, connection_id: ConnectionId) {
        if let Some(mut rooms) = self.memberships.get_mut(&connection_id) {
            rooms.remove(room_id);
        }
        self.memberships
            .remove_if(&connection_id, |_, rooms| rooms.is_empty());

        self.remove_member(room_id, connection_id);
    }

    /// Remove a connection from every room it belongs to; used on
    /// disconnect. Returns the affected room identifiers so the
    /// caller can broadcast departure into each.
    pub fn leave_all(&self, connection_id: ConnectionId) -> Vec<RoomId> {
        let Some((_, rooms)) = self.memberships.remove(&connection_id) else {
            return Vec::new();
        };

        let mut affected = Vec::with_capacity(rooms.len());
        for room_id in rooms {
            self.remove_member(&room_id, connection_id);
            affected.push(room_id);
        }
        affected
    }

    /// Read-only membership snapshot used for broadcast fan-out.
    pub fn members_of(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.rooms
            .get(room_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_member(&self, room_id: &RoomId, connection_id: ConnectionId) -> bool {
        self.rooms
            .get(room_id)
            .is_some_and(|members| members.contains(&connection_id))
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn remove_member(&self, room_id: &RoomId, connection_id: ConnectionId) {
        let removed = self.rooms.remove_if_mut(room_id, |_, members| {
            members.remove(&connection_id);
            members.is_empty()
        });
        if removed.is_some() {
            info!(%room_id, "room emptied, deleted");
        }
    }
}
