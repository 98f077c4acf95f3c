use crate::error::ProtocolError;
use crate::registry::ConnectionRegistry;
use crate::rooms::RoomDirectory;
use greenroom_core::{ClientEvent, ConnectionId, RoomId, RoomMember, ServerEvent, UserId};
use std::sync::Arc;
use tracing::{debug, info, warn};

struct RelayInner {
    registry: ConnectionRegistry,
    directory: RoomDirectory,
}

/// The protocol layer on top of the Connection Registry and Room
/// Directory. Holds no state of its own: it maps inbound events to
/// directory mutations and outbound deliveries.
///
/// Each instance owns its registry and directory, so tests can run
/// isolated relays side by side. Cloning is cheap and shares the
/// instance.
#[derive(Clone)]
pub struct SignalingRelay {
    inner: Arc<RelayInner>,
}

impl Default for SignalingRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalingRelay {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RelayInner {
                registry: ConnectionRegistry::new(),
                directory: RoomDirectory::new(),
            }),
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.inner.registry
    }

    pub fn directory(&self) -> &RoomDirectory {
        &self.inner.directory
    }

    pub fn handle_event(&self, sender: ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::JoinRoom { room_id, user_id } => {
                self.handle_join(sender, room_id, user_id);
            }
            ClientEvent::Offer {
                offer,
                room_id,
                target_connection_id,
            } => {
                self.relay_directed(
                    sender,
                    &room_id,
                    target_connection_id,
                    ServerEvent::Offer {
                        offer,
                        sender_connection_id: sender,
                    },
                );
            }
            ClientEvent::Answer {
                answer,
                room_id,
                target_connection_id,
            } => {
                self.relay_directed(
                    sender,
                    &room_id,
                    target_connection_id,
                    ServerEvent::Answer {
                        answer,
                        sender_connection_id: sender,
                    },
                );
            }
            ClientEvent::IceCandidate {
                candidate,
                room_id,
                target_connection_id,
            } => {
                self.relay_directed(
                    sender,
                    &room_id,
                    target_connection_id,
                    ServerEvent::IceCandidate {
                        candidate,
                        sender_connection_id: sender,
                    },
                );
            }
            ClientEvent::CodeChange {
                room_id,
                code,
                language,
            } => {
                self.broadcast_from(sender, &room_id, ServerEvent::CodeChange { code, language });
            }
        }
    }

    /// Run the disconnect transition: retire the connection, remove
    /// it from every room, and announce the departure to each room's
    /// remaining members.
    ///
    /// Cleanup never writes to the departing connection, so it
    /// completes even when that transport is already unusable.
    pub fn handle_disconnect(&self, connection_id: ConnectionId) {
        let user_id = self.inner.registry.user_id(connection_id);
        self.inner.registry.retire(connection_id);

        let affected = self.inner.directory.leave_all(connection_id);
        if affected.is_empty() {
            return;
        }

        // A connection only has rooms after a join, which records the
        // user id first.
        let Some(user_id) = user_id else {
            warn!(%connection_id, "rooms affected by disconnect of unidentified connection");
            return;
        };

        info!(%connection_id, %user_id, rooms = affected.len(), "connection departed");
        for room_id in affected {
            let departure = ServerEvent::UserLeft {
                user_id: user_id.clone(),
            };
            for member in self.inner.directory.members_of(&room_id) {
                if self.inner.registry.send(member, departure.clone()).is_err() {
                    debug!(%room_id, %member, "departure notification dropped");
                }
            }
        }
    }

    /// Report a protocol violation to the offending sender. Relay
    /// state is untouched; a failed report means the sender is gone,
    /// which the disconnect transition resolves.
    pub fn reject(&self, sender: ConnectionId, error: ProtocolError) {
        warn!(%sender, %error, "protocol error");
        let _ = self.inner.registry.send(
            sender,
            ServerEvent::Error {
                message: error.to_string(),
            },
        );
    }

    fn handle_join(&self, sender: ConnectionId, room_id: RoomId, user_id: UserId) {
        self.inner.registry.identify(sender, user_id.clone());

        let prior = self.inner.directory.join(&room_id, sender);
        info!(%room_id, %sender, %user_id, peers = prior.len(), "joined room");

        // A prior member may retire between the snapshot and this
        // lookup; it is omitted from the list and its departure event
        // follows separately.
        let members: Vec<RoomMember> = prior
            .iter()
            .filter_map(|&connection_id| {
                self.inner
                    .registry
                    .user_id(connection_id)
                    .map(|user_id| RoomMember {
                        user_id,
                        connection_id,
                    })
            })
            .collect();

        if self
            .inner
            .registry
            .send(
                sender,
                ServerEvent::RoomJoined {
                    connection_id: sender,
                    members,
                },
            )
            .is_err()
        {
            debug!(%room_id, %sender, "joiner gone before member list delivery");
        }

        let announcement = ServerEvent::UserJoined {
            user_id,
            connection_id: sender,
        };
        for member in prior {
            if self.inner.registry.send(member, announcement.clone()).is_err() {
                debug!(%room_id, %member, "join announcement dropped");
            }
        }
    }

    /// Relay a negotiation message to the one connection it names.
    /// A vanished target is dropped silently: by the time delivery is
    /// attempted it may have legitimately disconnected.
    fn relay_directed(
        &self,
        sender: ConnectionId,
        room_id: &RoomId,
        target: ConnectionId,
        event: ServerEvent,
    ) {
        if !self.inner.directory.is_member(room_id, sender) {
            self.reject(sender, ProtocolError::NotInRoom(room_id.clone()));
            return;
        }

        if !self.inner.directory.is_member(room_id, target) {
            debug!(%room_id, %sender, %target, "directed message to absent target dropped");
            return;
        }

        if self.inner.registry.send(target, event).is_err() {
            debug!(%room_id, %sender, %target, "directed message to gone target dropped");
        }
    }

    fn broadcast_from(&self, sender: ConnectionId, room_id: &RoomId, event: ServerEvent) {
        if !self.inner.directory.is_member(room_id, sender) {
            self.reject(sender, ProtocolError::NotInRoom(room_id.clone()));
            return;
        }

        for member in self.inner.directory.members_of(room_id) {
            if member == sender {
                continue;
            }
            if self.inner.registry.send(member, event.clone()).is_err() {
                debug!(%room_id, %member, "broadcast delivery dropped");
            }
        }
    }
}
