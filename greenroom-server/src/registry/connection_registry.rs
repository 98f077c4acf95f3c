use crate::error::SendError;
use dashmap::DashMap;
use greenroom_core::{ConnectionId, ServerEvent, UserId};
use tokio::sync::mpsc;
use tracing::debug;

struct ConnectionEntry {
    user_id: Option<UserId>,
    tx: mpsc::UnboundedSender<ServerEvent>,
}

/// Tracks every live connection and its identity metadata.
///
/// Each connection registers an unbounded outbox at admit time; the
/// per-connection writer task drains it onto the socket, so `send`
/// never performs transport I/O itself and never blocks on a slow
/// peer.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, ConnectionEntry>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly accepted transport and allocate its id.
    pub fn admit(&self, tx: mpsc::UnboundedSender<ServerEvent>) -> ConnectionId {
        let connection_id = ConnectionId::new();
        self.connections
            .insert(connection_id, ConnectionEntry { user_id: None, tx });
        connection_id
    }

    /// Record the user identity supplied with the first join request.
    pub fn identify(&self, connection_id: ConnectionId, user_id: UserId) {
        if let Some(mut entry) = self.connections.get_mut(&connection_id) {
            entry.user_id = Some(user_id);
        }
    }

    pub fn user_id(&self, connection_id: ConnectionId) -> Option<UserId> {
        self.connections
            .get(&connection_id)
            .and_then(|entry| entry.user_id.clone())
    }

    /// Mark a connection inactive. Idempotent: retiring an already
    /// retired connection is a no-op.
    pub fn retire(&self, connection_id: ConnectionId) {
        self.connections.remove(&connection_id);
    }

    /// Deliver an event to one connection. `ConnectionGone` covers the
    /// race between a relay lookup and a concurrent disconnect; the
    /// caller drops the message without retry.
    pub fn send(&self, connection_id: ConnectionId, event: ServerEvent) -> Result<(), SendError> {
        let Some(entry) = self.connections.get(&connection_id) else {
            debug!(%connection_id, "send to retired connection dropped");
            return Err(SendError::ConnectionGone);
        };
        entry
            .tx
            .send(event)
            .map_err(|_| SendError::ConnectionGone)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
