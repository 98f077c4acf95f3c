use greenroom_core::RoomId;
use thiserror::Error;

/// Delivery failure reported by the Connection Registry.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SendError {
    /// The target was retired (or its channel closed) before the
    /// message could be handed off. Signaling messages are
    /// fire-and-forget, so callers drop the message and move on.
    #[error("connection is gone")]
    ConnectionGone,
}

/// Host configuration problems, surfaced at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddr {
        addr: String,
        source: std::net::AddrParseError,
    },
}

/// Client-visible protocol violations. Reported back to the offending
/// sender as an `error` event; relay state is never affected.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("not a member of room '{0}'")]
    NotInRoom(RoomId),

    #[error("invalid message: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("unsupported message type")]
    UnsupportedType,
}
