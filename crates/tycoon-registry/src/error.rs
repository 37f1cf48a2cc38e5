//! Error types for the registry layer.

use tycoon_transport::ConnectionId;

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No entry exists for the given connection.
    #[error("unknown connection {0}")]
    UnknownConnection(ConnectionId),

    /// The connection is already bound to a room.
    #[error("connection {0} is already in a room")]
    AlreadyInRoom(ConnectionId),

    /// The connection is not bound to any room.
    #[error("connection {0} is not in a room")]
    NotInRoom(ConnectionId),
}
