//! Unified error type for the Tycoon server.

use tycoon_game::GameError;
use tycoon_protocol::ProtocolError;
use tycoon_registry::RegistryError;
use tycoon_room::RoomError;
use tycoon_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates the `From` impls,
/// so `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TycoonError {
    /// A transport-level error (accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A registry-level error (unknown connection, room binding).
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A room-level error (not found, full, already started).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// A game-rule error (turn order, phase, funds).
    #[error(transparent)]
    Game(#[from] GameError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_room_error_preserves_message() {
        let err: TycoonError = RoomError::NotFound.into();
        assert!(matches!(err, TycoonError::Room(_)));
        assert_eq!(err.to_string(), "Room not found");
    }

    #[test]
    fn test_from_game_error() {
        let err: TycoonError = GameError::NotYourTurn.into();
        assert!(matches!(err, TycoonError::Game(_)));
        assert_eq!(err.to_string(), "Not your turn");
    }

    #[test]
    fn test_from_transport_error() {
        let err: TycoonError = TransportError::ConnectionClosed("gone".into()).into();
        assert!(matches!(err, TycoonError::Transport(_)));
        assert!(err.to_string().contains("gone"));
    }
}
