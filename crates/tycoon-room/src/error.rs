//! Error types for the room layer.
//!
//! As in the game crate, `Display` texts are the client-facing `error`
//! messages.

use tycoon_protocol::RoomCode;

/// Why a room request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// No room exists with the given code.
    #[error("Room not found")]
    NotFound,

    /// The roster is at the room's player limit.
    #[error("Room is full")]
    RoomFull,

    /// The game has already started; late joins are not supported.
    #[error("Game already started")]
    GameAlreadyStarted,

    /// The request needs a running game.
    #[error("Game has not started")]
    GameNotStarted,

    /// Starting needs at least two players.
    #[error("Need at least 2 players")]
    NotEnoughPlayers,

    /// Only the host may start the game.
    #[error("Only the host can do that")]
    NotHost,

    /// The requested room size is outside the allowed range.
    #[error("maxPlayers must be between 2 and 4")]
    InvalidMaxPlayers(u8),

    /// The player is not in this room.
    #[error("You are not in this room")]
    NotInRoom,

    /// The room's command channel is closed — the actor is gone.
    #[error("room {0} is unavailable")]
    Unavailable(RoomCode),
}
