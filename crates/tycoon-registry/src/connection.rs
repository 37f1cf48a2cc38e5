//! The per-connection identity record.

use tycoon_protocol::{PlayerId, RoomCode};

/// What the server knows about one live connection.
///
/// Starts empty on accept; a player id and display name are bound when
/// the connection creates or joins a room, and the room code tracks
/// membership. Destroyed with the connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// The player identity assigned to this connection, if any.
    pub player_id: Option<PlayerId>,

    /// The display name the player chose when creating/joining a room.
    pub player_name: Option<String>,

    /// The room this connection currently belongs to, if any.
    /// A connection is in at most one room at a time.
    pub room: Option<RoomCode>,
}
