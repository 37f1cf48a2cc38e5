//! Client → server and server → client message enums.
//!
//! Every frame on the wire is a flat envelope:
//!
//! ```json
//! { "type": "create_room", "payload": { "playerName": "Alice", "maxPlayers": 4 } }
//! ```
//!
//! `#[serde(tag = "type", content = "payload")]` produces exactly that
//! adjacently-tagged shape; `rename_all = "snake_case"` gives the
//! discriminators, `rename_all_fields = "camelCase"` the payload fields.
//! Variants without a payload (`leave_room`, `roll_dice`, ...) serialize
//! with the `payload` key omitted.

use serde::{Deserialize, Serialize};

use crate::types::{
    DiceResult, GameSnapshot, PlayerId, RoomCode, RoomPlayer,
};

// ---------------------------------------------------------------------------
// Client → Server
// ---------------------------------------------------------------------------

/// Everything a client may ask the server to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    /// Open a new room and become its host.
    CreateRoom { player_name: String, max_players: u8 },

    /// Join an existing room by its code.
    JoinRoom { room_id: RoomCode, player_name: String },

    /// Leave the current room.
    LeaveRoom,

    /// Start the game (host only).
    StartGame,

    /// Roll the dice (current player only).
    RollDice,

    /// Buy the property just landed on.
    BuyProperty { tile_id: u8 },

    /// Build on the owned tile just landed on.
    Build { tile_id: u8 },

    /// End the current turn (current player only).
    EndTurn,

    /// Say something to the room.
    Chat { message: String },
}

// ---------------------------------------------------------------------------
// Server → Client
// ---------------------------------------------------------------------------

/// Everything the server tells clients.
///
/// Each accepted mutation produces exactly one of these describing the new
/// fact; rejected requests produce [`ServerMessage::Error`] for the sender
/// only. Rendering clients consume these as their single source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    /// Greeting sent once, immediately after the transport opens.
    Connected { message: String },

    /// Reply to `create_room`.
    RoomCreated {
        room_id: RoomCode,
        player_id: PlayerId,
        is_host: bool,
    },

    /// Reply to `join_room`, including the current roster.
    RoomJoined {
        room_id: RoomCode,
        player_id: PlayerId,
        is_host: bool,
        players: Vec<RoomPlayer>,
    },

    /// A new player entered the room.
    PlayerJoined { player_id: PlayerId, player_name: String },

    /// A player left (or disconnected — same thing to the room).
    PlayerLeft { player_id: PlayerId, player_name: String },

    /// The game began; carries the full authoritative snapshot.
    GameStarted { state: GameSnapshot },

    /// The current player rolled.
    DiceRolled {
        player_id: PlayerId,
        dice_result: DiceResult,
    },

    /// A property purchase was committed.
    PropertyBought { player_id: PlayerId, tile_id: u8 },

    /// A building level was committed.
    BuildingBuilt { player_id: PlayerId, tile_id: u8 },

    /// The turn passed to another player.
    TurnChanged { current_player_id: PlayerId },

    /// A chat line, with a server-side unix-millis timestamp.
    ChatMessage {
        player_id: PlayerId,
        player_name: String,
        message: String,
        timestamp: u64,
    },

    /// A rejected request, delivered only to its originator.
    Error { message: String },
}

// =========================================================================
// Tests
// =========================================================================
