//! Identity newtypes and shared wire structures.
//!
//! Everything in this module travels on the wire, so the serde
//! representation is part of the protocol contract: identities serialize
//! as plain strings, payload fields as camelCase.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique, opaque identifier for a player.
///
/// Minted by the server when a connection creates or joins a room; clients
/// treat it as an opaque string. `#[serde(transparent)]` makes it serialize
/// as the bare string rather than a wrapper object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wraps an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh random id: 12 lowercase hex characters (48 bits).
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bytes: [u8; 6] = rng.random();
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Alphabet for room codes: uppercase letters and digits.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The length of a room code.
pub(crate) const CODE_LEN: usize = 6;

/// A short, shareable room code (6 uppercase alphanumeric characters).
///
/// Codes are globally unique only among rooms that currently exist; the
/// room directory enforces that by retrying generation on collision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Wraps an existing code string (e.g. one received from a client).
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generates a random candidate code.
    ///
    /// Uniqueness is the caller's problem: the directory must check the
    /// candidate against live rooms and regenerate on collision.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..CODE_LEN)
            .map(|_| {
                let i = rng.random_range(0..CODE_ALPHABET.len());
                CODE_ALPHABET[i] as char
            })
            .collect();
        Self(code)
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Dice
// ---------------------------------------------------------------------------

/// The outcome of one dice roll: two dice, their sum, and the double flag.
///
/// Ephemeral — valid only for the turn it was rolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceResult {
    /// The two face values, each in `[1, 6]`.
    pub dice: [u8; 2],
    /// `dice[0] + dice[1]`.
    pub total: u8,
    /// `true` iff both dice show the same value.
    pub is_double: bool,
}

// ---------------------------------------------------------------------------
// Roster & snapshot types
// ---------------------------------------------------------------------------

/// A roster entry as sent in `room_joined`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPlayer {
    pub player_id: PlayerId,
    pub player_name: String,
    pub is_host: bool,
}

/// One player's authoritative game state inside a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub player_id: PlayerId,
    pub player_name: String,
    /// Board position, `0..40`.
    pub position: u8,
    /// Never negative on the wire — the resolver clamps at zero.
    pub money: i64,
    /// Tile ids the player owns, ascending.
    pub holdings: Vec<u8>,
    /// Remaining turns confined to the penalty tile (0 = free).
    pub jail_turns: u8,
}

/// Dynamic state of one tile inside a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileState {
    pub tile_id: u8,
    pub owner: Option<PlayerId>,
    pub building_level: u8,
}

/// The full authoritative game state, broadcast in `game_started`.
///
/// Clients hold no authoritative state of their own; on any conflict this
/// snapshot (and the event stream after it) wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub current_player_id: PlayerId,
    pub players: Vec<PlayerSnapshot>,
    pub tiles: Vec<TileState>,
}

// =========================================================================
// Tests
// =========================================================================
