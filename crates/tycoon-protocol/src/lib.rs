//! Wire protocol for Tycoon.
//!
//! This crate defines the language that clients and the server speak:
//!
//! - **Identity** ([`PlayerId`], [`RoomCode`]) — the newtypes that name
//!   players and rooms on the wire.
//! - **Messages** ([`ClientMessage`], [`ServerMessage`]) — every frame is
//!   a flat `{ "type": ..., "payload": {...} }` envelope, modeled as two
//!   tagged serde enums.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how messages are
//!   converted to and from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while encoding
//!   or decoding.
//!
//! The protocol layer sits between transport (raw bytes) and the room
//! layer (who may act). It knows nothing about connections or game rules.

mod codec;
mod error;
mod message;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use message::{ClientMessage, ServerMessage};
pub use types::{
    DiceResult, GameSnapshot, PlayerId, PlayerSnapshot, RoomCode,
    RoomPlayer, TileState,
};
