//! Authoritative game state for Tycoon.
//!
//! This crate is pure and synchronous: no I/O, no channels, no clocks.
//! The room layer owns a [`GameSession`] per started room, feeds it
//! validated player requests one at a time, and broadcasts the events
//! each accepted mutation returns. Every operation validates fully
//! before touching state — a rejected request leaves the session
//! byte-for-byte unchanged.
//!
//! # Key pieces
//!
//! - [`board`] — the static 40-tile board and the game's constants
//! - [`dice`] — dice rolls
//! - [`Player`] — one participant's authoritative state
//! - [`GameSession`] — the per-room session: turn engine + economy
//! - [`TurnPhase`] — the turn state machine
//! - [`GameError`] — why a request was rejected

pub mod board;
pub mod dice;

mod economy;
mod error;
mod player;
mod session;
mod turn;

pub use economy::rent;
pub use error::GameError;
pub use player::Player;
pub use session::{GameSession, PlayerRemoved};
pub use turn::TurnPhase;
