//! Room lifecycle for Tycoon.
//!
//! Each room runs as an isolated Tokio task (actor model) that owns the
//! roster and, once started, the game session. All mutating requests for
//! a room are serialized through its command channel, which is what
//! makes the per-room event order a total order; different rooms share
//! nothing and run fully concurrently.
//!
//! # Key types
//!
//! - [`RoomDirectory`] — room-code → room, creation/destruction
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`PlayerAction`] — the in-game requests routed to the turn engine
//! - [`RoomConfig`] — server-side room knobs
//! - [`RoomError`] — why a room request was rejected

mod config;
mod directory;
mod error;
mod room;

pub use config::RoomConfig;
pub use directory::RoomDirectory;
pub use error::RoomError;
pub use room::{JoinInfo, PlayerAction, PlayerSender, RoomHandle, RoomInfo};
