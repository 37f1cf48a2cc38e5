//! Server-side room configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bounds for the client-chosen room size.
pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 4;

/// Knobs for room behavior. The room *size* is chosen per room by the
/// creating client (within [`MIN_PLAYERS`]..=[`MAX_PLAYERS`]); these are
/// the server-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// How long a room waits after the current player disconnects
    /// mid-game before forcing their turn to end. The only
    /// timeout-driven transition in the system.
    pub forced_end_turn_delay: Duration,

    /// Capacity of each room actor's command channel. When it fills,
    /// senders wait (bounded backpressure).
    pub channel_size: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            forced_end_turn_delay: Duration::from_secs(3),
            channel_size: 64,
        }
    }
}
