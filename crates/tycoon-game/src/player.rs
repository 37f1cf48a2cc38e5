//! Per-player authoritative state.

use std::collections::BTreeSet;

use tycoon_protocol::{PlayerId, PlayerSnapshot};

use crate::board;

/// One participant's authoritative state within a game session.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Board position, `0..40`.
    pub position: u8,
    /// Clamped at zero after rent debits; all spending checks observe
    /// the clamped value.
    pub money: i64,
    /// Tile ids this player owns. `BTreeSet` keeps snapshots sorted.
    pub holdings: BTreeSet<u8>,
    /// Remaining turns confined to the penalty tile; 0 means free.
    pub jail_turns: u8,
    /// Consecutive doubles rolled so far this streak (0..=2); the third
    /// jails the player and resets it.
    pub doubles_streak: u8,
}

impl Player {
    /// Creates a player at Start with the standard bankroll.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: 0,
            money: board::STARTING_MONEY,
            holdings: BTreeSet::new(),
            jail_turns: 0,
            doubles_streak: 0,
        }
    }

    /// Whether the player is currently confined to the penalty tile.
    pub fn in_jail(&self) -> bool {
        self.jail_turns > 0
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            player_id: self.id.clone(),
            player_name: self.name.clone(),
            position: self.position,
            money: self.money,
            holdings: self.holdings.iter().copied().collect(),
            jail_turns: self.jail_turns,
        }
    }
}
