//! The per-room game session: roster-ordered players, the turn cursor,
//! and dynamic tile state.
//!
//! The turn engine lives in `turn.rs` and the economy resolver in
//! `economy.rs`; both are `impl GameSession` blocks over the state
//! defined here.

use tycoon_protocol::{DiceResult, GameSnapshot, PlayerId, ServerMessage, TileState};

use crate::board::TILE_COUNT;
use crate::{GameError, Player, TurnPhase};

/// Dynamic state of one tile: who owns it and how built-up it is.
#[derive(Debug, Clone, Default)]
pub(crate) struct TileDynamic {
    pub(crate) owner: Option<PlayerId>,
    pub(crate) level: u8,
}

/// Outcome of removing a player from a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRemoved {
    /// The departed player held the turn; the room must schedule a
    /// forced advance (passing `serial` back as the guard).
    pub needs_forced_advance: bool,
    /// Turn serial at removal time; [`GameSession::force_advance`] is a
    /// no-op unless it still matches.
    pub serial: u64,
}

/// The authoritative state of one started game.
///
/// Exists only while its room's game is running. All access is
/// serialized by the owning room actor; nothing here is `Sync`-hostile,
/// it simply never needs to be shared.
#[derive(Debug)]
pub struct GameSession {
    /// Roster order = turn order. Never empty while the room lives.
    pub(crate) players: Vec<Player>,
    /// Index into `players` of the player who holds the turn.
    pub(crate) current: usize,
    pub(crate) phase: TurnPhase,
    pub(crate) last_roll: Option<DiceResult>,
    pub(crate) tiles: [TileDynamic; TILE_COUNT as usize],
    /// Bumped on every turn advance; guards delayed forced advances.
    pub(crate) turn_serial: u64,
    /// Set while the current player has departed and the room's forced
    /// end-turn timer has not fired yet. Blocks all player actions.
    pub(crate) pending_forced: bool,
}

impl GameSession {
    /// Starts a session for the given roster (join order = turn order).
    /// The first joined player holds the first turn.
    pub fn new(roster: impl IntoIterator<Item = (PlayerId, String)>) -> Self {
        let players: Vec<Player> = roster
            .into_iter()
            .map(|(id, name)| Player::new(id, name))
            .collect();
        tracing::info!(players = players.len(), "game session started");
        Self {
            players,
            current: 0,
            phase: TurnPhase::WaitingForRoll,
            last_roll: None,
            tiles: std::array::from_fn(|_| TileDynamic::default()),
            turn_serial: 0,
            pending_forced: false,
        }
    }

    /// The player currently holding the turn.
    pub fn current_player_id(&self) -> &PlayerId {
        &self.players[self.current].id
    }

    /// The current turn phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The most recent roll of the current turn, if any.
    pub fn last_roll(&self) -> Option<DiceResult> {
        self.last_roll
    }

    /// Current turn serial (see [`PlayerRemoved::serial`]).
    pub fn turn_serial(&self) -> u64 {
        self.turn_serial
    }

    /// Looks up a player by id.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == *id)
    }

    /// Owner of a tile, if any.
    pub fn tile_owner(&self, tile_id: u8) -> Option<&PlayerId> {
        self.tiles.get(tile_id as usize)?.owner.as_ref()
    }

    /// Building level of a tile.
    pub fn tile_level(&self, tile_id: u8) -> u8 {
        self.tiles
            .get(tile_id as usize)
            .map(|t| t.level)
            .unwrap_or(0)
    }

    /// Number of players still in the session.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the session has no players left.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Resolves the acting player to the current index.
    ///
    /// Rejects unknown players, anyone while a forced advance is
    /// pending, and any player who does not hold the turn.
    pub(crate) fn require_current(&self, player: &PlayerId) -> Result<usize, GameError> {
        if self.player(player).is_none() {
            return Err(GameError::UnknownPlayer);
        }
        if self.pending_forced || self.players[self.current].id != *player {
            return Err(GameError::NotYourTurn);
        }
        Ok(self.current)
    }

    /// Removes a departed player mid-game.
    ///
    /// All their tiles revert to unowned (buildings cleared) so rent
    /// resolution never sees a dangling owner. Returns `None` if the
    /// player was not in the session.
    pub fn remove_player(&mut self, player: &PlayerId) -> Option<PlayerRemoved> {
        let idx = self.players.iter().position(|p| p.id == *player)?;

        for tile in self.tiles.iter_mut() {
            if tile.owner.as_ref() == Some(player) {
                tile.owner = None;
                tile.level = 0;
            }
        }

        let was_current = idx == self.current;
        self.players.remove(idx);
        if idx < self.current {
            self.current -= 1;
        }
        if self.current >= self.players.len() {
            // Wrapped off the end (or the roster emptied).
            self.current = 0;
        }

        let needs_forced_advance = was_current && !self.players.is_empty();
        if needs_forced_advance {
            self.pending_forced = true;
        }

        tracing::info!(
            %player,
            remaining = self.players.len(),
            needs_forced_advance,
            "player removed from session"
        );

        Some(PlayerRemoved {
            needs_forced_advance,
            serial: self.turn_serial,
        })
    }

    /// Performs the forced end-turn scheduled after the current player
    /// disconnected. A no-op unless a forced advance is still pending
    /// and `serial` matches the turn it was scheduled for.
    ///
    /// After `remove_player` the cursor already points at the next
    /// player in roster order, so this hands them the turn rather than
    /// stepping past them.
    pub fn force_advance(&mut self, serial: u64) -> Option<ServerMessage> {
        if !self.pending_forced || serial != self.turn_serial || self.players.is_empty() {
            return None;
        }
        self.pending_forced = false;
        self.phase = TurnPhase::WaitingForRoll;
        self.last_roll = None;
        self.turn_serial += 1;
        let next = self.players[self.current].id.clone();
        tracing::info!(current = %next, "forced turn advance");
        Some(ServerMessage::TurnChanged {
            current_player_id: next,
        })
    }

    /// Produces the full wire snapshot (sent in `game_started`).
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            current_player_id: self.current_player_id().clone(),
            players: self.players.iter().map(Player::snapshot).collect(),
            tiles: self
                .tiles
                .iter()
                .enumerate()
                .map(|(id, t)| TileState {
                    tile_id: id as u8,
                    owner: t.owner.clone(),
                    building_level: t.level,
                })
                .collect(),
        }
    }
}
