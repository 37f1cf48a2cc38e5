//! The room directory: creates, finds, and destroys rooms by code.
//!
//! # Concurrency note
//!
//! The directory is a second, smaller shared resource next to the rooms
//! themselves. It is guarded by its own mutex in the server layer,
//! independently of any single room's command channel, so concurrent
//! room creation can never corrupt the code → room mapping. Requests
//! inside a room are serialized by that room's actor, not by this map.

use std::collections::HashMap;

use tycoon_protocol::{PlayerId, RoomCode};

use crate::room::spawn_room;
use crate::{JoinInfo, PlayerAction, PlayerSender, RoomConfig, RoomError, RoomHandle, RoomInfo};

/// Maps each live room code to its actor handle.
pub struct RoomDirectory {
    rooms: HashMap<RoomCode, RoomHandle>,
    config: RoomConfig,
}

impl RoomDirectory {
    /// Creates an empty directory.
    pub fn new(config: RoomConfig) -> Self {
        Self {
            rooms: HashMap::new(),
            config,
        }
    }

    /// Creates a room, mints the host's player id, and joins the host.
    ///
    /// The room code is random; generation retries until it misses every
    /// live code (a collision in the 36^6 space is astronomically rare,
    /// but "rare" is not "never").
    ///
    /// # Errors
    /// [`RoomError::InvalidMaxPlayers`] when the requested size is
    /// outside [2, 4].
    pub async fn create_room(
        &mut self,
        host_name: &str,
        max_players: u8,
        sender: PlayerSender,
    ) -> Result<(RoomCode, PlayerId), RoomError> {
        if !(crate::config::MIN_PLAYERS..=crate::config::MAX_PLAYERS).contains(&max_players) {
            return Err(RoomError::InvalidMaxPlayers(max_players));
        }

        let code = self.generate_unique_code();
        let player_id = PlayerId::generate(&mut rand::rng());
        let handle = spawn_room(code.clone(), max_players, self.config.clone());

        // Joining a freshly spawned empty room cannot be rejected; an
        // error here means the actor died on arrival.
        handle
            .join(player_id.clone(), host_name.to_string(), sender)
            .await?;

        self.rooms.insert(code.clone(), handle);
        tracing::info!(%code, host = %player_id, max_players, "room created");
        Ok((code, player_id))
    }

    /// Adds a player to an existing room.
    ///
    /// # Errors
    /// [`RoomError::NotFound`] for unknown codes; the room itself
    /// rejects with [`RoomError::GameAlreadyStarted`] or
    /// [`RoomError::RoomFull`].
    pub async fn join_room(
        &mut self,
        code: &RoomCode,
        player_name: &str,
        sender: PlayerSender,
    ) -> Result<(PlayerId, JoinInfo), RoomError> {
        let handle = self.rooms.get(code).ok_or(RoomError::NotFound)?;
        let player_id = PlayerId::generate(&mut rand::rng());
        let info = handle
            .join(player_id.clone(), player_name.to_string(), sender)
            .await?;
        Ok((player_id, info))
    }

    /// Removes a player from a room; destroys the room when its roster
    /// empties (freeing the code for reuse). Disconnections are routed
    /// through this same path.
    pub async fn leave_room(
        &mut self,
        code: &RoomCode,
        player_id: &PlayerId,
    ) -> Result<(), RoomError> {
        let handle = self.rooms.get(code).ok_or(RoomError::NotFound)?;
        let now_empty = handle.leave(player_id.clone()).await?;

        if now_empty {
            if let Some(handle) = self.rooms.remove(code) {
                let _ = handle.shutdown().await;
            }
            tracing::info!(%code, "room destroyed (roster empty)");
        }
        Ok(())
    }

    /// Starts the game in a room (host only — checked by the room).
    pub async fn start_game(
        &self,
        code: &RoomCode,
        player_id: &PlayerId,
    ) -> Result<(), RoomError> {
        let handle = self.rooms.get(code).ok_or(RoomError::NotFound)?;
        handle.start(player_id.clone()).await
    }

    /// Routes an in-game action to a room.
    pub async fn action(
        &self,
        code: &RoomCode,
        player_id: &PlayerId,
        action: PlayerAction,
    ) -> Result<(), RoomError> {
        let handle = self.rooms.get(code).ok_or(RoomError::NotFound)?;
        handle.action(player_id.clone(), action).await
    }

    /// Routes a chat line to a room.
    pub async fn chat(
        &self,
        code: &RoomCode,
        player_id: &PlayerId,
        message: String,
    ) -> Result<(), RoomError> {
        let handle = self.rooms.get(code).ok_or(RoomError::NotFound)?;
        handle.chat(player_id.clone(), message).await
    }

    /// Returns info about a specific room.
    pub async fn get_room_info(&self, code: &RoomCode) -> Result<RoomInfo, RoomError> {
        let handle = self.rooms.get(code).ok_or(RoomError::NotFound)?;
        handle.get_info().await
    }

    /// Whether a room with this code currently exists.
    pub fn contains(&self, code: &RoomCode) -> bool {
        self.rooms.contains_key(code)
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Draws random codes until one misses every live room.
    fn generate_unique_code(&self) -> RoomCode {
        let mut rng = rand::rng();
        loop {
            let code = RoomCode::generate(&mut rng);
            if !self.rooms.contains_key(&code) {
                return code;
            }
        }
    }
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}
