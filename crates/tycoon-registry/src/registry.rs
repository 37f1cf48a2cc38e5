//! The connection registry: tracks every live connection's identity.
//!
//! # Concurrency note
//!
//! `ConnectionRegistry` is NOT thread-safe by itself — it is a plain
//! `HashMap` owned by the server layer and guarded there by a mutex,
//! independently of any room's internal serialization. Keeping it simple
//! here avoids hidden locking.

use std::collections::HashMap;

use tycoon_protocol::{PlayerId, RoomCode};
use tycoon_transport::ConnectionId;

use crate::{ConnectionInfo, RegistryError};

/// Maps each live connection to its identity.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, ConnectionInfo>,
}

impl ConnectionRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
        }
    }

    /// Registers a freshly accepted connection with an empty identity.
    ///
    /// Re-registering an id overwrites the old entry; connection ids are
    /// never reused within a process, so that only happens in tests.
    pub fn register(&mut self, conn_id: ConnectionId) {
        self.connections.insert(conn_id, ConnectionInfo::default());
        tracing::debug!(%conn_id, "connection registered");
    }

    /// Removes a connection and returns its final identity, so the caller
    /// can run room-leave cleanup for whatever the connection was part of.
    pub fn unregister(&mut self, conn_id: ConnectionId) -> Option<ConnectionInfo> {
        let info = self.connections.remove(&conn_id);
        if info.is_some() {
            tracing::debug!(%conn_id, "connection unregistered");
        }
        info
    }

    /// Binds a player identity (id + display name) to a connection.
    ///
    /// # Errors
    /// [`RegistryError::UnknownConnection`] if the connection is not
    /// registered.
    pub fn bind_player(
        &mut self,
        conn_id: ConnectionId,
        player_id: PlayerId,
        player_name: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let info = self
            .connections
            .get_mut(&conn_id)
            .ok_or(RegistryError::UnknownConnection(conn_id))?;
        info.player_id = Some(player_id);
        info.player_name = Some(player_name.into());
        Ok(())
    }

    /// Binds a connection to a room.
    ///
    /// # Errors
    /// - [`RegistryError::UnknownConnection`] if not registered.
    /// - [`RegistryError::AlreadyInRoom`] if already bound to a room
    ///   (a connection is in at most one room at a time).
    pub fn bind_room(
        &mut self,
        conn_id: ConnectionId,
        room: RoomCode,
    ) -> Result<(), RegistryError> {
        let info = self
            .connections
            .get_mut(&conn_id)
            .ok_or(RegistryError::UnknownConnection(conn_id))?;
        if info.room.is_some() {
            return Err(RegistryError::AlreadyInRoom(conn_id));
        }
        info.room = Some(room);
        Ok(())
    }

    /// Clears a connection's room binding (and its player identity, which
    /// is scoped to room membership), returning the previous room code.
    ///
    /// # Errors
    /// - [`RegistryError::UnknownConnection`] if not registered.
    /// - [`RegistryError::NotInRoom`] if no room was bound.
    pub fn clear_room(&mut self, conn_id: ConnectionId) -> Result<RoomCode, RegistryError> {
        let info = self
            .connections
            .get_mut(&conn_id)
            .ok_or(RegistryError::UnknownConnection(conn_id))?;
        let room = info.room.take().ok_or(RegistryError::NotInRoom(conn_id))?;
        info.player_id = None;
        info.player_name = None;
        Ok(room)
    }

    /// Looks up a connection's identity.
    pub fn get(&self, conn_id: ConnectionId) -> Option<&ConnectionInfo> {
        self.connections.get(&conn_id)
    }

    /// Returns the number of live connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Returns `true` if no connections are registered.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
