//! `TycoonServer` builder and accept loop.
//!
//! Ties the layers together: transport → registry → directory → rooms.

use std::sync::Arc;

use tokio::sync::Mutex;
use tycoon_protocol::JsonCodec;
use tycoon_registry::ConnectionRegistry;
use tycoon_room::{RoomConfig, RoomDirectory};
use tycoon_transport::{Transport, WebSocketTransport};

use crate::TycoonError;
use crate::handler::handle_connection;

/// Shared server state passed to each connection handler task.
///
/// The registry and the directory are guarded by separate mutexes:
/// identity bookkeeping and room bookkeeping never contend with each
/// other, and neither lock is ever held while a room processes a
/// mutation (rooms serialize internally through their command channel).
pub(crate) struct ServerState {
    pub(crate) registry: Mutex<ConnectionRegistry>,
    pub(crate) rooms: Mutex<RoomDirectory>,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Tycoon server.
pub struct TycoonServerBuilder {
    bind_addr: String,
    room_config: RoomConfig,
}

impl TycoonServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            room_config: RoomConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the room configuration.
    pub fn room_config(mut self, config: RoomConfig) -> Self {
        self.room_config = config;
        self
    }

    /// Binds the transport and builds the server.
    pub async fn build(self) -> Result<TycoonServer, TycoonError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            registry: Mutex::new(ConnectionRegistry::new()),
            rooms: Mutex::new(RoomDirectory::new(self.room_config)),
            codec: JsonCodec,
        });

        Ok(TycoonServer { transport, state })
    }
}

impl Default for TycoonServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Tycoon server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct TycoonServer {
    transport: WebSocketTransport,
    state: Arc<ServerState>,
}

impl TycoonServer {
    /// Creates a new builder.
    pub fn builder() -> TycoonServerBuilder {
        TycoonServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the accept loop: one handler task per connection, until the
    /// process is terminated.
    pub async fn run(mut self) -> Result<(), TycoonError> {
        tracing::info!("Tycoon server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
