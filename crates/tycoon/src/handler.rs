//! Per-connection handler: identity, routing, and the outbound pump.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler. The flow is:
//!   1. Register the connection and send the `connected` greeting.
//!   2. Select-loop over inbound frames and the connection's outbound
//!      channel (fed by room broadcasts and our own replies), so every
//!      server → client message leaves through one ordered path.
//!   3. On close, unregister and run the same cleanup as `leave_room`.

use std::sync::Arc;

use tokio::sync::mpsc;
use tycoon_protocol::{ClientMessage, Codec, PlayerId, RoomCode, ServerMessage};
use tycoon_room::{PlayerAction, PlayerSender, RoomError};
use tycoon_transport::{Connection, ConnectionId, WebSocketConnection};

use crate::TycoonError;
use crate::server::ServerState;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), TycoonError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    state.registry.lock().await.register(conn_id);

    // Every server → client message for this connection funnels through
    // this channel: handler replies and room broadcasts alike. The
    // single consumer below is the only socket writer.
    let (tx, rx) = mpsc::unbounded_channel::<ServerMessage>();
    let _ = tx.send(ServerMessage::Connected {
        message: "Connected to Tycoon server".to_string(),
    });

    let result = connection_loop(&conn, conn_id, &state, &tx, rx).await;

    // Disconnection is a leave: drop the identity and take the player
    // out of whatever room they were in.
    let info = state.registry.lock().await.unregister(conn_id);
    if let Some(info) = info {
        if let (Some(room), Some(player_id)) = (info.room, info.player_id) {
            let mut rooms = state.rooms.lock().await;
            if let Err(e) = rooms.leave_room(&room, &player_id).await {
                tracing::debug!(%conn_id, error = %e, "leave on disconnect failed");
            }
        }
    }

    tracing::debug!(%conn_id, "connection closed");
    result
}

/// The select loop: inbound frames in, queued messages out.
async fn connection_loop(
    conn: &WebSocketConnection,
    conn_id: ConnectionId,
    state: &Arc<ServerState>,
    tx: &PlayerSender,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
) -> Result<(), TycoonError> {
    loop {
        tokio::select! {
            inbound = conn.recv() => match inbound {
                Ok(Some(data)) => handle_frame(conn_id, &data, state, tx).await,
                Ok(None) => {
                    tracing::debug!(%conn_id, "client closed connection");
                    return Ok(());
                }
                Err(e) => {
                    tracing::debug!(%conn_id, error = %e, "recv error");
                    return Ok(());
                }
            },
            outbound = rx.recv() => match outbound {
                Some(msg) => {
                    let bytes = state.codec.encode(&msg)?;
                    if let Err(e) = conn.send(&bytes).await {
                        tracing::debug!(%conn_id, error = %e, "send failed, closing");
                        return Ok(());
                    }
                }
                // Unreachable while we hold `tx`, but not worth a panic.
                None => return Ok(()),
            },
        }
    }
}

/// Decodes one frame and dispatches it. A malformed frame is reported
/// to the sender as an error and never closes the connection.
async fn handle_frame(
    conn_id: ConnectionId,
    data: &[u8],
    state: &Arc<ServerState>,
    tx: &PlayerSender,
) {
    let msg: ClientMessage = match state.codec.decode(data) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::debug!(%conn_id, error = %e, "malformed frame");
            send(tx, ServerMessage::Error {
                message: "Invalid message".to_string(),
            });
            return;
        }
    };

    dispatch(conn_id, msg, state, tx).await;
}

/// Routes one decoded client message.
async fn dispatch(
    conn_id: ConnectionId,
    msg: ClientMessage,
    state: &Arc<ServerState>,
    tx: &PlayerSender,
) {
    match msg {
        ClientMessage::CreateRoom {
            player_name,
            max_players,
        } => {
            if in_room(state, conn_id).await {
                send_error(tx, "You are already in a room");
                return;
            }

            // Lock only for the create, drop before touching the registry.
            let created = {
                let mut rooms = state.rooms.lock().await;
                rooms.create_room(&player_name, max_players, tx.clone()).await
            };

            match created {
                Ok((code, player_id)) => {
                    let mut registry = state.registry.lock().await;
                    let _ = registry.bind_player(conn_id, player_id.clone(), &player_name);
                    let _ = registry.bind_room(conn_id, code.clone());
                    drop(registry);
                    send(tx, ServerMessage::RoomCreated {
                        room_id: code,
                        player_id,
                        is_host: true,
                    });
                }
                Err(e) => send_error(tx, &e.to_string()),
            }
        }

        ClientMessage::JoinRoom {
            room_id,
            player_name,
        } => {
            if in_room(state, conn_id).await {
                send_error(tx, "You are already in a room");
                return;
            }

            let joined = {
                let mut rooms = state.rooms.lock().await;
                rooms.join_room(&room_id, &player_name, tx.clone()).await
            };

            match joined {
                Ok((player_id, info)) => {
                    let mut registry = state.registry.lock().await;
                    let _ = registry.bind_player(conn_id, player_id.clone(), &player_name);
                    let _ = registry.bind_room(conn_id, room_id.clone());
                    drop(registry);
                    send(tx, ServerMessage::RoomJoined {
                        room_id,
                        player_id,
                        is_host: false,
                        players: info.players,
                    });
                }
                Err(e) => send_error(tx, &e.to_string()),
            }
        }

        ClientMessage::LeaveRoom => {
            let Some((player_id, _)) = identity(state, conn_id).await else {
                send_error(tx, &RoomError::NotInRoom.to_string());
                return;
            };
            let room = match state.registry.lock().await.clear_room(conn_id) {
                Ok(room) => room,
                Err(e) => {
                    tracing::debug!(%conn_id, error = %e, "leave without room");
                    send_error(tx, &RoomError::NotInRoom.to_string());
                    return;
                }
            };
            let mut rooms = state.rooms.lock().await;
            if let Err(e) = rooms.leave_room(&room, &player_id).await {
                send_error(tx, &e.to_string());
            }
        }

        ClientMessage::StartGame => {
            let Some((player_id, room)) = identity(state, conn_id).await else {
                send_error(tx, &RoomError::NotInRoom.to_string());
                return;
            };
            let result = state.rooms.lock().await.start_game(&room, &player_id).await;
            if let Err(e) = result {
                send_error(tx, &e.to_string());
            }
        }

        ClientMessage::RollDice => {
            route_action(conn_id, PlayerAction::RollDice, state, tx).await;
        }
        ClientMessage::BuyProperty { tile_id } => {
            route_action(conn_id, PlayerAction::BuyProperty { tile_id }, state, tx).await;
        }
        ClientMessage::Build { tile_id } => {
            route_action(conn_id, PlayerAction::Build { tile_id }, state, tx).await;
        }
        ClientMessage::EndTurn => {
            route_action(conn_id, PlayerAction::EndTurn, state, tx).await;
        }

        ClientMessage::Chat { message } => {
            let Some((player_id, room)) = identity(state, conn_id).await else {
                send_error(tx, &RoomError::NotInRoom.to_string());
                return;
            };
            let result = state.rooms.lock().await.chat(&room, &player_id, message).await;
            if let Err(e) = result {
                send_error(tx, &e.to_string());
            }
        }
    }
}

/// Routes an in-game action to the sender's room. Outcomes travel back
/// through the room's broadcast path; only routing failures are
/// reported here.
async fn route_action(
    conn_id: ConnectionId,
    action: PlayerAction,
    state: &Arc<ServerState>,
    tx: &PlayerSender,
) {
    let Some((player_id, room)) = identity(state, conn_id).await else {
        send_error(tx, &RoomError::NotInRoom.to_string());
        return;
    };
    let result = state.rooms.lock().await.action(&room, &player_id, action).await;
    if let Err(e) = result {
        send_error(tx, &e.to_string());
    }
}

/// The connection's (player, room) identity, if it has joined a room.
async fn identity(
    state: &Arc<ServerState>,
    conn_id: ConnectionId,
) -> Option<(PlayerId, RoomCode)> {
    let registry = state.registry.lock().await;
    let info = registry.get(conn_id)?;
    Some((info.player_id.clone()?, info.room.clone()?))
}

async fn in_room(state: &Arc<ServerState>, conn_id: ConnectionId) -> bool {
    state
        .registry
        .lock()
        .await
        .get(conn_id)
        .is_some_and(|info| info.room.is_some())
}

fn send(tx: &PlayerSender, msg: ServerMessage) {
    let _ = tx.send(msg);
}

fn send_error(tx: &PlayerSender, message: &str) {
    send(tx, ServerMessage::Error {
        message: message.to_string(),
    });
}
