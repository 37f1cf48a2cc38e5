//! End-to-end tests: a real server, real WebSocket clients, and the
//! public wire protocol — nothing else.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use tycoon::TycoonServerBuilder;
use tycoon_protocol::{ClientMessage, PlayerId, RoomCode, ServerMessage};

type Ws = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

async fn start() -> String {
    let server = TycoonServerBuilder::new()
        .bind("127.0.0.1:0")
        .build()
        .await
        .unwrap();
    let addr = server.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    addr
}

fn enc(msg: &ClientMessage) -> Message {
    Message::Binary(serde_json::to_vec(msg).unwrap().into())
}

async fn recv(ws: &mut Ws) -> ServerMessage {
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for server message")
        .expect("stream ended")
        .expect("websocket error");
    serde_json::from_slice(&msg.into_data()).expect("undecodable server message")
}

async fn send(ws: &mut Ws, msg: &ClientMessage) {
    ws.send(enc(msg)).await.unwrap();
}

/// Connects and consumes the `connected` greeting.
async fn connect(addr: &str) -> Ws {
    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("client should connect");
    assert!(matches!(
        recv(&mut ws).await,
        ServerMessage::Connected { .. }
    ));
    ws
}

/// Creates a room and returns its code and the host's player id.
async fn create_room(ws: &mut Ws, name: &str) -> (RoomCode, PlayerId) {
    send(ws, &ClientMessage::CreateRoom {
        player_name: name.to_string(),
        max_players: 4,
    })
    .await;
    match recv(ws).await {
        ServerMessage::RoomCreated {
            room_id,
            player_id,
            is_host,
        } => {
            assert!(is_host);
            (room_id, player_id)
        }
        other => panic!("expected room_created, got {other:?}"),
    }
}

/// Full lobby setup: Alice hosts, Bob joins, both drained to a clean
/// point (Alice has seen player_joined, Bob has seen room_joined).
async fn lobby(addr: &str) -> (Ws, Ws, PlayerId, PlayerId) {
    let mut alice = connect(addr).await;
    let (code, alice_id) = create_room(&mut alice, "Alice").await;

    let mut bob = connect(addr).await;
    send(&mut bob, &ClientMessage::JoinRoom {
        room_id: code,
        player_name: "Bob".to_string(),
    })
    .await;
    let bob_id = match recv(&mut bob).await {
        ServerMessage::RoomJoined {
            player_id, is_host, ..
        } => {
            assert!(!is_host);
            player_id
        }
        other => panic!("expected room_joined, got {other:?}"),
    };
    assert!(matches!(
        recv(&mut alice).await,
        ServerMessage::PlayerJoined { .. }
    ));

    (alice, bob, alice_id, bob_id)
}

/// Lobby plus a started game (both `game_started` frames drained).
async fn started_game(addr: &str) -> (Ws, Ws, PlayerId, PlayerId) {
    let (mut alice, mut bob, alice_id, bob_id) = lobby(addr).await;
    send(&mut alice, &ClientMessage::StartGame).await;
    for ws in [&mut alice, &mut bob] {
        match recv(ws).await {
            ServerMessage::GameStarted { state } => {
                assert_eq!(state.current_player_id, alice_id);
            }
            other => panic!("expected game_started, got {other:?}"),
        }
    }
    (alice, bob, alice_id, bob_id)
}

// =========================================================================
// Connection & room lifecycle
// =========================================================================

#[tokio::test]
async fn test_connect_greets_with_connected() {
    let addr = start().await;
    let _ws = connect(&addr).await; // the helper asserts the greeting
}

#[tokio::test]
async fn test_create_room_returns_code_and_host_identity() {
    let addr = start().await;
    let mut ws = connect(&addr).await;

    let (code, player_id) = create_room(&mut ws, "Alice").await;

    assert_eq!(code.as_str().len(), 6);
    assert!(!player_id.as_str().is_empty());
}

#[tokio::test]
async fn test_create_room_with_bad_max_players_is_rejected() {
    let addr = start().await;
    let mut ws = connect(&addr).await;

    send(&mut ws, &ClientMessage::CreateRoom {
        player_name: "Alice".to_string(),
        max_players: 5,
    })
    .await;

    match recv(&mut ws).await {
        ServerMessage::Error { message } => {
            assert_eq!(message, "maxPlayers must be between 2 and 4");
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_join_unknown_room_reports_not_found() {
    let addr = start().await;
    let mut ws = connect(&addr).await;

    send(&mut ws, &ClientMessage::JoinRoom {
        room_id: RoomCode::new("ZZZZZZ"),
        player_name: "Bob".to_string(),
    })
    .await;

    match recv(&mut ws).await {
        ServerMessage::Error { message } => assert_eq!(message, "Room not found"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_join_lists_existing_players() {
    let addr = start().await;
    let mut alice = connect(&addr).await;
    let (code, alice_id) = create_room(&mut alice, "Alice").await;

    let mut bob = connect(&addr).await;
    send(&mut bob, &ClientMessage::JoinRoom {
        room_id: code,
        player_name: "Bob".to_string(),
    })
    .await;

    match recv(&mut bob).await {
        ServerMessage::RoomJoined { players, .. } => {
            assert_eq!(players.len(), 2);
            assert_eq!(players[0].player_id, alice_id);
            assert!(players[0].is_host);
            assert_eq!(players[1].player_name, "Bob");
        }
        other => panic!("expected room_joined, got {other:?}"),
    }
}

#[tokio::test]
async fn test_second_create_from_same_connection_is_rejected() {
    let addr = start().await;
    let mut ws = connect(&addr).await;
    let _ = create_room(&mut ws, "Alice").await;

    send(&mut ws, &ClientMessage::CreateRoom {
        player_name: "Alice".to_string(),
        max_players: 2,
    })
    .await;

    match recv(&mut ws).await {
        ServerMessage::Error { message } => {
            assert_eq!(message, "You are already in a room");
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_disconnect_broadcasts_player_left() {
    let addr = start().await;
    let (mut alice, bob, _aid, bob_id) = lobby(&addr).await;

    drop(bob); // transport close == leave

    match recv(&mut alice).await {
        ServerMessage::PlayerLeft {
            player_id,
            player_name,
        } => {
            assert_eq!(player_id, bob_id);
            assert_eq!(player_name, "Bob");
        }
        other => panic!("expected player_left, got {other:?}"),
    }
}

#[tokio::test]
async fn test_explicit_leave_broadcasts_player_left() {
    let addr = start().await;
    let (mut alice, mut bob, _aid, bob_id) = lobby(&addr).await;

    send(&mut bob, &ClientMessage::LeaveRoom).await;

    match recv(&mut alice).await {
        ServerMessage::PlayerLeft { player_id, .. } => assert_eq!(player_id, bob_id),
        other => panic!("expected player_left, got {other:?}"),
    }
}

// =========================================================================
// Malformed input
// =========================================================================

#[tokio::test]
async fn test_malformed_frame_reports_error_and_keeps_connection() {
    let addr = start().await;
    let mut ws = connect(&addr).await;

    ws.send(Message::Text("this is not an envelope".into()))
        .await
        .unwrap();

    match recv(&mut ws).await {
        ServerMessage::Error { message } => assert_eq!(message, "Invalid message"),
        other => panic!("expected error, got {other:?}"),
    }

    // The connection survived; normal traffic still works.
    let _ = create_room(&mut ws, "Alice").await;
}

#[tokio::test]
async fn test_unknown_message_type_reports_error() {
    let addr = start().await;
    let mut ws = connect(&addr).await;

    ws.send(Message::Text(
        r#"{"type":"teleport_everywhere","payload":{}}"#.into(),
    ))
    .await
    .unwrap();

    assert!(matches!(
        recv(&mut ws).await,
        ServerMessage::Error { .. }
    ));
}

// =========================================================================
// Starting the game
// =========================================================================

#[tokio::test]
async fn test_start_solo_needs_two_players() {
    let addr = start().await;
    let mut ws = connect(&addr).await;
    let _ = create_room(&mut ws, "Alice").await;

    send(&mut ws, &ClientMessage::StartGame).await;

    match recv(&mut ws).await {
        ServerMessage::Error { message } => {
            assert_eq!(message, "Need at least 2 players");
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_start_by_guest_is_rejected() {
    let addr = start().await;
    let (_alice, mut bob, _aid, _bid) = lobby(&addr).await;

    send(&mut bob, &ClientMessage::StartGame).await;

    match recv(&mut bob).await {
        ServerMessage::Error { message } => {
            assert_eq!(message, "Only the host can do that");
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_start_broadcasts_snapshot_to_everyone() {
    let addr = start().await;
    let _ = started_game(&addr).await; // the helper asserts both frames
}

// =========================================================================
// Turns, dice, and the economy over the wire
// =========================================================================

#[tokio::test]
async fn test_roll_before_start_reports_game_not_started() {
    let addr = start().await;
    let (mut alice, _bob, _aid, _bid) = lobby(&addr).await;

    send(&mut alice, &ClientMessage::RollDice).await;

    match recv(&mut alice).await {
        ServerMessage::Error { message } => assert_eq!(message, "Game has not started"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_roll_by_non_current_player_is_rejected() {
    let addr = start().await;
    let (_alice, mut bob, _aid, _bid) = started_game(&addr).await;

    send(&mut bob, &ClientMessage::RollDice).await;

    match recv(&mut bob).await {
        ServerMessage::Error { message } => assert_eq!(message, "Not your turn"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_roll_broadcasts_valid_dice_to_everyone() {
    let addr = start().await;
    let (mut alice, mut bob, alice_id, _bid) = started_game(&addr).await;

    send(&mut alice, &ClientMessage::RollDice).await;

    for ws in [&mut alice, &mut bob] {
        match recv(ws).await {
            ServerMessage::DiceRolled {
                player_id,
                dice_result,
            } => {
                assert_eq!(player_id, alice_id);
                assert!((1..=6).contains(&dice_result.dice[0]));
                assert!((1..=6).contains(&dice_result.dice[1]));
                assert_eq!(dice_result.total, dice_result.dice[0] + dice_result.dice[1]);
                assert_eq!(dice_result.is_double, dice_result.dice[0] == dice_result.dice[1]);
            }
            other => panic!("expected dice_rolled, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_first_landing_buy_or_phase_error_is_consistent() {
    let addr = start().await;
    let (mut alice, mut bob, alice_id, _bid) = started_game(&addr).await;

    send(&mut alice, &ClientMessage::RollDice).await;
    let total = match recv(&mut alice).await {
        ServerMessage::DiceRolled { dice_result, .. } => dice_result.total,
        other => panic!("expected dice_rolled, got {other:?}"),
    };
    let _ = recv(&mut bob).await; // same broadcast

    // From Start, the landing tile is the roll total. Chance tiles
    // (2, 7, 12) and the penalty corner (10) auto-complete the turn;
    // every other tile in range is an unowned city, so buying it must
    // succeed and be broadcast.
    send(&mut alice, &ClientMessage::BuyProperty { tile_id: total }).await;

    if matches!(total, 2 | 7 | 10 | 12) {
        match recv(&mut alice).await {
            ServerMessage::Error { message } => {
                assert_eq!(message, "That action is not available right now");
            }
            other => panic!("expected error, got {other:?}"),
        }
    } else {
        for ws in [&mut alice, &mut bob] {
            match recv(ws).await {
                ServerMessage::PropertyBought { player_id, tile_id } => {
                    assert_eq!(player_id, alice_id);
                    assert_eq!(tile_id, total);
                }
                other => panic!("expected property_bought, got {other:?}"),
            }
        }
    }
}

#[tokio::test]
async fn test_end_turn_passes_to_guest_and_back() {
    let addr = start().await;
    let (mut alice, mut bob, _alice_id, bob_id) = started_game(&addr).await;

    // A first roll never ends the turn on its own (no jail, no third
    // double yet), so an explicit end_turn is always legal here.
    send(&mut alice, &ClientMessage::RollDice).await;
    let _ = recv(&mut alice).await;
    let _ = recv(&mut bob).await;

    send(&mut alice, &ClientMessage::EndTurn).await;
    for ws in [&mut alice, &mut bob] {
        match recv(ws).await {
            ServerMessage::TurnChanged { current_player_id } => {
                assert_eq!(current_player_id, bob_id);
            }
            other => panic!("expected turn_changed, got {other:?}"),
        }
    }

    // Now it is Bob's turn; Alice is rejected and Bob can roll.
    send(&mut alice, &ClientMessage::RollDice).await;
    match recv(&mut alice).await {
        ServerMessage::Error { message } => assert_eq!(message, "Not your turn"),
        other => panic!("expected error, got {other:?}"),
    }

    send(&mut bob, &ClientMessage::RollDice).await;
    match recv(&mut bob).await {
        ServerMessage::DiceRolled { player_id, .. } => assert_eq!(player_id, bob_id),
        other => panic!("expected dice_rolled, got {other:?}"),
    }
    let _ = recv(&mut alice).await;
}

#[tokio::test]
async fn test_chat_reaches_the_whole_room() {
    let addr = start().await;
    let (mut alice, mut bob, _aid, bob_id) = lobby(&addr).await;

    send(&mut bob, &ClientMessage::Chat {
        message: "good luck!".to_string(),
    })
    .await;

    for ws in [&mut alice, &mut bob] {
        match recv(ws).await {
            ServerMessage::ChatMessage {
                player_id,
                player_name,
                message,
                timestamp,
            } => {
                assert_eq!(player_id, bob_id);
                assert_eq!(player_name, "Bob");
                assert_eq!(message, "good luck!");
                assert!(timestamp > 0);
            }
            other => panic!("expected chat_message, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_chat_outside_a_room_is_rejected() {
    let addr = start().await;
    let mut ws = connect(&addr).await;

    send(&mut ws, &ClientMessage::Chat {
        message: "hello?".to_string(),
    })
    .await;

    match recv(&mut ws).await {
        ServerMessage::Error { message } => assert_eq!(message, "You are not in this room"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rooms_are_isolated_from_each_other() {
    let addr = start().await;
    let (mut alice, mut bob, _a, _b) = lobby(&addr).await;

    // A second, unrelated room with its own traffic.
    let (mut carol, mut dave, _c, _d) = lobby(&addr).await;
    send(&mut carol, &ClientMessage::Chat {
        message: "room two only".to_string(),
    })
    .await;
    let _ = recv(&mut carol).await;
    let _ = recv(&mut dave).await;

    // Room one hears nothing about it.
    send(&mut bob, &ClientMessage::Chat {
        message: "room one only".to_string(),
    })
    .await;
    for ws in [&mut alice, &mut bob] {
        match recv(ws).await {
            ServerMessage::ChatMessage { message, .. } => {
                assert_eq!(message, "room one only");
            }
            other => panic!("expected chat_message, got {other:?}"),
        }
    }
}
