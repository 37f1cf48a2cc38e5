//! Room actor: an isolated Tokio task that owns one room.
//!
//! Each room runs in its own task and talks to the outside world only
//! through an mpsc command channel. Serializing every mutation through
//! that channel is what gives a room its guarantees: no interleaving
//! between, say, a roll and a leave, and a broadcast order equal to the
//! commit order.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{mpsc, oneshot};
use tycoon_game::{GameError, GameSession, dice};
use tycoon_protocol::{PlayerId, RoomCode, RoomPlayer, ServerMessage};

use crate::{RoomConfig, RoomError};

/// Channel sender for delivering server messages to one player's
/// connection handler.
pub type PlayerSender = mpsc::UnboundedSender<ServerMessage>;

/// An in-game request routed to the turn engine / economy resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    RollDice,
    BuyProperty { tile_id: u8 },
    Build { tile_id: u8 },
    EndTurn,
}

/// What a successful join hands back for the `room_joined` reply.
#[derive(Debug, Clone)]
pub struct JoinInfo {
    /// The roster after the join, in join (= turn) order.
    pub players: Vec<RoomPlayer>,
}

/// A snapshot of room metadata (not the game state itself).
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub code: RoomCode,
    pub player_count: usize,
    pub max_players: u8,
    pub started: bool,
}

/// Commands sent to a room actor through its channel.
pub(crate) enum RoomCommand {
    Join {
        player_id: PlayerId,
        player_name: String,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<JoinInfo, RoomError>>,
    },
    Leave {
        player_id: PlayerId,
        /// Replies with `true` when the roster emptied and the room
        /// should be destroyed.
        reply: oneshot::Sender<Result<bool, RoomError>>,
    },
    Start {
        player_id: PlayerId,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    Action {
        player_id: PlayerId,
        action: PlayerAction,
    },
    Chat {
        player_id: PlayerId,
        message: String,
    },
    /// Fired by the forced end-turn timer after the current player
    /// disconnected. `serial` guards against the turn having moved on.
    ForceEndTurn { serial: u64 },
    GetInfo {
        reply: oneshot::Sender<RoomInfo>,
    },
    Shutdown,
}

/// Handle to a running room actor; cheap to clone.
#[derive(Clone)]
pub struct RoomHandle {
    code: RoomCode,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Returns the room's code.
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// Adds a player to the room.
    pub async fn join(
        &self,
        player_id: PlayerId,
        player_name: String,
        sender: PlayerSender,
    ) -> Result<JoinInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                player_id,
                player_name,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?
    }

    /// Removes a player. Returns `true` if the roster is now empty.
    pub async fn leave(&self, player_id: PlayerId) -> Result<bool, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                player_id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?
    }

    /// Starts the game (host only).
    pub async fn start(&self, player_id: PlayerId) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Start {
                player_id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?
    }

    /// Routes an in-game action (fire-and-forget: outcomes and
    /// rejections travel back over the player's message channel).
    pub async fn action(
        &self,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Action { player_id, action })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }

    /// Broadcasts a chat line (fire-and-forget).
    pub async fn chat(&self, player_id: PlayerId, message: String) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Chat { player_id, message })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }

    /// Requests the current room info.
    pub async fn get_info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::GetInfo { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }

    /// Tells the room to shut down.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }
}

/// One roster slot. Join order is turn order; the host is always the
/// earliest-joined remaining player (slot 0), which is what makes host
/// transfer on leave a free consequence of `Vec::remove`.
struct RosterEntry {
    id: PlayerId,
    name: String,
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    code: RoomCode,
    config: RoomConfig,
    max_players: u8,
    roster: Vec<RosterEntry>,
    /// Per-player outbound channels — the broadcast dispatcher's fanout
    /// list. Entries are lazily dropped when a channel is closed.
    senders: HashMap<PlayerId, PlayerSender>,
    session: Option<GameSession>,
    receiver: mpsc::Receiver<RoomCommand>,
    /// For the forced end-turn timer to message the actor back. Weak so
    /// the actor's own handle never keeps a destroyed room alive.
    self_sender: mpsc::WeakSender<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop, processing commands until shutdown.
    async fn run(mut self) {
        tracing::info!(code = %self.code, "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    player_id,
                    player_name,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(player_id, player_name, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Leave { player_id, reply } => {
                    let result = self.handle_leave(&player_id);
                    let _ = reply.send(result);
                }
                RoomCommand::Start { player_id, reply } => {
                    let result = self.handle_start(&player_id);
                    let _ = reply.send(result);
                }
                RoomCommand::Action { player_id, action } => {
                    self.handle_action(&player_id, action);
                }
                RoomCommand::Chat { player_id, message } => {
                    self.handle_chat(&player_id, message);
                }
                RoomCommand::ForceEndTurn { serial } => {
                    self.handle_force_end_turn(serial);
                }
                RoomCommand::GetInfo { reply } => {
                    let _ = reply.send(self.info());
                }
                RoomCommand::Shutdown => {
                    tracing::info!(code = %self.code, "room shutting down");
                    break;
                }
            }
        }

        tracing::info!(code = %self.code, "room actor stopped");
    }

    fn handle_join(
        &mut self,
        player_id: PlayerId,
        player_name: String,
        sender: PlayerSender,
    ) -> Result<JoinInfo, RoomError> {
        if self.session.is_some() {
            return Err(RoomError::GameAlreadyStarted);
        }
        if self.roster.len() >= self.max_players as usize {
            return Err(RoomError::RoomFull);
        }

        // Existing members hear about the newcomer; the newcomer gets
        // the roster in the join reply instead.
        self.broadcast(ServerMessage::PlayerJoined {
            player_id: player_id.clone(),
            player_name: player_name.clone(),
        });

        self.roster.push(RosterEntry {
            id: player_id.clone(),
            name: player_name,
        });
        self.senders.insert(player_id.clone(), sender);

        tracing::info!(
            code = %self.code,
            %player_id,
            players = self.roster.len(),
            "player joined"
        );

        Ok(JoinInfo {
            players: self.roster_players(),
        })
    }

    fn handle_leave(&mut self, player_id: &PlayerId) -> Result<bool, RoomError> {
        let idx = self
            .roster
            .iter()
            .position(|e| e.id == *player_id)
            .ok_or(RoomError::NotInRoom)?;

        let entry = self.roster.remove(idx);
        self.senders.remove(player_id);

        tracing::info!(
            code = %self.code,
            %player_id,
            players = self.roster.len(),
            "player left"
        );

        self.broadcast(ServerMessage::PlayerLeft {
            player_id: entry.id,
            player_name: entry.name,
        });

        let removed = self
            .session
            .as_mut()
            .and_then(|session| session.remove_player(player_id));
        if let Some(removed) = removed {
            if removed.needs_forced_advance {
                self.schedule_forced_end_turn(removed.serial);
            }
        }

        Ok(self.roster.is_empty())
    }

    fn handle_start(&mut self, player_id: &PlayerId) -> Result<(), RoomError> {
        if self.session.is_some() {
            return Err(RoomError::GameAlreadyStarted);
        }
        match self.roster.first() {
            Some(host) if host.id == *player_id => {}
            Some(_) => return Err(RoomError::NotHost),
            None => return Err(RoomError::NotInRoom),
        }
        if self.roster.len() < crate::config::MIN_PLAYERS as usize {
            return Err(RoomError::NotEnoughPlayers);
        }

        let session = GameSession::new(
            self.roster
                .iter()
                .map(|e| (e.id.clone(), e.name.clone())),
        );
        let state = session.snapshot();
        self.session = Some(session);

        tracing::info!(
            code = %self.code,
            players = self.roster.len(),
            "game started"
        );
        self.broadcast(ServerMessage::GameStarted { state });
        Ok(())
    }

    fn handle_action(&mut self, player_id: &PlayerId, action: PlayerAction) {
        if !self.roster.iter().any(|e| e.id == *player_id) {
            tracing::warn!(code = %self.code, %player_id, "action from non-member, ignoring");
            return;
        }

        let Some(session) = self.session.as_mut() else {
            self.send_to(
                player_id,
                ServerMessage::Error {
                    message: RoomError::GameNotStarted.to_string(),
                },
            );
            return;
        };

        let result = match action {
            PlayerAction::RollDice => {
                let roll = dice::roll(&mut rand::rng());
                session.roll_dice(player_id, roll)
            }
            PlayerAction::BuyProperty { tile_id } => session.buy_property(player_id, tile_id),
            PlayerAction::Build { tile_id } => session.build(player_id, tile_id),
            PlayerAction::EndTurn => session.end_turn(player_id),
        };

        match result {
            Ok(events) => {
                // Commit order is broadcast order.
                for event in events {
                    self.broadcast(event);
                }
            }
            Err(e) => {
                if let GameError::UnknownTile(tile_id) = e {
                    // Unreachable from client input; a server defect.
                    tracing::error!(code = %self.code, tile_id, "resolver hit unknown tile");
                }
                tracing::debug!(code = %self.code, %player_id, error = %e, "action rejected");
                self.send_to(
                    player_id,
                    ServerMessage::Error {
                        message: e.to_string(),
                    },
                );
            }
        }
    }

    fn handle_chat(&mut self, player_id: &PlayerId, message: String) {
        let Some(entry) = self.roster.iter().find(|e| e.id == *player_id) else {
            tracing::warn!(code = %self.code, %player_id, "chat from non-member, ignoring");
            return;
        };
        let msg = ServerMessage::ChatMessage {
            player_id: entry.id.clone(),
            player_name: entry.name.clone(),
            message,
            timestamp: unix_millis(),
        };
        self.broadcast(msg);
    }

    fn handle_force_end_turn(&mut self, serial: u64) {
        let event = self
            .session
            .as_mut()
            .and_then(|session| session.force_advance(serial));
        if let Some(event) = event {
            tracing::info!(code = %self.code, "forced end of departed player's turn");
            self.broadcast(event);
        }
    }

    /// Arms the one-shot timer that ends a departed current player's
    /// turn after the configured delay.
    fn schedule_forced_end_turn(&self, serial: u64) {
        let weak = self.self_sender.clone();
        let delay = self.config.forced_end_turn_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = weak.upgrade() {
                let _ = tx.send(RoomCommand::ForceEndTurn { serial }).await;
            }
        });
    }

    /// Delivers one event to every registered connection, in roster
    /// order. Closed channels are skipped and lazily dropped; one dead
    /// connection never blocks the rest.
    fn broadcast(&mut self, msg: ServerMessage) {
        let mut dead: Vec<PlayerId> = Vec::new();
        for entry in &self.roster {
            if let Some(sender) = self.senders.get(&entry.id) {
                if sender.send(msg.clone()).is_err() {
                    dead.push(entry.id.clone());
                }
            }
        }
        for id in dead {
            tracing::debug!(code = %self.code, player_id = %id, "dropping closed channel");
            self.senders.remove(&id);
        }
    }

    /// Sends one message to a single player; drops it if their channel
    /// is gone.
    fn send_to(&mut self, player_id: &PlayerId, msg: ServerMessage) {
        if let Some(sender) = self.senders.get(player_id) {
            if sender.send(msg).is_err() {
                self.senders.remove(player_id);
            }
        }
    }

    fn roster_players(&self) -> Vec<RoomPlayer> {
        self.roster
            .iter()
            .enumerate()
            .map(|(i, e)| RoomPlayer {
                player_id: e.id.clone(),
                player_name: e.name.clone(),
                is_host: i == 0,
            })
            .collect()
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            code: self.code.clone(),
            player_count: self.roster.len(),
            max_players: self.max_players,
            started: self.session.is_some(),
        }
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Spawns a new room actor task and returns a handle to it.
pub(crate) fn spawn_room(code: RoomCode, max_players: u8, config: RoomConfig) -> RoomHandle {
    let (tx, rx) = mpsc::channel(config.channel_size);

    let actor = RoomActor {
        code: code.clone(),
        config,
        max_players,
        roster: Vec::new(),
        senders: HashMap::new(),
        session: None,
        receiver: rx,
        self_sender: tx.downgrade(),
    };

    tokio::spawn(actor.run());

    RoomHandle { code, sender: tx }
}
