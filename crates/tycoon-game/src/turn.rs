//! The turn engine: who may act, and what a roll does.
//!
//! ```text
//! WaitingForRoll → ResolvingMove → AwaitingAction → TurnComplete
//!       ↑                                │               │
//!       └────────────── end_turn ────────┴───────────────┘
//! ```
//!
//! `ResolvingMove` is internal: a roll resolves its movement and landing
//! synchronously, so observers only ever see the other three phases.
//! There is no terminal phase — the cycle runs until the room dies.

use std::fmt;

use tycoon_protocol::{DiceResult, PlayerId, ServerMessage};

use crate::{GameError, GameSession, board};
use crate::board::TileCategory;

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// The current player has not rolled yet.
    WaitingForRoll,
    /// Movement and landing effects are being applied (transient).
    ResolvingMove,
    /// The landed tile offers an optional action (buy or build).
    AwaitingAction,
    /// Nothing left to do but end the turn.
    TurnComplete,
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::WaitingForRoll => "WaitingForRoll",
            Self::ResolvingMove => "ResolvingMove",
            Self::AwaitingAction => "AwaitingAction",
            Self::TurnComplete => "TurnComplete",
        };
        write!(f, "{s}")
    }
}

impl GameSession {
    /// Applies the current player's dice roll.
    ///
    /// The roll itself is an input so callers control the randomness
    /// (the room rolls via [`crate::dice::roll`]; tests pass fixed
    /// values). Returns the events in the order the mutations were
    /// committed: `dice_rolled` first, then `turn_changed` whenever the
    /// engine ends the turn itself (jail skip, third double).
    ///
    /// # Errors
    /// [`GameError::NotYourTurn`] for anyone but the current player,
    /// [`GameError::WrongPhase`] outside `WaitingForRoll`. Rejections
    /// mutate nothing.
    pub fn roll_dice(
        &mut self,
        player: &PlayerId,
        roll: DiceResult,
    ) -> Result<Vec<ServerMessage>, GameError> {
        let idx = self.require_current(player)?;
        if self.phase != TurnPhase::WaitingForRoll {
            return Err(GameError::WrongPhase);
        }

        self.last_roll = Some(roll);
        let mut events = vec![ServerMessage::DiceRolled {
            player_id: player.clone(),
            dice_result: roll,
        }];

        // Jail handling precedes normal movement. A double springs the
        // player; a non-double burns one confined turn, releasing them
        // on the last. Jail rolls never feed the doubles streak.
        if self.players[idx].in_jail() {
            if roll.is_double {
                self.players[idx].jail_turns = 0;
                tracing::debug!(%player, "released from jail on a double");
            } else {
                self.players[idx].jail_turns -= 1;
                if self.players[idx].in_jail() {
                    events.push(self.advance_turn());
                    return Ok(events);
                }
                tracing::debug!(%player, "released from jail, time served");
            }
        } else if roll.is_double {
            if self.players[idx].doubles_streak >= board::MAX_DOUBLES_STREAK {
                // Third consecutive double: straight to the penalty
                // tile, no move resolution, turn over.
                let p = &mut self.players[idx];
                p.doubles_streak = 0;
                p.position = board::JAIL_TILE;
                p.jail_turns = board::JAIL_TURNS;
                tracing::debug!(%player, "third consecutive double, jailed");
                events.push(self.advance_turn());
                return Ok(events);
            }
            self.players[idx].doubles_streak += 1;
        } else {
            self.players[idx].doubles_streak = 0;
        }

        self.phase = TurnPhase::ResolvingMove;
        self.move_and_land(idx, roll.total)?;
        Ok(events)
    }

    /// Ends the current player's turn and hands it to the next player
    /// in roster order.
    ///
    /// # Errors
    /// [`GameError::NotYourTurn`] for anyone else (repeating the request
    /// never moves the turn), [`GameError::WrongPhase`] before the roll
    /// has been resolved.
    pub fn end_turn(&mut self, player: &PlayerId) -> Result<Vec<ServerMessage>, GameError> {
        self.require_current(player)?;
        if !matches!(
            self.phase,
            TurnPhase::AwaitingAction | TurnPhase::TurnComplete
        ) {
            return Err(GameError::WrongPhase);
        }
        Ok(vec![self.advance_turn()])
    }

    /// Moves the cursor to the next roster entry and resets turn state.
    pub(crate) fn advance_turn(&mut self) -> ServerMessage {
        self.current = (self.current + 1) % self.players.len();
        self.phase = TurnPhase::WaitingForRoll;
        self.last_roll = None;
        self.turn_serial += 1;
        let next = self.players[self.current].id.clone();
        tracing::debug!(current = %next, "turn advanced");
        ServerMessage::TurnChanged {
            current_player_id: next,
        }
    }

    /// Steps the player forward and applies the landing.
    fn move_and_land(&mut self, idx: usize, steps: u8) -> Result<(), GameError> {
        let old = self.players[idx].position;
        let new = (old + steps) % board::TILE_COUNT;
        if new < old {
            // Wrapped past Start: salary, exactly once.
            self.players[idx].money += board::SALARY;
        }
        self.players[idx].position = new;
        self.land(idx)
    }

    /// Applies the effect of the tile the player now stands on and picks
    /// the resulting phase.
    fn land(&mut self, idx: usize) -> Result<(), GameError> {
        let pos = self.players[idx].position;
        let tile = board::tile(pos).ok_or(GameError::UnknownTile(pos))?;

        match tile.category {
            TileCategory::City => {
                let owner = self.tiles[pos as usize].owner.clone();
                match owner {
                    // Unowned: buying is on offer.
                    None => self.phase = TurnPhase::AwaitingAction,
                    // Own tile: building is on offer.
                    Some(ref o) if *o == self.players[idx].id => {
                        self.phase = TurnPhase::AwaitingAction;
                    }
                    // Someone else's: rent is automatic and immediate.
                    Some(owner) => {
                        self.pay_rent(idx, &owner, pos)?;
                        self.phase = TurnPhase::TurnComplete;
                    }
                }
            }
            // Chance cards are out of scope; the tile is inert.
            TileCategory::Chance => self.phase = TurnPhase::TurnComplete,
            TileCategory::Special => {
                if pos == board::CRUISE_TILE {
                    // The cruise carries the player home to Start,
                    // salary included.
                    self.players[idx].position = 0;
                    self.players[idx].money += board::SALARY;
                    tracing::debug!(
                        player = %self.players[idx].id,
                        "world cruise back to Start"
                    );
                }
                self.phase = TurnPhase::TurnComplete;
            }
        }
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
