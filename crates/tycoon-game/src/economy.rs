//! The economy resolver: every funds-affecting mutation.
//!
//! Purchases and builds are player requests validated here; rent is
//! applied automatically by the turn engine when a player lands on
//! someone else's city. All three follow validate-then-commit: nothing
//! is debited, credited, or recorded until every check has passed.

use tycoon_protocol::{PlayerId, ServerMessage};

use crate::board::{self, TileCategory};
use crate::{GameError, GameSession, TurnPhase};

/// Rent owed on a tile: `floor(base_rent * (1 + 0.5 * level))`, kept in
/// integer arithmetic.
pub fn rent(base_rent: i64, level: u8) -> i64 {
    base_rent * (2 + i64::from(level)) / 2
}

impl GameSession {
    /// Buys the unowned city the current player just landed on.
    ///
    /// # Errors
    /// `NotYourTurn` / `WrongPhase` outside the acting window,
    /// `WrongTile` unless `tile_id` is the landed tile, `NotPurchasable`
    /// for non-city tiles, `AlreadyOwned`, or `InsufficientFunds`.
    pub fn buy_property(
        &mut self,
        player: &PlayerId,
        tile_id: u8,
    ) -> Result<Vec<ServerMessage>, GameError> {
        let idx = self.require_current(player)?;
        if self.phase != TurnPhase::AwaitingAction {
            return Err(GameError::WrongPhase);
        }
        if self.players[idx].position != tile_id {
            return Err(GameError::WrongTile);
        }
        let tile = board::tile(tile_id).ok_or(GameError::UnknownTile(tile_id))?;
        if tile.category != TileCategory::City {
            return Err(GameError::NotPurchasable);
        }
        if self.tiles[tile_id as usize].owner.is_some() {
            return Err(GameError::AlreadyOwned);
        }
        if self.players[idx].money < tile.price {
            return Err(GameError::InsufficientFunds);
        }

        self.players[idx].money -= tile.price;
        self.players[idx].holdings.insert(tile_id);
        self.tiles[tile_id as usize].owner = Some(player.clone());
        self.phase = TurnPhase::TurnComplete;

        tracing::debug!(%player, tile = tile.name, price = tile.price, "property bought");
        Ok(vec![ServerMessage::PropertyBought {
            player_id: player.clone(),
            tile_id,
        }])
    }

    /// Adds one building level to the owned city the current player just
    /// landed on. Cost rises with the level already in place.
    ///
    /// # Errors
    /// `NotYourTurn` / `WrongPhase` / `WrongTile` as for buying,
    /// `NotOwner` unless the player owns the tile, `MaxBuildingLevel`
    /// at the cap, or `InsufficientFunds`.
    pub fn build(
        &mut self,
        player: &PlayerId,
        tile_id: u8,
    ) -> Result<Vec<ServerMessage>, GameError> {
        let idx = self.require_current(player)?;
        if self.phase != TurnPhase::AwaitingAction {
            return Err(GameError::WrongPhase);
        }
        if self.players[idx].position != tile_id {
            return Err(GameError::WrongTile);
        }
        let tile = board::tile(tile_id).ok_or(GameError::UnknownTile(tile_id))?;
        if tile.category != TileCategory::City {
            return Err(GameError::NotPurchasable);
        }
        if self.tiles[tile_id as usize].owner.as_ref() != Some(player) {
            return Err(GameError::NotOwner);
        }
        let level = self.tiles[tile_id as usize].level;
        if level >= board::MAX_BUILDING_LEVEL {
            return Err(GameError::MaxBuildingLevel);
        }
        let cost = board::BUILD_COST_STEP * i64::from(level + 1);
        if self.players[idx].money < cost {
            return Err(GameError::InsufficientFunds);
        }

        self.players[idx].money -= cost;
        self.tiles[tile_id as usize].level = level + 1;
        self.phase = TurnPhase::TurnComplete;

        tracing::debug!(%player, tile = tile.name, level = level + 1, cost, "building built");
        Ok(vec![ServerMessage::BuildingBuilt {
            player_id: player.clone(),
            tile_id,
        }])
    }

    /// Transfers rent from the player at `payer_idx` to `owner` for
    /// landing on `tile_id`. The owner is credited in full; the payer is
    /// clamped at zero (bankruptcy handling is out of scope).
    pub(crate) fn pay_rent(
        &mut self,
        payer_idx: usize,
        owner: &PlayerId,
        tile_id: u8,
    ) -> Result<(), GameError> {
        let tile = board::tile(tile_id).ok_or(GameError::UnknownTile(tile_id))?;
        let owner_idx = self
            .players
            .iter()
            .position(|p| p.id == *owner)
            .ok_or(GameError::UnknownPlayer)?;

        let due = rent(tile.base_rent, self.tiles[tile_id as usize].level);
        self.players[payer_idx].money = (self.players[payer_idx].money - due).max(0);
        self.players[owner_idx].money += due;

        tracing::debug!(
            payer = %self.players[payer_idx].id,
            %owner,
            tile = tile.name,
            rent = due,
            "rent transferred"
        );
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
