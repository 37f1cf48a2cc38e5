//! Error types for game operations.
//!
//! The `Display` text of each variant is the exact message the client
//! sees in an `error` frame, so these read as sentences for players,
//! not log fragments.

/// Why a game request was rejected.
///
/// Rejections never mutate the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The acting player does not hold the turn.
    #[error("Not your turn")]
    NotYourTurn,

    /// The action is not legal in the current turn phase.
    #[error("That action is not available right now")]
    WrongPhase,

    /// The action targets a tile the player is not standing on.
    #[error("You are not on that tile")]
    WrongTile,

    /// Only city tiles can be bought or built on.
    #[error("That tile cannot be purchased")]
    NotPurchasable,

    /// Someone already owns the tile.
    #[error("Property already owned")]
    AlreadyOwned,

    /// Building requires owning the tile.
    #[error("You do not own that tile")]
    NotOwner,

    /// The building is already at the top level.
    #[error("Building is already at maximum level")]
    MaxBuildingLevel,

    /// The player cannot afford the purchase or build.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// The acting player is not part of this session.
    #[error("You are not in this game")]
    UnknownPlayer,

    /// A tile id outside the board was reached internally. Clients can
    /// never trigger this; it indicates a server defect and is logged
    /// as such by the room layer.
    #[error("Internal error")]
    UnknownTile(u8),
}
