//! The static board: 40 tiles and the game's fixed numbers.
//!
//! Static data never mutates; per-tile dynamic state (owner, building
//! level) lives in the [`GameSession`](crate::GameSession).

/// Number of tiles on the board.
pub const TILE_COUNT: u8 = 40;

/// Credited once each time a player passes (or is carried past) Start.
pub const SALARY: i64 = 200_000;

/// Each player's bankroll at game start.
pub const STARTING_MONEY: i64 = 2_000_000;

/// Building cost is `BUILD_COST_STEP * (current_level + 1)`.
pub const BUILD_COST_STEP: i64 = 100_000;

/// Buildings cap out at this level.
pub const MAX_BUILDING_LEVEL: u8 = 5;

/// The penalty tile players are sent to on a third consecutive double.
pub const JAIL_TILE: u8 = 10;

/// Turns a freshly jailed player sits out (at most).
pub const JAIL_TURNS: u8 = 3;

/// The doubles streak counter caps here; the next double jails.
pub const MAX_DOUBLES_STREAK: u8 = 2;

/// The teleport tile; landing here carries the player to Start.
pub const CRUISE_TILE: u8 = 20;

/// What kind of tile this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileCategory {
    /// Purchasable property; collects rent, can be built on.
    City,
    /// Chance-card tile. Card effects are not part of this core; the
    /// tile is inert.
    Chance,
    /// Corner / effect tile: Start, the penalty island, the cruise, etc.
    Special,
}

/// Static configuration of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDef {
    pub id: u8,
    pub name: &'static str,
    pub category: TileCategory,
    /// Purchase price; 0 for non-city tiles.
    pub price: i64,
    /// Rent at building level 0; 0 for non-city tiles.
    pub base_rent: i64,
}

const fn city(id: u8, name: &'static str, price: i64) -> TileDef {
    TileDef {
        id,
        name,
        category: TileCategory::City,
        price,
        base_rent: price / 10,
    }
}

const fn chance(id: u8) -> TileDef {
    TileDef {
        id,
        name: "Chance",
        category: TileCategory::Chance,
        price: 0,
        base_rent: 0,
    }
}

const fn special(id: u8, name: &'static str) -> TileDef {
    TileDef {
        id,
        name,
        category: TileCategory::Special,
        price: 0,
        base_rent: 0,
    }
}

/// The board, indexed by tile id. Corners at 0/10/20/30, chance tiles
/// every fifth-ish step, cities (ascending price) everywhere else.
pub static TILES: [TileDef; TILE_COUNT as usize] = [
    special(0, "Start"),
    city(1, "Taipei", 50_000),
    chance(2),
    city(3, "Beijing", 80_000),
    city(4, "Manila", 80_000),
    city(5, "Jeju", 100_000),
    city(6, "Singapore", 100_000),
    chance(7),
    city(8, "Cairo", 100_000),
    city(9, "Istanbul", 120_000),
    special(10, "Penalty Island"),
    city(11, "Athens", 140_000),
    chance(12),
    city(13, "Copenhagen", 160_000),
    city(14, "Stockholm", 160_000),
    city(15, "Bern", 180_000),
    city(16, "Berlin", 180_000),
    chance(17),
    city(18, "Ottawa", 200_000),
    city(19, "Buenos Aires", 200_000),
    special(20, "World Cruise"),
    city(21, "Sao Paulo", 220_000),
    chance(22),
    city(23, "Sydney", 240_000),
    city(24, "Busan", 240_000),
    city(25, "Hawaii", 260_000),
    city(26, "Lisbon", 260_000),
    chance(27),
    city(28, "Madrid", 280_000),
    city(29, "Tokyo", 300_000),
    special(30, "Grand Resort"),
    city(31, "Paris", 320_000),
    chance(32),
    city(33, "Rome", 320_000),
    city(34, "Hamburg", 340_000),
    city(35, "London", 350_000),
    city(36, "New York", 380_000),
    chance(37),
    city(38, "Moscow", 380_000),
    city(39, "Seoul", 400_000),
];

/// Looks up a tile by id.
pub fn tile(id: u8) -> Option<&'static TileDef> {
    TILES.get(id as usize)
}
