//! Dice rolls.

use rand::Rng;
use tycoon_protocol::DiceResult;

/// Rolls two independent six-sided dice.
pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> DiceResult {
    let d1: u8 = rng.random_range(1..=6);
    let d2: u8 = rng.random_range(1..=6);
    DiceResult {
        dice: [d1, d2],
        total: d1 + d2,
        is_double: d1 == d2,
    }
}
