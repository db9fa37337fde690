//! Dice Port - Roll Source Interface
//!
//! The engine does not care where a roll came from. Production uses a
//! fair RNG; tests and operator tooling script the dice.

/// Supplies the two dice for the next roll.
///
/// Implementations must return values in 1..=6; the session validates
/// them anyway and rejects anything else as `CrapsError::InvalidDie`.
pub trait DiceSource: Send {
  fn roll(&mut self) -> (u8, u8);
}
