//! Validated dice rolls.
//!
//! The engine is agnostic to where a roll came from (fair RNG or an
//! operator override). A roll may carry only its total, or the two dice
//! when the caller has them; hardway bets need the latter to tell a hard
//! number from an easy one.

use serde::{Deserialize, Serialize};

use super::bet::Point;
use super::error::CrapsError;

/// A validated roll of two six-sided dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    total: u8,
    dice: Option<(u8, u8)>,
}

impl Roll {
    /// A roll known only by its total. Fails outside 2..=12.
    pub const fn from_total(total: u8) -> Result<Self, CrapsError> {
        if total < 2 || total > 12 {
            return Err(CrapsError::InvalidRoll(total));
        }
        Ok(Self { total, dice: None })
    }

    /// A roll from two dice. Fails when either die is outside 1..=6.
    pub const fn from_dice(die1: u8, die2: u8) -> Result<Self, CrapsError> {
        if die1 < 1 || die1 > 6 {
            return Err(CrapsError::InvalidDie(die1));
        }
        if die2 < 1 || die2 > 6 {
            return Err(CrapsError::InvalidDie(die2));
        }
        Ok(Self {
            total: die1 + die2,
            dice: Some((die1, die2)),
        })
    }

    pub const fn total(self) -> u8 {
        self.total
    }

    pub const fn dice(self) -> Option<(u8, u8)> {
        self.dice
    }

    /// `Some(true)` for doubles, `Some(false)` otherwise, `None` when only
    /// the total is known.
    pub const fn is_hard(self) -> Option<bool> {
        match self.dice {
            Some((a, b)) => Some(a == b),
            None => None,
        }
    }

    /// 7 or 11.
    pub const fn is_natural(self) -> bool {
        matches!(self.total, 7 | 11)
    }

    /// 2, 3 or 12.
    pub const fn is_craps(self) -> bool {
        matches!(self.total, 2 | 3 | 12)
    }

    pub const fn is_seven(self) -> bool {
        self.total == 7
    }

    /// The point number rolled, if the total is one.
    pub fn point(self) -> Option<Point> {
        Point::from_total(self.total)
    }
}
