//! Payout tables.
//!
//! All profits are computed in `Decimal` and rounded down to the cent.
//! Multipliers are kept as numerator/denominator pairs so that 7/6 of a
//! stake is exact before rounding.

use rust_decimal::{Decimal, RoundingStrategy};

use super::bet::{HardNumber, Point, Proposition};

/// Place 4/10 pay 9:5.
pub const PLACE_4_10: (u32, u32) = (9, 5);
/// Place 5/9 pay 7:5.
pub const PLACE_5_9: (u32, u32) = (7, 5);
/// Place 6/8 pay 7:6.
pub const PLACE_6_8: (u32, u32) = (7, 6);

/// Field pays 2:1 on 2 and 12.
pub const FIELD_DOUBLE: u32 = 2;

/// Hard 4/10 pay 7:1.
pub const HARD_4_10_TO_1: u32 = 7;
/// Hard 6/8 pay 9:1.
pub const HARD_6_8_TO_1: u32 = 9;

pub const ANY_SEVEN_TO_1: u32 = 4;
pub const ANY_CRAPS_TO_1: u32 = 7;
pub const ELEVEN_TO_1: u32 = 15;
pub const ACE_DEUCE_TO_1: u32 = 15;

/// Pass line odds on 4/10 pay 2:1.
pub const ODDS_4_10: (u32, u32) = (2, 1);
/// Pass line odds on 5/9 pay 3:2.
pub const ODDS_5_9: (u32, u32) = (3, 2);
/// Pass line odds on 6/8 pay 6:5.
pub const ODDS_6_8: (u32, u32) = (6, 5);

/// Rounds a profit down to whole cents.
pub fn floor_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity)
}

fn ratio(stake: Decimal, (num, den): (u32, u32)) -> Decimal {
    floor_cents(stake * Decimal::from(num) / Decimal::from(den))
}

/// Pass line, don't pass, come, don't come and their travelled versions pay 1:1.
pub fn even_money(stake: Decimal) -> Decimal {
    stake
}

/// Place bet odds for a point number.
pub const fn place_odds(point: Point) -> (u32, u32) {
    match point {
        Point::Four | Point::Ten => PLACE_4_10,
        Point::Five | Point::Nine => PLACE_5_9,
        Point::Six | Point::Eight => PLACE_6_8,
    }
}

/// Profit of a winning place bet: floor(stake × odds × 100) / 100.
pub fn place_profit(point: Point, stake: Decimal) -> Decimal {
    ratio(stake, place_odds(point))
}

/// True odds of making `point` before a 7.
pub const fn true_odds(point: Point) -> (u32, u32) {
    match point {
        Point::Four | Point::Ten => ODDS_4_10,
        Point::Five | Point::Nine => ODDS_5_9,
        Point::Six | Point::Eight => ODDS_6_8,
    }
}

/// Profit of pass line odds when the point is made.
pub fn odds_profit(point: Point, stake: Decimal) -> Decimal {
    ratio(stake, true_odds(point))
}

/// Profit of a field bet, or `None` when the field loses (5, 6, 7, 8).
pub fn field_profit(total: u8, stake: Decimal) -> Option<Decimal> {
    match total {
        2 | 12 => Some(stake * Decimal::from(FIELD_DOUBLE)),
        3 | 4 | 9 | 10 | 11 => Some(even_money(stake)),
        _ => None,
    }
}

/// Profit of a winning hardway.
pub fn hardway_profit(number: HardNumber, stake: Decimal) -> Decimal {
    let to_one = match number {
        HardNumber::Four | HardNumber::Ten => HARD_4_10_TO_1,
        HardNumber::Six | HardNumber::Eight => HARD_6_8_TO_1,
    };
    stake * Decimal::from(to_one)
}

/// Profit of a winning proposition.
pub fn proposition_profit(prop: Proposition, stake: Decimal) -> Decimal {
    let to_one = match prop {
        Proposition::AnySeven => ANY_SEVEN_TO_1,
        Proposition::AnyCraps => ANY_CRAPS_TO_1,
        Proposition::Eleven => ELEVEN_TO_1,
        Proposition::AceDeuce => ACE_DEUCE_TO_1,
    };
    stake * Decimal::from(to_one)
}
