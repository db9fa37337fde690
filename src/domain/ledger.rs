//! Wager ledger: stake amounts keyed by bet.
//!
//! A plain data container. It never touches the bankroll; callers credit
//! or debit the player around `place_stake` / `remove_stake`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bet::BetKey;
use super::error::CrapsError;

/// Current stakes on the table.
///
/// Backed by a `BTreeMap` so iteration, serialization and therefore the
/// order of settlement events are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WagerLedger {
    stakes: BTreeMap<BetKey, Decimal>,
}

impl WagerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the stake on `key`, creating the entry if needed.
    pub fn place_stake(&mut self, key: BetKey, amount: Decimal) -> Result<(), CrapsError> {
        if amount <= Decimal::ZERO {
            return Err(CrapsError::NonPositiveStake { key, amount });
        }
        *self.stakes.entry(key).or_insert(Decimal::ZERO) += amount;
        Ok(())
    }

    /// Removes the stake on `key` and returns it (zero when absent).
    pub fn remove_stake(&mut self, key: BetKey) -> Decimal {
        self.stakes.remove(&key).unwrap_or(Decimal::ZERO)
    }

    /// Moves the stake from `from` onto `to`. No-op when `from` holds nothing.
    pub fn migrate_stake(&mut self, from: BetKey, to: BetKey) {
        if from == to {
            return;
        }
        if let Some(amount) = self.stakes.remove(&from) {
            *self.stakes.entry(to).or_insert(Decimal::ZERO) += amount;
        }
    }

    /// Sum of every stake on the table.
    pub fn total_staked(&self) -> Decimal {
        self.stakes.values().copied().sum()
    }

    /// Stake on `key`, if any.
    pub fn stake(&self, key: BetKey) -> Option<Decimal> {
        self.stakes.get(&key).copied()
    }

    pub fn contains(&self, key: BetKey) -> bool {
        self.stakes.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BetKey, Decimal)> + '_ {
        self.stakes.iter().map(|(k, v)| (*k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = BetKey> + '_ {
        self.stakes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.stakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stakes.is_empty()
    }

    /// Drops every entry whose stake is zero or negative.
    ///
    /// Returns the number of entries removed.
    pub fn prune(&mut self) -> usize {
        let before = self.stakes.len();
        self.stakes.retain(|_, amount| *amount > Decimal::ZERO);
        before - self.stakes.len()
    }

    /// Inserts a raw entry without validation. Only `prune` restores the
    /// positivity invariant afterwards; used by `FromIterator`.
    pub(crate) fn insert_raw(&mut self, key: BetKey, amount: Decimal) {
        self.stakes.insert(key, amount);
    }
}

impl FromIterator<(BetKey, Decimal)> for WagerLedger {
    fn from_iter<I: IntoIterator<Item = (BetKey, Decimal)>>(iter: I) -> Self {
        let mut ledger = Self::new();
        for (key, amount) in iter {
            ledger.insert_raw(key, amount);
        }
        ledger.prune();
        ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bet::{Point, TravelKey};
    use rust_decimal_macros::dec;

    #[test]
    fn test_place_stake_accumulates() {
        let mut ledger = WagerLedger::new();
        ledger.place_stake(BetKey::PassLine, dec!(5)).unwrap();
        ledger.place_stake(BetKey::PassLine, dec!(10)).unwrap();
        assert_eq!(ledger.stake(BetKey::PassLine), Some(dec!(15)));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_place_stake_rejects_non_positive() {
        let mut ledger = WagerLedger::new();
        let err = ledger.place_stake(BetKey::Field, dec!(0)).unwrap_err();
        assert_eq!(
            err,
            CrapsError::NonPositiveStake {
                key: BetKey::Field,
                amount: dec!(0)
            }
        );
        assert!(ledger.place_stake(BetKey::Field, dec!(-1)).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_remove_stake_returns_amount_or_zero() {
        let mut ledger = WagerLedger::new();
        ledger.place_stake(BetKey::Place(Point::Six), dec!(12)).unwrap();
        assert_eq!(ledger.remove_stake(BetKey::Place(Point::Six)), dec!(12));
        assert_eq!(ledger.remove_stake(BetKey::Place(Point::Six)), Decimal::ZERO);
    }

    #[test]
    fn test_migrate_stake_moves_atomically() {
        let mut ledger = WagerLedger::new();
        ledger.place_stake(BetKey::Come, dec!(5)).unwrap();
        let to = BetKey::Travel(TravelKey::come(Point::Five));
        ledger.migrate_stake(BetKey::Come, to);
        assert!(!ledger.contains(BetKey::Come));
        assert_eq!(ledger.stake(to), Some(dec!(5)));
    }

    #[test]
    fn test_migrate_stake_absent_is_noop() {
        let mut ledger = WagerLedger::new();
        ledger.place_stake(BetKey::Field, dec!(1)).unwrap();
        let snapshot = ledger.clone();
        ledger.migrate_stake(BetKey::Come, BetKey::Travel(TravelKey::come(Point::Four)));
        assert_eq!(ledger, snapshot);
    }

    #[test]
    fn test_total_staked() {
        let mut ledger = WagerLedger::new();
        assert_eq!(ledger.total_staked(), Decimal::ZERO);
        ledger.place_stake(BetKey::PassLine, dec!(10)).unwrap();
        ledger.place_stake(BetKey::Field, dec!(2.50)).unwrap();
        assert_eq!(ledger.total_staked(), dec!(12.50));
    }

    #[test]
    fn test_prune_and_from_iter() {
        let ledger: WagerLedger = [
            (BetKey::PassLine, dec!(10)),
            (BetKey::Field, dec!(0)),
            (BetKey::Come, dec!(-3)),
        ]
        .into_iter()
        .collect();
        assert_eq!(ledger.len(), 1);
        assert!(ledger.contains(BetKey::PassLine));
    }

    #[test]
    fn test_serializes_as_string_keyed_map() {
        let mut ledger = WagerLedger::new();
        ledger.place_stake(BetKey::Travel(TravelKey::come(Point::Six)), dec!(5)).unwrap();
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"{"come-point-6":"5"}"#);
        let back: WagerLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }
}
