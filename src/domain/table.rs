//! Table state: the point and the Come/Don't-Come bets resting on numbers.
//!
//! Two phases: come-out (`point == None`) and point-on. The travel maps
//! mirror the travelled entries of the `WagerLedger`; `reconcile_travel`
//! restores that 1:1 correspondence whenever it has drifted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::bet::{BetKey, Point, TravelKey, TravelKind};
use super::error::CrapsError;
use super::ledger::WagerLedger;

/// Table phase derived from the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ComeOut,
    PointOn(Point),
}

/// Point and travel bookkeeping for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    /// The established point, or `None` during the come-out phase.
    pub point: Option<Point>,
    /// Come bets resting on numbers.
    #[serde(default)]
    pub come_travel: BTreeMap<TravelKey, Point>,
    /// Don't-Come bets resting on numbers.
    #[serde(default)]
    pub dont_come_travel: BTreeMap<TravelKey, Point>,
}

impl TableState {
    /// A fresh table in the come-out phase.
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn phase(&self) -> Phase {
        match self.point {
            None => Phase::ComeOut,
            Some(point) => Phase::PointOn(point),
        }
    }

    pub const fn is_come_out(&self) -> bool {
        self.point.is_none()
    }

    /// Turns the point on. Only legal while the point is off.
    pub fn establish_point(&mut self, point: Point) -> Result<(), CrapsError> {
        if let Some(current) = self.point {
            return Err(CrapsError::PointAlreadyEstablished(current));
        }
        self.point = Some(point);
        Ok(())
    }

    /// Turns the point off, returning the point that was on.
    pub fn clear_point(&mut self) -> Option<Point> {
        self.point.take()
    }

    fn travel_mut(&mut self, kind: TravelKind) -> &mut BTreeMap<TravelKey, Point> {
        match kind {
            TravelKind::Come => &mut self.come_travel,
            TravelKind::DontCome => &mut self.dont_come_travel,
        }
    }

    pub const fn travel(&self, kind: TravelKind) -> &BTreeMap<TravelKey, Point> {
        match kind {
            TravelKind::Come => &self.come_travel,
            TravelKind::DontCome => &self.dont_come_travel,
        }
    }

    /// Records a bet of `kind` resting on `number` under `key`.
    pub fn add_travel(&mut self, kind: TravelKind, key: TravelKey, number: Point) {
        self.travel_mut(kind).insert(key, number);
    }

    /// Forgets the resting bet under `key`, returning its number.
    pub fn remove_travel(&mut self, kind: TravelKind, key: TravelKey) -> Option<Point> {
        self.travel_mut(kind).remove(&key)
    }

    /// Every resting bet of both kinds, in key order.
    pub fn resting(&self) -> impl Iterator<Item = (TravelKey, Point)> + '_ {
        self.come_travel
            .iter()
            .chain(self.dont_come_travel.iter())
            .map(|(k, n)| (*k, *n))
    }

    /// Makes the travel maps agree with the ledger.
    ///
    /// Drops map entries with no stake (or filed under the wrong kind or
    /// number) and adds entries for travelled stakes the maps are missing.
    /// Returns the number of corrections made.
    pub fn reconcile_travel(&mut self, ledger: &WagerLedger) -> usize {
        let mut corrections = 0;

        for kind in [TravelKind::Come, TravelKind::DontCome] {
            let map = self.travel_mut(kind);
            let before = map.len();
            map.retain(|key, number| {
                key.kind == kind && key.number == *number && ledger.contains(BetKey::Travel(*key))
            });
            corrections += before - map.len();
        }

        for key in ledger.keys().filter_map(BetKey::travel) {
            let map = self.travel_mut(key.kind);
            if !map.contains_key(&key) {
                map.insert(key, key.number);
                corrections += 1;
            }
        }

        if corrections > 0 {
            warn!(corrections, "Travel maps disagreed with ledger, reconciled");
        }
        corrections
    }

    /// Whether every travel entry has a ledger stake and vice versa.
    pub fn travel_consistent_with(&self, ledger: &WagerLedger) -> bool {
        let mapped = self
            .resting()
            .all(|(key, number)| key.number == number && ledger.contains(BetKey::Travel(key)));
        let staked = ledger
            .keys()
            .filter_map(BetKey::travel)
            .all(|key| self.travel(key.kind).contains_key(&key));
        mapped && staked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_table_is_come_out() {
        let table = TableState::new();
        assert_eq!(table.phase(), Phase::ComeOut);
        assert!(table.is_come_out());
    }

    #[test]
    fn test_establish_point_only_when_off() {
        let mut table = TableState::new();
        table.establish_point(Point::Six).unwrap();
        assert_eq!(table.phase(), Phase::PointOn(Point::Six));
        assert_eq!(
            table.establish_point(Point::Eight),
            Err(CrapsError::PointAlreadyEstablished(Point::Six))
        );
        assert_eq!(table.clear_point(), Some(Point::Six));
        assert_eq!(table.clear_point(), None);
    }

    #[test]
    fn test_add_and_remove_travel() {
        let mut table = TableState::new();
        let key = TravelKey::come(Point::Five);
        table.add_travel(TravelKind::Come, key, Point::Five);
        assert_eq!(table.come_travel.get(&key), Some(&Point::Five));
        assert!(table.dont_come_travel.is_empty());
        assert_eq!(table.remove_travel(TravelKind::Come, key), Some(Point::Five));
        assert!(table.come_travel.is_empty());
    }

    #[test]
    fn test_reconcile_travel_both_directions() {
        let mut ledger = WagerLedger::new();
        let staked = TravelKey::dont_come(Point::Four);
        ledger.place_stake(BetKey::Travel(staked), dec!(5)).unwrap();

        let mut table = TableState::new();
        // Stale entry with no stake.
        table.add_travel(TravelKind::Come, TravelKey::come(Point::Nine), Point::Nine);

        assert!(!table.travel_consistent_with(&ledger));
        assert_eq!(table.reconcile_travel(&ledger), 2);
        assert!(table.come_travel.is_empty());
        assert_eq!(table.dont_come_travel.get(&staked), Some(&Point::Four));
        assert!(table.travel_consistent_with(&ledger));
        assert_eq!(table.reconcile_travel(&ledger), 0);
    }

    #[test]
    fn test_table_serde_round_trip_uses_string_keys() {
        let mut table = TableState::new();
        table.establish_point(Point::Ten).unwrap();
        table.add_travel(TravelKind::Come, TravelKey::come(Point::Six), Point::Six);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["point"], 10);
        assert_eq!(json["come_travel"]["come-point-6"], 6);
        let back: TableState = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }
}
