//! Round-resolution engine.
//!
//! `resolve_roll` is a pure function of (table, ledger, total): it
//! borrows its inputs, works on private copies and returns the next
//! table, the next ledger and one `SettlementEvent` per resolved bet.
//! No randomness, no I/O, no bankroll.
//!
//! Resolution order for a single roll:
//! 1. Phase from the table's point
//! 2. Pass line / don't pass
//! 3. Fresh come / don't come (every roll is their own come-out);
//!    travel to a point number is recorded but deferred
//! 4. Come / don't-come bets already resting on numbers
//! 5. Deferred travel, now that step 4 has freed the target slot
//! 6. Point transition, pass line odds, place bets, hardways
//! 7. One-roll bets: field and propositions
//! 8. Prune, reconcile travel maps, return

use std::mem;

use rust_decimal::Decimal;
use tracing::debug;

use super::bet::{BetKey, HardNumber, Point, Proposition, TravelKey, TravelKind};
use super::error::CrapsError;
use super::ledger::WagerLedger;
use super::payout;
use super::roll::Roll;
use super::settlement::{Migration, PhaseTransition, Resolution, SettlementEvent};
use super::table::{Phase, TableState};

/// Resolves a roll known only by its total.
///
/// Fails with `CrapsError::InvalidRoll` outside 2..=12; the inputs are
/// untouched either way.
pub fn resolve_roll(
    table: &TableState,
    ledger: &WagerLedger,
    total: u8,
) -> Result<Resolution, CrapsError> {
    let roll = Roll::from_total(total)?;
    Ok(resolve(table, ledger, roll))
}

/// Resolves a roll from its two dice, letting hardways see doubles.
pub fn resolve_dice(
    table: &TableState,
    ledger: &WagerLedger,
    die1: u8,
    die2: u8,
) -> Result<Resolution, CrapsError> {
    let roll = Roll::from_dice(die1, die2)?;
    Ok(resolve(table, ledger, roll))
}

/// Resolves an already validated roll.
pub fn resolve(table: &TableState, ledger: &WagerLedger, roll: Roll) -> Resolution {
    let mut round = Round::new(table, ledger, roll);
    round.contract_line();
    round.fresh_come();
    round.resting_travel();
    round.apply_travel();
    round.point_cycle();
    round.one_roll_bets();
    round.finish()
}

/// Working state for one resolution.
struct Round {
    roll: Roll,
    phase: Phase,
    table: TableState,
    ledger: WagerLedger,
    /// Bets resting on numbers before this roll.
    resting: Vec<(TravelKey, Point)>,
    /// Fresh bets waiting to travel once step 4 is done.
    pending_travel: Vec<(BetKey, TravelKey)>,
    events: Vec<SettlementEvent>,
    migrations: Vec<Migration>,
    transition: PhaseTransition,
}

impl Round {
    fn new(table: &TableState, ledger: &WagerLedger, roll: Roll) -> Self {
        let mut table = table.clone();
        let mut ledger = ledger.clone();
        ledger.prune();
        table.reconcile_travel(&ledger);

        let resting = table.resting().collect();
        let phase = table.phase();

        Self {
            roll,
            phase,
            table,
            ledger,
            resting,
            pending_travel: Vec::new(),
            events: Vec::new(),
            migrations: Vec::new(),
            transition: PhaseTransition::None,
        }
    }

    fn total(&self) -> u8 {
        self.roll.total()
    }

    // ── settlement primitives ───────────────────────────────

    /// Pays `bet` if present. `stays` keeps the stake working on the table;
    /// otherwise it comes down and goes back to the player.
    fn win(&mut self, bet: BetKey, profit: impl FnOnce(Decimal) -> Decimal, stays: bool) {
        let Some(stake) = self.ledger.stake(bet) else {
            return;
        };
        let profit = profit(stake);
        if !stays {
            self.ledger.remove_stake(bet);
        }
        debug!(bet = %bet, %stake, %profit, stays, "Bet won");
        self.events
            .push(SettlementEvent::win(bet, stake, profit, !stays));
    }

    fn lose(&mut self, bet: BetKey) {
        let stake = self.ledger.remove_stake(bet);
        if stake > Decimal::ZERO {
            debug!(bet = %bet, %stake, "Bet lost");
            self.events.push(SettlementEvent::loss(bet, stake));
        }
    }

    /// Push with the bet left up for the next roll. The stake is not
    /// credited because it never left the table.
    fn push(&mut self, bet: BetKey) {
        if let Some(stake) = self.ledger.stake(bet) {
            debug!(bet = %bet, %stake, "Bet pushed");
            self.events.push(SettlementEvent::push(bet, stake, false));
        }
    }

    /// Takes `bet` down with no action and hands the stake back.
    fn return_stake(&mut self, bet: BetKey) {
        let stake = self.ledger.remove_stake(bet);
        if stake > Decimal::ZERO {
            debug!(bet = %bet, %stake, "Bet returned");
            self.events.push(SettlementEvent::push(bet, stake, true));
        }
    }

    // ── step 2 ──────────────────────────────────────────────

    fn contract_line(&mut self) {
        let total = self.total();
        match self.phase {
            Phase::ComeOut => {
                if self.roll.is_natural() {
                    self.win(BetKey::PassLine, payout::even_money, true);
                    self.lose(BetKey::DontPass);
                } else if self.roll.is_craps() {
                    self.lose(BetKey::PassLine);
                    if total == 12 {
                        self.push(BetKey::DontPass);
                    } else {
                        self.win(BetKey::DontPass, payout::even_money, true);
                    }
                }
            }
            Phase::PointOn(point) => {
                if total == point.value() {
                    self.win(BetKey::PassLine, payout::even_money, true);
                    self.lose(BetKey::DontPass);
                } else if self.roll.is_seven() {
                    self.lose(BetKey::PassLine);
                    self.win(BetKey::DontPass, payout::even_money, false);
                }
            }
        }
    }

    // ── step 3 ──────────────────────────────────────────────

    fn fresh_come(&mut self) {
        if let Some(number) = self.roll.point() {
            for kind in [TravelKind::Come, TravelKind::DontCome] {
                let fresh = kind.fresh_key();
                if self.ledger.contains(fresh) {
                    self.pending_travel
                        .push((fresh, TravelKey::new(kind, number)));
                }
            }
            return;
        }

        if self.roll.is_natural() {
            self.win(BetKey::Come, payout::even_money, false);
            self.lose(BetKey::DontCome);
        } else {
            self.lose(BetKey::Come);
            if self.total() == 12 {
                self.push(BetKey::DontCome);
            } else {
                self.win(BetKey::DontCome, payout::even_money, false);
            }
        }
    }

    // ── step 4 ──────────────────────────────────────────────

    fn resting_travel(&mut self) {
        let total = self.total();
        let seven = self.roll.is_seven();

        for (key, number) in mem::take(&mut self.resting) {
            let hit = total == number.value();
            if !hit && !seven {
                continue;
            }
            let bet = BetKey::Travel(key);
            match (key.kind, hit) {
                (TravelKind::Come, true) | (TravelKind::DontCome, false) => {
                    self.win(bet, payout::even_money, false);
                }
                (TravelKind::Come, false) | (TravelKind::DontCome, true) => self.lose(bet),
            }
            self.table.remove_travel(key.kind, key);
        }
    }

    // ── step 5 ──────────────────────────────────────────────

    fn apply_travel(&mut self) {
        for (from, to) in mem::take(&mut self.pending_travel) {
            let Some(stake) = self.ledger.stake(from) else {
                continue;
            };
            // Step 4 always clears a resting bet on the rolled number, so
            // the fresh bet takes over an empty slot.
            debug_assert!(!self.ledger.contains(BetKey::Travel(to)));
            self.ledger.migrate_stake(from, BetKey::Travel(to));
            self.table.add_travel(to.kind, to, to.number);
            debug!(from = %from, to = %to, %stake, "Bet travelled");
            self.migrations.push(Migration { from, to, stake });
        }
    }

    // ── step 6 ──────────────────────────────────────────────

    fn point_cycle(&mut self) {
        let total = self.total();
        match self.phase {
            Phase::ComeOut => {
                // Odds are off on the come-out and need a pass line to back.
                if !self.ledger.contains(BetKey::PassLine) {
                    self.return_stake(BetKey::PassLineOdds);
                }
                if let Some(point) = self.roll.point() {
                    if self.table.establish_point(point).is_ok() {
                        self.transition = PhaseTransition::PointEstablished(point);
                    }
                }
            }
            Phase::PointOn(point) if self.roll.is_seven() => {
                self.table.clear_point();
                self.transition = PhaseTransition::SevenOut(point);
                self.lose(BetKey::PassLineOdds);
                for number in Point::ALL {
                    self.lose(BetKey::Place(number));
                }
                for hard in HardNumber::ALL {
                    self.lose(BetKey::Hard(hard));
                }
            }
            Phase::PointOn(point) => {
                if total == point.value() {
                    self.table.clear_point();
                    self.transition = PhaseTransition::PointMade(point);
                    self.win(
                        BetKey::PassLineOdds,
                        |stake| payout::odds_profit(point, stake),
                        true,
                    );
                }
                if let Some(number) = self.roll.point() {
                    self.win(
                        BetKey::Place(number),
                        |stake| payout::place_profit(number, stake),
                        true,
                    );
                }
                self.hardways();
            }
        }
    }

    /// Hardways are working only while the point is on.
    fn hardways(&mut self) {
        let Ok(hard) = HardNumber::try_from(self.total()) else {
            return;
        };
        let bet = BetKey::Hard(hard);
        match self.roll.is_hard() {
            Some(true) => self.win(bet, |stake| payout::hardway_profit(hard, stake), true),
            Some(false) => self.lose(bet),
            None => {}
        }
    }

    // ── step 7 ──────────────────────────────────────────────

    fn one_roll_bets(&mut self) {
        let total = self.total();

        if let Some(stake) = self.ledger.stake(BetKey::Field) {
            match payout::field_profit(total, stake) {
                Some(profit) => self.win(BetKey::Field, |_| profit, false),
                None => self.lose(BetKey::Field),
            }
        }

        for prop in Proposition::ALL {
            let bet = BetKey::Prop(prop);
            if prop.wins_on(total) {
                self.win(bet, |stake| payout::proposition_profit(prop, stake), false);
            } else {
                self.lose(bet);
            }
        }
    }

    // ── step 8 ──────────────────────────────────────────────

    fn finish(mut self) -> Resolution {
        self.ledger.prune();
        self.table.reconcile_travel(&self.ledger);

        debug!(
            total = self.total(),
            events = self.events.len(),
            migrations = self.migrations.len(),
            transition = ?self.transition,
            point = ?self.table.point,
            "Roll resolved"
        );

        Resolution {
            table: self.table,
            ledger: self.ledger,
            events: self.events,
            transition: self.transition,
            migrations: self.migrations,
        }
    }
}
