//! Integration Tests - End-to-end Session Testing
//!
//! Tests the interaction between usecases, ports, and mock adapters.
//! Uses mockall for trait mocking and tokio::test for async tests.

use mockall::mock;
use rust_decimal_macros::dec;

use idle_craps_engine::adapters::dice::{FairDice, ScriptedDice};
use idle_craps_engine::adapters::metrics::MetricsRegistry;
use idle_craps_engine::adapters::persistence::{JsonSnapshotStore, MemorySnapshotStore};
use idle_craps_engine::config::StandingBet;
use idle_craps_engine::domain::{BetKey, HardNumber, Outcome, PhaseTransition, Point, TravelKey};
use idle_craps_engine::ports::repository::{SessionSnapshot, SnapshotStore};
use idle_craps_engine::usecases::{
    BettingStrategy, SaveOutcome, SessionError, TableSession, load_with_fallback,
    save_with_fallback,
};

// ---- Mock Definitions ----

mock! {
    pub Store {}

    #[async_trait::async_trait]
    impl SnapshotStore for Store {
        fn name(&self) -> &'static str;
        async fn save(&self, snapshot: &SessionSnapshot) -> anyhow::Result<()>;
        async fn load(&self) -> anyhow::Result<Option<SessionSnapshot>>;
        async fn is_healthy(&self) -> bool;
    }
}

fn failing_store() -> MockStore {
    let mut store = MockStore::new();
    store.expect_name().return_const("broken-disk");
    store
        .expect_save()
        .returning(|_| Err(anyhow::anyhow!("disk full")));
    store
        .expect_load()
        .returning(|| Err(anyhow::anyhow!("unreadable")));
    store
}

fn session_with_bets() -> TableSession {
    let mut session = TableSession::new(dec!(100));
    session.place_bet(BetKey::PassLine, dec!(10)).unwrap();
    session
}

// ---- Snapshot fallback ----

#[tokio::test]
async fn test_save_uses_primary_when_healthy() {
    let mut primary = MockStore::new();
    primary.expect_name().return_const("primary");
    primary.expect_save().times(1).returning(|_| Ok(()));
    let secondary = MemorySnapshotStore::new();

    let snapshot = session_with_bets().snapshot();
    let outcome = save_with_fallback(&primary, &secondary, &snapshot)
        .await
        .unwrap();

    assert_eq!(outcome, SaveOutcome::Primary("primary".to_string()));
    assert!(secondary.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_falls_back_when_primary_fails() {
    let primary = failing_store();
    let secondary = MemorySnapshotStore::new();

    let snapshot = session_with_bets().snapshot();
    let outcome = save_with_fallback(&primary, &secondary, &snapshot)
        .await
        .unwrap();

    assert!(outcome.used_fallback());
    match outcome {
        SaveOutcome::Fallback {
            store,
            primary_error,
        } => {
            assert_eq!(store, "memory");
            assert!(primary_error.contains("disk full"));
        }
        SaveOutcome::Primary(_) => panic!("expected fallback"),
    }
    assert_eq!(secondary.load().await.unwrap(), Some(snapshot));
}

#[tokio::test]
async fn test_save_fails_when_both_stores_fail() {
    let primary = failing_store();
    let secondary = failing_store();
    let snapshot = session_with_bets().snapshot();
    assert!(
        save_with_fallback(&primary, &secondary, &snapshot)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_load_falls_back_when_primary_unreadable() {
    let primary = failing_store();
    let secondary = MemorySnapshotStore::new();
    let snapshot = session_with_bets().snapshot();
    secondary.save(&snapshot).await.unwrap();

    let loaded = load_with_fallback(&primary, &secondary).await.unwrap();
    assert_eq!(loaded, Some(snapshot));
}

#[tokio::test]
async fn test_load_prefers_primary() {
    let snapshot = session_with_bets().snapshot();
    let expected = snapshot.clone();

    let mut primary = MockStore::new();
    primary.expect_name().return_const("primary");
    primary
        .expect_load()
        .times(1)
        .returning(move || Ok(Some(snapshot.clone())));
    let mut secondary = MockStore::new();
    secondary.expect_name().return_const("secondary");
    secondary.expect_load().never();

    let loaded = load_with_fallback(&primary, &secondary).await.unwrap();
    assert_eq!(loaded, Some(expected));
}

// ---- Session flows ----

#[tokio::test]
async fn test_session_survives_restart_through_json_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path()).await.unwrap();
    let fallback = MemorySnapshotStore::new();

    let mut session = TableSession::new(dec!(100));
    session.place_bet(BetKey::PassLine, dec!(10)).unwrap();
    session.roll_total(6).unwrap();
    session.place_bet(BetKey::Come, dec!(5)).unwrap();
    session.roll_total(9).unwrap();

    let outcome = save_with_fallback(&store, &fallback, &session.snapshot())
        .await
        .unwrap();
    assert_eq!(outcome, SaveOutcome::Primary("json-file".to_string()));

    let snapshot = load_with_fallback(&store, &fallback)
        .await
        .unwrap()
        .unwrap();
    let mut restored = TableSession::restore(snapshot).unwrap();
    assert_eq!(restored.table().point, Some(Point::Six));
    assert_eq!(
        restored
            .ledger()
            .stake(BetKey::Travel(TravelKey::come(Point::Nine))),
        Some(dec!(5))
    );

    // Come point 9 wins, pass line still working.
    let report = restored.roll_total(9).unwrap();
    assert_eq!(report.credited, dec!(10));
    assert_eq!(restored.bankroll(), dec!(95));
    assert!(restored.table().travel_consistent_with(restored.ledger()));
}

#[test]
fn test_scripted_shooter_with_metrics() {
    let metrics = MetricsRegistry::new().unwrap();
    let mut dice = ScriptedDice::new(
        [(3, 3), (2, 2), (4, 2), (5, 2)],
        FairDice::seeded(9),
    );
    let mut session = TableSession::new(dec!(200));
    session.place_bet(BetKey::PassLine, dec!(10)).unwrap();

    // Point six established.
    let report = session.roll(&mut dice).unwrap();
    assert_eq!(report.transition, PhaseTransition::PointEstablished(Point::Six));
    metrics.record_resolution(report.total, &report.events);
    session.place_bet(BetKey::Place(Point::Six), dec!(12)).unwrap();
    session
        .place_bet(BetKey::Hard(HardNumber::Four), dec!(5))
        .unwrap();

    // Hard four pays 7:1 and stays up.
    let report = session.roll(&mut dice).unwrap();
    assert_eq!(report.events.len(), 1);
    assert_eq!(report.events[0].profit, dec!(35));
    metrics.record_resolution(report.total, &report.events);

    // Easy six: point made, place six paid.
    let report = session.roll(&mut dice).unwrap();
    assert_eq!(report.transition, PhaseTransition::PointMade(Point::Six));
    assert_eq!(report.credited, dec!(24));
    metrics.record_resolution(report.total, &report.events);

    // Come-out seven: pass line wins; place and hardway are off.
    let report = session.roll(&mut dice).unwrap();
    assert_eq!(report.events.len(), 1);
    assert_eq!(report.events[0].outcome, Outcome::Win);
    metrics.record_resolution(report.total, &report.events);
    metrics.set_bankroll(session.bankroll());

    assert_eq!(session.stats().total_rolls, 4);
    assert_eq!(session.stats().total_wins, 4);
    assert_eq!(session.stats().highest_streak, 4);
    assert_eq!(session.bankroll(), dec!(242));
    assert_eq!(
        metrics
            .settlements
            .with_label_values(&["place-6", "win"])
            .get(),
        1
    );
    assert!((metrics.bankroll.get() - 242.0).abs() < f64::EPSILON);
    assert!(metrics.render().unwrap().contains("idle_craps_bankroll"));
}

#[test]
fn test_auto_play_never_overdraws() {
    let strategy = BettingStrategy::new(
        vec![
            StandingBet {
                bet: BetKey::PassLine,
                amount: dec!(10),
            },
            StandingBet {
                bet: BetKey::Field,
                amount: dec!(5),
            },
            StandingBet {
                bet: BetKey::Come,
                amount: dec!(5),
            },
        ],
        dec!(5),
    );
    let mut dice = FairDice::seeded(2024);
    let mut session = TableSession::new(dec!(60));

    for _ in 0..500 {
        strategy.place_standing_bets(&mut session);
        if strategy.should_stop(&session) {
            break;
        }
        match session.roll(&mut dice) {
            Ok(_) => {}
            Err(SessionError::NoActiveBets) => break,
            Err(e) => panic!("unexpected error: {e}"),
        }
        assert!(session.bankroll() >= dec!(0));
        assert!(session.table().travel_consistent_with(session.ledger()));
    }
}
