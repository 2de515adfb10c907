use campus_credit_core::{engine::CampusEngine, ledger::TransactionKind, CreditError};
use chrono::Duration;

const ALEX: &str = "user-001";
const PRIYA: &str = "user-002";
const FACULTY: &str = "faculty-001";

#[test]
fn one_spin_per_calendar_day() {
    let (mut engine, clock) = CampusEngine::build_test(3);
    let alex = engine.open_session(ALEX).expect("session");

    let first = engine.record_spin_result(&alex, 50).expect("first spin");
    assert_eq!(first.transaction.kind, TransactionKind::EarnSpinWheel);
    assert_eq!(first.transaction.description, "Won 50 credits from the bonus wheel.");
    assert_eq!(engine.get_account(ALEX).expect("alex").credit_balance, 550);

    let err = engine.record_spin_result(&alex, 100).expect_err("second spin today");
    assert!(matches!(err, CreditError::AlreadySpunToday { .. }));
    assert_eq!(engine.ledger().len(), 1);

    // 09:00 + 14h is still the same day; two more hours crosses midnight.
    clock.advance(Duration::hours(14));
    assert!(engine.record_spin_result(&alex, 5).is_err());
    clock.advance(Duration::hours(2));
    engine.record_spin_result(&alex, 5).expect("new day, new spin");
    assert_eq!(engine.get_account(ALEX).expect("alex").credit_balance, 555);
}

#[test]
fn zero_segment_is_recorded_and_uses_the_day() {
    let (mut engine, _clock) = CampusEngine::build_test(3);
    let priya = engine.open_session(PRIYA).expect("session");

    let blank = engine.record_spin_result(&priya, 0).expect("zero win");
    assert_eq!(blank.transaction.amount, 0);
    assert_eq!(engine.ledger().len(), 1);
    assert_eq!(engine.get_account(PRIYA).expect("priya").credit_balance, 120);
    assert!(engine.record_spin_result(&priya, 10).is_err());
}

#[test]
fn engine_draw_lands_on_a_configured_segment() {
    let (mut engine, _clock) = CampusEngine::build_test(3);
    let alex = engine.open_session(ALEX).expect("session");

    let spin = engine.spin_wheel(&alex).expect("spin");
    let segments = &engine.reward_policy().spin_segments;
    let index = spin.segment.expect("engine draws record the segment");
    assert_eq!(segments[index], spin.amount);
    assert_eq!(engine.get_account(ALEX).expect("alex").credit_balance, 500 + spin.amount);
    assert!(engine.spin_wheel(&alex).is_err());
}

#[test]
fn faculty_spin_for_the_student_they_act_as() {
    let (mut engine, _clock) = CampusEngine::build_test(3);
    let faculty = engine.open_session(FACULTY).expect("session");

    let err = engine.record_spin_result(&faculty, 10).expect_err("faculty hold no credits");
    assert!(matches!(err, CreditError::NotEligible { .. }));

    let as_priya = engine.act_as_student(&faculty, PRIYA).expect("act as");
    let spin = engine.record_spin_result(&as_priya, 75).expect("spin for priya");
    assert_eq!(spin.transaction.account_id, PRIYA);
    assert_eq!(engine.get_account(PRIYA).expect("priya").credit_balance, 195);
    assert_eq!(engine.get_account(FACULTY).expect("faculty").credit_balance, 0);

    let priya = engine.open_session(PRIYA).expect("priya");
    assert!(engine.record_spin_result(&priya, 10).is_err());
    assert!(engine.audit_balances().is_empty());
}
