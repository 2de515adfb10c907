use campus_credit_core::{
    clock::ManualClock,
    engine::{CampusEngine, TEST_EPOCH_SECS},
    ledger::TransactionKind,
    store::ActivityStatus,
    CampusConfig, CreditError,
};
use chrono::DateTime;

const ALEX: &str = "user-001";
const PRIYA: &str = "user-002";
const FACULTY: &str = "faculty-001";

#[test]
fn approval_credits_the_category_reward_once() {
    let (mut engine, _clock) = CampusEngine::build_test(11);
    let alex = engine.open_session(ALEX).expect("alex");
    let faculty = engine.open_session(FACULTY).expect("faculty");

    let activity = engine
        .submit_activity(&alex, TransactionKind::EarnInnovation, "  Won the campus hackathon  ")
        .expect("submit");
    assert_eq!(activity.status, ActivityStatus::Pending);
    assert_eq!(activity.description, "Won the campus hackathon");
    assert_eq!(engine.pending_activities().len(), 1);
    assert!(engine.ledger().is_empty());

    let decision = engine.approve_activity(&faculty, &activity.id).expect("approve");
    assert_eq!(decision.activity.status, ActivityStatus::Approved);
    assert_eq!(decision.activity.reviewed_by.as_deref(), Some(FACULTY));
    let txn = decision.transaction.expect("innovation pays");
    assert_eq!(txn.kind, TransactionKind::EarnInnovation);
    assert_eq!(txn.amount, 100);
    assert_eq!(txn.description, "Activity approved: Won the campus hackathon...");
    assert_eq!(engine.get_account(ALEX).expect("alex").credit_balance, 600);

    let err = engine
        .approve_activity(&faculty, &activity.id)
        .expect_err("already approved");
    assert!(matches!(err, CreditError::NotPending { .. }));
    assert_eq!(engine.ledger().len(), 1);
    assert!(engine.pending_activities().is_empty());
}

#[test]
fn rejection_is_terminal_and_pays_nothing() {
    let (mut engine, _clock) = CampusEngine::build_test(11);
    let priya = engine.open_session(PRIYA).expect("priya");
    let faculty = engine.open_session(FACULTY).expect("faculty");

    let activity = engine
        .submit_activity(&priya, TransactionKind::EarnSocialImpact, "Beach clean-up")
        .expect("submit");
    let decision = engine.reject_activity(&faculty, &activity.id).expect("reject");
    assert_eq!(decision.activity.status, ActivityStatus::Rejected);
    assert!(decision.transaction.is_none());

    assert!(engine.approve_activity(&faculty, &activity.id).is_err());
    assert!(engine.reject_activity(&faculty, &activity.id).is_err());
    assert!(engine.ledger().is_empty());
    assert_eq!(engine.get_account(PRIYA).expect("priya").credit_balance, 120);

    let rejected = engine.list_activities(Some(PRIYA), Some(ActivityStatus::Rejected));
    assert_eq!(rejected.len(), 1);
}

#[test]
fn submissions_are_validated() {
    let (mut engine, _clock) = CampusEngine::build_test(11);
    let alex = engine.open_session(ALEX).expect("alex");
    let faculty = engine.open_session(FACULTY).expect("faculty");

    let err = engine
        .submit_activity(&alex, TransactionKind::EarnAcademic, "   ")
        .expect_err("blank description");
    assert!(matches!(err, CreditError::EmptyDescription));

    let err = engine
        .submit_activity(&alex, TransactionKind::EarnQuiz, "Quiz night")
        .expect_err("quiz credits are not claimable");
    assert!(matches!(err, CreditError::IneligibleCategory { kind: TransactionKind::EarnQuiz }));

    let err = engine
        .submit_activity(&faculty, TransactionKind::EarnAcademic, "Lecture")
        .expect_err("faculty do not submit");
    assert!(matches!(err, CreditError::NotEligible { .. }));

    let err = engine
        .approve_activity(&faculty, "act-missing")
        .expect_err("unknown id");
    assert!(matches!(err, CreditError::ActivityNotFound { .. }));
    assert!(engine.list_activities(None, None).is_empty());
}

#[test]
fn only_faculty_in_their_own_role_review() {
    let (mut engine, _clock) = CampusEngine::build_test(11);
    let alex = engine.open_session(ALEX).expect("alex");
    let faculty = engine.open_session(FACULTY).expect("faculty");
    let as_alex = engine.act_as_student(&faculty, ALEX).expect("act as");

    let activity = engine
        .submit_activity(&as_alex, TransactionKind::EarnPeerLearning, "Ran a study group")
        .expect("faculty may submit for the student they act as");
    assert_eq!(activity.account_id, ALEX);

    let err = engine.approve_activity(&alex, &activity.id).expect_err("students do not review");
    assert!(matches!(err, CreditError::NotEligible { .. }));
    let err = engine.approve_activity(&as_alex, &activity.id).expect_err("not while acting as a student");
    assert!(matches!(err, CreditError::NotEligible { .. }));

    let back = as_alex.stop_impersonating();
    let decision = engine.approve_activity(&back, &activity.id).expect("approve");
    assert_eq!(decision.transaction.map(|t| t.amount), Some(25));
}

#[test]
fn removed_owner_is_approved_without_reward() {
    let (mut engine, _clock) = CampusEngine::build_test(11);
    let priya = engine.open_session(PRIYA).expect("priya");
    let faculty = engine.open_session(FACULTY).expect("faculty");

    let activity = engine
        .submit_activity(&priya, TransactionKind::EarnIntegrity, "Returned a lost wallet")
        .expect("submit");
    engine.remove_account(&faculty, PRIYA).expect("remove");

    let decision = engine.approve_activity(&faculty, &activity.id).expect("approve");
    assert_eq!(decision.activity.status, ActivityStatus::Approved);
    assert!(decision.transaction.is_none());
    assert!(engine.ledger().is_empty());
}

#[test]
fn submissions_at_the_same_instant_list_newest_first() {
    let (mut engine, _clock) = CampusEngine::build_test(11);
    let alex = engine.open_session(ALEX).expect("alex");

    engine
        .submit_activity(&alex, TransactionKind::EarnAcademic, "first")
        .expect("first");
    engine
        .submit_activity(&alex, TransactionKind::EarnAcademic, "second")
        .expect("second");

    let descriptions: Vec<String> = engine
        .list_activities(None, None)
        .into_iter()
        .map(|a| a.description)
        .collect();
    assert_eq!(descriptions, vec!["second", "first"]);
    assert_eq!(engine.pending_activities()[0].description, "second");
}

#[test]
fn unrewarded_category_is_approved_without_a_ledger_entry() {
    let mut config = CampusConfig::default_test();
    config.reward_policy.activity_rewards.remove(&TransactionKind::EarnIntegrity);
    let start = DateTime::from_timestamp(TEST_EPOCH_SECS, 0).expect("epoch");
    let mut engine = CampusEngine::new(config, Box::new(ManualClock::new(start)), 11);

    let priya = engine.open_session(PRIYA).expect("priya");
    let faculty = engine.open_session(FACULTY).expect("faculty");
    let activity = engine
        .submit_activity(&priya, TransactionKind::EarnIntegrity, "Reported a grading error in my favour")
        .expect("submit");

    let decision = engine.approve_activity(&faculty, &activity.id).expect("approve");
    assert_eq!(decision.activity.status, ActivityStatus::Approved);
    assert!(decision.transaction.is_none());
    assert!(engine.ledger().is_empty());
    assert_eq!(engine.get_account(PRIYA).expect("priya").credit_balance, 120);
    assert!(engine.pending_activities().is_empty());
}
