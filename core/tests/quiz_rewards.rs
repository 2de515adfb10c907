use campus_credit_core::{
    engine::CampusEngine,
    event::CampusEvent,
    ledger::TransactionKind,
    policy::QuizOutcome,
    quiz::QuizQuestion,
    CreditError,
};

const ALEX: &str = "user-001";
const ROHAN: &str = "user-003";
const FACULTY: &str = "faculty-001";

fn answers(list: &[&str]) -> Vec<Option<String>> {
    list.iter().map(|a| Some(a.to_string())).collect()
}

fn science_answers() -> Vec<Option<String>> {
    answers(&["Mitosis", "300,000 km/s", "Ohm", "Nitrogen", "The Milky Way"])
}

fn tech_answers() -> Vec<Option<String>> {
    answers(&["Large Language Model", "Bitcoin", "Qubits", "A satellite internet constellation", "Meta"])
}

#[test]
fn perfect_score_pays_full_reward() {
    let (mut engine, _clock) = CampusEngine::build_test(1);
    let alex = engine.open_session(ALEX).expect("session");

    let result = engine
        .record_quiz_result(&alex, 5, 5, 50, 10, "General Science")
        .expect("quiz");
    assert_eq!(result.reward.outcome, QuizOutcome::Perfect);

    let txn = result.transaction.expect("perfect score writes an entry");
    assert_eq!(txn.kind, TransactionKind::EarnQuiz);
    assert_eq!(txn.amount, 50);
    assert!(txn.description.contains("perfect score"));
    assert_eq!(engine.get_account(ALEX).expect("alex").credit_balance, 550);
}

#[test]
fn bonus_threshold_and_below() {
    let (mut engine, _clock) = CampusEngine::build_test(1);
    let alex = engine.open_session(ALEX).expect("session");

    let bonus = engine
        .record_quiz_result(&alex, 3, 5, 50, 10, "World History")
        .expect("bonus");
    assert_eq!(bonus.reward.outcome, QuizOutcome::Bonus);
    assert_eq!(bonus.transaction.as_ref().map(|t| t.amount), Some(10));

    let ledger_len = engine.ledger().len();
    let none = engine
        .record_quiz_result(&alex, 2, 5, 50, 10, "World History")
        .expect("no reward is still a valid attempt");
    assert_eq!(none.reward.outcome, QuizOutcome::NoReward);
    assert!(none.transaction.is_none());
    assert_eq!(engine.ledger().len(), ledger_len);
    assert_eq!(engine.get_account(ALEX).expect("alex").credit_balance, 510);

    let last = engine.events().last().expect("quiz event");
    assert!(matches!(
        last.event,
        CampusEvent::QuizCompleted { correct: 2, total: 5, outcome: QuizOutcome::NoReward, .. }
    ));
}

#[test]
fn impossible_score_is_rejected() {
    let (mut engine, _clock) = CampusEngine::build_test(1);
    let alex = engine.open_session(ALEX).expect("session");

    let err = engine
        .record_quiz_result(&alex, 6, 5, 50, 10, "General Science")
        .expect_err("more correct than asked");
    assert!(matches!(err, CreditError::InvalidQuizScore { correct: 6, total: 5 }));
    assert!(engine.ledger().is_empty());
}

#[test]
fn faculty_cannot_take_quizzes() {
    let (mut engine, _clock) = CampusEngine::build_test(1);
    let faculty = engine.open_session(FACULTY).expect("session");

    let err = engine
        .record_quiz_result(&faculty, 5, 5, 50, 10, "General Science")
        .expect_err("faculty earn nothing");
    assert!(matches!(err, CreditError::NotEligible { .. }));
}

#[test]
fn submitted_answers_are_graded_against_the_catalog() {
    let (mut engine, _clock) = CampusEngine::build_test(1);
    let rohan = engine.open_session(ROHAN).expect("session");

    let perfect = engine
        .submit_quiz(&rohan, "General Science", &science_answers())
        .expect("graded");
    assert_eq!((perfect.correct, perfect.total), (5, 5));
    assert_eq!(perfect.transaction.map(|t| t.amount), Some(50));

    let mut partial = science_answers();
    partial[0] = None;
    partial[4] = Some("Andromeda".into());
    let bonus = engine.submit_quiz(&rohan, "General Science", &partial).expect("graded");
    assert_eq!(bonus.correct, 3);
    assert_eq!(bonus.reward.amount, 10);

    let err = engine
        .submit_quiz(&rohan, "Astrology", &science_answers())
        .expect_err("unknown category");
    assert!(matches!(err, CreditError::QuizCategoryNotFound { .. }));
    assert_eq!(engine.get_account(ROHAN).expect("rohan").credit_balance, 400);
}

#[test]
fn quiz_master_unlocks_once() {
    let (mut engine, _clock) = CampusEngine::build_test(1);
    let rohan = engine.open_session(ROHAN).expect("session");

    engine
        .submit_quiz(&rohan, "Current Affairs - Tech", &tech_answers())
        .expect("100 quiz credits");
    engine
        .submit_quiz(&rohan, "Current Affairs - Tech", &tech_answers())
        .expect("another 100");

    let account = engine.get_account(ROHAN).expect("rohan");
    assert!(account.has_achievement("ach-01"));
    assert_eq!(account.achievements.len(), 1);
    let unlocks = engine
        .events()
        .iter()
        .filter(|e| e.event_type == "achievement_unlocked")
        .count();
    assert_eq!(unlocks, 1);
}

#[test]
fn faculty_extend_the_catalog() {
    let (mut engine, _clock) = CampusEngine::build_test(1);
    let faculty = engine.open_session(FACULTY).expect("faculty");
    let alex = engine.open_session(ALEX).expect("alex");
    let question = QuizQuestion {
        question: "What is the chemical symbol for gold?".into(),
        options: vec!["Ag".into(), "Au".into(), "Gd".into(), "Go".into()],
        correct_answer: "Au".into(),
        credits: 15,
    };

    let err = engine
        .add_quiz_question(&alex, "Chemistry", question.clone())
        .expect_err("students cannot edit quizzes");
    assert!(matches!(err, CreditError::NotEligible { .. }));

    engine.add_quiz_question(&faculty, "Chemistry", question).expect("added");
    let chemistry = engine
        .quiz_categories()
        .iter()
        .find(|c| c.name == "Chemistry")
        .expect("new category");
    assert_eq!(chemistry.questions.len(), 1);

    let result = engine
        .submit_quiz(&alex, "Chemistry", &answers(&["Au"]))
        .expect("graded");
    assert_eq!(result.transaction.map(|t| t.amount), Some(15));
}
