//! The campus engine: the single writer for every credit mutation.
//!
//! RULES:
//!   - Every credit movement goes through `post()`, which adjusts the
//!     cached balance and appends the ledger entry as one unit.
//!   - Commands validate everything first and only then mutate
//!     (check-then-act). A refused command changes nothing.
//!   - Stores are never written from outside this module tree.
//!   - Events are recorded after a command has fully applied.
//!
//! One logical writer at a time: `&mut self` on every command is the
//! whole concurrency story. A multi-client port needs per-account mutual
//! exclusion around `post()`.

mod activity;
mod library;
mod query;
mod rewards;
mod roster;

pub use activity::ActivityDecision;
pub use query::{AccountSummary, BalanceDiscrepancy, LeaderboardEntry};
pub use rewards::{QuizResult, SpinResult};
pub use roster::{AccountEdit, NewAccount};

use crate::{
    clock::{Clock, ManualClock},
    command::CampusCommand,
    config::{CampusConfig, FacultyJoinConfig},
    error::{CreditError, CreditResult},
    event::{CampusEvent, EventLog, EventLogEntry},
    ledger::{Ledger, Transaction, TransactionKind},
    policy::{AchievementDef, RewardPolicy},
    quiz::QuizCatalog,
    rng::WheelRng,
    session::Session,
    store::{Account, AccountStore, ActivityBoard, Library},
    types::{Credits, Role},
};
use chrono::DateTime;

/// 2024-09-02T09:00:00Z, a Monday morning.
pub const TEST_EPOCH_SECS: i64 = 1_725_267_600;

pub struct CampusEngine {
    policy:       RewardPolicy,
    achievements: Vec<AchievementDef>,
    quiz:         QuizCatalog,
    faculty_join: FacultyJoinConfig,
    ledger:       Ledger,
    accounts:     AccountStore,
    activities:   ActivityBoard,
    library:      Library,
    events:       EventLog,
    clock:        Box<dyn Clock>,
    wheel:        WheelRng,
}

impl CampusEngine {
    /// Build an engine and register the configured roster and library.
    pub fn new(config: CampusConfig, clock: Box<dyn Clock>, seed: u64) -> Self {
        let mut engine = Self {
            policy:       config.reward_policy,
            achievements: config.achievements,
            quiz:         QuizCatalog::new(config.quiz_categories),
            faculty_join: config.faculty_join,
            ledger:       Ledger::new(),
            accounts:     AccountStore::new(),
            activities:   ActivityBoard::new(),
            library:      Library::new(config.books.iter().map(|b| b.to_book()).collect()),
            events:       EventLog::new(),
            clock,
            wheel:        WheelRng::new(seed),
        };
        for entry in config.roster {
            engine.register(entry.id, &entry.name, &entry.email, entry.role, entry.initial_credits);
        }
        log::info!(
            "engine ready: {} accounts, {} books, {} quiz categories",
            engine.accounts.len(),
            engine.library.all().len(),
            engine.quiz.all().len()
        );
        engine
    }

    /// Engine on the default test configuration with a pinned clock.
    /// The returned clock handle shares time with the engine.
    pub fn build_test(seed: u64) -> (Self, ManualClock) {
        let start = DateTime::from_timestamp(TEST_EPOCH_SECS, 0).unwrap_or_default();
        let clock = ManualClock::new(start);
        let engine = Self::new(CampusConfig::default_test(), Box::new(clock.clone()), seed);
        (engine, clock)
    }

    // ── Sessions ───────────────────────────────────────────────

    /// Session for an account acting in its own role.
    pub fn open_session(&self, account_id: &str) -> CreditResult<Session> {
        let account = self.account(account_id)?;
        Ok(Session::own(account.id.clone(), account.role))
    }

    /// A faculty member acts as a student. Credits earned or spent in the
    /// returned session belong to the student.
    pub fn act_as_student(&self, session: &Session, student_id: &str) -> CreditResult<Session> {
        let faculty_id = self.require_faculty(session)?.id.clone();
        let student = self.account(student_id)?;
        if student.role != Role::Student {
            return Err(CreditError::not_eligible("only student accounts can be acted as"));
        }
        log::info!("{faculty_id} acting as {}", student.id);
        Ok(Session::impersonating(student.id.clone(), faculty_id))
    }

    // ── Command dispatch ───────────────────────────────────────

    /// Run one command and return the events it emitted.
    pub fn execute(
        &mut self,
        session: &Session,
        command: CampusCommand,
    ) -> CreditResult<Vec<EventLogEntry>> {
        let mark = self.events.len();
        match command {
            CampusCommand::RecordQuizResult {
                correct_count,
                total_questions,
                full_score_reward,
                bonus_reward,
                category_name,
            } => {
                self.record_quiz_result(
                    session,
                    correct_count,
                    total_questions,
                    full_score_reward,
                    bonus_reward,
                    &category_name,
                )?;
            }
            CampusCommand::SubmitQuiz { category, answers } => {
                self.submit_quiz(session, &category, &answers)?;
            }
            CampusCommand::RecordSpinResult { won_amount } => {
                self.record_spin_result(session, won_amount)?;
            }
            CampusCommand::SpinWheel => {
                self.spin_wheel(session)?;
            }
            CampusCommand::BorrowBook { book_id } => {
                self.borrow_book(session, book_id)?;
            }
            CampusCommand::ReturnBook { book_id } => {
                self.return_book(session, book_id)?;
            }
            CampusCommand::SubmitActivity { category, description } => {
                self.submit_activity(session, category, &description)?;
            }
            CampusCommand::ApproveActivity { activity_id } => {
                self.approve_activity(session, &activity_id)?;
            }
            CampusCommand::RejectActivity { activity_id } => {
                self.reject_activity(session, &activity_id)?;
            }
            CampusCommand::AddAccount { name, email, initial_credits } => {
                self.add_account(session, NewAccount { name, email, initial_credits })?;
            }
            CampusCommand::BulkAddAccounts { rows } => {
                self.bulk_add_accounts(session, rows)?;
            }
            CampusCommand::ImportRosterCsv { csv } => {
                self.import_roster_csv(session, &csv)?;
            }
            CampusCommand::EditAccount { account_id, name, email } => {
                self.edit_account(session, &account_id, AccountEdit { name, email })?;
            }
            CampusCommand::RemoveAccount { account_id } => {
                self.remove_account(session, &account_id)?;
            }
            CampusCommand::JoinFaculty { name, email, token } => {
                self.join_faculty(&name, &email, &token)?;
            }
            CampusCommand::AddQuizQuestion { category, question } => {
                self.add_quiz_question(session, &category, question)?;
            }
        }
        Ok(self.events.since(mark).to_vec())
    }

    // ── The compound update ────────────────────────────────────

    /// Move credits: adjust the cached balance, then append the ledger
    /// entry. The adjustment is the only fallible step and runs first
    /// (unknown account, or a balance that would overflow), and the append
    /// cannot fail, so the pair never half-applies.
    fn post(
        &mut self,
        account_id: &str,
        kind: TransactionKind,
        amount: Credits,
        description: String,
    ) -> CreditResult<Transaction> {
        if !kind.accepts(amount) {
            return Err(CreditError::InvalidAmount {
                amount,
                reason: format!("wrong sign for {kind}"),
            });
        }
        let at = self.clock.now();
        let balance_after = self.accounts.adjust_balance(account_id, amount)?.credit_balance;
        let txn = self.ledger.append(account_id, kind, amount, description, at);
        log::info!(
            "{} {kind} {amount:+} -> {account_id} (balance {balance_after})",
            txn.id
        );
        self.events.record(
            at,
            CampusEvent::CreditsPosted {
                txn_id: txn.id,
                account_id: account_id.to_string(),
                kind,
                amount,
                balance_after,
            },
        );
        Ok(txn)
    }

    fn emit(&mut self, event: CampusEvent) {
        let at = self.clock.now();
        self.events.record(at, event);
    }

    // ── Guards ─────────────────────────────────────────────────

    fn account(&self, id: &str) -> CreditResult<&Account> {
        self.accounts
            .get(id)
            .ok_or_else(|| CreditError::AccountNotFound { id: id.to_string() })
    }

    /// The faculty account behind a session acting as Faculty.
    fn require_faculty(&self, session: &Session) -> CreditResult<&Account> {
        if session.acting_as() != Role::Faculty || session.is_impersonating() {
            return Err(CreditError::not_eligible("this action requires the Faculty role"));
        }
        let account = self.account(session.effective_account())?;
        if account.role != Role::Faculty {
            return Err(CreditError::not_eligible("this action requires the Faculty role"));
        }
        Ok(account)
    }

    /// The student account a session acting as Student spends for.
    fn require_student(&self, session: &Session) -> CreditResult<&Account> {
        if session.acting_as() != Role::Student {
            return Err(CreditError::not_eligible("only students can do this"));
        }
        let account = self.account(session.effective_account())?;
        if account.role != Role::Student {
            return Err(CreditError::not_eligible("only students can do this"));
        }
        Ok(account)
    }
}
