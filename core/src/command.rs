use crate::{
    ledger::TransactionKind,
    quiz::QuizQuestion,
    roster::RosterRow,
    types::{AccountId, ActivityId, BookId, Credits},
};
use serde::{Deserialize, Serialize};

/// Every mutating request the engine accepts, as data.
/// Variants are added over time; never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum CampusCommand {
    // ── Rewards ───────────────────────────────────
    RecordQuizResult {
        correct_count:     u32,
        total_questions:   u32,
        full_score_reward: Credits,
        bonus_reward:      Credits,
        category_name:     String,
    },
    SubmitQuiz {
        category: String,
        answers:  Vec<Option<String>>,
    },
    RecordSpinResult {
        won_amount: Credits,
    },
    SpinWheel,

    // ── Library ───────────────────────────────────
    BorrowBook {
        book_id: BookId,
    },
    ReturnBook {
        book_id: BookId,
    },

    // ── Activities ────────────────────────────────
    SubmitActivity {
        category:    TransactionKind,
        description: String,
    },
    ApproveActivity {
        activity_id: ActivityId,
    },
    RejectActivity {
        activity_id: ActivityId,
    },

    // ── Roster ────────────────────────────────────
    AddAccount {
        name:            String,
        email:           String,
        initial_credits: Credits,
    },
    BulkAddAccounts {
        rows: Vec<RosterRow>,
    },
    ImportRosterCsv {
        csv: String,
    },
    EditAccount {
        account_id: AccountId,
        #[serde(default)]
        name:       Option<String>,
        #[serde(default)]
        email:      Option<String>,
    },
    RemoveAccount {
        account_id: AccountId,
    },
    JoinFaculty {
        name:  String,
        email: String,
        token: String,
    },

    // ── Quiz catalog ──────────────────────────────
    AddQuizQuestion {
        category: String,
        question: QuizQuestion,
    },
}
