use crate::{
    ledger::TransactionKind,
    types::{AccountId, ActivityId, BookId, Credits},
};
use thiserror::Error;

/// Every failure here is recoverable by the caller. A failed command leaves
/// the ledger, the account store and the event log exactly as they were.
#[derive(Error, Debug)]
pub enum CreditError {
    #[error("Insufficient credits: balance {balance}, required {required}")]
    InsufficientCredits { balance: Credits, required: Credits },

    #[error("Not eligible: {reason}")]
    NotEligible { reason: String },

    #[error("Account '{id}' not found")]
    AccountNotFound { id: AccountId },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("An account with email '{email}' already exists")]
    DuplicateEmail { email: String },

    #[error("Account '{id}' has already spun the wheel today")]
    AlreadySpunToday { id: AccountId },

    #[error("Activity '{id}' is not pending")]
    NotPending { id: ActivityId },

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("The provided enrolment token is incorrect")]
    InvalidToken,

    #[error("Activity description cannot be empty")]
    EmptyDescription,

    #[error("Category '{kind}' cannot be claimed through an activity submission")]
    IneligibleCategory { kind: TransactionKind },

    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount { amount: Credits, reason: String },

    #[error("Invalid quiz score: {correct} correct out of {total}")]
    InvalidQuizScore { correct: u32, total: u32 },

    #[error("Invalid quiz question: {reason}")]
    InvalidQuestion { reason: String },

    #[error("Quiz category '{name}' not found")]
    QuizCategoryNotFound { name: String },

    #[error("Book {id} not found")]
    BookNotFound { id: BookId },

    #[error("Book {id} is not in a state that allows this operation")]
    BookUnavailable { id: BookId },

    #[error("Activity '{id}' not found")]
    ActivityNotFound { id: ActivityId },

    #[error("Roster parse error: {0}")]
    Csv(#[from] csv::Error),
}

impl CreditError {
    pub(crate) fn not_eligible(reason: impl Into<String>) -> Self {
        Self::NotEligible { reason: reason.into() }
    }
}

pub type CreditResult<T> = Result<T, CreditError>;
