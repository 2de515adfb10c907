//! The audit event log: every committed command leaves a trace here.
//!
//! RULE: events are appended only after a command has fully applied.
//! A refused command emits nothing. Credit movements appear both here
//! (as `CreditsPosted`) and in the ledger; the ledger stays the source
//! of truth for balances.

use crate::{
    ledger::TransactionKind,
    policy::QuizOutcome,
    store::ActivityStatus,
    types::{AccountId, ActivityId, BookId, Credits, Role, TxnId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Variants are added over time; never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CampusEvent {
    // ── Roster ─────────────────────────────────────
    AccountRegistered {
        account_id: AccountId,
        role: Role,
        initial_credits: Credits,
    },
    AccountUpdated {
        account_id: AccountId,
    },
    AccountRemoved {
        account_id: AccountId,
    },
    RosterImported {
        success: usize,
        failed: usize,
    },

    // ── Credits ────────────────────────────────────
    CreditsPosted {
        txn_id: TxnId,
        account_id: AccountId,
        kind: TransactionKind,
        amount: Credits,
        balance_after: Credits,
    },
    QuizCompleted {
        account_id: AccountId,
        category: String,
        correct: u32,
        total: u32,
        outcome: QuizOutcome,
    },
    WheelSpun {
        account_id: AccountId,
        amount: Credits,
    },

    // ── Library ────────────────────────────────────
    BookBorrowed {
        book_id: BookId,
        account_id: AccountId,
    },
    BookReturned {
        book_id: BookId,
        borrower: AccountId,
        returned_by: AccountId,
    },

    // ── Verification ───────────────────────────────
    ActivitySubmitted {
        activity_id: ActivityId,
        account_id: AccountId,
        category: TransactionKind,
    },
    ActivityDecided {
        activity_id: ActivityId,
        status: ActivityStatus,
        reviewer: AccountId,
        reward: Credits,
    },

    // ── Profile ────────────────────────────────────
    AchievementUnlocked {
        account_id: AccountId,
        achievement_id: String,
    },
    QuizQuestionAdded {
        category: String,
    },
}

/// Stable name for an event variant.
pub fn event_type_name(event: &CampusEvent) -> &'static str {
    match event {
        CampusEvent::AccountRegistered { .. }   => "account_registered",
        CampusEvent::AccountUpdated { .. }      => "account_updated",
        CampusEvent::AccountRemoved { .. }      => "account_removed",
        CampusEvent::RosterImported { .. }      => "roster_imported",
        CampusEvent::CreditsPosted { .. }       => "credits_posted",
        CampusEvent::QuizCompleted { .. }       => "quiz_completed",
        CampusEvent::WheelSpun { .. }           => "wheel_spun",
        CampusEvent::BookBorrowed { .. }        => "book_borrowed",
        CampusEvent::BookReturned { .. }        => "book_returned",
        CampusEvent::ActivitySubmitted { .. }   => "activity_submitted",
        CampusEvent::ActivityDecided { .. }     => "activity_decided",
        CampusEvent::AchievementUnlocked { .. } => "achievement_unlocked",
        CampusEvent::QuizQuestionAdded { .. }   => "quiz_question_added",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub seq: u64,
    pub at: DateTime<Utc>,
    pub event_type: String,
    pub event: CampusEvent,
}

#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<EventLogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, at: DateTime<Utc>, event: CampusEvent) {
        let entry = EventLogEntry {
            seq: self.entries.len() as u64 + 1,
            at,
            event_type: event_type_name(&event).to_string(),
            event,
        };
        self.entries.push(entry);
    }

    pub fn all(&self) -> &[EventLogEntry] {
        &self.entries
    }

    /// Entries recorded after the first `count` entries.
    pub fn since(&self, count: usize) -> &[EventLogEntry] {
        &self.entries[count.min(self.entries.len())..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
