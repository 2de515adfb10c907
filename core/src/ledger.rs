//! The credit ledger: an append-only transaction log.
//!
//! RULE: entries are never edited or removed once appended.
//! The ledger does not validate amounts or touch balances; pairing an
//! append with the matching balance adjustment is the engine's job.

use crate::types::{AccountId, Credits, TxnId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of ledger categories.
/// Variants are never removed or reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    EarnAcademic,
    EarnPeerLearning,
    EarnInnovation,
    EarnSocialImpact,
    EarnSkillBuilding,
    EarnIntegrity,
    EarnQuiz,
    EarnSpinWheel,
    SpendLibrary,
    ReturnLibrary,
}

/// Which way a kind moves credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Credit,
    Debit,
}

impl TransactionKind {
    /// Categories a student may claim through an activity submission.
    pub const ACTIVITY_CATEGORIES: [TransactionKind; 6] = [
        Self::EarnAcademic,
        Self::EarnPeerLearning,
        Self::EarnInnovation,
        Self::EarnSocialImpact,
        Self::EarnSkillBuilding,
        Self::EarnIntegrity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::EarnAcademic      => "Academic",
            Self::EarnPeerLearning  => "Peer Learning",
            Self::EarnInnovation    => "Innovation",
            Self::EarnSocialImpact  => "Social Impact",
            Self::EarnSkillBuilding => "Skill Building",
            Self::EarnIntegrity     => "Integrity",
            Self::EarnQuiz          => "Quiz",
            Self::EarnSpinWheel     => "Spin Wheel",
            Self::SpendLibrary      => "Spend: Library",
            Self::ReturnLibrary     => "Return: Library",
        }
    }

    pub fn is_activity_category(&self) -> bool {
        Self::ACTIVITY_CATEGORIES.contains(self)
    }

    pub fn is_library(&self) -> bool {
        matches!(self, Self::SpendLibrary | Self::ReturnLibrary)
    }

    pub fn direction(&self) -> Direction {
        match self {
            Self::SpendLibrary => Direction::Debit,
            _ => Direction::Credit,
        }
    }

    /// Sign contract: credit kinds carry amounts >= 0, debit kinds <= 0.
    /// Zero is accepted by both (a blank wheel segment is a real entry).
    pub fn accepts(&self, amount: Credits) -> bool {
        match self.direction() {
            Direction::Credit => amount >= 0,
            Direction::Debit => amount <= 0,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxnId,
    pub timestamp: DateTime<Utc>,
    /// May reference an account that has since been removed.
    pub account_id: AccountId,
    pub kind: TransactionKind,
    pub amount: Credits,
    pub description: String,
}

#[derive(Debug, Default)]
pub struct Ledger {
    /// Storage order == append order == id order.
    entries: Vec<Transaction>,
    last_seq: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, assigning the next sequence id.
    ///
    /// `at` is clamped to the newest stored timestamp so timestamps never
    /// decrease in append order, even if the clock steps backwards.
    pub fn append(
        &mut self,
        account_id: &str,
        kind: TransactionKind,
        amount: Credits,
        description: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Transaction {
        let timestamp = match self.entries.last() {
            Some(last) if last.timestamp > at => last.timestamp,
            _ => at,
        };
        self.last_seq += 1;
        let txn = Transaction {
            id: TxnId(self.last_seq),
            timestamp,
            account_id: account_id.to_string(),
            kind,
            amount,
            description: description.into(),
        };
        self.entries.push(txn.clone());
        log::debug!("ledger append {} {} {} {}", txn.id, txn.account_id, kind, amount);
        txn
    }

    /// Snapshot of every entry, newest timestamp first; equal timestamps
    /// put the most recently appended entry first.
    pub fn all(&self) -> Vec<Transaction> {
        let mut out = self.entries.clone();
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        out
    }

    /// Same ordering as `all()`, restricted to one account id.
    pub fn for_account(&self, account_id: &str) -> Vec<Transaction> {
        let mut out: Vec<Transaction> = self
            .entries
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        out
    }

    pub fn get(&self, id: TxnId) -> Option<&Transaction> {
        // Ids are dense and start at 1.
        let idx = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.entries.get(idx)
    }

    /// Entries in append order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    /// Σ amount over every entry for `account_id`, or `None` when the
    /// total does not fit in `Credits`.
    pub fn net_for(&self, account_id: &str) -> Option<Credits> {
        self.entries
            .iter()
            .filter(|t| t.account_id == account_id)
            .try_fold(0, |acc: Credits, t| acc.checked_add(t.amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
