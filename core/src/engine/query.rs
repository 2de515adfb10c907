//! Read-only views for the UI collaborator.

use super::CampusEngine;
use crate::{
    error::{CreditError, CreditResult},
    event::EventLogEntry,
    ledger::{Ledger, Transaction},
    policy::RewardPolicy,
    quiz::QuizCategory,
    session::Session,
    store::{Account, Activity, ActivityStatus, Book},
    types::{AccountId, Credits, Role},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard figures for one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub balance: Credits,
    /// Σ positive ledger amounts.
    pub earned: Credits,
    /// Σ |negative ledger amounts|.
    pub spent: Credits,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub account_id: AccountId,
    pub name: String,
    pub credits: Credits,
}

/// A cached balance that disagrees with the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDiscrepancy {
    pub account_id: AccountId,
    pub cached: Credits,
    /// `None` when initial credits plus the ledger total overflow.
    pub expected: Option<Credits>,
}

impl CampusEngine {
    /// Current time on the engine's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn list_accounts(&self) -> &[Account] {
        self.accounts.all()
    }

    pub fn get_account(&self, id: &str) -> CreditResult<&Account> {
        self.account(id)
    }

    /// Ledger entries newest first, optionally for one account id (which
    /// may belong to a removed account).
    pub fn list_transactions(&self, account_id: Option<&str>) -> Vec<Transaction> {
        match account_id {
            Some(id) => self.ledger.for_account(id),
            None => self.ledger.all(),
        }
    }

    pub fn list_activities(&self, account_id: Option<&str>, status: Option<ActivityStatus>) -> Vec<Activity> {
        self.activities.list(account_id, status)
    }

    /// The verification queue.
    pub fn pending_activities(&self) -> Vec<Activity> {
        self.activities.list(None, Some(ActivityStatus::Pending))
    }

    pub fn list_books(&self) -> &[Book] {
        self.library.all()
    }

    pub fn books_borrowed_by(&self, account_id: &str) -> Vec<Book> {
        self.library.borrowed_by(account_id).cloned().collect()
    }

    pub fn library_transactions(&self) -> Vec<Transaction> {
        self.ledger.all().into_iter().filter(|t| t.kind.is_library()).collect()
    }

    pub fn account_summary(&self, account_id: &str) -> CreditResult<AccountSummary> {
        let account = self.account(account_id)?;
        let mut summary = AccountSummary {
            balance: account.credit_balance,
            earned: 0,
            spent: 0,
            transaction_count: 0,
        };
        let overflow = |amount: Credits| CreditError::InvalidAmount {
            amount,
            reason: format!("totals for {account_id} do not fit in a credit amount"),
        };
        for txn in self.ledger.iter().filter(|t| t.account_id == account_id) {
            if txn.amount > 0 {
                summary.earned = summary.earned.checked_add(txn.amount).ok_or_else(|| overflow(txn.amount))?;
            } else {
                summary.spent = txn
                    .amount
                    .checked_neg()
                    .and_then(|spent| summary.spent.checked_add(spent))
                    .ok_or_else(|| overflow(txn.amount))?;
            }
            summary.transaction_count += 1;
        }
        Ok(summary)
    }

    /// Students ranked by balance, highest first; ties by name.
    pub fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut students: Vec<&Account> = self.accounts.with_role(Role::Student).collect();
        students.sort_by(|a, b| b.credit_balance.cmp(&a.credit_balance).then_with(|| a.name.cmp(&b.name)));
        students
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, a)| LeaderboardEntry {
                rank: i + 1,
                account_id: a.id.clone(),
                name: a.name.clone(),
                credits: a.credit_balance,
            })
            .collect()
    }

    /// Case-insensitive substring match on name or email.
    pub fn search_accounts(&self, term: &str) -> Vec<&Account> {
        let term = term.trim().to_lowercase();
        self.accounts
            .all()
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&term) || a.email.to_lowercase().contains(&term))
            .collect()
    }

    /// Fellow students, excluding the session's own account.
    pub fn community(&self, session: &Session) -> Vec<&Account> {
        self.accounts
            .with_role(Role::Student)
            .filter(|a| a.id != session.effective_account())
            .collect()
    }

    pub fn quiz_categories(&self) -> &[QuizCategory] {
        self.quiz.all()
    }

    pub fn reward_policy(&self) -> &RewardPolicy {
        &self.policy
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn events(&self) -> &[EventLogEntry] {
        self.events.all()
    }

    /// Recompute every live account's balance from the ledger and report
    /// any cached balance that disagrees. Empty means consistent.
    pub fn audit_balances(&self) -> Vec<BalanceDiscrepancy> {
        self.accounts
            .all()
            .iter()
            .filter_map(|a| {
                let expected = self
                    .ledger
                    .net_for(&a.id)
                    .and_then(|net| a.initial_credits.checked_add(net));
                (expected != Some(a.credit_balance)).then(|| BalanceDiscrepancy {
                    account_id: a.id.clone(),
                    cached: a.credit_balance,
                    expected,
                })
            })
            .collect()
    }
}
