use crate::{
    error::{CreditError, CreditResult},
    types::{AccountId, Credits, Role},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementIcon {
    Star,
    Quiz,
    Book,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: AchievementIcon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Cached projection: initial_credits + Σ ledger amounts for this id.
    pub credit_balance: Credits,
    /// Opening balance supplied at registration.
    pub initial_credits: Credits,
    /// Calendar date of the last wheel spin, if any.
    pub last_spin_date: Option<NaiveDate>,
    /// Append-only, insertion order preserved.
    pub achievements: Vec<Achievement>,
    pub registered_at: DateTime<Utc>,
}

impl Account {
    pub fn has_achievement(&self, achievement_id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == achievement_id)
    }

    pub fn has_spun_on(&self, day: NaiveDate) -> bool {
        self.last_spin_date == Some(day)
    }
}

/// Roster of live accounts, in registration order.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    /// Replace the account with the same id, or append it.
    pub(crate) fn upsert(&mut self, account: Account) {
        match self.get_mut(&account.id) {
            Some(existing) => *existing = account,
            None => self.accounts.push(account),
        }
    }

    /// Pure balance mutation. Never writes the ledger.
    /// A delta that would overflow the balance leaves it untouched.
    pub(crate) fn adjust_balance(&mut self, id: &str, delta: Credits) -> CreditResult<&Account> {
        let account = self
            .get_mut(id)
            .ok_or_else(|| CreditError::AccountNotFound { id: id.to_string() })?;
        let current = account.credit_balance;
        account.credit_balance = current.checked_add(delta).ok_or_else(|| CreditError::InvalidAmount {
            amount: delta,
            reason: format!("balance {current} cannot absorb it"),
        })?;
        Ok(account)
    }

    /// Detach an account from the roster. Ledger history and book loans
    /// that reference the id are left alone.
    pub(crate) fn remove(&mut self, id: &str) -> Option<Account> {
        let idx = self.accounts.iter().position(|a| a.id == id)?;
        Some(self.accounts.remove(idx))
    }

    pub fn all(&self) -> &[Account] {
        &self.accounts
    }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Account> {
        self.accounts.iter().filter(move |a| a.role == role)
    }

    /// Case-insensitive email lookup, optionally ignoring one account id.
    pub fn email_taken(&self, email: &str, except: Option<&str>) -> bool {
        self.accounts.iter().any(|a| {
            a.email.eq_ignore_ascii_case(email) && Some(a.id.as_str()) != except
        })
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
