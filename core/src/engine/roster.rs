//! Account registration, profile edits and removal.

use super::CampusEngine;
use crate::{
    error::{CreditError, CreditResult},
    event::CampusEvent,
    roster::{self, is_valid_email, BulkImportReport, RosterRow},
    session::Session,
    store::Account,
    types::{AccountId, Credits, Role},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub initial_credits: Credits,
}

/// Profile fields a faculty member may change. Balances are not editable;
/// credits only move through the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEdit {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CampusEngine {
    /// Insert an account without validation. Callers validate first.
    pub(super) fn register(
        &mut self,
        id: Option<AccountId>,
        name: &str,
        email: &str,
        role: Role,
        initial_credits: Credits,
    ) -> Account {
        let id = id.unwrap_or_else(|| match role {
            Role::Student => format!("user-{}", Uuid::new_v4()),
            Role::Faculty => format!("faculty-{}", Uuid::new_v4()),
        });
        let account = Account {
            id: id.clone(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            credit_balance: initial_credits,
            initial_credits,
            last_spin_date: None,
            achievements: Vec::new(),
            registered_at: self.clock.now(),
        };
        self.accounts.upsert(account.clone());
        log::info!("registered {role} {id} <{email}> with {initial_credits} credits");
        self.emit(CampusEvent::AccountRegistered {
            account_id: id,
            role,
            initial_credits,
        });
        account
    }

    /// Faculty add one student.
    pub fn add_account(&mut self, session: &Session, new: NewAccount) -> CreditResult<Account> {
        self.require_faculty(session)?;
        let name = new.name.trim();
        let email = new.email.trim();
        if name.is_empty() {
            return Err(CreditError::MissingField { field: "name" });
        }
        if email.is_empty() {
            return Err(CreditError::MissingField { field: "email" });
        }
        if !is_valid_email(email) {
            return Err(CreditError::InvalidEmail { email: email.to_string() });
        }
        if self.accounts.email_taken(email, None) {
            return Err(CreditError::DuplicateEmail { email: email.to_string() });
        }
        if new.initial_credits < 0 {
            return Err(CreditError::InvalidAmount {
                amount: new.initial_credits,
                reason: "initial credits cannot be negative".into(),
            });
        }
        Ok(self.register(None, name, email, Role::Student, new.initial_credits))
    }

    /// Faculty add many students. Bad rows are reported one by one; the
    /// good rows are all registered.
    pub fn bulk_add_accounts(&mut self, session: &Session, rows: Vec<RosterRow>) -> CreditResult<BulkImportReport> {
        self.require_faculty(session)?;
        let (accepted, failures) = roster::screen_rows(rows, |email| self.accounts.email_taken(email, None));
        for row in &accepted {
            self.register(None, row.name.trim(), row.email.trim(), Role::Student, row.initial_credits);
        }
        let report = BulkImportReport {
            success: accepted.len(),
            failures,
        };
        log::info!(
            "roster import: {} added, {} rejected",
            report.success,
            report.failures.len()
        );
        self.emit(CampusEvent::RosterImported {
            success: report.success,
            failed: report.failures.len(),
        });
        Ok(report)
    }

    /// Parse roster text and import it.
    pub fn import_roster_csv(&mut self, session: &Session, text: &str) -> CreditResult<BulkImportReport> {
        self.require_faculty(session)?;
        let rows = roster::parse_roster_csv(text)?;
        self.bulk_add_accounts(session, rows)
    }

    pub fn edit_account(&mut self, session: &Session, account_id: &str, edit: AccountEdit) -> CreditResult<Account> {
        self.require_faculty(session)?;
        let mut account = self.account(account_id)?.clone();

        if let Some(name) = edit.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(CreditError::MissingField { field: "name" });
            }
            account.name = name.to_string();
        }
        if let Some(email) = edit.email {
            let email = email.trim();
            if !is_valid_email(email) {
                return Err(CreditError::InvalidEmail { email: email.to_string() });
            }
            if self.accounts.email_taken(email, Some(account_id)) {
                return Err(CreditError::DuplicateEmail { email: email.to_string() });
            }
            account.email = email.to_string();
        }

        self.accounts.upsert(account.clone());
        self.emit(CampusEvent::AccountUpdated {
            account_id: account_id.to_string(),
        });
        Ok(account)
    }

    /// Detach an account from the roster. Its ledger history and any book
    /// it still holds keep referencing the id.
    pub fn remove_account(&mut self, session: &Session, account_id: &str) -> CreditResult<Account> {
        self.require_faculty(session)?;
        if session.principal() == account_id {
            return Err(CreditError::not_eligible("you cannot remove your own account"));
        }
        let removed = self
            .accounts
            .remove(account_id)
            .ok_or_else(|| CreditError::AccountNotFound { id: account_id.to_string() })?;
        let held = self.library.borrowed_by(account_id).count();
        if held > 0 {
            log::warn!("removed {account_id} still holds {held} book(s)");
        }
        log::info!("removed {} <{}>", removed.id, removed.email);
        self.emit(CampusEvent::AccountRemoved {
            account_id: account_id.to_string(),
        });
        Ok(removed)
    }

    /// Self-service faculty enrolment with the institution's token.
    pub fn join_faculty(&mut self, name: &str, email: &str, token: &str) -> CreditResult<Account> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(CreditError::MissingField { field: "name" });
        }
        if email.is_empty() {
            return Err(CreditError::MissingField { field: "email" });
        }
        if token.is_empty() {
            return Err(CreditError::MissingField { field: "token" });
        }
        if !is_valid_email(email) || !email.ends_with(&self.faculty_join.email_domain) {
            return Err(CreditError::InvalidEmail { email: email.to_string() });
        }
        if token != self.faculty_join.token {
            log::warn!("faculty enrolment for <{email}> with a bad token");
            return Err(CreditError::InvalidToken);
        }
        if self.accounts.email_taken(email, None) {
            return Err(CreditError::DuplicateEmail { email: email.to_string() });
        }
        Ok(self.register(None, name, email, Role::Faculty, 0))
    }
}
