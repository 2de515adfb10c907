//! Acting context passed into every engine command.
//!
//! A session names the account whose credits a command touches, the role
//! the caller is acting as, and, while a faculty member acts as a student,
//! the faculty account underneath. Sessions are plain values: switching
//! roles produces a new session instead of mutating shared state.

use crate::types::{AccountId, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    effective_account: AccountId,
    acting_as: Role,
    impersonator: Option<AccountId>,
}

impl Session {
    /// Session for an account acting in its own role.
    pub(crate) fn own(account_id: AccountId, role: Role) -> Self {
        Self {
            effective_account: account_id,
            acting_as: role,
            impersonator: None,
        }
    }

    /// Faculty `impersonator` acting as `student`.
    pub(crate) fn impersonating(student: AccountId, impersonator: AccountId) -> Self {
        Self {
            effective_account: student,
            acting_as: Role::Student,
            impersonator: Some(impersonator),
        }
    }

    pub fn effective_account(&self) -> &str {
        &self.effective_account
    }

    pub fn acting_as(&self) -> Role {
        self.acting_as
    }

    pub fn impersonator(&self) -> Option<&str> {
        self.impersonator.as_deref()
    }

    pub fn is_impersonating(&self) -> bool {
        self.impersonator.is_some()
    }

    /// The account that is really at the keyboard.
    pub fn principal(&self) -> &str {
        self.impersonator.as_deref().unwrap_or(&self.effective_account)
    }

    /// Drop back to the underlying faculty session. A session that is not
    /// impersonating is returned unchanged.
    pub fn stop_impersonating(&self) -> Session {
        match &self.impersonator {
            Some(faculty) => Session::own(faculty.clone(), Role::Faculty),
            None => self.clone(),
        }
    }
}
