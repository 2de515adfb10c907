//! Shared primitive types used across the credit core.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A signed amount of time credits.
pub type Credits = i64;

/// A stable, unique identifier for an account. Never reused.
pub type AccountId = String;

/// Server-assigned identifier of an activity submission.
pub type ActivityId = String;

/// Catalog number of a library book.
pub type BookId = u32;

/// Ledger sequence number. Assigned in append order, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxnId(pub u64);

impl fmt::Display for TxnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn-{:05}", self.0)
    }
}

/// Account role. Fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Faculty,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => f.write_str("Student"),
            Self::Faculty => f.write_str("Faculty"),
        }
    }
}
