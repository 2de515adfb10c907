//! Snapshot serialization: the whole campus state as one JSON value.
//!
//! A snapshot is what the UI collaborator renders from. It is a read
//! model only; the engine never restores from one.

use crate::{
    engine::{CampusEngine, LeaderboardEntry},
    ledger::Transaction,
    store::{Account, Activity, Book},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rows shown on the leaderboard panel.
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusSnapshot {
    pub taken_at: DateTime<Utc>,
    /// Registration order.
    pub accounts: Vec<Account>,
    pub books: Vec<Book>,
    /// Newest first.
    pub activities: Vec<Activity>,
    /// Newest first.
    pub transactions: Vec<Transaction>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl CampusEngine {
    pub fn snapshot(&self) -> CampusSnapshot {
        CampusSnapshot {
            taken_at: self.now(),
            accounts: self.list_accounts().to_vec(),
            books: self.list_books().to_vec(),
            activities: self.list_activities(None, None),
            transactions: self.list_transactions(None),
            leaderboard: self.leaderboard(LEADERBOARD_SIZE),
        }
    }
}
