use crate::{
    error::{CreditError, CreditResult},
    ledger::TransactionKind,
    types::{AccountId, ActivityId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pending -> Approved | Rejected. Both outcomes are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Pending,
    Approved,
    Rejected,
}

impl ActivityStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn can_transition_to(&self, next: ActivityStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub account_id: AccountId,
    /// Display name of the submitter at submission time.
    pub submitter_name: String,
    pub category: TransactionKind,
    pub description: String,
    pub status: ActivityStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_by: Option<AccountId>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct ActivityBoard {
    activities: Vec<Activity>,
}

impl ActivityBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Move a submission out of Pending. Rejects every other transition.
    pub(crate) fn decide(
        &mut self,
        id: &str,
        next: ActivityStatus,
        reviewer: &str,
        at: DateTime<Utc>,
    ) -> CreditResult<&Activity> {
        let activity = self
            .activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CreditError::ActivityNotFound { id: id.to_string() })?;
        if !activity.status.can_transition_to(next) {
            return Err(CreditError::NotPending { id: id.to_string() });
        }
        activity.status = next;
        activity.reviewed_by = Some(reviewer.to_string());
        activity.reviewed_at = Some(at);
        Ok(activity)
    }

    /// Newest submission first, optionally filtered by owner and status.
    /// Equal timestamps put the most recently submitted first.
    pub fn list(&self, account_id: Option<&str>, status: Option<ActivityStatus>) -> Vec<Activity> {
        // Reverse insertion order, then a stable sort keeps it for ties.
        let mut out: Vec<Activity> = self
            .activities
            .iter()
            .rev()
            .filter(|a| account_id.map_or(true, |id| a.account_id == id))
            .filter(|a| status.map_or(true, |s| a.status == s))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        out
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}
