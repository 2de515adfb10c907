//! Activity verification: students submit, faculty approve or reject.

use super::CampusEngine;
use crate::{
    error::{CreditError, CreditResult},
    event::CampusEvent,
    ledger::{Transaction, TransactionKind},
    session::Session,
    store::{Activity, ActivityStatus},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDecision {
    pub activity: Activity,
    /// The reward entry, when the category carries one and the owner
    /// is still on the roster.
    pub transaction: Option<Transaction>,
}

impl CampusEngine {
    pub fn submit_activity(
        &mut self,
        session: &Session,
        category: TransactionKind,
        description: &str,
    ) -> CreditResult<Activity> {
        let (account_id, submitter_name) = {
            let student = self.require_student(session)?;
            (student.id.clone(), student.name.clone())
        };
        if !category.is_activity_category() {
            return Err(CreditError::IneligibleCategory { kind: category });
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(CreditError::EmptyDescription);
        }

        let activity = Activity {
            id: format!("act-{}", Uuid::new_v4()),
            account_id: account_id.clone(),
            submitter_name,
            category,
            description: description.to_string(),
            status: ActivityStatus::Pending,
            submitted_at: self.clock.now(),
            reviewed_by: None,
            reviewed_at: None,
        };
        self.activities.insert(activity.clone());
        log::info!("{} submitted {} ({category})", account_id, activity.id);
        self.emit(CampusEvent::ActivitySubmitted {
            activity_id: activity.id.clone(),
            account_id,
            category,
        });
        Ok(activity)
    }

    /// Approve a pending submission and credit its category reward.
    /// Terminal submissions are refused with `NotPending`, so a submission
    /// is credited at most once.
    pub fn approve_activity(&mut self, session: &Session, activity_id: &str) -> CreditResult<ActivityDecision> {
        let reviewer = self.require_faculty(session)?.id.clone();
        let activity = self.pending_activity(activity_id)?;
        let (owner, category) = (activity.account_id.clone(), activity.category);
        let reward = self.policy.activity_reward(category);
        let description = self.policy.activity_description(&activity.description);

        let transaction = if reward <= 0 {
            None
        } else if self.accounts.get(&owner).is_some() {
            Some(self.post(&owner, category, reward, description)?)
        } else {
            log::warn!("activity {activity_id} approved for removed account {owner}; no reward");
            None
        };

        let at = self.clock.now();
        let activity = self
            .activities
            .decide(activity_id, ActivityStatus::Approved, &reviewer, at)?
            .clone();
        log::info!("{reviewer} approved {activity_id}");
        self.emit(CampusEvent::ActivityDecided {
            activity_id: activity_id.to_string(),
            status: ActivityStatus::Approved,
            reviewer,
            reward: transaction.as_ref().map_or(0, |t| t.amount),
        });
        Ok(ActivityDecision { activity, transaction })
    }

    /// Reject a pending submission. No ledger or balance effect.
    pub fn reject_activity(&mut self, session: &Session, activity_id: &str) -> CreditResult<ActivityDecision> {
        let reviewer = self.require_faculty(session)?.id.clone();
        self.pending_activity(activity_id)?;

        let at = self.clock.now();
        let activity = self
            .activities
            .decide(activity_id, ActivityStatus::Rejected, &reviewer, at)?
            .clone();
        log::info!("{reviewer} rejected {activity_id}");
        self.emit(CampusEvent::ActivityDecided {
            activity_id: activity_id.to_string(),
            status: ActivityStatus::Rejected,
            reviewer,
            reward: 0,
        });
        Ok(ActivityDecision {
            activity,
            transaction: None,
        })
    }

    fn pending_activity(&self, activity_id: &str) -> CreditResult<&Activity> {
        let activity = self
            .activities
            .get(activity_id)
            .ok_or_else(|| CreditError::ActivityNotFound { id: activity_id.to_string() })?;
        if activity.status != ActivityStatus::Pending {
            log::warn!("activity {activity_id} is already {:?}", activity.status);
            return Err(CreditError::NotPending { id: activity_id.to_string() });
        }
        Ok(activity)
    }
}
