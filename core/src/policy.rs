//! Reward policy: pure functions from an outcome to a credit amount.
//!
//! The activity table is configuration: adding a category reward is a
//! data change, never an engine change.

use crate::{
    ledger::TransactionKind,
    store::{Account, Achievement, AchievementIcon},
    types::Credits,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardPolicy {
    /// Categories absent from the table (or mapped to 0) award nothing.
    pub activity_rewards: BTreeMap<TransactionKind, Credits>,
    /// Flat reward for a non-perfect quiz at or above the threshold.
    pub quiz_bonus_reward: Credits,
    pub quiz_bonus_threshold: u32,
    /// Wheel segment values, in wheel order.
    pub spin_segments: Vec<Credits>,
    /// Characters of the activity description kept in the ledger note.
    pub description_excerpt_chars: usize,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        let activity_rewards = [
            (TransactionKind::EarnAcademic, 50),
            (TransactionKind::EarnPeerLearning, 25),
            (TransactionKind::EarnInnovation, 100),
            (TransactionKind::EarnSocialImpact, 75),
            (TransactionKind::EarnSkillBuilding, 40),
            (TransactionKind::EarnIntegrity, 15),
        ]
        .into_iter()
        .collect();
        Self {
            activity_rewards,
            quiz_bonus_reward: 10,
            quiz_bonus_threshold: 3,
            spin_segments: vec![10, 50, 5, 100, 20, 75, 15, 0],
            description_excerpt_chars: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizOutcome {
    Perfect,
    Bonus,
    NoReward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizReward {
    pub outcome: QuizOutcome,
    pub amount: Credits,
    pub description: String,
}

impl RewardPolicy {
    pub fn activity_reward(&self, kind: TransactionKind) -> Credits {
        self.activity_rewards.get(&kind).copied().unwrap_or(0)
    }

    /// Perfect score pays the full reward, `threshold`+ correct pays the
    /// flat bonus, anything less pays nothing.
    pub fn quiz_reward(
        &self,
        correct: u32,
        total: u32,
        full_score_reward: Credits,
        bonus_reward: Credits,
        category_name: &str,
    ) -> QuizReward {
        if total > 0 && correct == total {
            QuizReward {
                outcome: QuizOutcome::Perfect,
                amount: full_score_reward,
                description: format!("Aced the \"{category_name}\" quiz with a perfect score!"),
            }
        } else if correct >= self.quiz_bonus_threshold {
            QuizReward {
                outcome: QuizOutcome::Bonus,
                amount: bonus_reward,
                description: format!(
                    "Scored {correct}/{total} on \"{category_name}\" and earned a bonus."
                ),
            }
        } else {
            QuizReward {
                outcome: QuizOutcome::NoReward,
                amount: 0,
                description: format!("Scored {correct}/{total} on \"{category_name}\"."),
            }
        }
    }

    pub fn spin_description(&self, won: Credits) -> String {
        format!("Won {won} credits from the bonus wheel.")
    }

    /// Ledger note for an approved activity, with a char-safe excerpt.
    pub fn activity_description(&self, description: &str) -> String {
        let excerpt: String = description.chars().take(self.description_excerpt_chars).collect();
        format!("Activity approved: {excerpt}...")
    }
}

// ── Achievements ─────────────────────────────────────────────

/// Unlock condition, evaluated from the account's ledger history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum AchievementRule {
    QuizCreditsAtLeast { credits: Credits },
    BooksBorrowedAtLeast { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: AchievementIcon,
    pub unlock: AchievementRule,
}

/// Ledger-derived progress an achievement rule is checked against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AchievementProgress {
    pub quiz_credits: Credits,
    pub books_borrowed: usize,
}

impl AchievementDef {
    pub fn is_met(&self, progress: &AchievementProgress) -> bool {
        match self.unlock {
            AchievementRule::QuizCreditsAtLeast { credits } => progress.quiz_credits >= credits,
            AchievementRule::BooksBorrowedAtLeast { count } => progress.books_borrowed >= count,
        }
    }

    /// True when the rule is met and the account does not hold it yet.
    pub fn unlocks_for(&self, account: &Account, progress: &AchievementProgress) -> bool {
        !account.has_achievement(&self.id) && self.is_met(progress)
    }

    pub fn to_achievement(&self) -> Achievement {
        Achievement {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            icon: self.icon,
        }
    }
}

pub fn default_achievements() -> Vec<AchievementDef> {
    vec![
        AchievementDef {
            id: "ach-01".into(),
            name: "Quiz Master".into(),
            description: "Scored 100+ points in quizzes.".into(),
            icon: AchievementIcon::Quiz,
            unlock: AchievementRule::QuizCreditsAtLeast { credits: 100 },
        },
        AchievementDef {
            id: "ach-02".into(),
            name: "Bookworm".into(),
            description: "Borrowed 5+ books from the library.".into(),
            icon: AchievementIcon::Book,
            unlock: AchievementRule::BooksBorrowedAtLeast { count: 5 },
        },
    ]
}
