//! Quiz and bonus wheel rewards, plus achievement unlocks.

use super::CampusEngine;
use crate::{
    error::{CreditError, CreditResult},
    event::CampusEvent,
    ledger::{Transaction, TransactionKind},
    policy::{AchievementProgress, QuizReward},
    quiz::QuizQuestion,
    session::Session,
    store::Achievement,
    types::Credits,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub correct: u32,
    pub total: u32,
    pub reward: QuizReward,
    /// None when the attempt earned nothing.
    pub transaction: Option<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinResult {
    /// Wheel segment index, when the engine drew it.
    pub segment: Option<usize>,
    pub amount: Credits,
    pub transaction: Transaction,
}

impl CampusEngine {
    /// Credit a finished quiz attempt. Perfect scores pay
    /// `full_score_reward`, scores at the bonus threshold pay
    /// `bonus_reward`, anything else writes nothing to the ledger.
    pub fn record_quiz_result(
        &mut self,
        session: &Session,
        correct_count: u32,
        total_questions: u32,
        full_score_reward: Credits,
        bonus_reward: Credits,
        category_name: &str,
    ) -> CreditResult<QuizResult> {
        let account_id = self.require_student(session)?.id.clone();
        if correct_count > total_questions {
            return Err(CreditError::InvalidQuizScore {
                correct: correct_count,
                total: total_questions,
            });
        }
        let reward = self.policy.quiz_reward(
            correct_count,
            total_questions,
            full_score_reward,
            bonus_reward,
            category_name,
        );
        if reward.amount < 0 {
            return Err(CreditError::InvalidAmount {
                amount: reward.amount,
                reason: "quiz rewards cannot be negative".into(),
            });
        }

        let transaction = if reward.amount > 0 {
            Some(self.post(&account_id, TransactionKind::EarnQuiz, reward.amount, reward.description.clone())?)
        } else {
            None
        };

        self.emit(CampusEvent::QuizCompleted {
            account_id: account_id.clone(),
            category: category_name.to_string(),
            correct: correct_count,
            total: total_questions,
            outcome: reward.outcome,
        });
        if transaction.is_some() {
            self.unlock_achievements(&account_id);
        }

        Ok(QuizResult {
            correct: correct_count,
            total: total_questions,
            reward,
            transaction,
        })
    }

    /// Grade answers against a catalog category and credit the result.
    pub fn submit_quiz(
        &mut self,
        session: &Session,
        category_name: &str,
        answers: &[Option<String>],
    ) -> CreditResult<QuizResult> {
        self.require_student(session)?;
        let score = self
            .quiz
            .get(category_name)
            .ok_or_else(|| CreditError::QuizCategoryNotFound { name: category_name.to_string() })?
            .grade(answers);
        let bonus = self.policy.quiz_bonus_reward;
        self.record_quiz_result(
            session,
            score.correct,
            score.total,
            score.full_score_reward,
            bonus,
            category_name,
        )
    }

    /// Credit a wheel result. One spin per account per calendar day; a zero
    /// segment still writes a zero-amount ledger entry.
    pub fn record_spin_result(&mut self, session: &Session, won_amount: Credits) -> CreditResult<SpinResult> {
        self.credit_spin(session, won_amount, None)
    }

    /// Draw a wheel segment and credit it.
    pub fn spin_wheel(&mut self, session: &Session) -> CreditResult<SpinResult> {
        self.check_can_spin(session)?;
        if self.policy.spin_segments.is_empty() {
            return Err(CreditError::not_eligible("the bonus wheel has no segments"));
        }
        let segment = self.wheel.next_index(self.policy.spin_segments.len());
        let amount = self.policy.spin_segments[segment];
        self.credit_spin(session, amount, Some(segment))
    }

    fn credit_spin(
        &mut self,
        session: &Session,
        won_amount: Credits,
        segment: Option<usize>,
    ) -> CreditResult<SpinResult> {
        let account_id = self.check_can_spin(session)?;
        let today = self.clock.today();
        let description = self.policy.spin_description(won_amount);
        let transaction = self.post(&account_id, TransactionKind::EarnSpinWheel, won_amount, description)?;
        if let Some(account) = self.accounts.get_mut(&account_id) {
            account.last_spin_date = Some(today);
        }
        self.emit(CampusEvent::WheelSpun {
            account_id: account_id.clone(),
            amount: won_amount,
        });
        Ok(SpinResult {
            segment,
            amount: won_amount,
            transaction,
        })
    }

    fn check_can_spin(&self, session: &Session) -> CreditResult<String> {
        let today = self.clock.today();
        let account = self.require_student(session)?;
        if account.has_spun_on(today) {
            log::warn!("{} already spun on {today}", account.id);
            return Err(CreditError::AlreadySpunToday { id: account.id.clone() });
        }
        Ok(account.id.clone())
    }

    /// Faculty append a question to a quiz category.
    pub fn add_quiz_question(
        &mut self,
        session: &Session,
        category: &str,
        question: QuizQuestion,
    ) -> CreditResult<()> {
        self.require_faculty(session)?;
        self.quiz.add_question(category, question)?;
        self.emit(CampusEvent::QuizQuestionAdded { category: category.to_string() });
        Ok(())
    }

    /// Ledger-derived progress toward achievement rules.
    pub fn achievement_progress(&self, account_id: &str) -> AchievementProgress {
        self.ledger
            .iter()
            .filter(|t| t.account_id == account_id)
            .fold(AchievementProgress::default(), |mut p, t| {
                match t.kind {
                    TransactionKind::EarnQuiz => p.quiz_credits += t.amount,
                    TransactionKind::SpendLibrary => p.books_borrowed += 1,
                    _ => {}
                }
                p
            })
    }

    /// Append every newly satisfied achievement to the account.
    pub(super) fn unlock_achievements(&mut self, account_id: &str) {
        let progress = self.achievement_progress(account_id);
        let unlocked: Vec<Achievement> = match self.accounts.get(account_id) {
            Some(account) => self
                .achievements
                .iter()
                .filter(|def| def.unlocks_for(account, &progress))
                .map(|def| def.to_achievement())
                .collect(),
            None => return,
        };
        for achievement in unlocked {
            log::info!("{account_id} unlocked '{}'", achievement.name);
            let achievement_id = achievement.id.clone();
            if let Some(account) = self.accounts.get_mut(account_id) {
                account.achievements.push(achievement);
            }
            self.emit(CampusEvent::AchievementUnlocked {
                account_id: account_id.to_string(),
                achievement_id,
            });
        }
    }
}
