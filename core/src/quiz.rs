//! Quiz catalog and grading.

use crate::{
    error::{CreditError, CreditResult},
    types::Credits,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub credits: Credits,
}

impl QuizQuestion {
    pub fn validate(&self) -> CreditResult<()> {
        if self.question.trim().is_empty() {
            return Err(CreditError::MissingField { field: "question" });
        }
        if !self.options.iter().any(|o| o == &self.correct_answer) {
            return Err(CreditError::InvalidQuestion {
                reason: format!("correct answer '{}' is not one of the options", self.correct_answer),
            });
        }
        if self.credits < 0 {
            return Err(CreditError::InvalidQuestion {
                reason: format!("negative credit value {}", self.credits),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    pub name: String,
    pub questions: Vec<QuizQuestion>,
}

/// Result of grading one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    pub correct: u32,
    pub total: u32,
    /// Σ credits over every question in the category.
    pub full_score_reward: Credits,
}

impl QuizCategory {
    /// Grade answers positionally. Missing or `None` answers count as wrong.
    pub fn grade(&self, answers: &[Option<String>]) -> QuizScore {
        let correct = self
            .questions
            .iter()
            .enumerate()
            .filter(|(i, q)| {
                answers
                    .get(*i)
                    .and_then(|a| a.as_deref())
                    .is_some_and(|a| a == q.correct_answer)
            })
            .count();
        QuizScore {
            correct: correct as u32,
            total: self.questions.len() as u32,
            full_score_reward: self.questions.iter().map(|q| q.credits).sum(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuizCatalog {
    categories: Vec<QuizCategory>,
}

impl QuizCatalog {
    pub fn new(categories: Vec<QuizCategory>) -> Self {
        Self { categories }
    }

    pub fn get(&self, name: &str) -> Option<&QuizCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn all(&self) -> &[QuizCategory] {
        &self.categories
    }

    /// Append a question, creating the category when it does not exist.
    pub(crate) fn add_question(&mut self, category: &str, question: QuizQuestion) -> CreditResult<()> {
        if category.trim().is_empty() {
            return Err(CreditError::MissingField { field: "category" });
        }
        question.validate()?;
        match self.categories.iter_mut().find(|c| c.name == category) {
            Some(existing) => existing.questions.push(question),
            None => self.categories.push(QuizCategory {
                name: category.to_string(),
                questions: vec![question],
            }),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: &str, credits: Credits) -> QuizQuestion {
        QuizQuestion {
            question: format!("Pick {answer}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_answer: answer.into(),
            credits,
        }
    }

    #[test]
    fn grading_counts_positional_matches() {
        let category = QuizCategory {
            name: "Letters".into(),
            questions: vec![question("a", 10), question("b", 10), question("c", 20)],
        };
        let score = category.grade(&[Some("a".into()), None, Some("c".into())]);
        assert_eq!(score, QuizScore { correct: 2, total: 3, full_score_reward: 40 });

        let short = category.grade(&[Some("a".into())]);
        assert_eq!(short.correct, 1);
    }

    #[test]
    fn add_question_creates_category() {
        let mut catalog = QuizCatalog::default();
        catalog.add_question("New", question("b", 5)).unwrap();
        catalog.add_question("New", question("c", 5)).unwrap();
        assert_eq!(catalog.get("New").unwrap().questions.len(), 2);
    }

    #[test]
    fn question_answer_must_be_an_option() {
        let mut bad = question("a", 5);
        bad.correct_answer = "z".into();
        assert!(matches!(bad.validate(), Err(CreditError::InvalidQuestion { .. })));
    }
}
