use serde::{Deserialize, Serialize};

use crate::model::operation::Operation;

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single generated quiz question: a rendered prompt plus its exact
/// integer answer.
///
/// Immutable once created; the generator is the only producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    correct_answer: i64,
}

impl Question {
    /// Build a question from its two operands and the resolved operation.
    ///
    /// The prompt mirrors the classic quiz rendering, e.g. `"7 × 8 = ?"`.
    /// The caller supplies the answer so division can pick the quotient
    /// first and derive the dividend.
    #[must_use]
    pub fn from_operands(operation: Operation, num1: i64, num2: i64, correct_answer: i64) -> Self {
        Self {
            prompt: format!("{num1} {} {num2} = ?", operation.symbol()),
            correct_answer,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> i64 {
        self.correct_answer
    }
}

//
// ─── ANSWER RECORD ─────────────────────────────────────────────────────────────
//

/// Outcome of one answered question.
///
/// Created when the user submits an answer and never mutated afterwards;
/// the session's score is always the count of correct records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: Question,
    pub user_answer: i64,
    pub is_correct: bool,
}

impl AnswerRecord {
    /// Grade a user answer against the question. Exact integer equality,
    /// no tolerance.
    #[must_use]
    pub fn new(question: Question, user_answer: i64) -> Self {
        let is_correct = user_answer == question.correct_answer();
        Self {
            question,
            user_answer,
            is_correct,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
