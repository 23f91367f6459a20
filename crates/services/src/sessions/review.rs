use serde::Serialize;

use quiz_core::model::AnswerRecord;

use super::service::QuizSession;
use crate::error::SessionError;

//
// ─── PER-QUESTION ROW ──────────────────────────────────────────────────────────
//

/// One row of the end-of-quiz review.
///
/// Structured data only; the presentation layer decides how to render
/// correct and incorrect rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionReview {
    pub prompt: String,
    pub user_answer: i64,
    pub correct_answer: i64,
    pub is_correct: bool,
}

impl From<&AnswerRecord> for QuestionReview {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            prompt: record.question.prompt().to_string(),
            user_answer: record.user_answer,
            correct_answer: record.question.correct_answer(),
            is_correct: record.is_correct,
        }
    }
}

//
// ─── REVIEW ────────────────────────────────────────────────────────────────────
//

/// Display-ready summary of a completed session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizReview {
    pub final_score: u32,
    pub correct_count: u32,
    pub total_questions: u32,
    /// Whole seconds between start and completion timestamps.
    pub total_time_seconds: i64,
    /// Seconds per question, rounded to one decimal.
    pub avg_time_seconds: f64,
    pub per_question: Vec<QuestionReview>,
}

impl QuizReview {
    /// Build the review from a completed session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` while questions remain
    /// unanswered.
    pub fn from_session(session: &QuizSession) -> Result<Self, SessionError> {
        let Some(completed_at) = session.completed_at() else {
            return Err(SessionError::NotCompleted);
        };

        let total_questions =
            u32::try_from(session.total_questions()).unwrap_or(u32::MAX);
        let total_time_seconds = completed_at
            .signed_duration_since(session.started_at())
            .num_seconds();

        // Bounded to 100 questions and human session lengths; the casts
        // cannot lose precision here.
        #[allow(clippy::cast_precision_loss)]
        let avg_time_seconds =
            round_to_tenth(total_time_seconds as f64 / f64::from(total_questions));

        Ok(Self {
            final_score: session.score(),
            correct_count: session.score(),
            total_questions,
            total_time_seconds,
            avg_time_seconds,
            per_question: session.records().iter().map(QuestionReview::from).collect(),
        })
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Difficulty, Operation, OperationMode, Question};
    use quiz_core::time::fixed_now;

    use crate::sessions::service::QuizSettings;

    fn completed_session(answers: &[&str], seconds: i64) -> QuizSession {
        let count = u32::try_from(answers.len()).unwrap();
        let questions: Vec<Question> = (0..answers.len())
            .map(|i| {
                let n = i64::try_from(i).unwrap();
                Question::from_operands(Operation::Addition, n, 1, n + 1)
            })
            .collect();

        let settings = QuizSettings {
            difficulty: Difficulty::Easy,
            mode: OperationMode::Addition,
            question_count: count,
        };

        let start = fixed_now();
        let end = start + chrono::Duration::seconds(seconds);
        let mut session = QuizSession::new(settings, questions, start);
        for raw in answers {
            session.submit_answer(raw, end).unwrap();
        }
        session
    }

    #[test]
    fn review_of_unfinished_session_is_rejected() {
        let settings = QuizSettings {
            difficulty: Difficulty::Easy,
            mode: OperationMode::Addition,
            question_count: 1,
        };
        let questions = vec![Question::from_operands(Operation::Addition, 1, 1, 2)];
        let session = QuizSession::new(settings, questions, fixed_now());

        let err = QuizReview::from_session(&session).unwrap_err();
        assert_eq!(err, SessionError::NotCompleted);
    }

    #[test]
    fn review_aggregates_score_and_rows() {
        // Answers to 0+1, 1+1, 2+1: correct, wrong, correct.
        let session = completed_session(&["1", "9", "3"], 30);
        let review = QuizReview::from_session(&session).unwrap();

        assert_eq!(review.final_score, 2);
        assert_eq!(review.correct_count, 2);
        assert_eq!(review.total_questions, 3);
        assert_eq!(review.per_question.len(), 3);

        let wrong = &review.per_question[1];
        assert!(!wrong.is_correct);
        assert_eq!(wrong.user_answer, 9);
        assert_eq!(wrong.correct_answer, 2);
        assert_eq!(wrong.prompt, "1 + 1 = ?");
    }

    #[test]
    fn times_come_from_timestamps_with_tenth_second_average() {
        let session = completed_session(&["1", "9", "3"], 100);
        let review = QuizReview::from_session(&session).unwrap();

        assert_eq!(review.total_time_seconds, 100);
        // 100 / 3 = 33.333… rounds to 33.3
        assert!((review.avg_time_seconds - 33.3).abs() < f64::EPSILON);
    }

    #[test]
    fn rounding_is_to_nearest_tenth() {
        assert!((round_to_tenth(10.0 / 4.0) - 2.5).abs() < f64::EPSILON);
        assert!((round_to_tenth(1.0 / 3.0) - 0.3).abs() < f64::EPSILON);
        assert!((round_to_tenth(0.25) - 0.3).abs() < f64::EPSILON);
    }
}
