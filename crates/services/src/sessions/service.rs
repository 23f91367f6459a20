use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{AnswerRecord, Difficulty, OperationMode, Question};

use super::progress::SessionProgress;
use super::timer::SessionTimer;
use crate::error::SessionError;

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// The configuration one quiz session was started with.
///
/// Kept on the session so a restart can regenerate questions with identical
/// settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    pub difficulty: Difficulty,
    pub mode: OperationMode,
    pub question_count: u32,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run of the quiz, from the first question to completion.
///
/// The session owns all mutable quiz state (current index, score, answer
/// records, elapsed-time counter) and is only mutated through its transition
/// methods. A presentation layer holds the session and renders from it; it
/// never edits the fields directly.
///
/// The machine has three logical states: not-started (no session value
/// exists yet), in progress, and completed. Completion happens exactly when
/// the last question is answered.
pub struct QuizSession {
    settings: QuizSettings,
    questions: Vec<Question>,
    current: usize,
    score: u32,
    records: Vec<AnswerRecord>,
    timer: SessionTimer,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create an in-progress session over an already-generated question set.
    ///
    /// `questions` must come from the generator for the same `settings`;
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    #[must_use]
    pub fn new(settings: QuizSettings, questions: Vec<Question>, started_at: DateTime<Utc>) -> Self {
        debug_assert_eq!(questions.len(), settings.question_count as usize);

        Self {
            settings,
            questions,
            current: 0,
            score: 0,
            records: Vec::new(),
            timer: SessionTimer::start(),
            started_at,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Number of questions that have already been answered.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.records.len()
    }

    /// Number of questions still ahead.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.questions.len().saturating_sub(self.current)
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total_questions(),
            answered: self.answered_count(),
            remaining: self.remaining(),
            score: self.score,
            is_complete: self.is_complete(),
        }
    }

    /// The question awaiting an answer, or `None` once completed.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.current < self.questions.len() {
            Some(&self.questions[self.current])
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    //
    // ─── TIMER SURFACE ─────────────────────────────────────────────────────────
    //

    /// Seconds the display counter has recorded so far.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.timer.elapsed_seconds()
    }

    /// Record one elapsed second; driven by the presentation's scheduler.
    pub fn tick(&mut self) {
        self.timer.tick();
    }

    /// Suspend the display counter (e.g. the UI was backgrounded).
    pub fn pause_timer(&mut self) {
        self.timer.pause();
    }

    /// Resume the display counter from its current value.
    pub fn resume_timer(&mut self) {
        self.timer.resume();
    }

    /// Stop the counter on explicit abandonment. Completion stops it
    /// automatically; both paths are idempotent.
    pub fn stop_timer(&mut self) {
        self.timer.stop();
    }

    /// True once the counter has been stopped, by completion or abandonment.
    #[must_use]
    pub fn timer_stopped(&self) -> bool {
        self.timer.is_stopped()
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Grade the submitted answer against the current question and advance.
    ///
    /// `answered_at` should come from the services layer clock; it becomes
    /// the completion timestamp when this was the last question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AnswerFormat` when `raw` does not parse as a
    /// whole number; that is a no-op transition, the session is left
    /// untouched and the caller re-prompts. Returns `SessionError::Completed`
    /// when the session is already finished.
    pub fn submit_answer(
        &mut self,
        raw: &str,
        answered_at: DateTime<Utc>,
    ) -> Result<&AnswerRecord, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }

        let user_answer: i64 = raw.trim().parse().map_err(|_| SessionError::AnswerFormat {
            input: raw.to_string(),
        })?;

        let Some(question) = self.questions.get(self.current) else {
            return Err(SessionError::Completed);
        };

        let record = AnswerRecord::new(question.clone(), user_answer);
        if record.is_correct {
            self.score += 1;
        }
        self.records.push(record);

        self.current += 1;
        if self.current == self.questions.len() {
            self.completed_at = Some(answered_at);
            self.timer.stop();
        }

        self.records.last().ok_or(SessionError::Completed)
    }

    /// Reset the session in place with a freshly generated question set and
    /// the same settings. Used by [`crate::QuizService::restart`].
    pub fn restart_with(&mut self, questions: Vec<Question>, started_at: DateTime<Utc>) {
        debug_assert_eq!(questions.len(), self.settings.question_count as usize);

        self.questions = questions;
        self.current = 0;
        self.score = 0;
        self.records = Vec::new();
        self.timer = SessionTimer::start();
        self.started_at = started_at;
        self.completed_at = None;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("settings", &self.settings)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("records_len", &self.records.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Operation;
    use quiz_core::time::fixed_now;

    fn build_questions(count: u32) -> Vec<Question> {
        (0..count)
            .map(|i| {
                let n = i64::from(i);
                Question::from_operands(Operation::Addition, n, 1, n + 1)
            })
            .collect()
    }

    fn build_session(count: u32) -> QuizSession {
        let settings = QuizSettings {
            difficulty: Difficulty::Easy,
            mode: OperationMode::Addition,
            question_count: count,
        };
        QuizSession::new(settings, build_questions(count), fixed_now())
    }

    #[test]
    fn score_always_equals_correct_record_count() {
        let mut session = build_session(4);
        let now = fixed_now();

        // correct, wrong, correct, wrong
        session.submit_answer("1", now).unwrap();
        session.submit_answer("99", now).unwrap();
        session.submit_answer("3", now).unwrap();
        session.submit_answer("99", now).unwrap();

        let correct = session.records().iter().filter(|r| r.is_correct).count();
        assert_eq!(session.score() as usize, correct);
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn records_length_tracks_current_index() {
        let mut session = build_session(3);
        let now = fixed_now();

        assert_eq!(session.answered_count(), 0);
        session.submit_answer("1", now).unwrap();
        assert_eq!(session.answered_count(), 1);
        assert_eq!(session.remaining(), 2);
        assert_eq!(session.progress().answered, 1);
    }

    #[test]
    fn completes_exactly_on_the_last_answer() {
        let mut session = build_session(2);
        let t1 = fixed_now();
        let t2 = t1 + chrono::Duration::seconds(30);

        session.submit_answer("1", t1).unwrap();
        assert!(!session.is_complete());
        assert!(session.current_question().is_some());

        session.submit_answer("2", t2).unwrap();
        assert!(session.is_complete());
        assert_eq!(session.completed_at(), Some(t2));
        assert!(session.current_question().is_none());
    }

    #[test]
    fn unparseable_answer_is_a_no_op_transition() {
        let mut session = build_session(2);
        let now = fixed_now();

        let err = session.submit_answer("abc", now).unwrap_err();
        assert!(matches!(err, SessionError::AnswerFormat { .. }));

        assert_eq!(session.answered_count(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.is_complete());
        assert_eq!(session.current_question().unwrap().correct_answer(), 1);
    }

    #[test]
    fn submitting_after_completion_is_rejected() {
        let mut session = build_session(1);
        let now = fixed_now();

        session.submit_answer("1", now).unwrap();
        let err = session.submit_answer("1", now).unwrap_err();
        assert_eq!(err, SessionError::Completed);
    }

    #[test]
    fn answer_parsing_accepts_whitespace_and_negatives() {
        let mut session = build_session(2);
        let now = fixed_now();

        let record = session.submit_answer("  1 ", now).unwrap();
        assert!(record.is_correct);

        let record = session.submit_answer("-2", now).unwrap();
        assert!(!record.is_correct);
        assert_eq!(record.user_answer, -2);
    }

    #[test]
    fn completion_stops_the_display_counter() {
        let mut session = build_session(1);
        let now = fixed_now();

        session.tick();
        session.tick();
        session.submit_answer("1", now).unwrap();

        session.tick();
        assert_eq!(session.elapsed_seconds(), 2);
    }

    #[test]
    fn restart_keeps_settings_and_zeroes_progress() {
        let mut session = build_session(2);
        let now = fixed_now();

        session.submit_answer("1", now).unwrap();
        session.submit_answer("2", now).unwrap();
        assert!(session.is_complete());

        let later = now + chrono::Duration::seconds(60);
        let fresh = vec![
            Question::from_operands(Operation::Addition, 5, 5, 10),
            Question::from_operands(Operation::Addition, 6, 6, 12),
        ];
        session.restart_with(fresh, later);

        assert_eq!(session.settings().question_count, 2);
        assert_eq!(session.score(), 0);
        assert_eq!(session.answered_count(), 0);
        assert!(!session.is_complete());
        assert_eq!(session.started_at(), later);
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.current_question().unwrap().prompt(), "5 + 5 = ?");
    }
}
