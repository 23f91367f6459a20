use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use quiz_core::Clock;
use quiz_core::model::{Difficulty, OperationMode};

use super::review::QuizReview;
use super::service::{QuizSession, QuizSettings};
use crate::error::SessionError;
use crate::generator::QuestionGenerator;

/// Result of answering a single question in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub is_complete: bool,
}

//
// ─── QUIZ SERVICE ──────────────────────────────────────────────────────────────
//

/// Orchestrates session start, answering, restart, and review.
///
/// Owns the clock, the question generator, and the random source, so the
/// presentation layer never touches time or randomness directly. All
/// mutation of a session goes through one caller at a time; the service
/// itself holds no session state.
pub struct QuizService {
    clock: Clock,
    generator: QuestionGenerator,
    rng: StdRng,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            generator: QuestionGenerator::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Override the generator (usually for a custom profile table).
    #[must_use]
    pub fn with_generator(mut self, generator: QuestionGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Seed the random source for deterministic question sets in tests.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Current time according to the service's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Generate the full question set and start an in-progress session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Generator` for an invalid count or profile; no
    /// partial session is created.
    pub fn start_quiz(
        &mut self,
        difficulty: Difficulty,
        mode: OperationMode,
        count: u32,
    ) -> Result<QuizSession, SessionError> {
        let questions = self
            .generator
            .generate_set(&mut self.rng, difficulty, mode, count)?;
        let settings = QuizSettings {
            difficulty,
            mode,
            question_count: count,
        };

        info!(%difficulty, %mode, count, "quiz session started");
        Ok(QuizSession::new(settings, questions, self.clock.now()))
    }

    /// Grade the answer to the current question and advance the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AnswerFormat` for unparseable input (session
    /// unchanged, re-prompt) and `SessionError::Completed` when invoked on a
    /// finished session.
    pub fn answer_current(
        &self,
        session: &mut QuizSession,
        raw: &str,
    ) -> Result<AnswerOutcome, SessionError> {
        let is_correct = session.submit_answer(raw, self.clock.now())?.is_correct;
        let outcome = AnswerOutcome {
            is_correct,
            is_complete: session.is_complete(),
        };

        debug!(
            answered = session.answered_count(),
            total = session.total_questions(),
            is_correct,
            "answer recorded"
        );
        if outcome.is_complete {
            info!(
                score = session.score(),
                total = session.total_questions(),
                "quiz session completed"
            );
        }

        Ok(outcome)
    }

    /// Restart the session in place: identical settings, fresh questions,
    /// zeroed score and timer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Generator` if regeneration fails; the old
    /// session is left untouched in that case.
    pub fn restart(&mut self, session: &mut QuizSession) -> Result<(), SessionError> {
        let settings = session.settings();
        let questions = self.generator.generate_set(
            &mut self.rng,
            settings.difficulty,
            settings.mode,
            settings.question_count,
        )?;
        session.restart_with(questions, self.clock.now());

        info!(
            difficulty = %settings.difficulty,
            mode = %settings.mode,
            count = settings.question_count,
            "quiz session restarted"
        );
        Ok(())
    }

    /// Build the end-of-quiz review for a completed session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` while questions remain.
    pub fn build_review(&self, session: &QuizSession) -> Result<QuizReview, SessionError> {
        QuizReview::from_session(session)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
