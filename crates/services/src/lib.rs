#![forbid(unsafe_code)]

//! Quiz session engine: question generation, session state machine, timer,
//! and review building. Consumed by a presentation layer through
//! [`QuizService`] and the session operations; emits structured data only,
//! never rendered output.

pub mod error;
pub mod generator;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::{GeneratorError, SessionError};
pub use generator::{DEFAULT_QUESTION_COUNT, MAX_QUESTION_COUNT, QuestionGenerator, clamped_count};
pub use sessions::{
    AnswerOutcome, QuestionReview, QuizReview, QuizService, QuizSession, QuizSettings,
    SessionProgress, SessionTimer,
};
