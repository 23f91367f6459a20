//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::ProfileError;

/// Errors emitted by `QuestionGenerator`.
///
/// All of these are configuration failures: no partial question set is ever
/// produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeneratorError {
    #[error("question count {0} is outside the supported range 1..=100")]
    CountOutOfRange(u32),

    #[error("no valid quotient for divisor {divisor} with dividend bound {max1}")]
    EmptyQuotientRange { divisor: i64, max1: i64 },

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Errors emitted by session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    /// An operation that requires an in-progress session was invoked after
    /// completion.
    #[error("session already completed")]
    Completed,

    /// A review was requested before the last question was answered.
    #[error("session is not completed yet")]
    NotCompleted,

    /// The submitted answer did not parse as a whole number. Recoverable:
    /// session state is unchanged and the caller should re-prompt.
    #[error("answer is not a whole number: {input:?}")]
    AnswerFormat { input: String },

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}
