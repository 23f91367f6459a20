mod progress;
mod review;
mod service;
mod timer;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use review::{QuestionReview, QuizReview};
pub use service::{QuizSession, QuizSettings};
pub use timer::SessionTimer;
pub use workflow::{AnswerOutcome, QuizService};
