mod difficulty;
mod operation;
mod question;

pub use difficulty::{Difficulty, ParseDifficultyError, ProfileError, ProfileSet, RangeProfile};
pub use operation::{Operation, OperationMode, ParseModeError};
pub use question::{AnswerRecord, Question};
