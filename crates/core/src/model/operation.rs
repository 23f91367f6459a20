use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//
// ─── OPERATION ─────────────────────────────────────────────────────────────────
//

/// One of the four concrete arithmetic operations a question can use.
///
/// `Operation` is always resolved: a question is generated for exactly one
/// of these variants. The user-facing "mixed" choice lives on
/// [`OperationMode`] and resolves to an `Operation` per question slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    /// All concrete operations, in the order mixed mode draws from.
    pub const ALL: [Self; 4] = [
        Self::Addition,
        Self::Subtraction,
        Self::Multiplication,
        Self::Division,
    ];

    /// The symbol used when rendering a question prompt.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Addition => '+',
            Self::Subtraction => '-',
            Self::Multiplication => '×',
            Self::Division => '÷',
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Addition => 0,
            Self::Subtraction => 1,
            Self::Multiplication => 2,
            Self::Division => 3,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
        };
        write!(f, "{name}")
    }
}

//
// ─── OPERATION MODE ────────────────────────────────────────────────────────────
//

/// The operation setting chosen for a whole quiz.
///
/// Either a single fixed operation applied to every question, or `Mixed`,
/// which picks an operation uniformly at random per question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationMode {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Mixed,
}

impl OperationMode {
    /// Returns the fixed operation for this mode, or `None` for `Mixed`.
    #[must_use]
    pub fn fixed_operation(self) -> Option<Operation> {
        match self {
            Self::Addition => Some(Operation::Addition),
            Self::Subtraction => Some(Operation::Subtraction),
            Self::Multiplication => Some(Operation::Multiplication),
            Self::Division => Some(Operation::Division),
            Self::Mixed => None,
        }
    }

    /// Returns true when this mode resolves per question.
    #[must_use]
    pub fn is_mixed(self) -> bool {
        matches!(self, Self::Mixed)
    }
}

impl From<Operation> for OperationMode {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Addition => Self::Addition,
            Operation::Subtraction => Self::Subtraction,
            Operation::Multiplication => Self::Multiplication,
            Operation::Division => Self::Division,
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fixed_operation() {
            Some(op) => write!(f, "{op}"),
            None => write!(f, "mixed"),
        }
    }
}

//
// ─── PARSING ───────────────────────────────────────────────────────────────────
//

/// Error type for parsing an operation mode from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError {
    raw: String,
}

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation mode: {:?}", self.raw)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for OperationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "addition" => Ok(Self::Addition),
            "subtraction" => Ok(Self::Subtraction),
            "multiplication" => Ok(Self::Multiplication),
            "division" => Ok(Self::Division),
            "mixed" => Ok(Self::Mixed),
            _ => Err(ParseModeError { raw: s.to_string() }),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
