use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::operation::Operation;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors raised when validating difficulty profiles at configuration time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("{difficulty}/{operation}: invalid operand range [{min}, {max}]")]
    InvalidRange {
        difficulty: Difficulty,
        operation: Operation,
        min: i64,
        max: i64,
    },

    #[error(
        "{difficulty}/division: dividend bound {max1} cannot cover divisor bound {max2}; \
         the quotient range would be empty for large divisors"
    )]
    DivisionUnsatisfiable {
        difficulty: Difficulty,
        max1: i64,
        max2: i64,
    },

    #[error("operand bounds must be positive, got {value}")]
    NonPositiveBound { value: i64 },
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty level of a quiz; selects the operand ranges per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    /// All difficulty levels, easiest first.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Extreme];

    fn index(self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
            Self::Extreme => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Extreme => "extreme",
        };
        write!(f, "{name}")
    }
}

/// Error type for parsing a difficulty from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError {
    raw: String,
}

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty: {:?}", self.raw)
    }
}

impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "extreme" => Ok(Self::Extreme),
            _ => Err(ParseDifficultyError { raw: s.to_string() }),
        }
    }
}

//
// ─── RANGE PROFILE ─────────────────────────────────────────────────────────────
//

/// Inclusive operand ranges for one (difficulty, operation) pairing.
///
/// The first operand is drawn from `[min1, max1]`, the second from
/// `[min2, max2]`. For division the first range bounds the dividend: the
/// generator draws the divisor from `[min2, max2]` and the quotient from
/// `[1, max1 / divisor]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeProfile {
    pub min1: i64,
    pub max1: i64,
    pub min2: i64,
    pub max2: i64,
}

impl RangeProfile {
    const fn new(min1: i64, max1: i64, min2: i64, max2: i64) -> Self {
        Self {
            min1,
            max1,
            min2,
            max2,
        }
    }

    fn validate(self, difficulty: Difficulty, operation: Operation) -> Result<(), ProfileError> {
        for (min, max) in [(self.min1, self.max1), (self.min2, self.max2)] {
            if min <= 0 {
                return Err(ProfileError::NonPositiveBound { value: min });
            }
            if max < min {
                return Err(ProfileError::InvalidRange {
                    difficulty,
                    operation,
                    min,
                    max,
                });
            }
        }

        // Division must leave at least one valid quotient for the largest
        // divisor the profile can draw.
        if operation == Operation::Division && self.max1 < self.max2 {
            return Err(ProfileError::DivisionUnsatisfiable {
                difficulty,
                max1: self.max1,
                max2: self.max2,
            });
        }

        Ok(())
    }
}

//
// ─── PROFILE SET ───────────────────────────────────────────────────────────────
//

// Operand ranges per difficulty, in `Operation::ALL` order
// (addition, subtraction, multiplication, division).
const BUILTIN: [[RangeProfile; 4]; 4] = [
    // easy
    [
        RangeProfile::new(1, 20, 1, 20),
        RangeProfile::new(1, 20, 1, 20),
        RangeProfile::new(1, 10, 1, 10),
        RangeProfile::new(1, 50, 1, 10),
    ],
    // medium
    [
        RangeProfile::new(10, 50, 10, 50),
        RangeProfile::new(10, 50, 10, 50),
        RangeProfile::new(2, 15, 2, 15),
        RangeProfile::new(10, 100, 2, 10),
    ],
    // hard
    [
        RangeProfile::new(20, 100, 20, 100),
        RangeProfile::new(20, 100, 20, 100),
        RangeProfile::new(5, 20, 5, 20),
        RangeProfile::new(20, 200, 2, 20),
    ],
    // extreme
    [
        RangeProfile::new(50, 500, 50, 500),
        RangeProfile::new(50, 500, 50, 500),
        RangeProfile::new(10, 50, 10, 50),
        RangeProfile::new(50, 500, 2, 50),
    ],
];

/// Immutable table of operand ranges for every (difficulty, operation) pair.
///
/// Loaded once at startup. Custom tables go through [`ProfileSet::custom`],
/// which rejects empty or division-unsatisfiable ranges up front so the
/// generator never samples from an empty quotient range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSet {
    table: [[RangeProfile; 4]; 4],
}

impl ProfileSet {
    /// The built-in difficulty table.
    #[must_use]
    pub fn builtin() -> Self {
        Self { table: BUILTIN }
    }

    /// Build a profile set from a caller-supplied table, validating every
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` for an empty range, a non-positive bound, or a
    /// division profile whose quotient range can be empty.
    pub fn custom(table: [[RangeProfile; 4]; 4]) -> Result<Self, ProfileError> {
        for (d, row) in Difficulty::ALL.iter().zip(&table) {
            for (op, profile) in Operation::ALL.iter().zip(row) {
                profile.validate(*d, *op)?;
            }
        }
        Ok(Self { table })
    }

    /// The operand ranges for one (difficulty, operation) pairing.
    #[must_use]
    pub fn ranges(&self, difficulty: Difficulty, operation: Operation) -> RangeProfile {
        self.table[difficulty.index()][operation.index()]
    }
}

impl Default for ProfileSet {
    fn default() -> Self {
        Self::builtin()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_passes_validation() {
        ProfileSet::custom(BUILTIN).unwrap();
    }

    #[test]
    fn builtin_easy_addition_matches_expected_bounds() {
        let set = ProfileSet::builtin();
        let ranges = set.ranges(Difficulty::Easy, Operation::Addition);
        assert_eq!(
            ranges,
            RangeProfile {
                min1: 1,
                max1: 20,
                min2: 1,
                max2: 20
            }
        );
    }

    #[test]
    fn custom_rejects_inverted_range() {
        let mut table = BUILTIN;
        table[0][0].max1 = 0;

        let err = ProfileSet::custom(table).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidRange { .. }));
    }

    #[test]
    fn custom_rejects_division_with_empty_quotient_range() {
        let mut table = BUILTIN;
        // Largest divisor (10) exceeds the dividend bound (5): quotient
        // range [1, 5/10] is empty.
        table[0][Operation::Division.index()] = RangeProfile::new(1, 5, 1, 10);

        let err = ProfileSet::custom(table).unwrap_err();
        assert!(matches!(err, ProfileError::DivisionUnsatisfiable { .. }));
    }

    #[test]
    fn difficulty_parses_and_displays() {
        let d: Difficulty = "EXTREME".parse().unwrap();
        assert_eq!(d, Difficulty::Extreme);
        assert_eq!(d.to_string(), "extreme");
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn every_builtin_division_profile_has_room_for_a_quotient() {
        let set = ProfileSet::builtin();
        for d in Difficulty::ALL {
            let ranges = set.ranges(d, Operation::Division);
            assert!(ranges.max1 / ranges.max2 >= 1, "{d}: no quotient room");
        }
    }
}
