use rand::Rng;

use quiz_core::model::{
    Difficulty, Operation, OperationMode, ProfileSet, Question, RangeProfile,
};

use crate::error::GeneratorError;

/// Question count used when the caller supplies nothing usable.
pub const DEFAULT_QUESTION_COUNT: u32 = 30;

/// Hard upper bound on questions per session.
pub const MAX_QUESTION_COUNT: u32 = 100;

/// Presentation-side policy for a custom question count: unusable input
/// falls back to the default, oversized input is capped.
///
/// The generator itself stays strict (`CountOutOfRange`); this helper is for
/// callers turning free-form user input into a valid count.
#[must_use]
pub fn clamped_count(raw: Option<u32>) -> u32 {
    match raw {
        None | Some(0) => DEFAULT_QUESTION_COUNT,
        Some(n) if n > MAX_QUESTION_COUNT => MAX_QUESTION_COUNT,
        Some(n) => n,
    }
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Produces question sets from a validated difficulty profile table.
///
/// Generation is generic over [`rand::Rng`] so tests can inject a seeded
/// source; production callers pass `rand::rng()` (or let [`crate::QuizService`]
/// own the source).
#[derive(Debug, Clone, Default)]
pub struct QuestionGenerator {
    profiles: ProfileSet,
}

impl QuestionGenerator {
    /// Generator over the built-in difficulty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            profiles: ProfileSet::builtin(),
        }
    }

    /// Generator over a caller-validated profile table.
    #[must_use]
    pub fn with_profiles(profiles: ProfileSet) -> Self {
        Self { profiles }
    }

    /// Generate exactly `count` questions for the given difficulty and mode.
    ///
    /// In `Mixed` mode each slot draws one of the four operations uniformly
    /// at random; otherwise every slot uses the fixed operation.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::CountOutOfRange` when `count` is not in
    /// `1..=100`, and `GeneratorError::EmptyQuotientRange` when a division
    /// profile leaves no quotient for a drawn divisor. No partial set is
    /// returned on failure.
    pub fn generate_set<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        difficulty: Difficulty,
        mode: OperationMode,
        count: u32,
    ) -> Result<Vec<Question>, GeneratorError> {
        if count == 0 || count > MAX_QUESTION_COUNT {
            return Err(GeneratorError::CountOutOfRange(count));
        }

        let mut questions = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let operation = resolve_operation(rng, mode);
            questions.push(self.generate_one(rng, difficulty, operation)?);
        }
        Ok(questions)
    }

    fn generate_one<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        difficulty: Difficulty,
        operation: Operation,
    ) -> Result<Question, GeneratorError> {
        let ranges = self.profiles.ranges(difficulty, operation);
        match operation {
            Operation::Addition => Ok(addition_question(rng, ranges)),
            Operation::Subtraction => Ok(subtraction_question(rng, ranges)),
            Operation::Multiplication => Ok(multiplication_question(rng, ranges)),
            Operation::Division => division_question(rng, ranges),
        }
    }
}

/// Pick the operation for one question slot.
fn resolve_operation<R: Rng + ?Sized>(rng: &mut R, mode: OperationMode) -> Operation {
    mode.fixed_operation()
        .unwrap_or_else(|| Operation::ALL[rng.random_range(0..Operation::ALL.len())])
}

//
// ─── PER-OPERATION RULES ───────────────────────────────────────────────────────
//

fn addition_question<R: Rng + ?Sized>(rng: &mut R, ranges: RangeProfile) -> Question {
    let num1 = rng.random_range(ranges.min1..=ranges.max1);
    let num2 = rng.random_range(ranges.min2..=ranges.max2);
    Question::from_operands(Operation::Addition, num1, num2, num1 + num2)
}

fn subtraction_question<R: Rng + ?Sized>(rng: &mut R, ranges: RangeProfile) -> Question {
    let mut num1 = rng.random_range(ranges.min1..=ranges.max1);
    let mut num2 = rng.random_range(ranges.min2..=ranges.max2);

    // Keep the minuend on top so the answer is never negative.
    if num1 < num2 {
        std::mem::swap(&mut num1, &mut num2);
    }

    Question::from_operands(Operation::Subtraction, num1, num2, num1 - num2)
}

fn multiplication_question<R: Rng + ?Sized>(rng: &mut R, ranges: RangeProfile) -> Question {
    let num1 = rng.random_range(ranges.min1..=ranges.max1);
    let num2 = rng.random_range(ranges.min2..=ranges.max2);
    Question::from_operands(Operation::Multiplication, num1, num2, num1 * num2)
}

/// Division draws the divisor and the quotient, then derives the dividend,
/// so the result is always a whole number.
fn division_question<R: Rng + ?Sized>(
    rng: &mut R,
    ranges: RangeProfile,
) -> Result<Question, GeneratorError> {
    let num2 = rng.random_range(ranges.min2..=ranges.max2);

    // ProfileSet validation rules this out for its own tables; still guard
    // against a divisor that leaves no quotient.
    let max_quotient = ranges.max1 / num2;
    if max_quotient < 1 {
        return Err(GeneratorError::EmptyQuotientRange {
            divisor: num2,
            max1: ranges.max1,
        });
    }

    let answer = rng.random_range(1..=max_quotient);
    let num1 = num2 * answer;
    Ok(Question::from_operands(Operation::Division, num1, num2, answer))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
