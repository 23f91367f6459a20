use chrono::Duration;

use quiz_core::model::{Difficulty, OperationMode};
use quiz_core::time::fixed_now;
use services::{Clock, QuizService, SessionError};

#[test]
fn easy_addition_quiz_runs_to_review() {
    let start = fixed_now();
    let mut svc = QuizService::new(Clock::fixed(start)).with_rng_seed(42);

    let mut session = svc
        .start_quiz(Difficulty::Easy, OperationMode::Addition, 3)
        .unwrap();

    // Easy addition draws both operands from 1..=20.
    for q in session.questions() {
        assert!((2..=40).contains(&q.correct_answer()), "{}", q.prompt());
    }

    // Answer correct, incorrect, correct.
    let answers: Vec<i64> = session
        .questions()
        .iter()
        .map(|q| q.correct_answer())
        .collect();

    let mut svc_clock = Clock::fixed(start);
    svc_clock.advance(Duration::seconds(45));
    let svc_late = QuizService::new(svc_clock);

    svc.answer_current(&mut session, &answers[0].to_string())
        .unwrap();
    svc.answer_current(&mut session, &(answers[1] + 1).to_string())
        .unwrap();
    let outcome = svc_late
        .answer_current(&mut session, &answers[2].to_string())
        .unwrap();

    assert!(outcome.is_complete);
    assert_eq!(session.score(), 2);

    let review = svc_late.build_review(&session).unwrap();
    assert_eq!(review.correct_count, 2);
    assert_eq!(review.final_score, 2);
    assert_eq!(review.per_question.len(), 3);
    assert_eq!(review.total_time_seconds, 45);
    assert!((review.avg_time_seconds - 15.0).abs() < f64::EPSILON);
}

#[test]
fn unparseable_input_leaves_the_session_resumable() {
    let mut svc = QuizService::new(Clock::fixed(fixed_now())).with_rng_seed(7);
    let mut session = svc
        .start_quiz(Difficulty::Medium, OperationMode::Mixed, 2)
        .unwrap();

    let err = svc.answer_current(&mut session, "abc").unwrap_err();
    assert!(matches!(err, SessionError::AnswerFormat { .. }));
    assert_eq!(session.answered_count(), 0);

    // Re-prompt and finish normally.
    while !session.is_complete() {
        let answer = session.current_question().unwrap().correct_answer();
        svc.answer_current(&mut session, &answer.to_string())
            .unwrap();
    }
    assert_eq!(session.score(), 2);
}

#[test]
fn review_before_completion_is_an_invalid_state() {
    let mut svc = QuizService::new(Clock::fixed(fixed_now())).with_rng_seed(11);
    let session = svc
        .start_quiz(Difficulty::Extreme, OperationMode::Division, 5)
        .unwrap();

    let err = svc.build_review(&session).unwrap_err();
    assert_eq!(err, SessionError::NotCompleted);
}
