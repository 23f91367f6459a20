//! Terminal presentation layer for the quiz engine.
//!
//! All quiz logic lives in the `services` crate; this binary only prompts
//! for settings, relays answers, drives the elapsed-seconds ticker, and
//! renders the review.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use quiz_core::Clock;
use quiz_core::model::{Difficulty, OperationMode};
use services::{QuizService, QuizSession, SessionError, clamped_count};

type AppError = Box<dyn std::error::Error>;

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

fn run() -> Result<(), AppError> {
    println!("── Math Quiz ──");

    let Some(difficulty) = prompt_parsed::<Difficulty>("Difficulty (easy/medium/hard/extreme): ")?
    else {
        return Ok(());
    };
    let Some(mode) = prompt_parsed::<OperationMode>(
        "Operation (addition/subtraction/multiplication/division/mixed): ",
    )?
    else {
        return Ok(());
    };
    let Some(raw_count) = prompt_line("Questions (1-100, empty for 30): ")? else {
        return Ok(());
    };
    let count = clamped_count(raw_count.parse().ok());

    let mut svc = QuizService::new(Clock::default());
    let session = Arc::new(Mutex::new(svc.start_quiz(difficulty, mode, count)?));

    loop {
        let ticker = spawn_ticker(Arc::clone(&session));
        let finished = answer_loop(&svc, &session)?;

        if !finished {
            // Stdin closed mid-quiz: abandon the session and stop the counter.
            lock(&session)?.stop_timer();
            let _ = ticker.join();
            return Ok(());
        }
        let _ = ticker.join();

        print_review(&svc, &*lock(&session)?)?;

        match prompt_line("Play again with the same settings? [y/N] ")? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => {
                svc.restart(&mut *lock(&session)?)?;
            }
            _ => return Ok(()),
        }
    }
}

/// Run the question/answer loop until the session completes.
///
/// Returns `false` when stdin closes before the last question.
fn answer_loop(svc: &QuizService, session: &Arc<Mutex<QuizSession>>) -> Result<bool, AppError> {
    loop {
        let header = {
            let guard = lock(session)?;
            if guard.is_complete() {
                return Ok(true);
            }
            let progress = guard.progress();
            let prompt = guard
                .current_question()
                .map(|q| q.prompt().to_string())
                .unwrap_or_default();
            format!(
                "\n[{}s] Question {}/{}  (score {})\n{prompt} ",
                guard.elapsed_seconds(),
                progress.answered + 1,
                progress.total,
                progress.score,
            )
        };

        let Some(raw) = prompt_line(&header)? else {
            return Ok(false);
        };

        let outcome = svc.answer_current(&mut *lock(session)?, &raw);
        match outcome {
            Ok(outcome) if outcome.is_complete => return Ok(true),
            Ok(_) => {}
            Err(SessionError::AnswerFormat { .. }) => {
                println!("Please enter a valid number");
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn print_review(svc: &QuizService, session: &QuizSession) -> Result<(), AppError> {
    let review = svc.build_review(session)?;

    println!("\n── Results ──");
    println!(
        "Score: {}/{}",
        review.final_score, review.total_questions
    );
    println!(
        "Total time: {}s  (avg {:.1}s per question)",
        review.total_time_seconds, review.avg_time_seconds
    );

    for row in &review.per_question {
        if row.is_correct {
            println!("  {}  {} ✓", row.prompt, row.user_answer);
        } else {
            println!(
                "  {}  {} ✗ ({})",
                row.prompt, row.user_answer, row.correct_answer
            );
        }
    }

    Ok(())
}

/// Tick the session's display counter once per second until completion.
fn spawn_ticker(session: Arc<Mutex<QuizSession>>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        loop {
            thread::sleep(Duration::from_secs(1));
            let Ok(mut guard) = session.lock() else {
                break;
            };
            if guard.timer_stopped() {
                break;
            }
            guard.tick();
        }
    })
}

fn lock<'a>(session: &'a Arc<Mutex<QuizSession>>) -> Result<MutexGuard<'a, QuizSession>, AppError> {
    session.lock().map_err(|_| "quiz session lock poisoned".into())
}

/// Print a prompt and read one trimmed line; `None` when stdin closes.
fn prompt_line(label: &str) -> Result<Option<String>, AppError> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Keep prompting until the input parses; `None` when stdin closes.
fn prompt_parsed<T: FromStr>(label: &str) -> Result<Option<T>, AppError>
where
    T::Err: std::fmt::Display,
{
    loop {
        let Some(raw) = prompt_line(label)? else {
            return Ok(None);
        };
        match raw.parse() {
            Ok(value) => return Ok(Some(value)),
            Err(err) => eprintln!("{err}"),
        }
    }
}
