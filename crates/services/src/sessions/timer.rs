//
// ─── TIMER STATE ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Running,
    Paused,
    Stopped,
}

//
// ─── SESSION TIMER ─────────────────────────────────────────────────────────────
//

/// Whole-second elapsed-time counter for one quiz session.
///
/// The presentation layer drives [`tick`](Self::tick) once per wall-clock
/// second (typically from its scheduler). The counter is suspendable:
/// pausing keeps the seconds already recorded, resuming continues from the
/// same value, so a backgrounded UI neither loses time nor double-counts it.
///
/// Stopping is terminal and idempotent; ticks, pauses, and resumes after
/// `stop` are safe no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTimer {
    elapsed: u64,
    state: TimerState,
}

impl SessionTimer {
    /// A fresh counter, already running at zero seconds.
    #[must_use]
    pub fn start() -> Self {
        Self {
            elapsed: 0,
            state: TimerState::Running,
        }
    }

    /// Record one elapsed second. Ignored while paused or stopped.
    pub fn tick(&mut self) {
        if self.state == TimerState::Running {
            self.elapsed += 1;
        }
    }

    /// Suspend counting without losing recorded seconds.
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Continue counting from the current value. No-op unless paused; a
    /// stopped timer stays stopped.
    pub fn resume(&mut self) {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
        }
    }

    /// Stop the counter for good. Safe to call more than once.
    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// Seconds recorded so far.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.state == TimerState::Stopped
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::start()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_accumulate_while_running() {
        let mut timer = SessionTimer::start();
        assert!(timer.is_running());

        for _ in 0..5 {
            timer.tick();
        }
        assert_eq!(timer.elapsed_seconds(), 5);
    }

    #[test]
    fn pause_and_resume_neither_lose_nor_double_count() {
        let mut timer = SessionTimer::start();
        timer.tick();
        timer.tick();

        timer.pause();
        // Ticks arriving while paused (e.g. a late scheduler callback) are
        // dropped rather than counted.
        timer.tick();
        timer.tick();
        assert_eq!(timer.elapsed_seconds(), 2);

        timer.resume();
        timer.tick();
        assert_eq!(timer.elapsed_seconds(), 3);
    }

    #[test]
    fn stop_is_terminal_and_idempotent() {
        let mut timer = SessionTimer::start();
        timer.tick();

        timer.stop();
        timer.stop();
        assert!(timer.is_stopped());

        timer.tick();
        timer.resume();
        timer.tick();
        assert!(timer.is_stopped());
        assert_eq!(timer.elapsed_seconds(), 1);
    }

    #[test]
    fn pause_after_stop_is_a_no_op() {
        let mut timer = SessionTimer::start();
        timer.stop();
        timer.pause();
        assert!(timer.is_stopped());
    }
}
