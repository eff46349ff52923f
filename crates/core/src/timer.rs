use crate::error::TimerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
}

/// Outcome of advancing the countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// The timer is stopped; nothing changed.
    Idle,
    /// One second elapsed and time remains.
    Running { remaining: u32 },
    /// The counter reached zero on this tick and the timer stopped itself.
    Expired,
}

/// Single countdown driven by one-second ticks.
///
/// The timer never reads a clock. Production code feeds it from an interval,
/// tests call [`CountdownTimer::tick`] directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    initial: u32,
    remaining: u32,
    state: TimerState,
}

impl CountdownTimer {
    /// Creates a stopped timer showing the full duration.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::ZeroDuration` if `duration_seconds` is zero.
    pub fn new(duration_seconds: u32) -> Result<Self, TimerError> {
        if duration_seconds == 0 {
            return Err(TimerError::ZeroDuration);
        }
        Ok(Self {
            initial: duration_seconds,
            remaining: duration_seconds,
            state: TimerState::Stopped,
        })
    }

    /// Starts counting down from `duration_seconds`, discarding any countdown
    /// already in progress.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::ZeroDuration` if `duration_seconds` is zero.
    pub fn start(&mut self, duration_seconds: u32) -> Result<(), TimerError> {
        if duration_seconds == 0 {
            return Err(TimerError::ZeroDuration);
        }
        self.stop();
        self.initial = duration_seconds;
        self.remaining = duration_seconds;
        self.state = TimerState::Running;
        Ok(())
    }

    /// Stops the countdown, keeping the remaining time readable.
    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// Stops the countdown and restores the initial duration.
    pub fn reset(&mut self) {
        self.state = TimerState::Stopped;
        self.remaining = self.initial;
    }

    pub fn tick(&mut self) -> TimerTick {
        if self.state == TimerState::Stopped {
            return TimerTick::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Stopped;
            TimerTick::Expired
        } else {
            TimerTick::Running {
                remaining: self.remaining,
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }
}

/// Formats seconds as zero-padded `MM:SS`; minutes grow past 99 if needed.
#[must_use]
pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_is_rejected() {
        assert_eq!(CountdownTimer::new(0).unwrap_err(), TimerError::ZeroDuration);
        let mut timer = CountdownTimer::new(5).unwrap();
        assert_eq!(timer.start(0).unwrap_err(), TimerError::ZeroDuration);
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn stopped_timer_does_not_count() {
        let mut timer = CountdownTimer::new(3).unwrap();
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert_eq!(timer.remaining_seconds(), 3);
    }

    #[test]
    fn counts_down_and_expires_once() {
        let mut timer = CountdownTimer::new(3).unwrap();
        timer.start(3).unwrap();

        assert_eq!(timer.tick(), TimerTick::Running { remaining: 2 });
        assert_eq!(timer.tick(), TimerTick::Running { remaining: 1 });
        assert_eq!(timer.tick(), TimerTick::Expired);
        assert_eq!(timer.state(), TimerState::Stopped);
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn start_replaces_running_countdown() {
        let mut timer = CountdownTimer::new(10).unwrap();
        timer.start(10).unwrap();
        timer.tick();
        timer.tick();

        timer.start(4).unwrap();
        assert_eq!(timer.remaining_seconds(), 4);
        assert_eq!(timer.state(), TimerState::Running);

        timer.reset();
        assert_eq!(timer.remaining_seconds(), 4);
    }

    #[test]
    fn stop_keeps_remaining_and_reset_restores_it() {
        let mut timer = CountdownTimer::new(60).unwrap();
        timer.start(60).unwrap();
        timer.tick();
        timer.stop();
        assert_eq!(timer.remaining_seconds(), 59);
        assert_eq!(timer.tick(), TimerTick::Idle);

        timer.reset();
        assert_eq!(timer.remaining_seconds(), 60);
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_mm_ss(30 * 60), "30:00");
        assert_eq!(format_mm_ss(247), "04:07");
        assert_eq!(format_mm_ss(0), "00:00");
    }
}
