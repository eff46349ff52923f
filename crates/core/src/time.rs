use chrono::{DateTime, Utc};

/// Where session and report timestamps come from.
///
/// Only `started_at` and `submitted_at` are stamped from a clock; the countdown
/// moves on ticks alone.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    /// Every `now()` returns `at`.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// 2023-11-14T22:13:20Z, used as the start stamp in tests.
const QUIZ_TEST_EPOCH_SECS: i64 = 1_700_000_000;

/// Deterministic start stamp for tests.
///
/// # Panics
///
/// Panics if the test epoch cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(QUIZ_TEST_EPOCH_SECS, 0).expect("test epoch should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
