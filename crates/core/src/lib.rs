#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod navigation;
pub mod report;
pub mod session;
pub mod time;
pub mod timer;

pub use error::{SessionError, TimerError};
pub use navigation::NavStatus;
pub use report::{AnswerText, Report, ReportEntry, ReportSummary, SubmitReason};
pub use session::{Phase, Session, SessionEvent};
pub use time::Clock;
pub use timer::{CountdownTimer, TimerState, TimerTick, format_mm_ss};
