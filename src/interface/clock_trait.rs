use chrono::{Local, NaiveDateTime};

/// Time source behind the countdown, so tests can inject a fixed now.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the host's local timezone, matching the wall timestamps
/// the board service hands out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
