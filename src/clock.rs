//! Timestamp sources for log lines.

use chrono::{DateTime, TimeZone, Utc};

/// Default timestamp layout: `YYYY-MM-DD HH:MM:SS`
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the instant stamped on each record
pub trait Clock: Send + Sync {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock, read on every call
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Freeze at the given UTC date and time.
    ///
    /// # Panics
    ///
    /// Panics if the components do not name a valid instant.
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        match Utc.with_ymd_and_hms(year, month, day, hour, min, sec).single() {
            Some(instant) => FixedClock(instant),
            None => panic!("invalid fixed clock instant {year}-{month}-{day} {hour}:{min}:{sec}"),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Render the clock's current instant with a strftime layout.
pub fn timestamp(clock: &dyn Clock, format: &str) -> String {
    clock.now().format(format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_default_format() {
        let clock = FixedClock::from_ymd_hms(2024, 1, 2, 3, 4, 5);
        assert_eq!(timestamp(&clock, TIME_FORMAT), "2024-01-02 03:04:05");
    }

    #[test]
    fn test_fixed_clock_custom_format() {
        let clock = FixedClock::from_ymd_hms(2024, 12, 31, 23, 59, 58);
        assert_eq!(timestamp(&clock, "%H:%M"), "23:59");
    }

    #[test]
    fn test_system_clock_advances() {
        let first = SystemClock.now();
        let second = SystemClock.now();
        assert!(second >= first);
    }

    #[test]
    #[should_panic(expected = "invalid fixed clock instant")]
    fn test_fixed_clock_rejects_invalid_date() {
        FixedClock::from_ymd_hms(2024, 2, 30, 0, 0, 0);
    }
}
