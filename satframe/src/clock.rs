//! Time source abstraction.
//!
//! On the original hardware the wall clock is only meaningful after NTP
//! sync, so availability is reported distinctly from the time itself.

use chrono::{DateTime, Utc};

/// Supplies calendar time once synchronized.
pub trait Clock {
    /// Current UTC time, or `None` while the clock is not yet synchronized.
    fn now(&self) -> Option<DateTime<Utc>>;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Option<DateTime<Utc>> {
        Some(Utc::now())
    }
}

/// Clock pinned to a fixed instant, or to "not synchronized".
///
/// Useful for deterministic replay and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Option<DateTime<Utc>>);

impl FixedClock {
    /// A clock that always reports `t`.
    pub fn at(t: DateTime<Utc>) -> Self {
        Self(Some(t))
    }

    /// A clock that never synchronizes.
    pub fn unsynchronized() -> Self {
        Self(None)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Option<DateTime<Utc>> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_system_clock_is_available() {
        assert!(SystemClock.now().is_some());
    }

    #[test]
    fn test_fixed_clock_reports_pinned_time() {
        let t = Utc.with_ymd_and_hms(2025, 1, 9, 6, 45, 0).unwrap();
        assert_eq!(FixedClock::at(t).now(), Some(t));
    }

    #[test]
    fn test_unsynchronized_clock_reports_none() {
        assert_eq!(FixedClock::unsynchronized().now(), None);
    }
}
