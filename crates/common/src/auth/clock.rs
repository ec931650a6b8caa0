use std::fmt::Debug;

/// Source of the current time in Unix milliseconds.
pub trait Clock: Debug + Send + Sync {
    fn now_millis(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        // clocks before 1970 read as zero
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_millis() {
        let now = SystemClock.now_millis();
        // 13 digits until the year 2286
        assert_eq!(now.to_string().len(), 13);
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(42).now_millis(), 42);
    }
}
