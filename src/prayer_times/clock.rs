use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::utils::format::minutes_of_day;

/// Wall-clock source for "now". Injected so resolution is reproducible in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Minutes since local midnight.
    fn minutes_now(&self) -> u32 {
        minutes_of_day(self.now().time())
    }
}

/// The machine's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let at = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(13, 0, 30)
            .unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(clock.minutes_now(), 780);
    }
}
