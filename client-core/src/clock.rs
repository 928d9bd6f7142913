use chrono::{DateTime, Utc};

/// Source of "now" for expiry checks.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock. On wasm this reads `Date.now()` through chrono's `wasmbind`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::Clock;

    /// Clock that only moves when told to.
    pub struct ManualClock(Cell<DateTime<Utc>>);

    impl ManualClock {
        pub fn at(secs: i64) -> Self {
            Self(Cell::new(Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")))
        }

        pub fn advance(&self, secs: i64) {
            self.0.set(self.0.get() + Duration::seconds(secs));
        }

        pub fn secs(&self) -> i64 {
            self.0.get().timestamp()
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.0.get()
        }
    }
}
