use serde::{Deserialize, Serialize};

/// A point on the host's monotonic clock, in seconds.
///
/// Journey progress is always derived from differences between two
/// timestamps, so a host that is backgrounded and resumed picks up exactly
/// where wall-clock time says it should be.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0.0);

    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// Build from a millisecond reading such as `performance.now()`.
    pub fn from_millis(millis: f64) -> Self {
        Self(millis / 1000.0)
    }

    pub fn secs(self) -> f64 {
        self.0
    }

    /// Seconds elapsed since `earlier`. Never negative.
    pub fn since(self, earlier: Timestamp) -> f64 {
        let delta = self.0 - earlier.0;
        if delta.is_finite() && delta > 0.0 {
            delta
        } else {
            0.0
        }
    }

    /// The timestamp `secs` seconds later.
    pub fn after(self, secs: f64) -> Self {
        Self(self.0 + secs)
    }
}

/// Source of monotonic time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Clock driven by hand. Used by tests and by hosts that push their own
/// frame timestamps.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Timestamp,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: Timestamp) -> Self {
        Self { now }
    }

    /// Move the clock forward. Negative deltas are ignored.
    pub fn advance(&mut self, secs: f64) {
        if secs > 0.0 {
            self.now = self.now.after(secs);
        }
    }

    /// Jump to an absolute time, as long as it does not go backwards.
    pub fn set(&mut self, now: Timestamp) {
        if now > self.now {
            self.now = now;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now
    }
}
