/// Cancellable recurring timer, advanced by fixed animation steps.
///
/// The renderer-side stand-in for the host's repeating timer: relocating the
/// precision target every 0.8 s, appending a task card every 2 s, and so on.
#[derive(Debug, Clone)]
pub struct Interval {
    period: f32,
    elapsed: f32,
    cancelled: bool,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
            cancelled: false,
        }
    }

    /// Advance by `dt` seconds. Returns how many times the timer fired.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.cancelled || !(self.period > 0.0) || !(dt > 0.0) {
            return 0;
        }
        self.elapsed += dt;
        let fires = (self.elapsed / self.period) as u32;
        self.elapsed -= fires as f32 * self.period;
        fires
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Restart the period from zero and re-arm a cancelled timer.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.cancelled = false;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn period(&self) -> f32 {
        self.period
    }
}

/// Cancellable one-shot delay (feedback flashes and the like).
#[derive(Debug, Clone)]
pub struct Delay {
    remaining: f32,
    state: DelayState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DelayState {
    Pending,
    Fired,
    Cancelled,
}

impl Delay {
    pub fn new(secs: f32) -> Self {
        Self {
            remaining: secs.max(0.0),
            state: DelayState::Pending,
        }
    }

    /// Advance by `dt`. Returns true exactly once, on the step the delay elapses.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.state != DelayState::Pending {
            return false;
        }
        if dt > 0.0 {
            self.remaining -= dt;
        }
        if self.remaining <= 0.0 {
            self.state = DelayState::Fired;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        if self.state == DelayState::Pending {
            self.state = DelayState::Cancelled;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == DelayState::Pending
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}
