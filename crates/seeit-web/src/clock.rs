use seeit_engine::{Clock, Timestamp};

/// Monotonic browser clock backed by `performance.now()`, the same time base
/// hosts pass to `seeit_tick`. Without a window (workers, node) it falls back
/// to `Date.now()`, which has a different epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now(&self) -> Timestamp {
        let millis = web_sys::window()
            .and_then(|window| window.performance())
            .map(|performance| performance.now())
            .unwrap_or_else(js_sys::Date::now);
        Timestamp::from_millis(millis)
    }
}
