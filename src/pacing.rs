/// Spacing between sequential delete requests
use async_trait::async_trait;
use std::time::Duration;

/// Gap between individual delete requests; keeps the host's rate limiter quiet
pub const ITEM_DELAY: Duration = Duration::from_millis(200);

#[async_trait(?Send)]
pub trait Pacer {
    /// Wait before the next request goes out
    async fn pause(&self);
}

/// Sleeps a fixed interval on the browser's timer queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInterval {
    delay: Duration,
}

impl FixedInterval {
    pub fn new(delay: Duration) -> Self {
        FixedInterval { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait(?Send)]
impl Pacer for FixedInterval {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            gloo_timers::future::sleep(self.delay).await;
        }
    }
}

impl Default for FixedInterval {
    fn default() -> Self {
        FixedInterval::new(ITEM_DELAY)
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait(?Send)]
impl Pacer for NoPacing {
    async fn pause(&self) {}
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_fixed_interval_waits_on_timer() {
        let started = js_sys::Date::now();
        FixedInterval::default().pause().await;
        let elapsed = js_sys::Date::now() - started;

        assert!(elapsed >= 190.0, "paused only {}ms", elapsed);
    }
}
