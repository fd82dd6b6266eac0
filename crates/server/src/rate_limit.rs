//! Fixed-window limiter shared by the list endpoints.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct FixedWindow {
    permits: u32,
    window: Duration,
    used: u32,
    started: Instant,
}

impl FixedWindow {
    pub fn new(permits: u32, window: Duration) -> Self {
        Self { permits, window, used: 0, started: Instant::now() }
    }

    pub fn try_acquire(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.started) >= self.window {
            self.started = now;
            self.used = 0;
        }

        if self.used < self.permits {
            self.used += 1;
            debug!(used = self.used, permits = self.permits, "permit acquired");
            true
        } else {
            warn!(permits = self.permits, window_secs = self.window.as_secs(), "rate limit exceeded");
            false
        }
    }
}

#[derive(Clone)]
pub struct RateLimiter {
    window: Arc<Mutex<FixedWindow>>,
    enabled: bool,
}

impl RateLimiter {
    pub fn new(permits: u32, window: Duration, enabled: bool) -> Self {
        Self { window: Arc::new(Mutex::new(FixedWindow::new(permits, window))), enabled }
    }

    pub fn from_config(cfg: &configs::RateLimitConfig) -> Self {
        Self::new(cfg.permits, Duration::from_secs(cfg.window_secs), cfg.enabled)
    }

    pub async fn check_rate_limit(&self) -> bool {
        if !self.enabled {
            return true;
        }

        let mut window = self.window.lock().await;
        window.try_acquire()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[test]
    fn sixth_call_in_window_is_rejected() {
        let mut window = FixedWindow::new(5, Duration::from_secs(20));
        for _ in 0..5 {
            assert!(window.try_acquire());
        }
        assert!(!window.try_acquire());
    }

    #[tokio::test]
    async fn window_resets_after_expiry() {
        let mut window = FixedWindow::new(1, Duration::from_millis(100));
        assert!(window.try_acquire());
        assert!(!window.try_acquire());

        sleep(Duration::from_millis(150)).await;
        assert!(window.try_acquire());
    }

    #[tokio::test]
    async fn limiter_is_shared_between_clones() {
        let limiter = RateLimiter::new(2, Duration::from_secs(20), true);
        let other = limiter.clone();
        assert!(limiter.check_rate_limit().await);
        assert!(other.check_rate_limit().await);
        assert!(!limiter.check_rate_limit().await);
    }

    #[tokio::test]
    async fn disabled_limiter_always_allows() {
        let limiter = RateLimiter::new(1, Duration::from_secs(20), false);
        for _ in 0..100 {
            assert!(limiter.check_rate_limit().await);
        }
    }
}
