use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;

/// Fixed-window request budget per client address.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<DashMap<String, Window>>,
    requests_per_window: u32,
    window_duration: Duration,
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new(requests_per_second: u32) -> Self {
        Self::with_window(requests_per_second.saturating_mul(60), Duration::from_secs(60))
    }

    pub fn with_window(requests_per_window: u32, window_duration: Duration) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            requests_per_window,
            window_duration,
        }
    }

    /// Drops windows that have run out, so idle clients do not pile up.
    pub fn evict_stale(&self) -> usize {
        let now = Instant::now();
        let before = self.windows.len();
        self.windows
            .retain(|_, window| now.duration_since(window.started) < self.window_duration);
        before.saturating_sub(self.windows.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    pub fn check(&self, client_key: &str) -> bool {
        let now = Instant::now();

        let mut window = self
            .windows
            .entry(client_key.to_string())
            .or_insert(Window {
                started: now,
                count: 0,
            });

        if now.duration_since(window.started) >= self.window_duration {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.requests_per_window {
            return false;
        }

        window.count += 1;
        true
    }
}
