use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// In-memory sliding-window limiter keyed by `<bucket>:<client hash>`.
pub struct RateLimiter {
    entries: Mutex<HashMap<String, Vec<Instant>>>,
    max_attempts: u64,
    window: Duration,
}

impl RateLimiter {
    /// `max_attempts == 0` turns the limiter off.
    pub fn new(max_attempts: u64, window: Duration) -> Self {
        RateLimiter {
            entries: Mutex::new(HashMap::new()),
            max_attempts,
            window,
        }
    }

    pub fn enabled(&self) -> bool {
        self.max_attempts > 0
    }

    /// Record an attempt and return true if it is under the limit.
    pub fn check_and_record(&self, key: &str) -> bool {
        if !self.enabled() {
            return true;
        }
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        let attempts = map.entry(key.to_string()).or_default();
        attempts.retain(|t| now.duration_since(*t) < self.window);

        if (attempts.len() as u64) < self.max_attempts {
            attempts.push(now);
            true
        } else {
            false
        }
    }

    /// Drop keys with no attempt inside the window. Returns how many were removed.
    pub fn cleanup(&self) -> usize {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let before = map.len();
        map.retain(|_, attempts| {
            attempts.retain(|t| now.duration_since(*t) < self.window);
            !attempts.is_empty()
        });
        before - map.len()
    }
}

/// Stable, non-reversible key for a client address.
pub fn hash_ip(ip: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    hex::encode(hasher.finalize())
}
