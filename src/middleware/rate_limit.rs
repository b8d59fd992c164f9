//! Rate limiting
//! 
//! Keyed limiter that throttles login attempts per email address.

use std::num::NonZeroU32;
use std::sync::Arc;
use governor::{
    clock::DefaultClock,
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};
use tracing::{debug, warn};
use crate::utils::errors::{EventDeskError, Result};

type KeyedLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Tracked keys above which idle entries are dropped
pub const PRUNE_THRESHOLD: usize = 10_000;

/// Per-key limiter for login attempts
#[derive(Clone)]
pub struct LoginRateLimiter {
    limiter: Arc<KeyedLimiter>,
    attempts_per_minute: u32,
    prune_threshold: usize,
}

impl LoginRateLimiter {
    /// Create a limiter allowing `attempts_per_minute` attempts per key (at least one)
    pub fn new(attempts_per_minute: u32) -> Self {
        let quota = NonZeroU32::new(attempts_per_minute).unwrap_or(NonZeroU32::MIN);
        Self::with_quota(Quota::per_minute(quota), quota.get(), PRUNE_THRESHOLD)
    }

    fn with_quota(quota: Quota, attempts_per_minute: u32, prune_threshold: usize) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            attempts_per_minute,
            prune_threshold,
        }
    }

    /// Record an attempt for `key`, failing once the quota is used up
    pub fn check(&self, key: &str) -> Result<()> {
        let key = key.trim().to_lowercase();
        let outcome = self.limiter.check_key(&key);
        self.prune_idle_keys();
        match outcome {
            Ok(()) => {
                debug!(key = %key, "Rate limit check passed");
                Ok(())
            }
            Err(_) => {
                warn!(key = %key, limit = self.attempts_per_minute, "Rate limit exceeded");
                Err(EventDeskError::RateLimitExceeded)
            }
        }
    }

    pub fn attempts_per_minute(&self) -> u32 {
        self.attempts_per_minute
    }

    /// Number of keys currently holding limiter state
    pub fn tracked_keys(&self) -> usize {
        self.limiter.len()
    }

    fn prune_idle_keys(&self) {
        if self.limiter.len() <= self.prune_threshold {
            return;
        }
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        debug!(remaining = self.limiter.len(), "Pruned idle rate limit keys");
    }
}

impl std::fmt::Debug for LoginRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRateLimiter")
            .field("attempts_per_minute", &self.attempts_per_minute)
            .finish()
    }
}
