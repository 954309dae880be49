/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Client-side throttling of outgoing API requests
//!
//! Token bucket from the `governor` crate: `max_requests` cells replenish
//! evenly over `period_seconds`, and up to `burst_size` requests may go out
//! back to back.

use crate::application::config::RateLimiterConfig;
use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

const FALLBACK_BURST: NonZeroU32 = NonZeroU32::MIN;

/// Shared request throttle
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl RateLimiter {
    /// Creates a rate limiter from configuration
    ///
    /// Zero values are clamped to one so a misconfigured environment slows
    /// requests down instead of panicking.
    #[must_use]
    pub fn new(config: &RateLimiterConfig) -> Self {
        let max_requests = config.max_requests.max(1);
        let period = Duration::from_secs(config.period_seconds.max(1));
        let replenish = period / max_requests;

        let burst_size = NonZeroU32::new(config.burst_size).unwrap_or(FALLBACK_BURST);

        let quota = Quota::with_period(replenish)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst_size);

        Self {
            limiter: Arc::new(GovernorRateLimiter::direct(quota)),
        }
    }

    /// Waits until the next request may be sent
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Whether a request may be sent right now; consumes a cell when it may
    #[must_use]
    pub fn check(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limiter", &"GovernorRateLimiter")
            .finish()
    }
}
