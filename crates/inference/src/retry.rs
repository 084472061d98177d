//! Bounded retry for transient provider failures
//!
//! Only failures classified as transient by [`BackendError::is_transient`]
//! are retried. A response that arrives but is unusable is never retried here.
//!
//! [`BackendError::is_transient`]: crate::backend::BackendError::is_transient

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first (1 = no retries)
    pub max_attempts: u32,
    /// Base backoff time in milliseconds
    pub backoff_base_ms: u64,
    /// Maximum backoff time in milliseconds
    pub backoff_max_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: defaults::MAX_ATTEMPTS,
            backoff_base_ms: defaults::BACKOFF_BASE_MS,
            backoff_max_ms: defaults::BACKOFF_MAX_MS,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Attempts actually made; a zero setting still makes one attempt
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay before retry number `attempt` (0-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let base = self.backoff_base_ms;
        let max = self.backoff_max_ms;

        // Exponential backoff: base * 2^attempt
        let delay_ms = base.saturating_mul(1u64 << attempt.min(10));
        let capped_ms = delay_ms.min(max);

        Duration::from_millis(capped_ms)
    }
}
