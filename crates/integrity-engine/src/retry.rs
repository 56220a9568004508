//! Retrying wrapper for vision delegates
//!
//! Vision calls fail transiently (rate limits, 5xx). Bad requests are returned
//! immediately; everything else is retried with exponential backoff, tripled
//! for rate limits.

use crate::error::VisionError;
use crate::vision::VisionVerifier;
use loa_types::VisionResponse;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            initial_delay_ms: 2_000,
            max_delay_ms: 60_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Retry without sleeping between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay_ms: 0,
            max_delay_ms: 0,
            backoff_multiplier: 1.0,
        }
    }

    /// Delay to use after `current` failed with `err`
    pub fn next_delay(&self, current: Duration, err: &VisionError) -> Duration {
        let factor = if err.is_rate_limited() {
            3.0
        } else {
            self.backoff_multiplier
        };
        let cap = Duration::from_millis(self.max_delay_ms);
        Duration::try_from_secs_f64(current.as_secs_f64() * factor)
            .unwrap_or(cap)
            .min(cap)
    }
}

pub struct RetryingVerifier<V> {
    inner: V,
    policy: RetryPolicy,
}

impl<V: VisionVerifier> RetryingVerifier<V> {
    pub fn new(inner: V, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    fn attempt(&self, document_path: &str) -> Result<VisionResponse, VisionError> {
        let response = self
            .inner
            .verify_document_integrity(document_path)
            .map_err(VisionError::classified)?;
        if response.success {
            Ok(response)
        } else {
            let message = response
                .error
                .unwrap_or_else(|| "Unknown error".to_string());
            Err(VisionError::from_message(message))
        }
    }
}

impl<V: VisionVerifier> VisionVerifier for RetryingVerifier<V> {
    fn verify_document_integrity(&self, document_path: &str) -> Result<VisionResponse, VisionError> {
        let attempts = self.policy.max_attempts.max(1);
        let mut delay = Duration::from_millis(self.policy.initial_delay_ms);
        let mut last: Option<VisionError> = None;

        for attempt in 1..=attempts {
            info!(
                "Vision call attempt {}/{} via {}",
                attempt,
                attempts,
                self.inner.name()
            );

            match self.attempt(document_path) {
                Ok(response) => {
                    if attempt > 1 {
                        info!("Vision call succeeded on attempt {}", attempt);
                    }
                    return Ok(response);
                }
                Err(err) if !err.is_retryable() => {
                    error!("Vision call rejected, not retrying: {}", err);
                    return Err(err);
                }
                Err(err) => {
                    warn!("Attempt {}/{} failed: {}", attempt, attempts, err);
                    if attempt < attempts {
                        if !delay.is_zero() {
                            info!("Waiting {:.1} seconds before retry", delay.as_secs_f64());
                            std::thread::sleep(delay);
                        }
                        delay = self.policy.next_delay(delay, &err);
                    }
                    last = Some(err);
                }
            }
        }

        let last = last.map(|e| e.to_string()).unwrap_or_default();
        error!("Vision call failed after {} attempts", attempts);
        Err(VisionError::Exhausted { attempts, last })
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
