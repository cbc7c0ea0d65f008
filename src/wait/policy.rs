use std::thread::sleep;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{E2eError, E2eResult};

/// Polling schedule: exponential backoff between attempts, bounded by a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaitPolicy {
    pub timeout_ms: u64,
    #[serde(default = "default_initial_interval")]
    pub initial_interval_ms: u64,
    #[serde(default = "default_max_interval")]
    pub max_interval_ms: u64,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Upper bound for deadlines set through [`WaitPolicy::with_timeout`].
    /// `None` honours them as given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling_ms: Option<u64>,
}

fn default_initial_interval() -> u64 {
    50
}

fn default_max_interval() -> u64 {
    1000
}

fn default_multiplier() -> f64 {
    2.0
}

impl WaitPolicy {
    pub fn new(timeout_ms: u64) -> Self {
        WaitPolicy {
            timeout_ms,
            initial_interval_ms: default_initial_interval(),
            max_interval_ms: default_max_interval(),
            multiplier: default_multiplier(),
            ceiling_ms: None,
        }
    }

    /// Same backoff, different deadline, bounded by the ceiling if one is set.
    pub fn with_timeout(self, timeout_ms: u64) -> Self {
        let timeout_ms = self.ceiling_ms.map_or(timeout_ms, |cap| timeout_ms.min(cap));
        WaitPolicy { timeout_ms, ..self }
    }

    pub fn with_ceiling(self, ceiling_ms: u64) -> Self {
        WaitPolicy {
            ceiling_ms: Some(ceiling_ms),
            ..self
        }
    }

    pub fn with_intervals(self, initial_ms: u64, max_ms: u64) -> Self {
        WaitPolicy {
            initial_interval_ms: initial_ms,
            max_interval_ms: max_ms.max(initial_ms),
            ..self
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Interval to sleep after `current`, capped at `max_interval_ms`.
    pub fn next_interval(&self, current: Duration) -> Duration {
        let grown = current.as_secs_f64() * self.multiplier.max(1.0);
        Duration::from_secs_f64(grown).min(Duration::from_millis(self.max_interval_ms))
    }

    /// Run `attempt` until it yields a value or the deadline passes.
    ///
    /// `attempt` runs at least once and once more at the deadline. Errors
    /// from `attempt` are not retried: they mean the session itself failed.
    pub fn poll<T>(
        &self,
        what: &str,
        mut attempt: impl FnMut() -> E2eResult<Option<T>>,
    ) -> E2eResult<T> {
        let start = Instant::now();
        let deadline = self.timeout();
        let mut interval = Duration::from_millis(self.initial_interval_ms);
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            if let Some(value) = attempt()? {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                trace!(what, attempts, elapsed_ms, "condition met");
                return Ok(value);
            }

            let elapsed = start.elapsed();
            if elapsed >= deadline {
                return Err(E2eError::Timeout {
                    what: what.to_string(),
                    elapsed,
                });
            }

            sleep(interval.min(deadline - elapsed));
            interval = self.next_interval(interval);
        }
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        WaitPolicy::new(5_000)
    }
}

/// The deadlines a harness works with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Retrying assertions (Playwright's `expect` default is 5 s)
    pub expect: WaitPolicy,
    /// Waiting for an element before acting on it
    pub action: WaitPolicy,
    /// URL changes and page loads
    pub navigation: WaitPolicy,
}

impl WaitConfig {
    pub fn from_millis(expect_ms: u64, action_ms: u64, navigation_ms: u64) -> Self {
        WaitConfig {
            expect: WaitPolicy::new(expect_ms),
            action: WaitPolicy::new(action_ms),
            navigation: WaitPolicy::new(navigation_ms),
        }
    }

    /// Short deadlines and fast polling, for scripted pages. Explicit
    /// deadlines are held to the same 200 ms.
    pub fn fast() -> Self {
        let policy = WaitPolicy::new(200).with_intervals(5, 20).with_ceiling(200);
        WaitConfig {
            expect: policy,
            action: policy,
            navigation: policy,
        }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        WaitConfig::from_millis(5_000, 30_000, 10_000)
    }
}
