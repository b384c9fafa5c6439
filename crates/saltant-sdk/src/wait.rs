// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Waiting for a task instance to reach a terminal state.
//!
//! The server has no push notifications, so waiting is a fixed-interval
//! polling loop: fetch, return if terminal, otherwise sleep and repeat.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{Result, SdkError};
use crate::types::TaskInstance;

/// Default interval between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Polls are never issued more often than this.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Options for waiting on a task instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaitOptions {
    /// Interval between polls; `None` uses the client's configured interval.
    pub poll_interval: Option<Duration>,
    /// Give up after this long; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl WaitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Fetch until the instance is terminal or the timeout passes.
///
/// A fetch always happens first, so an already-terminal instance costs
/// exactly one request, and a zero timeout still observes the current state
/// once before failing.
pub(crate) fn poll_until_terminal<F>(
    mut fetch: F,
    poll_interval: Duration,
    timeout: Option<Duration>,
) -> Result<TaskInstance>
where
    F: FnMut() -> Result<TaskInstance>,
{
    let poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
    let started = Instant::now();
    let mut polls: u32 = 0;

    loop {
        let instance = fetch()?;
        polls += 1;
        debug!(uuid = %instance.uuid, state = %instance.state, polls, "Polled task instance");

        if instance.state.is_terminal() {
            return Ok(instance);
        }

        let elapsed = started.elapsed();
        let sleep_for = match timeout {
            Some(limit) if elapsed >= limit => {
                warn!(
                    uuid = %instance.uuid,
                    state = %instance.state,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Timed out waiting for task instance"
                );
                return Err(SdkError::Timeout(limit.as_millis() as u64));
            }
            Some(limit) => poll_interval.min(limit - elapsed),
            None => poll_interval,
        };

        std::thread::sleep(sleep_for);
    }
}
