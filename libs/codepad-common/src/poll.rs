/// Poll Scheduler - Wait for a Terminal Job Status
///
/// Drives suspend-then-fetch steps against a submitted job until the backend
/// reports a terminal status or the attempt budget runs out.
///
/// **Loop rules:**
/// - Every attempt, the first included, waits one full interval before fetching
/// - Fetches are strictly sequential; never two in flight for one handle
/// - `status.id > 2` ends the loop immediately with that result
/// - An exhausted budget returns the last fetched result unchanged, still in
///   flight; callers check `JobResult::is_in_flight()` for staleness
/// - The interval is constant and there is no wall-clock deadline
/// - Transport errors abort the loop and propagate

use crate::client::JobBackend;
use crate::error::Result;
use crate::types::{JobHandle, JobResult};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Attempt budget and fixed wait between fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl PollPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_INTERVAL)
    }
}

/// Wait for a job to reach a terminal status.
///
/// Returns the terminal result, or the last (in-flight) result once
/// `max_attempts` fetches have been made. A zero budget performs one
/// attempt so there is always a result to hand back.
#[instrument(skip(backend), fields(token = %handle))]
pub async fn wait_for_result<B>(backend: &B, handle: &JobHandle, policy: PollPolicy) -> Result<JobResult>
where
    B: JobBackend + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        tokio::time::sleep(policy.interval).await;

        let result = backend.fetch(handle).await?;
        debug!(attempt, status_id = ?result.status_id(), "Polled job");

        if result.is_terminal() {
            info!(
                attempt,
                status_id = ?result.status_id(),
                "Job reached terminal status"
            );
            return Ok(result);
        }

        if attempt >= max_attempts {
            warn!(
                attempts = attempt,
                status_id = ?result.status_id(),
                "Poll budget exhausted before terminal status"
            );
            return Ok(result);
        }
    }
}
