/// Session Plumbing - Shared by the Playground and Practice Flows
///
/// **Responsibility:**
/// Submit, poll and classify one job, and own the display state of a flow.
///
/// **Display Rules:**
/// - Each flow overwrites the `Feedback` slot wholesale
/// - Errors are rendered into the slot instead of being returned
/// - A front end only ever reads that one field

use crate::classifier;
use crate::client::JobBackend;
use crate::error::Result;
use crate::poll::{self, PollPolicy};
use crate::types::{Feedback, JobRequest, Outcome};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub policy: PollPolicy,
    /// Report a job still in flight after the last poll as `PollTimeout`
    /// instead of classifying its fields as-is
    pub flag_poll_timeouts: bool,
}

impl SessionOptions {
    pub fn new(policy: PollPolicy) -> Self {
        Self {
            policy,
            flag_poll_timeouts: false,
        }
    }

    pub fn with_poll_timeouts(mut self, flag: bool) -> Self {
        self.flag_poll_timeouts = flag;
        self
    }
}

/// Submit, poll until terminal or out of budget, classify.
pub async fn execute<B>(
    backend: &B,
    request: &JobRequest,
    options: &SessionOptions,
    expected: Option<&str>,
) -> Result<Outcome>
where
    B: JobBackend + ?Sized,
{
    let handle = backend.submit(request).await?;
    info!(
        token = %handle,
        language_id = request.language_id,
        source_size = request.source_code.len(),
        "Job accepted by backend"
    );

    let result = poll::wait_for_result(backend, &handle, options.policy).await?;
    let outcome = classifier::classify_polled(&result, expected, options.flag_poll_timeouts);

    info!(token = %handle, kind = ?outcome.kind, correct = ?outcome.correct, "Job classified");
    Ok(outcome)
}

/// Holds the feedback slot in the `Busy` state for the life of a flow.
///
/// If the flow future is dropped before `finish`, the slot falls back to
/// `Idle` so the session never stays busy.
pub(crate) struct BusyGuard<'a> {
    slot: &'a mut Feedback,
}

impl<'a> BusyGuard<'a> {
    pub(crate) fn engage(slot: &'a mut Feedback, message: &str) -> Self {
        *slot = Feedback::Busy(message.to_string());
        Self { slot }
    }

    pub(crate) fn finish(self, feedback: Feedback) {
        *self.slot = feedback;
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if matches!(self.slot, Feedback::Busy(_)) {
            *self.slot = Feedback::Idle;
        }
    }
}
