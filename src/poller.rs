//! Render job lifecycle: submit, poll on a fixed interval, stop at a terminal state.
//!
//! DESIGN
//! ======
//! Each submission runs as one spawned task owned by a `PollTask`. Dropping
//! the `PollTask` aborts the task, so replacing or cancelling a job cannot
//! leave a second loop running. State transitions are streamed to the
//! caller over a bounded per-job channel; the channel closes when the job
//! reaches a terminal state or is aborted. A reader that falls behind loses
//! intermediate `Polling` updates, never `Submitting` or the terminal state.
//!
//! ERROR HANDLING
//! ==============
//! A failed submission ends the job in `Errored`. A failed status query is
//! logged and the next tick proceeds.

#[cfg(test)]
#[path = "poller_test.rs"]
mod poller_test;

use std::sync::Arc;
use std::time::Duration;

use canvas::submission::SubmissionPayload;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::api::{JobStatus, RenderService, TaskId};

/// Updates buffered per job before progress updates are dropped.
pub const UPDATE_BUFFER: usize = 16;

// =============================================================================
// STATE
// =============================================================================

/// Where a render job is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Submitting,
    /// Accepted by the service; `polls` status queries made so far.
    Polling { task_id: TaskId, polls: u32 },
    /// `url` is absent only if the service reported `Done` without one.
    Completed { task_id: TaskId, url: Option<String> },
    Failed { task_id: TaskId },
    /// The submission itself failed.
    Errored { message: String },
}

impl JobState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Failed { .. } | Self::Errored { .. })
    }

    /// Status line shown to the user.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Submitting | Self::Polling { .. } => "Processing...".to_owned(),
            Self::Completed { .. } => "Done!".to_owned(),
            Self::Failed { .. } => "Generation Failed".to_owned(),
            Self::Errored { message } => format!("Error: {message}"),
        }
    }
}

/// Stream of state transitions for one job.
#[derive(Debug)]
pub struct JobUpdates {
    rx: mpsc::Receiver<JobState>,
}

impl JobUpdates {
    /// Next transition, or `None` once the job is finished or cancelled.
    pub async fn next(&mut self) -> Option<JobState> {
        self.rx.recv().await
    }
}

// =============================================================================
// TASK
// =============================================================================

#[derive(Debug)]
struct PollTask(JoinHandle<()>);

impl PollTask {
    fn is_running(&self) -> bool {
        !self.0.is_finished()
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Owns at most one running render job.
pub struct JobPoller {
    service: Arc<dyn RenderService>,
    interval: Duration,
    task: Option<PollTask>,
}

impl JobPoller {
    #[must_use]
    pub fn new(service: Arc<dyn RenderService>, interval: Duration) -> Self {
        Self { service, interval, task: None }
    }

    /// Start a job for `payload`, cancelling any job already in flight.
    ///
    /// Must be called within a tokio runtime.
    pub fn submit(&mut self, payload: SubmissionPayload) -> JobUpdates {
        if self.cancel() {
            info!("superseding in-flight render job");
        }
        let (tx, rx) = mpsc::channel(UPDATE_BUFFER);
        let handle = tokio::spawn(run_job(Arc::clone(&self.service), payload, self.interval, tx));
        self.task = Some(PollTask(handle));
        JobUpdates { rx }
    }

    /// Stop the current job, if any. Returns whether one was still running.
    pub fn cancel(&mut self) -> bool {
        self.task.take().is_some_and(|task| task.is_running())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(PollTask::is_running)
    }
}

// =============================================================================
// JOB LOOP
// =============================================================================

/// Returns false once the receiver is gone.
async fn emit(tx: &mpsc::Sender<JobState>, state: JobState) -> bool {
    tx.send(state).await.is_ok()
}

/// Like [`emit`], but drops the update instead of waiting when the buffer is full.
fn emit_progress(tx: &mpsc::Sender<JobState>, state: JobState) -> bool {
    match tx.try_send(state) {
        Ok(()) => true,
        Err(TrySendError::Full(dropped)) => {
            debug!(state = ?dropped, "update buffer full, dropping progress");
            true
        }
        Err(TrySendError::Closed(_)) => false,
    }
}

async fn run_job(service: Arc<dyn RenderService>, payload: SubmissionPayload, interval: Duration, tx: mpsc::Sender<JobState>) {
    if !emit(&tx, JobState::Submitting).await {
        return;
    }

    let task_id = match service.submit(&payload).await {
        Ok(task_id) => task_id,
        Err(e) => {
            warn!(error = %e, "render job submission failed");
            emit(&tx, JobState::Errored { message: e.to_string() }).await;
            return;
        }
    };
    info!(%task_id, "render job accepted");

    let mut polls = 0;
    if !emit(&tx, JobState::Polling { task_id: task_id.clone(), polls }).await {
        return;
    }

    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        polls += 1;
        match service.job_status(&task_id).await {
            Ok(response) => match response.status {
                JobStatus::Done => {
                    if response.url.is_none() {
                        warn!(%task_id, "job reported done without a result url");
                    }
                    info!(%task_id, polls, "render job completed");
                    emit(&tx, JobState::Completed { task_id, url: response.url }).await;
                    return;
                }
                JobStatus::Failed => {
                    info!(%task_id, polls, "render job failed");
                    emit(&tx, JobState::Failed { task_id }).await;
                    return;
                }
                JobStatus::Pending | JobStatus::Unknown => {
                    debug!(%task_id, polls, status = ?response.status, "render job still pending");
                    if !emit_progress(&tx, JobState::Polling { task_id: task_id.clone(), polls }) {
                        return;
                    }
                }
            },
            Err(e) if e.retryable() => warn!(%task_id, polls, error = %e, "status poll failed, retrying next tick"),
            Err(e) => error!(%task_id, polls, error = %e, "status poll returned an unusable answer, retrying next tick"),
        }
    }
}
