//! Repeated status checks with terminal-state handling.
//!
//! The poller issues one fetch immediately, then one per interval tick,
//! applying each result to the shared page. Requests are serialized: the
//! next tick is not processed until the in-flight fetch resolves, so
//! updates always apply in issue order and a slow endpoint stretches the
//! effective interval instead of stacking requests.
//!
//! All terminal conditions stop the loop: the document becoming processed,
//! a backend-reported job failure, a transport failure (never retried), or
//! cancellation through the handle.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::config::DEFAULT_POLL_INTERVAL_MS;
use crate::models::{DocumentStatus, JobStatus};
use crate::page::SharedPage;
use crate::status::StatusClient;

/// How a polling run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The document finished processing; the completion hook ran.
    Completed,
    /// The backend reported the processing job failed.
    Failed,
    /// A transport failure ended polling.
    TransportError,
    /// The handle was cancelled before any terminal status.
    Cancelled,
    /// The page has no status region; nothing was polled.
    Skipped,
}

/// Handle to a running poll task.
///
/// Owned by the caller, who is responsible for stopping the poll when the
/// page goes away: [`cancel`](Self::cancel) stops it gracefully, dropping
/// the handle aborts it outright.
pub struct PollingHandle {
    stop: watch::Sender<bool>,
    task: Option<JoinHandle<PollOutcome>>,
}

impl PollingHandle {
    /// Stop polling at the next loop iteration.
    pub fn cancel(&self) {
        let _ = self.stop.send(true);
    }

    /// True once the poll task has reached an outcome.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map(|t| t.is_finished()).unwrap_or(true)
    }

    /// Wait for the task to finish and return how it ended.
    pub async fn outcome(mut self) -> PollOutcome {
        match self.task.take() {
            Some(task) => task.await.unwrap_or(PollOutcome::Cancelled),
            None => PollOutcome::Cancelled,
        }
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Polls the status endpoint for a document and applies updates to a page.
pub struct StatusPoller {
    client: StatusClient,
    interval: Duration,
}

impl StatusPoller {
    /// Create a poller with the default check interval.
    pub fn new(client: StatusClient) -> Self {
        Self {
            client,
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Override the check interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start polling `document_id`, updating `page` until a terminal state.
    ///
    /// `on_complete` runs exactly once, when the document becomes
    /// processed; the caller re-renders or swaps in the results there.
    /// If the page has no status region the call is a no-op and the
    /// returned handle resolves to [`PollOutcome::Skipped`].
    pub fn start<F>(&self, page: SharedPage, document_id: i64, on_complete: F) -> PollingHandle
    where
        F: FnOnce() + Send + 'static,
    {
        if !page.lock().expect("page mutex poisoned").has_status_region() {
            debug!("Page has no status region, skipping polling for document {}", document_id);
            let (stop, _) = watch::channel(false);
            let task = tokio::spawn(async { PollOutcome::Skipped });
            return PollingHandle { stop, task: Some(task) };
        }

        let (stop, mut stopped) = watch::channel(false);
        let client = self.client.clone();
        let interval = self.interval;
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut on_complete = Some(on_complete);

            loop {
                tokio::select! {
                    _ = stopped.changed() => {
                        debug!("Polling cancelled for document {}", document_id);
                        return PollOutcome::Cancelled;
                    }
                    _ = ticker.tick() => {}
                }

                match client.fetch_status(document_id).await {
                    Ok(status) => {
                        if let Some(outcome) =
                            apply_status(&page, document_id, &status, &mut on_complete)
                        {
                            return outcome;
                        }
                    }
                    Err(err) => {
                        error!("Error checking status for document {}: {}", document_id, err);
                        page.lock().expect("page mutex poisoned").mark_error();
                        return PollOutcome::TransportError;
                    }
                }
            }
        });

        PollingHandle { stop, task: Some(task) }
    }
}

/// Apply one status payload to the page. Returns the outcome when the
/// status is terminal, `None` to keep polling.
fn apply_status<F>(
    page: &SharedPage,
    document_id: i64,
    status: &DocumentStatus,
    on_complete: &mut Option<F>,
) -> Option<PollOutcome>
where
    F: FnOnce(),
{
    let mut view = page.lock().expect("page mutex poisoned");

    if status.processed {
        view.mark_completed();
        // Run the hook without holding the page lock.
        drop(view);
        if let Some(hook) = on_complete.take() {
            hook();
        }
        info!("Document {} processing complete", document_id);
        return Some(PollOutcome::Completed);
    }

    match status.job_status {
        JobStatus::Processing => {
            view.mark_processing();
            None
        }
        JobStatus::Pending => {
            view.mark_pending();
            None
        }
        JobStatus::Failed => {
            view.mark_failed(status.error.as_deref());
            info!(
                "Document {} processing failed: {}",
                document_id,
                status.error.as_deref().unwrap_or("no error reported")
            );
            Some(PollOutcome::Failed)
        }
        // A completed job without the processed flag, or no job at all,
        // leaves the display alone; `processed` decides completion.
        JobStatus::Completed | JobStatus::Unknown => {
            debug!(
                "Document {} reported {}, waiting for processed flag",
                document_id, status.job_status
            );
            None
        }
    }
}
