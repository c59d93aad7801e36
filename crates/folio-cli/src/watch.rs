//! # Review Board Watcher
//!
//! Polls `GET /api/reviews` on a fixed interval and hands each successful
//! listing to a callback. The task runs until [`WatchHandle::stop`] is
//! awaited or the handle is dropped.
//!
//! Each tick issues exactly one read. A read already in flight when the
//! watcher is stopped runs to completion; cancellation is observed between
//! ticks. Failed reads are logged and the next tick tries again.

use std::time::Duration;

use folio_core::ReviewView;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::ApiClient;

/// Spawns review-board polling tasks.
pub struct ReviewWatcher;

impl ReviewWatcher {
    /// Start polling. The first read happens immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<F>(client: ApiClient, interval: Duration, mut on_update: F) -> WatchHandle
    where
        F: FnMut(Vec<ReviewView>) + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    // Resolves on an explicit stop and when the sender is dropped.
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        match client.list_reviews().await {
                            Ok(reviews) => on_update(reviews),
                            Err(e) => tracing::warn!("review refresh failed: {e:#}"),
                        }
                    }
                }
            }
            tracing::debug!("review watcher stopped");
        });

        WatchHandle {
            stop: stop_tx,
            task,
        }
    }
}

/// Handle to a running [`ReviewWatcher`] task. Dropping it cancels the task.
#[derive(Debug)]
pub struct WatchHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl WatchHandle {
    /// Stop polling and wait for the task to finish.
    pub async fn stop(self) {
        let WatchHandle { stop, task } = self;
        // The task may already have exited.
        let _ = stop.send(());
        if let Err(e) = task.await {
            tracing::warn!("review watcher task failed: {e}");
        }
    }

    /// Whether the polling task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
