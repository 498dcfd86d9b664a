//! Task supervisor: tracked background work with a drain barrier.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio_util::task::TaskTracker;

use postboard_core::result::AppResult;

/// Tracks detached background tasks so shutdown can wait for them.
///
/// Each spawned unit runs independently of the request that submitted it.
/// Errors and panics inside a unit are logged as background-task failures
/// and never propagate.
#[derive(Debug, Clone, Default)]
pub struct TaskSupervisor {
    tracker: TaskTracker,
}

impl TaskSupervisor {
    /// Create a new supervisor
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` in the background under supervision.
    pub fn spawn<F>(&self, name: &'static str, task: F)
    where
        F: Future<Output = AppResult<()>> + Send + 'static,
    {
        self.tracker.spawn(async move {
            match AssertUnwindSafe(task).catch_unwind().await {
                Ok(Ok(())) => tracing::debug!(task = name, "Background task finished"),
                Ok(Err(e)) => tracing::error!(task = name, error = %e, "Background task failed"),
                Err(panic) => tracing::error!(
                    task = name,
                    panic = %panic_message(panic.as_ref()),
                    "Background task panicked"
                ),
            }
        });
    }

    /// Number of tasks still running.
    pub fn outstanding(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every outstanding task has finished.
    ///
    /// No deadline applies. Tasks spawned while draining are waited on too.
    pub async fn drain(&self) {
        self.tracker.close();
        tracing::info!(
            outstanding = self.tracker.len(),
            "Waiting for background tasks to complete"
        );
        self.tracker.wait().await;
        tracing::info!("All background tasks completed");
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
