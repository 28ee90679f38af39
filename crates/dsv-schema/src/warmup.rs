//! # Validator Warm-up
//!
//! When a schema is created, its root validator is compiled ahead of the
//! first `validate` call, off the caller's path when possible. Warm-up is
//! advisory: `validate` compiles through the same cache path if warm-up has
//! not run yet, so its results never depend on whether warm-up happened.
//!
//! Where the work runs is decided by an [`IdleScheduler`] picked when the
//! [`ValidationContext`](crate::context::ValidationContext) is built:
//!
//! | scheduler | behaviour |
//! |---|---|
//! | [`TokioIdleScheduler`] | spawned on a Tokio runtime, yields once, then compiles on the blocking pool |
//! | [`ImmediateScheduler`] | runs inline (no runtime available) |
//! | [`DisabledScheduler`] | drops the task |

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::schema::Schema;

/// A deferred unit of work.
pub type IdleTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks when the host has spare cycles.
pub trait IdleScheduler: Send + Sync {
    /// Queue `task`. Must not block on the task's completion.
    fn schedule_when_idle(&self, task: IdleTask);
}

/// Runs every task inline, immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl IdleScheduler for ImmediateScheduler {
    fn schedule_when_idle(&self, task: IdleTask) {
        task();
    }
}

/// Discards every task.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledScheduler;

impl IdleScheduler for DisabledScheduler {
    fn schedule_when_idle(&self, _task: IdleTask) {}
}

/// Defers tasks onto a Tokio runtime.
///
/// The spawned future yields once so already-queued work runs first, then
/// hands the task to the blocking pool: compilation is CPU-bound and must not
/// occupy an async worker.
#[derive(Debug, Clone)]
pub struct TokioIdleScheduler {
    handle: Handle,
}

impl TokioIdleScheduler {
    /// Scheduler bound to `handle`.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler bound to the current runtime, if there is one.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl IdleScheduler for TokioIdleScheduler {
    fn schedule_when_idle(&self, task: IdleTask) {
        self.handle.spawn(async move {
            tokio::task::yield_now().await;
            if let Err(e) = tokio::task::spawn_blocking(task).await {
                tracing::warn!(error = %e, "idle task did not complete");
            }
        });
    }
}

/// Idle scheduling if a Tokio runtime is current, inline otherwise.
pub fn default_scheduler() -> Arc<dyn IdleScheduler> {
    match TokioIdleScheduler::try_current() {
        Some(scheduler) => Arc::new(scheduler),
        None => {
            tracing::debug!("no tokio runtime, validator warm-up runs inline");
            Arc::new(ImmediateScheduler)
        }
    }
}

/// Schema-creation hook: schedule compilation of the root validator.
///
/// Failures are logged, not returned; the first `validate` reports them.
pub fn on_schema_created(schema: &Schema, scheduler: &dyn IdleScheduler) {
    let schema = schema.clone();
    scheduler.schedule_when_idle(Box::new(move || {
        match schema.cache().get_or_create(&schema, "") {
            Ok(_) => tracing::trace!(hash = %schema.hash(), "validator warmed up"),
            Err(e) => tracing::warn!(hash = %schema.hash(), error = %e, "validator warm-up failed"),
        }
    }));
}
