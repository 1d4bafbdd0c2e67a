//! # Dispatchers
//!
//! A [`Dispatcher`] is the execution context a repository runs its work on.
//! Every repository call becomes one independent [`Task`]; the dispatcher
//! decides where it runs and therefore where the callbacks are delivered.
//!
//! Tasks are never cancelled and never ordered relative to each other.

use std::future::Future;
use std::pin::Pin;
use tokio::runtime::Handle;
use tracing::Instrument;

/// One unit of asynchronous work.
pub type Task = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Runs tasks without blocking the caller.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, task: Task);
}

/// Spawns each task onto a Tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioDispatcher {
    handle: Handle,
}

impl TokioDispatcher {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Uses the runtime of the calling context.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime, like [`Handle::current`].
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Uses the runtime of the calling context, if there is one.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Dispatcher for TokioDispatcher {
    fn dispatch(&self, task: Task) {
        // The caller's span follows the task so callbacks log in context.
        self.handle.spawn(task.in_current_span());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_dispatch_runs_task_without_blocking_caller() {
        let dispatcher = TokioDispatcher::current();
        let (tx, rx) = oneshot::channel();

        dispatcher.dispatch(Box::pin(async move {
            let _ = tx.send(42);
        }));

        assert_eq!(rx.await.unwrap(), 42);
    }

    #[test]
    fn test_try_current_outside_runtime_is_none() {
        assert!(TokioDispatcher::try_current().is_none());
    }
}
