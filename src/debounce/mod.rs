//! Single-slot debounce timer
//!
//! Each call to [`Debouncer::schedule`] replaces whatever was armed before, so
//! only the last action in a burst ever runs. Must be used from within a tokio
//! runtime.

use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// Delays an action until the trigger has been quiet for `delay`
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Cancel any armed action and arm `action` to run once after the delay
    pub fn schedule<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }));
        trace!("debounce armed for {:?}", delay);
    }

    /// Disarm the pending action, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether an armed action has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
