use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::AutosaveConfig;

/// Trailing-debounce coalescer for the wizard's auto-save.
///
/// Rapid field edits collapse into a single storage write: every call to
/// [`Debouncer::schedule`] cancels the pending flush and re-arms the timer,
/// so at most one write is in flight and the last write wins.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn from_config(config: &AutosaveConfig) -> Self {
        Self::new(config.debounce())
    }

    /// Run `flush` after the quiet period, cancelling any earlier pending
    /// flush.
    pub fn schedule<F>(&self, flush: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            flush.await;
        });

        let mut slot = self.pending.lock().expect("debouncer mutex poisoned");
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }

    /// Drop the pending flush, if any, without running it.
    pub fn cancel(&self) {
        let mut slot = self.pending.lock().expect("debouncer mutex poisoned");
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }

    pub fn has_pending(&self) -> bool {
        let slot = self.pending.lock().expect("debouncer mutex poisoned");
        slot.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
