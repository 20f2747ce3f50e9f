use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Allows at most one sync run at a time across scheduler triggers.
#[derive(Debug, Clone, Default)]
pub(super) struct RunGuard {
    running: Arc<AtomicBool>,
}

/// Held for the duration of a run; releases the guard on drop.
#[derive(Debug)]
pub(super) struct RunPermit {
    running: Arc<AtomicBool>,
}

impl RunGuard {
    /// Returns a permit, or `None` if a run is already in progress.
    pub(super) fn try_start(&self) -> Option<RunPermit> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunPermit {
                running: Arc::clone(&self.running),
            })
    }
}

impl Drop for RunPermit {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}
