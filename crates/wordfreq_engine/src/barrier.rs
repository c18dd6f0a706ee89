use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use engine_logging::engine_error;

/// How a registered unit of work ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Merged,
    Failed,
}

/// Point-in-time copy of the barrier counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarrierSnapshot {
    pub launched: usize,
    pub outstanding: usize,
    pub merged: usize,
    pub failed: usize,
    pub sealed: bool,
    pub abandoned: bool,
}

impl BarrierSnapshot {
    /// All registered work has settled and no more can be registered.
    pub fn is_complete(&self) -> bool {
        self.sealed && self.outstanding == 0
    }
}

/// Wait-group tracking map tasks that were launched but not yet merged.
///
/// Work is registered *before* its task is spawned, so a task can never settle
/// against a counter that does not yet account for it. The counters live
/// behind one mutex: a settle and the waiter's observation of zero are ordered
/// by that lock, which also publishes every merge done before the settle.
#[derive(Debug, Default)]
pub struct WorkBarrier {
    state: Mutex<BarrierSnapshot>,
    changed: Condvar,
}

impl WorkBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for one more task. Must be called before the task is launched.
    pub fn register(&self) {
        let mut state = self.lock();
        if state.sealed {
            engine_error!("work registered on a sealed barrier");
        }
        state.launched += 1;
        state.outstanding += 1;
    }

    /// Marks one registered task as done.
    pub fn settle(&self, settlement: Settlement) {
        let mut state = self.lock();
        if state.outstanding == 0 {
            engine_error!("settle without outstanding work ({settlement:?}); ignored");
            return;
        }
        state.outstanding -= 1;
        match settlement {
            Settlement::Merged => state.merged += 1,
            Settlement::Failed => state.failed += 1,
        }
        if state.is_complete() {
            self.changed.notify_all();
        }
    }

    /// No further work will be registered.
    pub fn seal(&self) {
        let mut state = self.lock();
        state.sealed = true;
        if state.is_complete() {
            self.changed.notify_all();
        }
    }

    /// Releases waiters because a loop died and the counters can no longer reach zero.
    pub fn abandon(&self) {
        let mut state = self.lock();
        state.abandoned = true;
        self.changed.notify_all();
    }

    pub fn snapshot(&self) -> BarrierSnapshot {
        *self.lock()
    }

    /// Blocks until the barrier is complete or abandoned.
    pub fn wait(&self) -> BarrierSnapshot {
        let guard = self.lock();
        let state = self
            .changed
            .wait_while(guard, |state| !state.is_complete() && !state.abandoned)
            .unwrap_or_else(PoisonError::into_inner);
        *state
    }

    // Counters are plain integers updated without panicking while locked, so a
    // poisoned lock still holds consistent data.
    fn lock(&self) -> MutexGuard<'_, BarrierSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Abandons the barrier if the owning thread unwinds.
pub(crate) struct AbandonOnPanic<'a>(pub(crate) &'a WorkBarrier);

impl Drop for AbandonOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.abandon();
        }
    }
}
