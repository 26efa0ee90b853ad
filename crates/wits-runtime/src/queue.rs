//! Ready queue shared by the generator (push) and the coordinator (pop).

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use wits_core::GeneratedTurn;

/// Thread-safe FIFO of generated turns.
///
/// Operations never wait on anything but the lock, which is held only for
/// the push/pop itself (plus the caller's closure in `pop_with`).
#[derive(Debug, Default)]
pub(crate) struct ReadyQueue {
    items: Mutex<VecDeque<GeneratedTurn>>,
}

impl ReadyQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, turn: GeneratedTurn) {
        self.lock().push_back(turn);
    }

    /// Pop the oldest turn and run `f` on it before releasing the lock.
    ///
    /// Anyone reading [`len`](Self::len) waits until `f` returns, so the
    /// shorter queue is never visible before `f`'s side effects.
    pub(crate) fn pop_with<R>(&self, f: impl FnOnce(GeneratedTurn) -> R) -> Option<R> {
        let mut items = self.lock();
        items.pop_front().map(f)
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    // A panic while holding the lock cannot leave a VecDeque half-modified,
    // so a poisoned queue is still usable.
    fn lock(&self) -> MutexGuard<'_, VecDeque<GeneratedTurn>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
