//! Termination handshake between the producer, the consumers and the orchestrator.
//!
//! [`ShutdownCoordinator`] owns the two monotonic flags of a run, `all_produced` and
//! `all_consumed`, behind one mutex. Consumers park on the `changed` condition while the shelf is
//! empty and re-check their predicate on every wake, so spurious wakeups and broadcasts meant for
//! other waiters are harmless. Threads waiting for the end of the run park on a separate
//! `completed` condition: a single-item wake on `changed` must always reach a consumer.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::concurrency::signal::CountingSignal;

/// Flags tracked by the [`ShutdownCoordinator`]. Both only ever go from `false` to `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShutdownState {
    pub all_produced: bool,
    pub all_consumed: bool,
}

/// What a consumer should do after waiting on the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// A filled-slot token was claimed; the consumer must take exactly one item.
    Claimed,
    /// Every item has been bought.
    AllConsumed,
    /// Production is over and no filled slot is left to claim.
    NothingLeft,
}

/// Single authority over the end of a run.
#[derive(Debug)]
pub struct ShutdownCoordinator {
    total: u64,
    state: Mutex<ShutdownState>,
    changed: Condvar,
    completed: Condvar,
}

impl ShutdownCoordinator {
    /// Creates a coordinator for a run producing `total` items.
    pub fn new(total: u64) -> Self {
        Self {
            total,
            state: Mutex::new(ShutdownState::default()),
            changed: Condvar::new(),
            completed: Condvar::new(),
        }
    }

    pub fn state(&self) -> ShutdownState {
        *self.lock_state()
    }

    /// Records that the producer shelved its last item and wakes every waiter.
    ///
    /// With nothing to produce the run is also fully consumed. Returns `true` only for the call
    /// that flipped the flag.
    pub fn mark_all_produced(&self) -> bool {
        let mut state = self.lock_state();
        let flipped = !state.all_produced;
        state.all_produced = true;
        if self.total == 0 {
            state.all_consumed = true;
        }
        self.changed.notify_all();
        self.completed.notify_all();

        if flipped {
            debug!(total = self.total, "all items produced");
        }

        flipped
    }

    /// Records that every item has been bought and wakes every waiter.
    ///
    /// Safe to call any number of times; only the first call flips the flag and returns `true`,
    /// later calls just broadcast again.
    pub fn mark_all_consumed(&self) -> bool {
        let mut state = self.lock_state();
        let flipped = !state.all_consumed;
        state.all_consumed = true;
        self.changed.notify_all();
        self.completed.notify_all();

        if flipped {
            debug!(total = self.total, "all items consumed");
        }

        flipped
    }

    /// Wakes one consumer after a filled-slot token was released.
    ///
    /// Taking the lock before notifying means a consumer that has checked its predicate but not
    /// parked yet cannot miss the wake.
    pub fn notify_item_available(&self) {
        let _state = self.lock_state();
        self.changed.notify_one();
    }

    /// Parks the calling consumer until it can claim a filled slot or the run is over.
    ///
    /// The claim goes through [`CountingSignal::try_acquire`] under the coordinator lock, so two
    /// consumers can never both decide to take the last item and one of them block forever.
    pub fn wait_for_item(&self, filled: &CountingSignal) -> WaitOutcome {
        let mut state = self.lock_state();

        loop {
            if filled.try_acquire() {
                return WaitOutcome::Claimed;
            }

            if state.all_consumed {
                return WaitOutcome::AllConsumed;
            }

            // Producer raises `all_produced` only after releasing its last token, so an empty
            // filled signal here means the shelf is empty for good.
            if state.all_produced {
                return WaitOutcome::NothingLeft;
            }

            state = self
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Blocks until every item has been consumed.
    pub fn wait_all_consumed(&self) {
        let state = self.lock_state();
        let _state = self
            .completed
            .wait_while(state, |state| !state.all_consumed)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Blocks until every item has been consumed or `timeout` elapses.
    ///
    /// Returns whether the run is fully consumed.
    pub fn wait_all_consumed_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.lock_state();

        while !state.all_consumed {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }

            state = self
                .completed
                .wait_timeout(state, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }

        true
    }

    fn lock_state(&self) -> MutexGuard<'_, ShutdownState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
