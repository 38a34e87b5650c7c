//! Blocking counting signal.
//!
//! [`CountingSignal`] is a classic counting semaphore built on a [`Mutex`] and a [`Condvar`].
//! Waiters are suspended by the condition variable instead of spinning on the count, and the
//! decrement happens under the same lock that observed a positive count.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Counting semaphore tracking available slot tokens.
///
/// The simulation uses two of them: one counting empty slots, created full at the buffer
/// capacity, and one counting filled slots, created at zero with no capacity.
#[derive(Debug)]
pub struct CountingSignal {
    count: Mutex<usize>,
    available: Condvar,
    capacity: Option<usize>,
}

impl CountingSignal {
    /// Creates a signal holding `initial` tokens.
    ///
    /// `capacity` is informational: [`CountingSignal::release`] never blocks and never fails,
    /// keeping releases within the capacity is the caller's protocol.
    pub fn new(initial: usize, capacity: Option<usize>) -> Self {
        Self {
            count: Mutex::new(initial),
            available: Condvar::new(),
            capacity,
        }
    }

    /// Takes a token, blocking the calling thread until one is available.
    ///
    /// There is no timeout: a matching [`CountingSignal::release`] is guaranteed by the
    /// producer/consumer protocol, not by this primitive.
    pub fn acquire(&self) {
        let count = self.lock_count();
        let mut count = self
            .available
            .wait_while(count, |count| *count == 0)
            .unwrap_or_else(PoisonError::into_inner);
        *count -= 1;
    }

    /// Takes a token if one is available right now.
    pub fn try_acquire(&self) -> bool {
        let mut count = self.lock_count();
        if *count == 0 {
            return false;
        }

        *count -= 1;
        true
    }

    /// Returns a token and wakes at most one blocked [`CountingSignal::acquire`].
    pub fn release(&self) {
        let mut count = self.lock_count();
        *count += 1;
        self.available.notify_one();
    }

    /// Returns the current number of tokens.
    ///
    /// The value may be stale as soon as it is returned; it is meant for diagnostics only.
    pub fn count(&self) -> usize {
        *self.lock_count()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    // The count is a plain integer updated in a single statement, so a poisoned lock still
    // guards a consistent value.
    fn lock_count(&self) -> MutexGuard<'_, usize> {
        self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
