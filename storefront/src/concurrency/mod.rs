//! Synchronization primitives coordinating the producer and the consumers.
//!
//! - [`signal`] provides [`signal::CountingSignal`], the blocking counting semaphore used for the
//!   empty-slot and filled-slot tokens.
//! - [`shutdown`] provides [`shutdown::ShutdownCoordinator`], which owns the end-of-run flags and
//!   the conditions consumers and completion waiters park on.
//!
//! Lock order is fixed across the crate: a slot token is always held before the buffer lock is
//! taken, the buffer lock is released before the coordinator lock is taken, and signal locks are
//! leaves that may be taken while the coordinator lock is held.

pub mod shutdown;
pub mod signal;
