//! Helpers for testing simulations.
//!
//! - [`observer`] records the events of a run and answers questions about them.
//! - [`wait`] bounds every wait with a timeout so that a liveness bug fails a test instead of
//!   hanging it.
//! - [`fixtures`] builds run configurations without random pauses.

pub mod fixtures;
pub mod observer;
pub mod wait;
