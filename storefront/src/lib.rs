//! Bounded-buffer producer/consumer simulation.
//!
//! One producer shelves numbered items into a fixed-capacity [`buffer::SlotBuffer`] while a
//! pool of consumers buys them. Slot availability is tracked by two
//! [`concurrency::signal::CountingSignal`]s and the end of the run is decided by the
//! [`concurrency::shutdown::ShutdownCoordinator`]. [`simulation::Simulation`] wires the pieces
//! together.

pub mod buffer;
pub mod concurrency;
pub mod context;
pub mod error;
mod macros;
pub mod observer;
pub mod simulation;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;
pub mod workers;
