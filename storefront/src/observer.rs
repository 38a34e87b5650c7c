//! Observation hooks for simulation events.
//!
//! The core never prints. Every externally visible step of a run is reported as a
//! [`SimulationEvent`] to an [`Observer`], which the binary renders to stdout and tests record.

use std::sync::Arc;

use crate::types::ConsumerId;

/// A step of a run, in the order the emitting thread performed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationEvent {
    ProductionStarted { total: u64 },
    /// The producer is about to wait for an empty slot.
    ProducerWaiting { serial: u64 },
    Produced { serial: u64, occupied: usize },
    /// The producer thread returned.
    ProductionFinished,
    AwaitingConsumers,
    /// A consumer claimed a filled slot and is about to take from the shelf.
    ConsumerWaiting { consumer_id: ConsumerId },
    Consumed {
        consumer_id: ConsumerId,
        serial: u64,
        /// 1-based position of this take among all takes of the run.
        sequence: u64,
        occupied: usize,
    },
    ConsumerExited {
        consumer_id: ConsumerId,
        consumed: u64,
    },
    SimulationCompleted { consumed: u64 },
}

/// Receiver of [`SimulationEvent`]s.
///
/// Called concurrently from the producer, the consumers and the waiting thread, never while a
/// buffer or coordinator lock is held.
pub trait Observer: Send + Sync {
    fn on_event(&self, event: SimulationEvent);
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_event(&self, _event: SimulationEvent) {}
}

impl<O> Observer for Arc<O>
where
    O: Observer + ?Sized,
{
    fn on_event(&self, event: SimulationEvent) {
        (**self).on_event(event);
    }
}
