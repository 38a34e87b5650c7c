use std::fmt;
use std::sync::Arc;

use config::shared::{PacingConfig, SimulationConfig};

use crate::buffer::SlotBuffer;
use crate::concurrency::shutdown::ShutdownCoordinator;
use crate::concurrency::signal::CountingSignal;
use crate::observer::{Observer, SimulationEvent};
use crate::types::Progress;

/// State shared by every thread of a run.
///
/// Built once by the simulation before any thread is spawned and handed to each worker as an
/// [`Arc`]. It is dropped when the last worker and the simulation handle let go of it.
pub struct SharedContext {
    /// Number of items the producer makes.
    pub total: u64,
    pub pacing: PacingConfig,
    pub buffer: SlotBuffer,
    /// Tokens for empty slots, starting at the buffer capacity.
    pub empty: CountingSignal,
    /// Tokens for filled slots, starting at zero.
    pub filled: CountingSignal,
    pub coordinator: ShutdownCoordinator,
    observer: Arc<dyn Observer>,
}

impl SharedContext {
    pub fn new(config: &SimulationConfig, observer: Arc<dyn Observer>) -> Self {
        let capacity = config.buffer_capacity;

        Self {
            total: config.items,
            pacing: config.pacing,
            buffer: SlotBuffer::new(capacity, config.items),
            empty: CountingSignal::new(capacity, Some(capacity)),
            filled: CountingSignal::new(0, None),
            coordinator: ShutdownCoordinator::new(config.items),
            observer,
        }
    }

    pub fn emit(&self, event: SimulationEvent) {
        self.observer.on_event(event);
    }

    /// Reads the progress counters. `producer_finished` and `live_consumers` are filled in by
    /// the caller, which owns the thread handles.
    pub fn progress(&self, producer_finished: bool, live_consumers: usize) -> Progress {
        let shutdown = self.coordinator.state();

        Progress {
            total: self.total,
            produced: self.buffer.produced(),
            consumed: self.buffer.consumed(),
            occupied: self.buffer.occupied(),
            all_produced: shutdown.all_produced,
            all_consumed: shutdown.all_consumed,
            producer_finished,
            live_consumers,
        }
    }
}

impl fmt::Debug for SharedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedContext")
            .field("total", &self.total)
            .field("pacing", &self.pacing)
            .field("buffer", &self.buffer)
            .field("empty", &self.empty)
            .field("filled", &self.filled)
            .field("coordinator", &self.coordinator)
            .finish_non_exhaustive()
    }
}
